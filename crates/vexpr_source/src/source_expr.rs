//! A single registered expression with line-start indexing.

use crate::expr_id::ExprId;

/// One expression held by the [`SourceDb`](crate::SourceDb).
///
/// Expressions are usually one line, but may contain newlines as whitespace
/// when they come from multi-line editors, so line starts are precomputed.
pub struct SourceExpr {
    /// The unique identifier for this expression.
    pub id: ExprId,
    /// Display name used in diagnostics (e.g. `params.txt:12` or `<arg 1>`).
    pub name: String,
    /// The raw expression text.
    pub text: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceExpr {
    /// Creates a new `SourceExpr` with precomputed line starts.
    pub fn new(id: ExprId, name: String, text: String) -> Self {
        let line_starts = compute_line_starts(&text);
        Self {
            id,
            name,
            text,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text between two byte offsets, or `""` if they do not
    /// fall on character boundaries inside the text.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        self.text.get(start as usize..end as usize).unwrap_or("")
    }

    /// Returns the full line of text containing the given byte offset.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let end = self.text[start..]
            .find('\n')
            .map_or(self.text.len(), |i| start + i);
        &self.text[start..end]
    }
}

fn compute_line_starts(text: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
        }
    }
    starts
}
