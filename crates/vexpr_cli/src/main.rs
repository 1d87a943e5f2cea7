//! vexpr: the command-line front end of the expression evaluator.
//!
//! Provides `vexpr eval` for evaluating expressions given as arguments,
//! `vexpr base` and `vexpr plain` for the lexical queries, and `vexpr batch`
//! for evaluating a file of expressions, one per line, in parallel.

#![warn(missing_docs)]

mod batch;
mod error;
mod eval;
mod report;
mod settings;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// vexpr: evaluate SystemVerilog-style constant expressions.
#[derive(Parser, Debug)]
#[command(name = "vexpr", version, about = "SystemVerilog constant expression evaluator")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `vexpr.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format for results. Overrides `[output] format` in `vexpr.toml`.
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<ReportFormat>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one or more expressions.
    Eval {
        /// Expressions to evaluate, e.g. `"8'hFF + 1"`. Use `--` before
        /// expressions that start with `-` and are not plain numbers.
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        expressions: Vec<String>,
    },
    /// Print the greatest literal radix of an expression.
    Base {
        /// Expression to scan.
        #[arg(allow_negative_numbers = true)]
        expression: String,
    },
    /// Print whether an expression is a single literal.
    Plain {
        /// Expression to classify.
        #[arg(allow_negative_numbers = true)]
        expression: String,
    },
    /// Evaluate every non-blank, non-comment line of a file.
    Batch {
        /// File with one expression per line; `#` starts a comment line.
        file: PathBuf,
    },
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
    /// Output format requested on the command line.
    pub format: Option<ReportFormat>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        color,
        config: cli.config,
        format: cli.format,
    };

    let result = match cli.command {
        Command::Eval { ref expressions } => eval::run(expressions, &global),
        Command::Base { ref expression } => eval::run_base(expression, &global),
        Command::Plain { ref expression } => eval::run_plain(expression, &global),
        Command::Batch { ref file } => batch::run(file, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}
