//! Conformance tests for literal forms: booleans, decimal, fixed-point,
//! based literals, strings and arrays.

use vexpr_conformance::{check_cases, check_diagnostics, Case};

const EMPTY_AND_BOOLEANS: &[Case] = &[
    ("empty input", "", "", true),
    ("whitespace only", "   ", "", true),
    ("operator alone", "-", "x", false),
    ("true", "true", "1", true),
    ("false", "false", "0", true),
    ("capitalized True", "True", "1", true),
    ("capitalized False", "False", "0", true),
    ("mixed case TRUe", "TRUe", "1", true),
    ("mixed case fALSe", "fALSe", "0", true),
    ("booleans in array", "{true,false}", "{1,0}", true),
    ("bare word", "text", "x", false),
    ("hex digits without base", "ff", "x", false),
];

const DECIMAL: &[Case] = &[
    ("zero", "0", "0", true),
    ("one", "1", "1", true),
    ("seven", "7", "7", true),
    ("explicit plus", "+1", "1", true),
    ("negative", "-1", "-1", true),
    ("'d2", "'d2", "2", true),
    ("'D8", "'D8", "8", true),
    ("'sd2", "'sd2", "2", true),
    ("'sD2", "'sD2", "2", true),
    ("'Sd3", "'Sd3", "3", true),
    ("'SD3", "'SD3", "3", true),
    ("size is accepted", "1'd3", "3", true),
    ("tick without base", "'2", "2", true),
    ("underscore", "10_000", "10000", true),
    ("many underscores", "1_000_000", "1000000", true),
    ("based with underscore", "'sd10_000", "10000", true),
    ("seven digits", "1000005", "1000005", true),
    ("beyond 64 bits", "123456789012345678901234567890", "123456789012345678901234567890", true),
    ("zero size", "0'd1", "x", false),
    ("digits glued to letters", "12ab", "x", false),
];

const FIXED_POINT: &[Case] = &[
    ("0.0", "0.0", "0.0", true),
    ("0.5", "0.5", "0.5", true),
    ("0.25", "0.25", "0.25", true),
    ("1.0", "1.0", "1.0", true),
    ("negative", "-1.0", "-1.0", true),
    ("trailing zeros kept", "2.500", "2.500", true),
    ("missing fraction digits", "1.", "x", false),
];

const HEXADECIMAL: &[Case] = &[
    ("'h1", "'h1", "1", true),
    ("'hA", "'hA", "10", true),
    ("'Hf", "'Hf", "15", true),
    ("'shf", "'shf", "15", true),
    ("'sH2", "'sH2", "2", true),
    ("'Shb", "'Shb", "11", true),
    ("'SH5", "'SH5", "5", true),
    ("sized decimal", "8'd02", "2", true),
    ("long size", "32'h00000001", "1", true),
    ("underscore", "'h1_F", "31", true),
    ("many underscores", "'hF_F_F", "4095", true),
    ("unknown digit", "'hx", "x", false),
    ("no digits", "'h", "x", false),
];

const BINARY_AND_OCTAL: &[Case] = &[
    ("'b1", "'b1", "1", true),
    ("'b10", "'b10", "2", true),
    ("'b111", "'b111", "7", true),
    ("'sb11", "'sb11", "3", true),
    ("'sB10", "'sB10", "2", true),
    ("'Sb110", "'Sb110", "6", true),
    ("sized binary", "4'b0111", "7", true),
    ("binary underscore", "'b1_0", "2", true),
    ("digit out of range", "'b102", "x", false),
    ("high impedance digit", "4'bz", "x", false),
    ("'o1", "'o1", "1", true),
    ("'o7", "'o7", "7", true),
    ("'o10", "'o10", "8", true),
    ("'O12", "'O12", "10", true),
    ("'so4", "'so4", "4", true),
    ("'sO17", "'sO17", "15", true),
    ("'So20", "'So20", "16", true),
    ("'SO2", "'SO2", "2", true),
    ("sized octal", "3'o011", "9", true),
    ("octal digit out of range", "'o8", "x", false),
];

const STRINGS: &[Case] = &[
    ("empty string", "\"\"", "\"\"", true),
    ("string kept as is", "\"A string.\"", "\"A string.\"", true),
    ("inner whitespace", "\" text \"", "\" text \"", true),
    ("missing closing quote", "\"text", "x", false),
    ("string plus number", "\"text\" + 2", "x", false),
];

const ARRAYS: &[Case] = &[
    ("two elements", "{1,1}", "{1,1}", true),
    ("single element", "{2}", "{2}", true),
    ("bad element", "{1,1,#}", "x", false),
    ("trailing comma", "{1,}", "x", false),
    ("empty array", "{}", "x", false),
    ("missing open brace", ",1}", "x", false),
    ("missing close brace", "{1,1", "x", false),
    ("hex elements are decimal", "{'h10,'h14}", "{16,20}", true),
    ("mixed element types", "{1.1,1,\"hello\"}", "{1.1,1,\"hello\"}", true),
    ("nested last", "{1,{1,1}}", "{1,{1,1}}", true),
    ("nested first", "{{1,1},1}", "{{1,1},1}", true),
    ("expressions inside", "{1+1,1}", "{2,1}", true),
    ("whitespace inside", "{ 1 , 2 }", "{1,2}", true),
];

#[test]
fn empty_and_booleans() {
    check_cases(EMPTY_AND_BOOLEANS);
}

#[test]
fn decimal_literals() {
    check_cases(DECIMAL);
}

#[test]
fn fixed_point_literals() {
    check_cases(FIXED_POINT);
}

#[test]
fn hexadecimal_literals() {
    check_cases(HEXADECIMAL);
}

#[test]
fn binary_and_octal_literals() {
    check_cases(BINARY_AND_OCTAL);
}

#[test]
fn string_literals() {
    check_cases(STRINGS);
}

#[test]
fn array_literals() {
    check_cases(ARRAYS);
}

#[test]
fn every_invalid_literal_reports_one_diagnostic() {
    check_diagnostics(DECIMAL);
    check_diagnostics(HEXADECIMAL);
    check_diagnostics(STRINGS);
    check_diagnostics(ARRAYS);
}
