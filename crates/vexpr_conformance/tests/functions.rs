//! Conformance tests for the `$` system functions.

use vexpr_conformance::{check_cases, Case};

const CLOG2: &[Case] = &[
    ("of zero", "$clog2(0)", "0", true),
    ("of one", "$clog2(1)", "0", true),
    ("of two", "$clog2(2)", "1", true),
    ("of three", "$clog2(3)", "2", true),
    ("of 127", "$clog2(127)", "7", true),
    ("of 128", "$clog2(128)", "7", true),
    ("of 129", "$clog2(129)", "8", true),
    ("of 2048", "$clog2(2048)", "11", true),
    ("of 17", "$clog2(17)", "5", true),
    ("of negative", "$clog2(-1)", "x", false),
    ("of hex 'h0F", "$clog2('h0F)", "4", true),
    ("of hex 'hFF", "$clog2('hFF)", "8", true),
    ("sum of calls", "$clog2(2) + $clog2(4) + $clog2(4)", "5", true),
    ("simple argument expression", "$clog2(2 + 2)", "2", true),
    ("power argument", "$clog2(2**12)", "12", true),
    ("nested", "$clog2($clog2(256))", "3", true),
    ("inside array", "{$clog2(3),1,1,1}", "{2,1,1,1}", true),
    ("real argument rounds up", "$clog2(4.5)", "3", true),
    ("beyond 64 bits", "$clog2(2**80 + 1)", "81", true),
    ("array argument", "$clog2({4})", "x", false),
    ("string argument", "$clog2(\"4\")", "x", false),
];

const OTHER_FUNCTIONS: &[Case] = &[
    ("pow", "$pow(2, 3)", "8", true),
    ("pow matches operator", "$pow(2.0, -1)", "0.5", true),
    ("pow zero to negative", "$pow(0, -2)", "x", false),
    ("sqrt of zero", "$sqrt(0)", "0", true),
    ("sqrt of four", "$sqrt(4)", "2", true),
    ("sqrt of two", "$sqrt(2)", "1.41421", true),
    ("sqrt of negative", "$sqrt(-2)", "x", false),
    ("exp of zero", "$exp(0)", "1", true),
    ("exp of one", "$exp(1)", "2.71828", true),
    ("exp of minus two", "$exp(-2)", "0.135335", true),
    ("exp of a large value", "$exp(20)", "485165195", true),
];

const CALL_SYNTAX: &[Case] = &[
    ("unknown function", "$log2(8)", "x", false),
    ("missing arguments", "$clog2()", "x", false),
    ("too many arguments", "$clog2(1, 2)", "x", false),
    ("too few arguments", "$pow(2)", "x", false),
    ("missing parentheses", "$clog2", "x", false),
    ("unclosed call", "$clog2(8", "x", false),
    ("dollar alone", "$", "x", false),
    ("dollar before digit", "$1(2)", "x", false),
    ("whitespace inside", "$pow( 2 , 4 )", "16", true),
];

#[test]
fn clog2() {
    check_cases(CLOG2);
}

#[test]
fn pow_sqrt_exp() {
    check_cases(OTHER_FUNCTIONS);
}

#[test]
fn call_syntax() {
    check_cases(CALL_SYNTAX);
}
