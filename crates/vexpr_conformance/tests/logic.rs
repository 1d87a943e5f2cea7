//! Conformance tests for comparisons, string equality, the conditional
//! operator and the bitwise, shift and logical operators.

use vexpr_conformance::{check_cases, Case};

const COMPARISON: &[Case] = &[
    ("greater", "10 > 2", "1", true),
    ("not greater", "2 > 10", "0", true),
    ("not less", "10 < 2", "0", true),
    ("less", "2 < 10", "1", true),
    ("equal is not greater", "5>5", "0", true),
    ("equal is not less", "5<5", "0", true),
    ("expressions on both sides", "14*2 > 2-3*2+8", "1", true),
    ("equal", "21==21", "1", true),
    ("not equal values", "10==2", "0", true),
    ("nested comparison", "1==(8==8)", "1", true),
    ("equal expressions", "14-2*2 == 2*5", "1", true),
    ("unequal expressions", "14-2*2+1 == 2*5", "0", true),
    ("greater or equal", "10>=2", "1", true),
    ("greater or equal when equal", "10>=10", "1", true),
    ("not greater or equal", "10>=11", "0", true),
    ("greater or equal expressions", "10/2>=2*3-1", "1", true),
    ("less or equal", "2<=10", "1", true),
    ("less or equal when equal", "10<=10", "1", true),
    ("not less or equal", "11<=10", "0", true),
    ("less or equal expressions", "11+1*10<=10/2", "0", true),
    ("not equal", "2!=10", "1", true),
    ("not not equal", "10!=10", "0", true),
    ("not equal expressions", "2*3-1!=10/2", "0", true),
    ("reals compare exactly", "0.1 + 0.2 == 0.3", "1", true),
    ("real and integer", "1.0 == 1", "1", true),
    ("fraction digits do not matter", "2.50 > 2.5", "0", true),
    ("arrays do not compare", "{1} == {1}", "x", false),
    ("single equals", "1 = 1", "x", false),
    ("single bang", "!1", "x", false),
];

const STRINGS: &[Case] = &[
    ("equal strings", "\"string1\"==\"string1\"", "1", true),
    ("unequal strings", "\"string1\"==\"string2\"", "0", true),
    ("not equal on equal strings", "\"string1\"!=\"string1\"", "0", true),
    ("not equal on unequal strings", "\"string1\"!=\"string2\"", "1", true),
    ("strings do not order", "\"a\" < \"b\"", "x", false),
    ("string and number", "\"1\" == 1", "x", false),
];

const TERNARY: &[Case] = &[
    ("true selects first", "true?1:0", "1", true),
    ("false selects second", "false?1:0", "0", true),
    ("numeric condition", "1?2:3", "2", true),
    ("condition expression", "1-1?2:3+1", "4", true),
    ("question alone", "?", "x", false),
    ("colon alone", ":", "x", false),
    ("missing else", "(3+2)?(4+6)", "x", false),
    ("missing condition", "(3+2):(4+6)", "x", false),
    ("parenthesized nesting", "(3+2)?((3+3)?(4+7):1):0", "11", true),
    ("parenthesized nesting false", "(1>2)?((3+3)?(4+7):1):0", "0", true),
    ("nesting in then branch", "3+2?3+3?4+7:1:0", "11", true),
    ("nesting in then branch false", "1>2?3+3?4+7:1:0", "0", true),
    ("nesting in else branch", "1?11:2?12:0", "11", true),
    ("parenthesized else branch", "1?11:(2?12:0)", "11", true),
    ("nested then", "1?12?1:0:22", "1", true),
    ("real condition", "0.5 ? 1 : 2", "1", true),
    ("string condition", "\"a\" ? 1 : 2", "x", false),
    ("invalid branch not taken", "1 ? 2 : 1/0", "x", false),
    ("string result", "1 ? \"yes\" : \"no\"", "\"yes\"", true),
];

const BITWISE: &[Case] = &[
    ("negation of sized literal", "~4'b001", "-2", true),
    ("negation of zero", "~0", "-1", true),
    ("negation of parenthesized sized literal", "~(4'b1000)", "7", true),
    ("shift left", "4'b0010 << 2", "8", true),
    ("shift right", "4'b1000 >> 3", "1", true),
    ("shift keeps sign", "-8 >> 1", "-4", true),
    ("shift below add", "1 << 1 + 1", "4", true),
    ("negative shift", "1 << -1", "x", false),
    ("real shift", "1.5 << 1", "x", false),
    ("and", "'b1100 & 'b1010", "8", true),
    ("or", "'b1100 | 'b1010", "14", true),
    ("xor", "'b1100 ^ 'b1010", "6", true),
    ("and binds tighter than or", "1 | 2 & 3", "3", true),
    ("real operand", "1.0 & 1", "x", false),
];

const LOGICAL: &[Case] = &[
    ("and true", "1 && 2", "1", true),
    ("and false", "1 && 0", "0", true),
    ("or", "0 || 3", "1", true),
    ("or false", "0 || 0.0", "0", true),
    ("and before or", "1 || 0 && 0", "1", true),
    ("below comparison", "1 < 2 && 3 > 2", "1", true),
    ("string operand", "\"a\" && 1", "x", false),
];

#[test]
fn comparison() {
    check_cases(COMPARISON);
}

#[test]
fn string_equality() {
    check_cases(STRINGS);
}

#[test]
fn ternary() {
    check_cases(TERNARY);
}

#[test]
fn bitwise_and_shift() {
    check_cases(BITWISE);
}

#[test]
fn logical() {
    check_cases(LOGICAL);
}
