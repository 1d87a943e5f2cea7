//! Operator semantics on [`Value`]s.
//!
//! Result typing follows the operands:
//!
//! | Operator | Real result when | Fraction digits |
//! |----------|------------------|-----------------|
//! | `+ - *` | either operand is real | max of both |
//! | `/` | the dividend is real | max of both |
//! | `**` | the base is real | the base's |
//!
//! Integer division truncates toward zero; real results round half away
//! from zero. Every result is held to `max_result_bits`; `**` and `<<`
//! check the size before computing. Errors are raised with a dummy span and
//! anchored by the caller.

use crate::error::{EvalError, EvalResult};
use crate::value::{div_round, pow10, Decimal, Value};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use vexpr_source::Span;

/// Binary operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    /// `||`
    LogOr,
    /// `&&`
    LogAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
}

impl BinaryOp {
    /// The operator's spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

/// Resource limits the operators need.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Limits {
    pub max_shift: u32,
    pub max_exponent: u32,
    pub max_result_bits: u32,
}

/// Applies a binary operator.
pub(crate) fn binary(op: BinaryOp, lhs: &Value, rhs: &Value, limits: Limits) -> EvalResult<Value> {
    let value = match op {
        BinaryOp::Add => add(lhs, rhs, op),
        BinaryOp::Sub => sub(lhs, rhs, op),
        BinaryOp::Mul => mul(lhs, rhs, op),
        BinaryOp::Div => div(lhs, rhs, op),
        BinaryOp::Mod => rem(lhs, rhs, op),
        BinaryOp::Pow => pow(lhs, rhs, limits),
        BinaryOp::Shl | BinaryOp::Shr => shift(op, lhs, rhs, limits),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => bitwise(op, lhs, rhs),
        BinaryOp::LogAnd | BinaryOp::LogOr => logical(op, lhs, rhs),
        BinaryOp::Eq | BinaryOp::Neq => equality(op, lhs, rhs),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => relational(op, lhs, rhs),
    }?;
    check_size(&value, limits.max_result_bits)?;
    Ok(value)
}

fn result_limit(max_bits: u32) -> EvalError {
    EvalError::limit(
        format!("result exceeds the limit of {max_bits} bits"),
        Span::DUMMY,
    )
}

fn check_bits(bits: Option<u64>, max_bits: u32) -> EvalResult<()> {
    match bits {
        Some(bits) if bits <= u64::from(max_bits) => Ok(()),
        _ => Err(result_limit(max_bits)),
    }
}

/// Fails if an integer, or a real's mantissa, is wider than `max_bits`.
pub(crate) fn check_size(value: &Value, max_bits: u32) -> EvalResult<()> {
    let bits = match value {
        Value::Integer(i) => i.bits(),
        Value::Real(d) => d.mantissa().bits(),
        Value::Text(_) | Value::Array(_) => 0,
    };
    check_bits(Some(bits), max_bits)
}

/// Fails unless a `bits`-wide magnitude raised to `exponent` can fit. The
/// power has at least `(bits - 1) * exponent + 1` bits.
fn check_power_size(bits: u64, exponent: u32, max_bits: u32) -> EvalResult<()> {
    let least = bits
        .saturating_sub(1)
        .checked_mul(u64::from(exponent))
        .and_then(|b| b.checked_add(1));
    check_bits(least, max_bits)
}

/// A borrowed view of a numeric operand.
#[derive(Clone, Copy)]
enum Num<'a> {
    Int(&'a BigInt),
    Real(&'a Decimal),
}

impl Num<'_> {
    fn parts(&self) -> (&BigInt, u32) {
        match self {
            Num::Int(i) => (*i, 0),
            Num::Real(d) => (d.mantissa(), d.scale()),
        }
    }

    fn scale(&self) -> u32 {
        self.parts().1
    }

    fn mantissa_at(&self, scale: u32) -> BigInt {
        match self {
            Num::Int(i) => *i * pow10(scale),
            Num::Real(d) => d.mantissa_at(scale),
        }
    }

    fn is_zero(&self) -> bool {
        self.parts().0.is_zero()
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(i) => i.to_f64().unwrap_or(f64::NAN),
            Num::Real(d) => d.to_string().parse().unwrap_or(f64::NAN),
        }
    }
}

fn operand_error(op: &str, value: &Value) -> EvalError {
    EvalError::semantic(
        format!("operator '{op}' cannot be applied to {}", value.type_name()),
        Span::DUMMY,
    )
}

fn num<'a>(value: &'a Value, op: &str) -> EvalResult<Num<'a>> {
    match value {
        Value::Integer(i) => Ok(Num::Int(i)),
        Value::Real(d) => Ok(Num::Real(d)),
        other => Err(operand_error(op, other)),
    }
}

fn int<'a>(value: &'a Value, op: &str) -> EvalResult<&'a BigInt> {
    match value {
        Value::Integer(i) => Ok(i),
        Value::Real(_) => Err(EvalError::semantic(
            format!("operator '{op}' requires integer operands"),
            Span::DUMMY,
        )),
        other => Err(operand_error(op, other)),
    }
}

fn division_by_zero() -> EvalError {
    EvalError::semantic("division by zero", Span::DUMMY)
}

// ---- additive and multiplicative ----

fn add(lhs: &Value, rhs: &Value, op: BinaryOp) -> EvalResult<Value> {
    match (num(lhs, op.symbol())?, num(rhs, op.symbol())?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(a + b)),
        (a, b) => {
            let scale = a.scale().max(b.scale());
            Ok(Value::Real(Decimal::new(
                a.mantissa_at(scale) + b.mantissa_at(scale),
                scale,
            )))
        }
    }
}

fn sub(lhs: &Value, rhs: &Value, op: BinaryOp) -> EvalResult<Value> {
    match (num(lhs, op.symbol())?, num(rhs, op.symbol())?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(a - b)),
        (a, b) => {
            let scale = a.scale().max(b.scale());
            Ok(Value::Real(Decimal::new(
                a.mantissa_at(scale) - b.mantissa_at(scale),
                scale,
            )))
        }
    }
}

fn mul(lhs: &Value, rhs: &Value, op: BinaryOp) -> EvalResult<Value> {
    match (num(lhs, op.symbol())?, num(rhs, op.symbol())?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(a * b)),
        (a, b) => {
            let ((ma, sa), (mb, sb)) = (a.parts(), b.parts());
            let exact = Decimal::new(ma * mb, sa + sb);
            Ok(Value::Real(exact.rescale(sa.max(sb))))
        }
    }
}

fn div(lhs: &Value, rhs: &Value, op: BinaryOp) -> EvalResult<Value> {
    let (a, b) = (num(lhs, op.symbol())?, num(rhs, op.symbol())?);
    if b.is_zero() {
        return Err(division_by_zero());
    }
    let (m2, s2) = b.parts();
    match a {
        // The dividend alone decides the mode; a real divisor still divides exactly.
        Num::Int(m1) => Ok(Value::Integer(m1 * pow10(s2) / m2)),
        Num::Real(d) => {
            let (m1, s1) = (d.mantissa(), d.scale());
            let scale = s1.max(s2);
            let numerator = m1 * pow10(s2 + scale);
            let denominator = m2 * pow10(s1);
            Ok(Value::Real(Decimal::new(
                div_round(&numerator, &denominator),
                scale,
            )))
        }
    }
}

fn rem(lhs: &Value, rhs: &Value, op: BinaryOp) -> EvalResult<Value> {
    let (a, b) = (int(lhs, op.symbol())?, int(rhs, op.symbol())?);
    if b.is_zero() {
        return Err(division_by_zero());
    }
    Ok(Value::Integer(a % b))
}

// ---- power ----

/// `base ** exponent`.
pub(crate) fn pow(base: &Value, exponent: &Value, limits: Limits) -> EvalResult<Value> {
    let b = num(base, "**")?;
    match num(exponent, "**")? {
        Num::Int(e) => pow_integral(b, e, limits),
        Num::Real(e) if e.is_integral() => pow_integral(b, &e.trunc(), limits),
        Num::Real(e) => pow_fractional(b, e),
    }
}

fn exponent_limit(max_exponent: u32) -> EvalError {
    EvalError::limit(
        format!("exponent exceeds the limit of {max_exponent}"),
        Span::DUMMY,
    )
}

fn pow_integral(base: Num<'_>, exponent: &BigInt, limits: Limits) -> EvalResult<Value> {
    let Limits {
        max_exponent,
        max_result_bits,
        ..
    } = limits;
    let negative = exponent.is_negative();
    let odd = !(exponent % 2u32).is_zero();
    let small = exponent.magnitude().to_u32().filter(|&e| e <= max_exponent);

    match base {
        Num::Int(a) => {
            if exponent.is_zero() {
                return Ok(Value::int(1));
            }
            if a.is_zero() {
                return if negative {
                    Err(EvalError::semantic(
                        "zero cannot be raised to a negative power",
                        Span::DUMMY,
                    ))
                } else {
                    Ok(Value::int(0))
                };
            }
            if a.magnitude().is_one() {
                let flip = a.is_negative() && odd;
                return Ok(Value::int(if flip { -1 } else { 1 }));
            }
            if negative {
                // |base| > 1: the reciprocal truncates to zero.
                return Ok(Value::int(0));
            }
            let e = small.ok_or_else(|| exponent_limit(max_exponent))?;
            check_power_size(a.bits(), e, max_result_bits)?;
            Ok(Value::Integer(a.pow(e)))
        }
        Num::Real(d) => {
            let s = d.scale();
            if exponent.is_zero() {
                return Ok(Value::Real(Decimal::new(pow10(s), s)));
            }
            if d.is_zero() {
                return if negative {
                    Err(EvalError::semantic(
                        "zero cannot be raised to a negative power",
                        Span::DUMMY,
                    ))
                } else {
                    Ok(Value::Real(Decimal::new(BigInt::zero(), s)))
                };
            }
            if d.is_unit() {
                let one = pow10(s);
                let flip = d.is_negative() && odd;
                return Ok(Value::Real(Decimal::new(if flip { -one } else { one }, s)));
            }
            let e = small.ok_or_else(|| exponent_limit(max_exponent))?;
            let exact_scale = s
                .checked_mul(e)
                .ok_or_else(|| exponent_limit(max_exponent))?;
            let m = d.mantissa();
            check_power_size(m.bits(), e, max_result_bits)?;
            if negative {
                // 10^k is wider than 3k bits.
                let digits = u64::from(s) + u64::from(exact_scale);
                check_bits(digits.checked_mul(3), max_result_bits)?;
                let numerator = pow10(s + exact_scale);
                Ok(Value::Real(Decimal::new(
                    div_round(&numerator, &m.pow(e)),
                    s,
                )))
            } else {
                Ok(Value::Real(Decimal::new(m.pow(e), exact_scale).rescale(s)))
            }
        }
    }
}

fn pow_fractional(base: Num<'_>, exponent: &Decimal) -> EvalResult<Value> {
    let b = base.to_f64();
    let e = Num::Real(exponent).to_f64();
    if b < 0.0 {
        return Err(EvalError::semantic(
            "a negative base cannot be raised to a fractional power",
            Span::DUMMY,
        ));
    }
    if b == 0.0 && e < 0.0 {
        return Err(EvalError::semantic(
            "zero cannot be raised to a negative power",
            Span::DUMMY,
        ));
    }
    let result = b.powf(e);
    let not_finite = || EvalError::semantic("result is not a finite number", Span::DUMMY);
    match base {
        Num::Int(_) => BigInt::from_f64(result.round())
            .map(Value::Integer)
            .ok_or_else(not_finite),
        Num::Real(d) => Decimal::from_f64_fixed(result, d.scale())
            .map(Value::Real)
            .ok_or_else(not_finite),
    }
}

// ---- bitwise and shifts ----

fn bitwise(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let (a, b) = (int(lhs, op.symbol())?, int(rhs, op.symbol())?);
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        _ => a ^ b,
    };
    Ok(Value::Integer(result))
}

fn shift(op: BinaryOp, lhs: &Value, rhs: &Value, limits: Limits) -> EvalResult<Value> {
    let max_shift = limits.max_shift;
    let (value, amount) = (int(lhs, op.symbol())?, int(rhs, op.symbol())?);
    if amount.is_negative() {
        return Err(EvalError::semantic(
            "shift amount must not be negative",
            Span::DUMMY,
        ));
    }
    let n = amount
        .to_u32()
        .filter(|&n| n <= max_shift)
        .ok_or_else(|| {
            EvalError::limit(
                format!("shift amount exceeds the limit of {max_shift}"),
                Span::DUMMY,
            )
        })?;
    // Logical shift of the magnitude; the sign is carried separately.
    let magnitude = value.magnitude();
    let shifted = if op == BinaryOp::Shl {
        check_bits(value.bits().checked_add(u64::from(n)), limits.max_result_bits)?;
        magnitude << n as usize
    } else {
        magnitude >> n as usize
    };
    Ok(Value::Integer(BigInt::from_biguint(value.sign(), shifted)))
}

/// `~value` over `width` bits, read back as a two's-complement signed number.
pub(crate) fn bit_not(value: &Value, width: u32) -> EvalResult<Value> {
    let v = int(value, "~")?;
    if width == 0 {
        return Err(EvalError::semantic("bit width must be positive", Span::DUMMY));
    }
    let modulus = BigInt::one() << width as usize;
    let mask = &modulus - 1u32;
    let flipped = &mask - (v & &mask);
    let half = BigInt::one() << (width - 1) as usize;
    if flipped >= half {
        Ok(Value::Integer(flipped - modulus))
    } else {
        Ok(Value::Integer(flipped))
    }
}

// ---- logical and comparison ----

fn logical(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let a = lhs
        .truthiness()
        .ok_or_else(|| operand_error(op.symbol(), lhs))?;
    let b = rhs
        .truthiness()
        .ok_or_else(|| operand_error(op.symbol(), rhs))?;
    Ok(Value::truth(if op == BinaryOp::LogAnd {
        a && b
    } else {
        a || b
    }))
}

fn compare_numbers(lhs: &Value, rhs: &Value, op: &str) -> EvalResult<Ordering> {
    let (a, b) = (num(lhs, op)?, num(rhs, op)?);
    let scale = a.scale().max(b.scale());
    Ok(a.mantissa_at(scale).cmp(&b.mantissa_at(scale)))
}

fn equality(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let equal = match (lhs, rhs) {
        (Value::Text(a), Value::Text(b)) => a == b,
        _ => compare_numbers(lhs, rhs, op.symbol())? == Ordering::Equal,
    };
    Ok(Value::truth(if op == BinaryOp::Eq { equal } else { !equal }))
}

fn relational(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let ord = compare_numbers(lhs, rhs, op.symbol())?;
    let holds = match op {
        BinaryOp::Lt => ord == Ordering::Less,
        BinaryOp::Le => ord != Ordering::Greater,
        BinaryOp::Gt => ord == Ordering::Greater,
        _ => ord != Ordering::Less,
    };
    Ok(Value::truth(holds))
}

// ---- unary ----

/// Unary minus, preserving type and fraction digits.
pub(crate) fn negate(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Integer(i) => Ok(Value::Integer(-i)),
        Value::Real(d) => Ok(Value::Real(-d.clone())),
        other => Err(operand_error("-", other)),
    }
}

/// Unary plus: the identity on numbers.
pub(crate) fn identity(value: Value) -> EvalResult<Value> {
    if value.is_number() {
        Ok(value)
    } else {
        Err(operand_error("+", &value))
    }
}
