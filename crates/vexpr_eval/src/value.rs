//! The evaluated value model.
//!
//! [`Value`] is a closed sum of the shapes an expression can produce.
//! Integers are arbitrary precision. Reals are [`Decimal`]s: a `BigInt`
//! mantissa with a decimal scale, so `0.240` keeps its three fraction digits
//! and never passes through binary floating point.

use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};
use std::fmt;

/// Returns `10^n`.
pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}

/// Divides and rounds half away from zero.
///
/// `den` must be non-zero.
pub(crate) fn div_round(num: &BigInt, den: &BigInt) -> BigInt {
    let quotient = num / den;
    let remainder = num % den;
    if (remainder.abs() * 2u32) >= den.abs() {
        if num.sign() == den.sign() {
            quotient + 1u32
        } else {
            quotient - 1u32
        }
    } else {
        quotient
    }
}

/// A fixed-point decimal number: `mantissa / 10^scale`.
///
/// The scale is part of the value's identity: `1.0` and `1.00` display
/// differently and carry different precision into arithmetic.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    /// Creates a decimal from its mantissa and number of fraction digits.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Parses `[-]digits[.digits]`, ignoring `_` separators.
    pub fn parse(text: &str) -> Option<Decimal> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let clean: String = body.chars().filter(|&c| c != '_').collect();
        let (int_part, frac_part) = match clean.split_once('.') {
            Some((i, f)) => (i, f),
            None => (clean.as_str(), ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = format!("{int_part}{frac_part}");
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        if negative {
            mantissa = -mantissa;
        }
        Some(Decimal::new(mantissa, u32::try_from(frac_part.len()).ok()?))
    }

    /// Quantizes a float to `scale` fraction digits.
    pub(crate) fn from_f64_fixed(value: f64, scale: u32) -> Option<Decimal> {
        if !value.is_finite() {
            return None;
        }
        Decimal::parse(&format!("{:.*}", scale as usize, value))
    }

    /// The unscaled mantissa.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// The number of fraction digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns `true` if the value is zero at any scale.
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns `true` if the value is negative.
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns `true` if there is no fractional part.
    pub fn is_integral(&self) -> bool {
        (&self.mantissa % pow10(self.scale)).is_zero()
    }

    /// The mantissa expressed at a larger scale.
    pub(crate) fn mantissa_at(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.mantissa * pow10(scale - self.scale)
    }

    /// Changes the number of fraction digits, rounding half away from zero
    /// when digits are dropped.
    pub fn rescale(&self, scale: u32) -> Decimal {
        if scale >= self.scale {
            Decimal::new(self.mantissa_at(scale), scale)
        } else {
            let divisor = pow10(self.scale - scale);
            Decimal::new(div_round(&self.mantissa, &divisor), scale)
        }
    }

    /// The integer part, truncated toward zero.
    pub fn trunc(&self) -> BigInt {
        &self.mantissa / pow10(self.scale)
    }

    /// The smallest integer not less than this value.
    pub fn ceil(&self) -> BigInt {
        let truncated = self.trunc();
        if !self.is_integral() && self.mantissa.is_positive() {
            truncated + 1u32
        } else {
            truncated
        }
    }

    /// Drops trailing zero fraction digits.
    pub(crate) fn normalized(&self) -> Decimal {
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        Decimal::new(mantissa, scale)
    }

    /// Returns `true` if the magnitude is exactly one.
    pub(crate) fn is_unit(&self) -> bool {
        self.mantissa.magnitude() == pow10(self.scale).magnitude()
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.mantissa, self.scale)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_str_radix(10);
        let sign = if self.mantissa.sign() == Sign::Minus { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// The result of evaluating an expression or sub-expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    /// Exact integer.
    Integer(BigInt),
    /// Fixed-point real.
    Real(Decimal),
    /// String literal, stored with its surrounding quotes.
    Text(String),
    /// Ordered, possibly nested, array.
    Array(Vec<Value>),
}

impl Value {
    /// Creates an integer value.
    pub fn int(n: impl Into<BigInt>) -> Self {
        Value::Integer(n.into())
    }

    /// The boolean result of a comparison or logical operator.
    pub(crate) fn truth(b: bool) -> Self {
        if b {
            Value::Integer(BigInt::one())
        } else {
            Value::Integer(BigInt::zero())
        }
    }

    /// Short name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "an integer",
            Value::Real(_) => "a real",
            Value::Text(_) => "a string",
            Value::Array(_) => "an array",
        }
    }

    /// Returns `true` for integers and reals.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    /// Number of fraction digits; zero for anything but reals.
    pub fn fraction_digits(&self) -> u32 {
        match self {
            Value::Real(d) => d.scale(),
            _ => 0,
        }
    }

    /// Numeric truthiness: non-zero is true. `None` for strings and arrays.
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            Value::Integer(i) => Some(!i.is_zero()),
            Value::Real(d) => Some(!d.is_zero()),
            Value::Text(_) | Value::Array(_) => None,
        }
    }

    /// Approximates a number as `f64`.
    pub fn to_f64(&self) -> Option<f64> {
        if !self.is_number() {
            return None;
        }
        self.to_string().parse().ok()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Real(d)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(d) => write!(f, "{d}"),
            Value::Text(raw) => f.write_str(raw),
            Value::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}
