//! Built-in `$` functions.

use crate::arith::{self, Limits};
use crate::error::{EvalError, EvalResult};
use crate::value::{Decimal, Value};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed};
use vexpr_source::Span;

/// A built-in function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Builtin {
    /// `$clog2(x)`: ceiling of log base 2.
    Clog2,
    /// `$pow(a, b)`: same as `a ** b`.
    Pow,
    /// `$sqrt(x)`: square root.
    Sqrt,
    /// `$exp(x)`: e to the power x.
    Exp,
}

impl Builtin {
    /// All built-ins.
    pub const ALL: [Builtin; 4] = [Builtin::Clog2, Builtin::Pow, Builtin::Sqrt, Builtin::Exp];

    /// Looks a function up by its `$name`.
    pub fn lookup(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    /// The function's name including `$`.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Clog2 => "$clog2",
            Builtin::Pow => "$pow",
            Builtin::Sqrt => "$sqrt",
            Builtin::Exp => "$exp",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Builtin::Pow => 2,
            _ => 1,
        }
    }

    /// Applies the function to already evaluated arguments.
    pub(crate) fn apply(self, args: &[Value], limits: Limits) -> EvalResult<Value> {
        if args.len() != self.arity() {
            return Err(EvalError::syntax(
                format!(
                    "{} takes {} argument{}, found {}",
                    self.name(),
                    self.arity(),
                    if self.arity() == 1 { "" } else { "s" },
                    args.len()
                ),
                Span::DUMMY,
            ));
        }
        if let Some(bad) = args.iter().find(|a| !a.is_number()) {
            return Err(EvalError::semantic(
                format!("{} cannot be applied to {}", self.name(), bad.type_name()),
                Span::DUMMY,
            ));
        }
        match self {
            Builtin::Clog2 => clog2(&args[0]),
            Builtin::Pow => arith::pow(&args[0], &args[1], limits),
            Builtin::Sqrt => {
                let x = to_f64(&args[0])?;
                if x < 0.0 {
                    return Err(EvalError::semantic(
                        "$sqrt of a negative number",
                        Span::DUMMY,
                    ));
                }
                from_f64_general(x.sqrt())
            }
            Builtin::Exp => from_f64_general(to_f64(&args[0])?.exp()),
        }
    }
}

/// Smallest `n >= 0` with `2^n >= x`; exact for integers and reals.
fn clog2(x: &Value) -> EvalResult<Value> {
    let negative = || EvalError::semantic("$clog2 of a negative number", Span::DUMMY);
    let ceiling = match x {
        Value::Integer(i) => i.clone(),
        Value::Real(d) if d.is_negative() => return Err(negative()),
        Value::Real(d) => d.ceil(),
        other => {
            return Err(EvalError::semantic(
                format!("$clog2 cannot be applied to {}", other.type_name()),
                Span::DUMMY,
            ))
        }
    };
    if ceiling.is_negative() {
        return Err(negative());
    }
    if ceiling <= BigInt::from(1) {
        return Ok(Value::int(0));
    }
    let bits = (ceiling - 1u32).bits();
    Ok(Value::int(bits as i64))
}

fn to_f64(value: &Value) -> EvalResult<f64> {
    value
        .to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| EvalError::semantic("argument is out of range", Span::DUMMY))
}

/// Converts a float result to a value the way `%g` would print it: six
/// significant digits with trailing fraction zeros removed. Magnitudes of a
/// million and above are written as whole numbers.
pub(crate) fn from_f64_general(x: f64) -> EvalResult<Value> {
    if !x.is_finite() {
        return Err(EvalError::semantic(
            "result is not a finite number",
            Span::DUMMY,
        ));
    }
    if x == 0.0 {
        return Ok(Value::int(0));
    }
    if x.abs() >= 1e6 {
        return BigInt::from_f64(x.round())
            .map(Value::Integer)
            .ok_or_else(|| EvalError::semantic("result is out of range", Span::DUMMY));
    }

    // `{:.5e}` gives exactly six significant digits, e.g. `1.35335e-1`.
    let formatted = format!("{:.5e}", x.abs());
    let (digits, exponent) = formatted
        .split_once('e')
        .and_then(|(m, e)| Some((m.replace('.', ""), e.parse::<i32>().ok()?)))
        .ok_or_else(|| EvalError::semantic("result is out of range", Span::DUMMY))?;
    let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| EvalError::semantic("result is out of range", Span::DUMMY))?;
    if x < 0.0 {
        mantissa = -mantissa;
    }

    let shift = exponent - 5;
    if shift >= 0 {
        return Ok(Value::Integer(mantissa * BigInt::from(10u32).pow(shift as u32)));
    }
    let decimal = Decimal::new(mantissa, shift.unsigned_abs()).normalized();
    if decimal.scale() == 0 {
        Ok(Value::Integer(decimal.mantissa().clone()))
    } else {
        Ok(Value::Real(decimal))
    }
}
