//! Runtime values produced by node evaluation.

use crate::EvalError;
use crate::ast::TimeUnit;
use std::fmt;

/// A value produced by evaluating a syntax node.
///
/// Numbers are exact `i128` integers: scripts deal in wei-scale amounts
/// (`145e18`), so literal scaling is done in decimal-string arithmetic
/// rather than floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i128),
    String(String),
    Bool(bool),
    /// A `0x`-prefixed 20-byte address, validated on construction.
    Address(String),
    /// Arbitrary `0x`-prefixed byte payload.
    Bytes(String),
    Array(Vec<Value>),
}

impl Value {
    /// The value's type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Address(_) => "address",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
        }
    }

    /// Scale a number literal exactly: `mantissa * 10^power * unit`.
    ///
    /// The mantissa is the raw source text (digits, optionally one `.`).
    /// Fractional digits must be absorbed by the power-of-ten scale, so
    /// `0.5e18` is fine while a bare `3.14` is rejected.
    pub fn from_number_literal(
        mantissa: &str,
        power: Option<u32>,
        time_unit: Option<TimeUnit>,
    ) -> Result<Value, EvalError> {
        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        let scale = power.unwrap_or(0) as usize;
        if frac_part.len() > scale {
            return Err(EvalError::InvalidArgument(format!(
                "number '{mantissa}' has more decimals than its exponent can absorb"
            )));
        }

        // Append the fractional digits, then pad with the remaining zeros.
        let mut digits = String::with_capacity(int_part.len() + scale);
        digits.push_str(int_part);
        digits.push_str(frac_part);
        for _ in 0..(scale - frac_part.len()) {
            digits.push('0');
        }

        let n: i128 = digits
            .parse()
            .map_err(|_| EvalError::InvalidArgument(format!("number '{mantissa}' out of range")))?;

        let multiplier = time_unit.map(TimeUnit::multiplier).unwrap_or(1);
        n.checked_mul(multiplier)
            .map(Value::Number)
            .ok_or_else(|| EvalError::InvalidArgument(format!("number '{mantissa}' out of range")))
    }

    /// Interpret this value as a target address, validating shape.
    pub fn as_address(&self) -> Result<&str, EvalError> {
        match self {
            Value::Address(a) => Ok(a),
            Value::String(s) if is_address(s) => Ok(s),
            other => Err(EvalError::InvalidArgument(format!(
                "expected a valid address, got {other}"
            ))),
        }
    }

    /// Interpret this value as an integer amount.
    pub fn as_number(&self) -> Result<i128, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::InvalidArgument(format!(
                "expected a number, got {other}"
            ))),
        }
    }
}

/// Whether `s` is a `0x`-prefixed 20-byte hex address.
pub fn is_address(s: &str) -> bool {
    s.len() == 42
        && s.starts_with("0x")
        && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `s` is a `0x`-prefixed hex byte string (even digit count).
pub fn is_hex_bytes(s: &str) -> bool {
    s.len() >= 2
        && s.len() % 2 == 0
        && s.starts_with("0x")
        && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Address(a) => write!(f, "{a}"),
            Value::Bytes(b) => write!(f, "{b}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
