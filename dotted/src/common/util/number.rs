use crate::common::Value;
use std::cmp::Ordering;

/// A numeric view of a [Value], used by arithmetic aggregations and by the
/// loose comparator.
///
/// Integer arithmetic stays integral until it overflows or a float takes
/// part, mirroring how sums and averages are expected to read
/// (`avg([1, 2, 3]) == 2`, `median([0, 3]) == 1.5`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.to_f64() + b.to_f64()),
        }
    }

    /// Divides, staying integral when both operands are integers and the
    /// division is exact.
    pub fn divide(self, divisor: Number) -> Number {
        match (self, divisor) {
            (Number::Int(a), Number::Int(b)) if b != 0 && a.checked_rem(b) == Some(0) => {
                Number::Int(a / b)
            }
            (a, b) => Number::Float(a.to_f64() / b.to_f64()),
        }
    }

    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (a, b) => a
                .to_f64()
                .partial_cmp(&b.to_f64())
                .unwrap_or(Ordering::Equal),
        }
    }

    /// Total numeric order. Integers and floats compare exactly, even past
    /// the range where `i64 as f64` rounds; NaN sorts after every number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => a.total_cmp(&b),
            (Number::Int(a), Number::Float(b)) => int_float_cmp(a, b),
            (Number::Float(a), Number::Int(b)) => int_float_cmp(b, a).reverse(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Number::Int(v) => Value::Int(v),
            Number::Float(v) => Value::Float(v),
        }
    }
}

fn int_float_cmp(int: i64, float: f64) -> Ordering {
    match (int as f64).total_cmp(&float) {
        // equal as floats means the float is integral; settle rounding as integers
        Ordering::Equal => int.cmp(&(float as i64)),
        unequal => unequal,
    }
}

/// Parses a numeric string: optional surrounding whitespace, an optional
/// sign, digits with an optional fraction and an optional exponent.
///
/// Textual specials accepted by `f64::from_str` (`inf`, `NaN`) are rejected.
pub fn parse_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let body = trimmed
        .strip_prefix(&['-', '+'][..])
        .unwrap_or(trimmed);
    if !body.bytes().any(|b| b.is_ascii_digit())
        || !body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'-' | b'+'))
    {
        return None;
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::Int(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::Float)
}

/// Formats a float the way string conversion of values expects: integral
/// floats print without a fraction.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
