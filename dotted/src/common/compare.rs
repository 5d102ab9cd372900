use crate::common::util::{format_float, parse_numeric, Number};
use crate::common::{Items, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

/// Selects which equality a comparison uses.
///
/// - `Loose`: values are coerced before comparing. Null and booleans compare
///   by truthiness, numbers numerically, numeric strings numerically against
///   numbers and other numeric strings, non-numeric strings against numbers
///   as strings. Mappings are equal when they hold the same keys with loosely
///   equal values, in any order.
/// - `Strict`: values must have the same variant and the same content;
///   mappings must hold the same pairs in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Loose,
    Strict,
}

/// Compares two values with the given [Comparison] mode.
#[inline]
pub fn values_equal(left: &Value, right: &Value, comparison: Comparison) -> bool {
    match comparison {
        Comparison::Loose => loose_eq(left, right),
        Comparison::Strict => strict_eq(left, right),
    }
}

/// Strict equality: same variant, same value.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Map(a), Value::Map(b)) => strict_items_eq(a, b),
        (Value::Collection(a), Value::Collection(b)) => strict_items_eq(a.items(), b.items()),
        (Value::Object(a), Value::Object(b)) => {
            a.ptr_eq(b) || strict_items_eq(&a.to_items(), &b.to_items())
        }
        _ => false,
    }
}

fn strict_items_eq(left: &Items, right: &Items) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|((lk, lv), (rk, rv))| lk == rk && strict_eq(lv, rv))
}

/// Loose equality with type coercion.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        // null against a string compares as the empty string
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, _) | (_, Value::Null) | (Value::Bool(_), _) | (_, Value::Bool(_)) => {
            left.is_truthy() == right.is_truthy()
        }
        (l, r) if l.is_container() && r.is_container() => {
            match (l.container_items(), r.container_items()) {
                (Some(a), Some(b)) => loose_items_eq(&a, &b),
                _ => false,
            }
        }
        (l, r) if l.is_container() || r.is_container() => false,
        _ => scalar_cmp(left, right) == Ordering::Equal,
    }
}

fn loose_items_eq(left: &Items, right: &Items) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).is_some_and(|other| loose_eq(value, other)))
}

/// Loose ordering with the same coercions as [loose_eq].
///
/// Containers order after every scalar; two containers order by size first,
/// then entry by entry.
pub fn loose_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::String(s)) => "".cmp(s.as_str()),
        (Value::String(s), Value::Null) => s.as_str().cmp(""),
        (Value::Null, _) | (_, Value::Null) | (Value::Bool(_), _) | (_, Value::Bool(_)) => {
            left.is_truthy().cmp(&right.is_truthy())
        }
        (l, r) if l.is_container() && r.is_container() => {
            match (l.container_items(), r.container_items()) {
                (Some(a), Some(b)) => loose_items_cmp(&a, &b),
                _ => Ordering::Equal,
            }
        }
        (l, _) if l.is_container() => Ordering::Greater,
        (_, r) if r.is_container() => Ordering::Less,
        _ => scalar_cmp(left, right),
    }
}

fn loose_items_cmp(left: &Items, right: &Items) -> Ordering {
    match left.len().cmp(&right.len()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    for (key, value) in left {
        match right.get(key) {
            Some(other) => match loose_cmp(value, other) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
            None => return Ordering::Greater,
        }
    }
    Ordering::Equal
}

/// Total order used by sorting, `median` and `mode`.
///
/// [loose_cmp] is not transitive across kinds (`null == 0`, `null == ""`,
/// yet `0 > ""`). This order ranks values by kind first:
///
/// 1. null
/// 2. booleans, `false` first
/// 3. numbers and numeric strings, numerically
/// 4. other strings, byte-wise
/// 5. maps, collections and objects, by size then entry by entry
///
/// Within one kind it agrees with [loose_cmp].
pub fn sort_cmp(left: &Value, right: &Value) -> Ordering {
    match (SortKey::of(left), SortKey::of(right)) {
        (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(&b),
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Container(a), SortKey::Container(b)) => sort_items_cmp(&a, &b),
        (a, b) => a.rank().cmp(&b.rank()),
    }
}

enum SortKey<'a> {
    Null,
    Bool(bool),
    Number(Number),
    Text(&'a str),
    Container(Cow<'a, Items>),
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::Bool(v) => SortKey::Bool(*v),
            Value::Int(v) => SortKey::Number(Number::Int(*v)),
            Value::Float(v) => SortKey::Number(Number::Float(*v)),
            Value::String(s) => match parse_numeric(s) {
                Some(number) => SortKey::Number(number),
                None => SortKey::Text(s),
            },
            other => SortKey::Container(other.container_items().unwrap_or_default()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Container(_) => 4,
        }
    }
}

fn sort_items_cmp(left: &Items, right: &Items) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| {
        left.iter()
            .zip(right.iter())
            .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| sort_cmp(lv, rv)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

// numbers and strings only
fn scalar_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::String(a), Value::String(b)) => match (parse_numeric(a), parse_numeric(b)) {
            (Some(x), Some(y)) => x.compare(y),
            _ => a.cmp(b),
        },
        (Value::String(s), number) => match parse_numeric(s) {
            Some(parsed) => parsed.compare(number_of(number)),
            None => s.as_str().cmp(number_text(number).as_str()),
        },
        (number, Value::String(s)) => match parse_numeric(s) {
            Some(parsed) => number_of(number).compare(parsed),
            None => number_text(number).as_str().cmp(s.as_str()),
        },
        (a, b) => number_of(a).compare(number_of(b)),
    }
}

fn number_of(value: &Value) -> Number {
    value.to_number_lossy()
}

fn number_text(value: &Value) -> String {
    match value {
        Value::Float(f) => format_float(*f),
        other => other.to_string(),
    }
}

/// Comparison operators accepted by [crate::collection::Collection::where_op].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=` or `==`
    Equal,
    /// `!=` or `<>`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `===`
    StrictEqual,
    /// `!==`
    StrictNotEqual,
}

impl Operator {
    /// Parses an operator symbol. Unknown symbols fall back to loose equality.
    pub fn parse(symbol: &str) -> Operator {
        match symbol.trim() {
            "=" | "==" => Operator::Equal,
            "!=" | "<>" => Operator::NotEqual,
            "<" => Operator::Less,
            ">" => Operator::Greater,
            "<=" => Operator::LessOrEqual,
            ">=" => Operator::GreaterOrEqual,
            "===" => Operator::StrictEqual,
            "!==" => Operator::StrictNotEqual,
            unknown => {
                log::debug!("Unknown operator '{}', using loose equality", unknown);
                Operator::Equal
            }
        }
    }

    pub fn evaluate(&self, left: &Value, right: &Value) -> bool {
        match self {
            Operator::Equal => loose_eq(left, right),
            Operator::NotEqual => !loose_eq(left, right),
            Operator::Less => loose_cmp(left, right) == Ordering::Less,
            Operator::Greater => loose_cmp(left, right) == Ordering::Greater,
            Operator::LessOrEqual => loose_cmp(left, right) != Ordering::Greater,
            Operator::GreaterOrEqual => loose_cmp(left, right) != Ordering::Less,
            Operator::StrictEqual => strict_eq(left, right),
            Operator::StrictNotEqual => !strict_eq(left, right),
        }
    }
}

impl From<&str> for Operator {
    fn from(symbol: &str) -> Self {
        Operator::parse(symbol)
    }
}

impl FromStr for Operator {
    type Err = std::convert::Infallible;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Ok(Operator::parse(symbol))
    }
}
