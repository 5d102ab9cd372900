use crate::common::util::{format_float, parse_numeric, Number};
use crate::common::{sort_cmp, Value};
use indexmap::IndexMap;
use itertools::Itertools;

/// Adds up values by their numeric reading. Values without one count as zero.
pub fn sum<'a, I: IntoIterator<Item = &'a Value>>(values: I) -> Number {
    values
        .into_iter()
        .fold(Number::Int(0), |total, value| total.add(value.to_number_lossy()))
}

/// Arithmetic mean, `None` for no values.
pub fn average(values: &[Value]) -> Option<Number> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values).divide(Number::Int(values.len() as i64)))
}

/// Middle value after an ascending [sort_cmp] sort; the mean of the two
/// middle values for an even count.
pub fn median(mut values: Vec<Value>) -> Option<Value> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(sort_cmp);

    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        return Some(values.swap_remove(middle));
    }
    let pair = [values[middle - 1].clone(), values[middle].clone()];
    Some(average(&pair)?.into_value())
}

/// Every value sharing the highest frequency, in ascending order.
///
/// Numbers and numeric strings are counted by numeric value, so `1`, `1.0`
/// and `"1"` are the same value; the first occurrence is reported. Other
/// values only match values of the same kind and content.
pub fn mode(values: Vec<Value>) -> Option<Vec<Value>> {
    if values.is_empty() {
        return None;
    }

    let mut tallies: IndexMap<String, (Value, usize)> = IndexMap::new();
    for value in values {
        tallies.entry(mode_identity(&value)).or_insert((value, 0)).1 += 1;
    }

    let highest = tallies.values().map(|(_, count)| *count).max()?;
    Some(
        tallies
            .into_values()
            .filter(|(_, count)| *count == highest)
            .map(|(value, _)| value)
            .sorted_by(sort_cmp)
            .collect(),
    )
}

fn mode_identity(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => format!("bool:{}", v),
        Value::Int(_) | Value::Float(_) => number_identity(value.to_number_lossy()),
        Value::String(s) => match parse_numeric(s) {
            Some(number) => number_identity(number),
            None => format!("str:{}", s),
        },
        container => format!("items:{}", container),
    }
}

fn number_identity(number: Number) -> String {
    match number {
        Number::Int(v) => format!("num:{}", v),
        Number::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => format!("num:{}", v as i64),
        Number::Float(v) => format!("num:{}", format_float(v)),
    }
}
