use crate::common::Value;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

/// The key of an entry in a collection.
///
/// Keys are either integers or strings. A string that spells a canonical
/// decimal integer (`"0"`, `"42"`, `"-7"`, but not `"007"`, `"+1"` or `"1.0"`)
/// is normalized to [Key::Int] so that `"1"` and `1` address the same slot.
///
/// # Examples
///
/// ```rust
/// use dotted::common::Key;
///
/// assert_eq!(Key::from("12"), Key::Int(12));
/// assert_eq!(Key::from("012"), Key::Str("012".to_string()));
/// assert_eq!(Key::from(3usize), Key::Int(3));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integer key, as produced by sequences.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Parses a key, normalizing canonical integer strings to [Key::Int].
    pub fn parse(key: &str) -> Key {
        match canonical_int(key) {
            Some(int) => Key::Int(int),
            None => Key::Str(key.to_string()),
        }
    }

    /// Converts a value into a key.
    ///
    /// Integers and strings map directly; booleans become `0`/`1`; floats are
    /// truncated; null becomes the empty string. Compound values have no
    /// natural key and are keyed by their JSON text.
    pub fn from_value(value: &Value) -> Key {
        match value {
            Value::Int(v) => Key::Int(*v),
            Value::String(s) => Key::parse(s),
            Value::Bool(b) => Key::Int(i64::from(*b)),
            Value::Float(f) => Key::Int(f.trunc() as i64),
            Value::Null => Key::Str(String::new()),
            compound => {
                log::warn!("Using a compound value as a key: {:?}", compound);
                Key::Str(compound.to_json_string())
            }
        }
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(v) => Some(*v),
            Key::Str(_) => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Returns the key as a value: [Value::Int] or [Value::String].
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(v) => Value::Int(*v),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

fn canonical_int(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // leading zeros and negative zero stay strings
    if (digits.len() > 1 && digits.starts_with('0')) || key == "-0" {
        return None;
    }
    key.parse::<i64>().ok()
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::parse(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        match canonical_int(&value) {
            Some(int) => Key::Int(int),
            None => Key::Str(value),
        }
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::parse(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(v) => Key::Int(v),
            Err(_) => Key::Str(value.to_string()),
        }
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Int(i64::from(value))
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(v) => serializer.serialize_i64(*v),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "an integer or string key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(Key::Int(v)),
            Err(_) => Ok(Key::Str(v.to_string())),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
        Ok(Key::parse(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_integers() {
        assert_eq!(Key::parse("0"), Key::Int(0));
        assert_eq!(Key::parse("42"), Key::Int(42));
        assert_eq!(Key::parse("-7"), Key::Int(-7));
    }

    #[test]
    fn test_parse_keeps_non_canonical_strings() {
        assert_eq!(Key::parse("007"), Key::Str("007".to_string()));
        assert_eq!(Key::parse("+1"), Key::Str("+1".to_string()));
        assert_eq!(Key::parse("1.0"), Key::Str("1.0".to_string()));
        assert_eq!(Key::parse("-0"), Key::Str("-0".to_string()));
        assert_eq!(Key::parse(""), Key::Str(String::new()));
        assert_eq!(Key::parse("99999999999999999999"), Key::Str("99999999999999999999".to_string()));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Key::from_value(&Value::Bool(true)), Key::Int(1));
        assert_eq!(Key::from_value(&Value::Float(2.9)), Key::Int(2));
        assert_eq!(Key::from_value(&Value::Null), Key::Str(String::new()));
        assert_eq!(Key::from_value(&Value::from("5")), Key::Int(5));
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(Key::Int(3).to_string(), "3");
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(format!("{:?}", Key::from("name")), "\"name\"");
    }

    #[test]
    fn test_deserialize_from_json_object_key() {
        let key: Key = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(key, Key::Int(10));
        let key: Key = serde_json::from_str("\"ten\"").unwrap();
        assert_eq!(key, Key::from("ten"));
    }
}
