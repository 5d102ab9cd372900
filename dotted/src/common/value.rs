use crate::collection::Collection;
use crate::common::util::{format_float, parse_numeric, Number};
use crate::common::{strict_eq, Arrayable, Key, ObjectRef};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

/// The ordered key-value mapping every collection is made of.
///
/// Insertion order is significant; sequences are mappings whose keys are
/// `0..n`.
pub type Items = IndexMap<Key, Value>;

/// Represents an entry value in a [Collection].
///
/// # Variants
/// - Null: Absence of a value
/// - Bool(bool): Boolean true/false
/// - Int(i64): Integer value
/// - Float(f64): Floating point value
/// - String(String): Text value
/// - Map(Items): Nested ordered mapping (sequences use keys `0..n`)
/// - Collection(Collection): Nested collection, e.g. the chunks of [Collection::chunk]
/// - Object(ObjectRef): Foreign value exposing the [Arrayable] capability
///
/// # Equality
/// `==` on values is *strict*: same variant and same content, maps compared
/// entry by entry in order. Loose (coercing) comparison lives in
/// [crate::common::loose_eq] and is selected explicitly by the operations that
/// need it.
///
/// # Usage
/// ```rust
/// use dotted::common::Value;
/// use dotted::value;
///
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let nested = value!({"name" => "lee", "tags" => ["a", "b"]});
/// assert!(nested.is_map());
/// assert_eq!(v1.as_int(), Some(42));
/// assert_eq!(v2.as_str(), Some("hello"));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents an integer value.
    Int(i64),
    /// Represents a floating point value.
    Float(f64),
    /// Represents a string value.
    String(String),
    /// Represents a nested ordered mapping.
    Map(Items),
    /// Represents a nested collection.
    Collection(Collection),
    /// Represents a foreign arrayable value.
    Object(ObjectRef),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        strict_eq(self, other)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Map(items) => f.debug_map().entries(items.iter()).finish(),
            Value::Collection(collection) => write!(f, "Collection{:?}", collection),
            Value::Object(object) => write!(f, "Object({:?})", object),
        }
    }
}

/// String conversion of a value, as used by `join`/`implode` and by string
/// sorting: null and `false` are empty, `true` is `"1"`, integral floats
/// print without a fraction and compound values print as JSON.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => write!(f, "1"),
            Value::Bool(false) => Ok(()),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::String(v) => write!(f, "{}", v),
            compound => write!(f, "{}", compound.to_json_string()),
        }
    }
}

impl Value {
    /// Creates a new [Value] from anything that converts into one.
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Wraps a foreign [Arrayable] value.
    pub fn object<T: Arrayable + 'static>(object: T) -> Value {
        Value::Object(ObjectRef::new(object))
    }

    /// Creates a sequence value from the given values, keyed `0..n`.
    pub fn from_vec<T: Into<Value>>(values: Vec<T>) -> Value {
        Value::Map(sequence(values.into_iter().map(Into::into)))
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Items> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Items> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Checks if the value holds nested items: a map, a collection or an
    /// arrayable object.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Collection(_) | Value::Object(_))
    }

    /// Checks if the value is a number or a numeric string.
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => parse_numeric(s).is_some(),
            _ => false,
        }
    }

    /// Truthiness: null, `false`, `0`, `0.0`, `""`, `"0"` and empty maps are
    /// falsy; collections and objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::String(v) => !v.is_empty() && v != "0",
            Value::Map(v) => !v.is_empty(),
            Value::Collection(_) | Value::Object(_) => true,
        }
    }

    /// Returns the nested items of a container value.
    ///
    /// Maps and collections are borrowed; objects are asked for a fresh copy
    /// of their items.
    pub fn container_items(&self) -> Option<Cow<'_, Items>> {
        match self {
            Value::Map(items) => Some(Cow::Borrowed(items)),
            Value::Collection(collection) => Some(Cow::Borrowed(collection.items())),
            Value::Object(object) => Some(Cow::Owned(object.to_items())),
            _ => None,
        }
    }

    /// Returns the numeric view of the value: numbers, booleans and numeric
    /// strings have one.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(v) => Some(Number::Int(*v)),
            Value::Float(v) => Some(Number::Float(*v)),
            Value::Bool(v) => Some(Number::Int(i64::from(*v))),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Numeric view used by arithmetic, where anything without a numeric
    /// reading counts as zero.
    pub fn to_number_lossy(&self) -> Number {
        self.as_number().unwrap_or(Number::Int(0))
    }

    /// Projects the value into plain data: nested collections and objects
    /// become maps, recursively.
    pub fn to_plain(&self) -> Value {
        match self {
            Value::Map(items) => Value::Map(plain_items(items)),
            Value::Collection(collection) => Value::Map(plain_items(collection.items())),
            Value::Object(object) => Value::Map(plain_items(&object.to_items())),
            scalar => scalar.clone(),
        }
    }

    /// JSON text of the value. Encoding a [Value] cannot fail, non-finite
    /// floats are written as `null`.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to encode value as JSON: {}", err);
            String::new()
        })
    }

    /// Takes the value, replacing it with [Value::Null].
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }
}

/// Builds sequence items keyed `0..n` from the given values.
pub fn sequence<I: IntoIterator<Item = Value>>(values: I) -> Items {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| (Key::from(index), value))
        .collect()
}

/// Checks if the items form a list: keys are exactly `0..n` in order.
pub fn is_list(items: &Items) -> bool {
    items
        .keys()
        .enumerate()
        .all(|(index, key)| key.as_int() == i64::try_from(index).ok())
}

pub(crate) fn plain_items(items: &Items) -> Items {
    items
        .iter()
        .map(|(key, value)| (key.clone(), value.to_plain()))
        .collect()
}

pub(crate) fn serialize_items<S: Serializer>(items: &Items, serializer: S) -> Result<S::Ok, S::Error> {
    if is_list(items) {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for value in items.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    } else {
        let mut map = serializer.serialize_map(Some(items.len()))?;
        for (key, value) in items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Map(items) => serialize_items(items, serializer),
            Value::Collection(collection) => serialize_items(collection.items(), serializer),
            Value::Object(object) => serialize_items(&object.to_items(), serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "any JSON-like value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            values.push(value);
        }
        Ok(Value::Map(sequence(values)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut items = Items::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, Value>()? {
            items.insert(key, value);
        }
        Ok(Value::Map(items))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        value.to_value()
    }
}

impl From<Items> for Value {
    fn from(value: Items) -> Self {
        Value::Map(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::from_vec(value)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        Value::Map(sequence(value.into_iter().map(Into::into)))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(int) => Value::Int(int),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(values) => {
                Value::Map(sequence(values.into_iter().map(Value::from)))
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (Key::from(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Builds a [Value] with JSON-like syntax.
///
/// Maps use `key => value` pairs inside braces, sequences use brackets.
/// `null` builds [Value::Null]. Expressions other than literals, negative
/// numbers included, must be wrapped in parentheses.
///
/// ```rust
/// use dotted::value;
/// use dotted::common::Value;
///
/// let user = value!({"name" => "lee", "roles" => ["admin", "dev"], "age" => (20 + 1)});
/// assert!(user.is_map());
/// assert_eq!(value!(3), Value::Int(3));
/// ```
#[macro_export]
macro_rules! value {
    ({ $($key:tt => $value:tt),* $(,)? }) => {
        {
            #[allow(unused_mut)]
            let mut items = $crate::common::Items::new();
            $(
                items.insert($crate::common::Key::from($key), $crate::value!($value));
            )*
            $crate::common::Value::Map(items)
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Map($crate::common::sequence(::std::vec![$($crate::value!($value)),*]))
    };

    (null) => {
        $crate::common::Value::Null
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[macro_export]
macro_rules! key {
    ($value:expr) => {
        $crate::common::Key::from($value)
    };
}
