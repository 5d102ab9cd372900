use crate::collection::Collection;
use crate::common::{Items, Key, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A foreign type that can present itself as ordered key-value items.
///
/// Implement this for domain types that should take part in collection
/// operations without being converted up front. Path lookups, `pluck`,
/// comparisons and JSON projection all ask the object for its items.
///
/// # Examples
///
/// ```rust
/// use dotted::common::{Arrayable, Items, Key, Value};
///
/// #[derive(Debug)]
/// struct Point { x: i64, y: i64 }
///
/// impl Arrayable for Point {
///     fn to_items(&self) -> Items {
///         let mut items = Items::new();
///         items.insert(Key::from("x"), Value::from(self.x));
///         items.insert(Key::from("y"), Value::from(self.y));
///         items
///     }
/// }
///
/// let point = Value::object(Point { x: 1, y: 2 });
/// assert_eq!(point.container_items().unwrap().len(), 2);
/// ```
pub trait Arrayable: Debug + Send + Sync {
    fn to_items(&self) -> Items;
}

/// Shared handle to an [Arrayable] object stored inside a [Value].
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Arrayable>);

impl ObjectRef {
    pub fn new<T: Arrayable + 'static>(object: T) -> Self {
        ObjectRef(Arc::new(object))
    }

    pub fn to_items(&self) -> Items {
        self.0.to_items()
    }

    /// Checks if both handles point to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.to_items() == other.to_items()
    }
}

/// Anything a collection can be built from, or compared and merged against.
///
/// Variants are resolved in declaration order by [Source::into_items] and
/// [get_arrayable_items].
#[derive(Debug, Clone)]
pub enum Source {
    /// A native ordered mapping (also built from sequences and maps).
    Items(Items),
    /// Another collection.
    Collection(Collection),
    /// A value exposing [Arrayable].
    Arrayable(ObjectRef),
    /// A serde projection of a serializable value.
    Json(serde_json::Value),
    /// Explicit key-value pairs.
    Pairs(Vec<(Key, Value)>),
    /// Anything else.
    Scalar(Value),
}

impl Source {
    /// Projects a serializable value through `serde_json`.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> CollectionResult<Source> {
        let json = serde_json::to_value(value).map_err(|err| {
            log::error!("Failed to project value into JSON: {}", err);
            CollectionError::from(err)
        })?;
        Ok(Source::Json(json))
    }

    /// Builds a source from an iterator of key-value pairs.
    pub fn pairs<K, V, I>(pairs: I) -> Source
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Source::Pairs(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Builds a source from an iterator of values, keyed `0..n`.
    pub fn values<V: Into<Value>, I: IntoIterator<Item = V>>(values: I) -> Source {
        Source::Items(crate::common::sequence(values.into_iter().map(Into::into)))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Source::Scalar(Value::Null) | Source::Json(serde_json::Value::Null))
    }

    /// Normalizes the source into items, rejecting anything that has no
    /// key-value shape. Null normalizes to empty items.
    pub fn into_items(self) -> CollectionResult<Items> {
        match self {
            Source::Scalar(Value::Null) => Ok(Items::new()),
            Source::Scalar(scalar) => {
                log::error!("Cannot build a collection from scalar {:?}", scalar);
                Err(CollectionError::new(
                    &format!("Cannot build a collection from scalar value {:?}", scalar),
                    ErrorKind::TypeError,
                ))
            }
            Source::Json(json) => match Value::from(json) {
                Value::Map(items) => Ok(items),
                Value::Null => Ok(Items::new()),
                scalar => {
                    log::error!("Serialized value {:?} is not a sequence or a mapping", scalar);
                    Err(CollectionError::new(
                        &format!(
                            "Serialized value {:?} is not a sequence or a mapping",
                            scalar
                        ),
                        ErrorKind::TypeError,
                    ))
                }
            },
            other => Ok(get_arrayable_items(other)),
        }
    }
}

/// Normalizes any source into items. Never fails: null becomes empty items
/// and any other scalar is wrapped at key `0`.
pub fn get_arrayable_items<S: Into<Source>>(source: S) -> Items {
    match source.into() {
        Source::Items(items) => items,
        Source::Collection(collection) => collection.into_items(),
        Source::Arrayable(object) => object.to_items(),
        Source::Json(json) => match Value::from(json) {
            Value::Map(items) => items,
            scalar => wrap_scalar(scalar),
        },
        Source::Pairs(pairs) => pairs.into_iter().collect(),
        Source::Scalar(scalar) => wrap_scalar(scalar),
    }
}

fn wrap_scalar(scalar: Value) -> Items {
    let mut items = Items::new();
    if !scalar.is_null() {
        items.insert(Key::Int(0), scalar);
    }
    items
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        match value {
            Value::Map(items) => Source::Items(items),
            Value::Collection(collection) => Source::Collection(collection),
            Value::Object(object) => Source::Arrayable(object),
            scalar => Source::Scalar(scalar),
        }
    }
}

impl From<&Value> for Source {
    fn from(value: &Value) -> Self {
        Source::from(value.clone())
    }
}

impl From<Collection> for Source {
    fn from(value: Collection) -> Self {
        Source::Collection(value)
    }
}

impl From<&Collection> for Source {
    fn from(value: &Collection) -> Self {
        Source::Collection(value.clone())
    }
}

impl From<ObjectRef> for Source {
    fn from(value: ObjectRef) -> Self {
        Source::Arrayable(value)
    }
}

impl From<serde_json::Value> for Source {
    fn from(value: serde_json::Value) -> Self {
        Source::Json(value)
    }
}

impl<K: Into<Key>, V: Into<Value>> From<IndexMap<K, V>> for Source {
    fn from(value: IndexMap<K, V>) -> Self {
        Source::Items(
            value
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Source {
    fn from(value: BTreeMap<K, V>) -> Self {
        Source::pairs(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Source {
    fn from(value: Vec<T>) -> Self {
        Source::values(value)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Source {
    fn from(value: [T; N]) -> Self {
        Source::values(value)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Source {
    fn from(value: &[T]) -> Self {
        Source::values(value.iter().cloned())
    }
}

impl<T: Into<Source>> From<Option<T>> for Source {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Source::Scalar(Value::Null),
        }
    }
}

impl From<()> for Source {
    fn from(_: ()) -> Self {
        Source::Scalar(Value::Null)
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Scalar(Value::from(value))
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::Scalar(Value::from(value))
    }
}

impl From<bool> for Source {
    fn from(value: bool) -> Self {
        Source::Scalar(Value::from(value))
    }
}

impl From<i32> for Source {
    fn from(value: i32) -> Self {
        Source::Scalar(Value::from(value))
    }
}

impl From<i64> for Source {
    fn from(value: i64) -> Self {
        Source::Scalar(Value::from(value))
    }
}

impl From<f64> for Source {
    fn from(value: f64) -> Self {
        Source::Scalar(Value::from(value))
    }
}
