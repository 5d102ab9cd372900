use crate::collection::CollectionBuilder;
use crate::common::{plain_items, sequence, Items, Key, Source, Value};
use crate::errors::{CollectionError, CollectionResult};
use crate::store::{Path, PathStore, StoreConfig};
use indexmap::IndexMap;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

/// An ordered key-value container with a chainable combinator surface.
///
/// A `Collection` owns one [PathStore]. Reads and transforms return new
/// collections that never share storage with their source; the in-place
/// mutators (`put`, `push`, `prepend`, `forget`, `pop`, `shift`, `pull`,
/// `splice`, `transform`) change the collection they are called on.
///
/// Keys are integers or strings. Sequences are collections keyed `0..n`.
/// Every derived collection keeps the path separator of its source.
///
/// # Examples
///
/// ```rust
/// use dotted::collect;
/// use dotted::common::Value;
///
/// let mut users = collect![
///     {"name" => "lee", "address" => {"city" => "Leeds"}},
///     {"name" => "kim", "address" => {"city" => "York"}},
/// ];
/// assert_eq!(users.get("1.address.city"), Some(Value::from("York")));
///
/// let cities = users.pluck("address.city");
/// assert_eq!(cities.to_json().unwrap(), r#"["Leeds","York"]"#);
///
/// users.put("0.address.city", "Hull").unwrap();
/// assert_eq!(users.get("0.address.city"), Some(Value::from("Hull")));
/// ```
#[derive(Clone, Default)]
pub struct Collection {
    store: PathStore,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection::default()
    }

    /// Creates a builder for collections with a custom configuration.
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::new()
    }

    pub(crate) fn with_store(store: PathStore) -> Self {
        Collection { store }
    }

    /// Creates a collection holding the given items.
    pub fn from_items(items: Items) -> Self {
        Collection::with_store(PathStore::with_items(items, StoreConfig::default()))
    }

    /// Creates a collection from any source with a key-value shape.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for scalars, which have no key-value shape. Null
    /// builds an empty collection.
    pub fn try_from_source<S: Into<Source>>(source: S) -> CollectionResult<Self> {
        Ok(Collection::from_items(source.into().into_items()?))
    }

    /// Creates a collection from the serde projection of a value.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if the value does not serialize to a sequence or a
    /// mapping, or `EncodingError` if it cannot be serialized at all.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> CollectionResult<Self> {
        Collection::try_from_source(Source::serialize(value)?)
    }

    /// Builds a collection from an iterator of key-value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect()
    }

    /// Builds a collection keyed `0..n` from an iterator of values.
    pub fn from_values<V: Into<Value>, I: IntoIterator<Item = V>>(values: I) -> Self {
        values.into_iter().map(Into::into).collect()
    }

    /// Wraps items in a collection configured like this one.
    pub(crate) fn derive(&self, items: Items) -> Collection {
        Collection::with_store(PathStore::with_items(items, self.store.config().clone()))
    }

    /// Wraps values, keyed `0..n`, in a collection configured like this one.
    pub(crate) fn derive_values<I: IntoIterator<Item = Value>>(&self, values: I) -> Collection {
        self.derive(sequence(values))
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        self.store.config()
    }

    #[inline]
    pub fn separator(&self) -> &str {
        self.store.separator()
    }

    #[inline]
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    /// Gets the value at a path. The empty path returns all items as a
    /// [Value::Map].
    pub fn get<P: Into<Path>>(&self, path: P) -> Option<Value> {
        self.store.get(path)
    }

    /// Gets the value at a path, or the default if the path does not resolve.
    pub fn get_or<P: Into<Path>, V: Into<Value>>(&self, path: P, default: V) -> Value {
        self.store.get(path).unwrap_or_else(|| default.into())
    }

    /// All items, in order.
    #[inline]
    pub fn all(&self) -> &Items {
        self.store.items()
    }

    #[inline]
    pub fn items(&self) -> &Items {
        self.store.items()
    }

    #[inline]
    pub(crate) fn items_mut(&mut self) -> &mut Items {
        self.store.items_mut()
    }

    pub fn into_items(self) -> Items {
        self.store.into_items()
    }

    /// Sets the value at a path. An empty path (`""` or `None`) appends the
    /// value under the next integer key instead.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the path has an empty segment.
    pub fn put<P: Into<Path>, V: Into<Value>>(&mut self, path: P, value: V) -> CollectionResult<&mut Self> {
        let path = path.into();
        if path.is_whole() {
            return Ok(self.push(value));
        }
        self.store.set(path, value)?;
        Ok(self)
    }

    /// Replaces all items with the normalized source.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if the source has no key-value shape.
    pub fn replace<S: Into<Source>>(&mut self, source: S) -> CollectionResult<&mut Self> {
        let items = source.into().into_items()?;
        self.store.set(Path::Whole, items)?;
        Ok(self)
    }

    /// Appends a value under the next integer key.
    pub fn push<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.store.append(value.into());
        self
    }

    /// Removes the value at a path. Missing paths are ignored.
    pub fn forget<P: Into<Path>>(&mut self, path: P) -> &mut Self {
        self.store.forget(path);
        self
    }

    /// Checks if a path resolves, even to a null value.
    pub fn has<P: Into<Path>>(&self, path: P) -> bool {
        self.store.has(path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn is_not_empty(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.store.iter()
    }

    pub fn first(&self) -> Option<&Value> {
        self.items().first().map(|(_, value)| value)
    }

    pub fn first_where<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Option<&Value> {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    pub fn last(&self) -> Option<&Value> {
        self.items().last().map(|(_, value)| value)
    }

    pub fn last_where<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Option<&Value> {
        self.iter()
            .rev()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Calls `f` for each entry in order, stopping early when it returns
    /// `false`.
    pub fn each<F: FnMut(&Value, &Key) -> bool>(&self, mut f: F) -> &Self {
        for (key, value) in self.iter() {
            if !f(value, key) {
                break;
            }
        }
        self
    }

    /// Passes the collection to `f` and returns its result.
    pub fn pipe<T, F: FnOnce(&Self) -> T>(&self, f: F) -> T {
        f(self)
    }

    /// Items with nested collections and objects turned into plain maps.
    pub fn to_array(&self) -> Items {
        plain_items(self.items())
    }

    /// The collection as a plain value, ready to be serialized.
    pub fn json_serialize(&self) -> Value {
        Value::Map(self.to_array())
    }

    /// JSON text of the collection. Items keyed exactly `0..n` encode as a
    /// JSON array, anything else as an object.
    pub fn to_json(&self) -> CollectionResult<String> {
        serde_json::to_string(self).map_err(|err| {
            log::error!("Failed to encode collection as JSON: {}", err);
            CollectionError::from(err)
        })
    }

    pub fn to_json_pretty(&self) -> CollectionResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            log::error!("Failed to encode collection as JSON: {}", err);
            CollectionError::from(err)
        })
    }
}

/// Renumbers integer keys `0..`, keeping string keys and the order.
pub(crate) fn reindex<I: IntoIterator<Item = (Key, Value)>>(entries: I) -> Items {
    let mut next = 0i64;
    entries
        .into_iter()
        .map(|(key, value)| match key {
            Key::Int(_) => {
                let key = Key::Int(next);
                next += 1;
                (key, value)
            }
            key => (key, value),
        })
        .collect()
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((lk, lv), (rk, rv))| lk == rk && lv == rv)
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl<K: Into<Key>> Index<K> for Collection {
    type Output = Value;

    /// Reads a top-level key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present, like indexing a `HashMap`.
    fn index(&self, key: K) -> &Value {
        let key = key.into();
        match self.items().get(&key) {
            Some(value) => value,
            None => panic!("key {:?} is not present in the collection", key),
        }
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_items().into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection::from_items(sequence(iter))
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Collection::from_items(iter.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        Collection::from_values(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Collection {
    fn from(values: [T; N]) -> Self {
        Collection::from_values(values)
    }
}

impl<K: Into<Key>, V: Into<Value>> From<IndexMap<K, V>> for Collection {
    fn from(map: IndexMap<K, V>) -> Self {
        Collection::from_pairs(map)
    }
}

impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Collection {
    fn from(map: BTreeMap<K, V>) -> Self {
        Collection::from_pairs(map)
    }
}

impl TryFrom<Value> for Collection {
    type Error = CollectionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Collection::try_from_source(value)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::common::serialize_items(self.items(), serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Collection::try_from_source(value).map_err(de::Error::custom)
    }
}

/// Builds a [Collection] with JSON-like syntax.
///
/// `collect![a, b, c]` builds a sequence, `collect!{"k" => v, ...}` a keyed
/// collection. Values follow the rules of [crate::value!]: nested `{}` maps
/// and `[]` sequences are allowed, other expressions need parentheses.
///
/// ```rust
/// use dotted::collect;
///
/// let numbers = collect![1, 2, 3];
/// let user = collect!{"name" => "lee", "roles" => ["admin"], "age" => (20 + 1)};
/// assert_eq!(numbers.len(), 3);
/// assert!(user.has("roles.0"));
/// ```
#[macro_export]
macro_rules! collect {
    ($($key:tt => $value:tt),+ $(,)?) => {
        {
            let mut items = $crate::common::Items::new();
            $(
                items.insert($crate::common::Key::from($key), $crate::value!($value));
            )+
            $crate::collection::Collection::from_items(items)
        }
    };

    ($($value:tt),* $(,)?) => {
        $crate::collection::Collection::from_items(
            $crate::common::sequence(::std::vec![$($crate::value!($value)),*])
        )
    };
}
