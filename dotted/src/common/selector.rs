use crate::common::{Key, Value};
use crate::store::{lookup, path_segments};
use std::fmt::{Debug, Formatter};

type SelectorFn<'a> = dyn Fn(&Value, &Key) -> Value + 'a;

/// Computes a derived value from a collection entry.
///
/// Grouping, sorting, uniqueness and aggregation operations accept a
/// selector: either a path resolved inside each item, or a function of the
/// item and its key. An empty path selects the item itself.
///
/// # Examples
///
/// ```rust
/// use dotted::collect;
/// use dotted::common::{Selector, Value};
///
/// let people = collect![{"name" => "lee", "age" => 30}, {"name" => "kim", "age" => 25}];
/// assert_eq!(people.sum_by("age"), Value::Int(55));
/// let lengths = people.sum_by(Selector::func(|item, _| {
///     Value::from(item.to_string().len())
/// }));
/// assert!(lengths.as_int().unwrap() > 0);
/// ```
pub enum Selector<'a> {
    Identity,
    Path(String),
    Func(Box<SelectorFn<'a>>),
}

impl<'a> Selector<'a> {
    pub fn path<S: Into<String>>(path: S) -> Self {
        let path = path.into();
        if path.is_empty() {
            Selector::Identity
        } else {
            Selector::Path(path)
        }
    }

    pub fn func<F: Fn(&Value, &Key) -> Value + 'a>(func: F) -> Self {
        Selector::Func(Box::new(func))
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Selector::Identity)
    }

    /// Resolves the selector against an entry. A path that does not resolve
    /// yields [Value::Null].
    ///
    /// Like [crate::store::PathStore::get], a literal key holding the
    /// separator (`"a.b"`) wins over the nested path.
    pub fn resolve(&self, value: &Value, key: &Key, separator: &str) -> Value {
        match self {
            Selector::Identity => value.clone(),
            Selector::Path(path) => {
                if path.contains(separator) {
                    let literal = value
                        .container_items()
                        .and_then(|items| items.get(&Key::parse(path)).cloned());
                    if let Some(literal) = literal {
                        return literal;
                    }
                }
                let segments = path_segments(path, separator);
                lookup(value, &segments).unwrap_or_default()
            }
            Selector::Func(func) => func(value, key),
        }
    }
}

impl Debug for Selector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Identity => write!(f, "Identity"),
            Selector::Path(path) => write!(f, "Path({:?})", path),
            Selector::Func(_) => write!(f, "Func"),
        }
    }
}

impl Default for Selector<'_> {
    fn default() -> Self {
        Selector::Identity
    }
}

impl From<&str> for Selector<'_> {
    fn from(path: &str) -> Self {
        Selector::path(path)
    }
}

impl From<String> for Selector<'_> {
    fn from(path: String) -> Self {
        Selector::path(path)
    }
}

impl From<&String> for Selector<'_> {
    fn from(path: &String) -> Self {
        Selector::path(path.as_str())
    }
}

impl From<Key> for Selector<'_> {
    fn from(key: Key) -> Self {
        Selector::path(key.to_string())
    }
}

impl<'a, T: Into<Selector<'a>>> From<Option<T>> for Selector<'a> {
    fn from(selector: Option<T>) -> Self {
        selector.map(Into::into).unwrap_or_default()
    }
}
