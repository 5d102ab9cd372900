use crate::common::{sequence, Items, Key, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::store::StoreConfig;
use smallvec::SmallVec;

/// Path segment that matches every child of a container during lookups.
pub const WILDCARD: &str = "*";

pub(crate) type Segments = SmallVec<[Key; 8]>;

/// Address of a location inside a [PathStore].
///
/// - `Whole`: the whole store (`""`, `None` or `()`)
/// - `Key`: a single top-level key
/// - `Dotted`: a separator-delimited path, split when it is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    Whole,
    Key(Key),
    Dotted(String),
}

impl Path {
    #[inline]
    pub fn is_whole(&self) -> bool {
        matches!(self, Path::Whole)
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            Path::Whole
        } else {
            Path::Dotted(path.to_string())
        }
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        if path.is_empty() {
            Path::Whole
        } else {
            Path::Dotted(path)
        }
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Path::from(path.as_str())
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Path::Key(key)
    }
}

impl From<&Key> for Path {
    fn from(key: &Key) -> Self {
        Path::Key(key.clone())
    }
}

impl From<i32> for Path {
    fn from(key: i32) -> Self {
        Path::Key(Key::from(key))
    }
}

impl From<i64> for Path {
    fn from(key: i64) -> Self {
        Path::Key(Key::from(key))
    }
}

impl From<usize> for Path {
    fn from(key: usize) -> Self {
        Path::Key(Key::from(key))
    }
}

impl From<()> for Path {
    fn from(_: ()) -> Self {
        Path::Whole
    }
}

impl<T: Into<Path>> From<Option<T>> for Path {
    fn from(path: Option<T>) -> Self {
        path.map(Into::into).unwrap_or(Path::Whole)
    }
}

/// Splits a path into keys.
pub(crate) fn path_segments(path: &str, separator: &str) -> Segments {
    path.split(separator).map(Key::parse).collect()
}

/// Resolves segments inside a value, descending through maps, collections
/// and arrayable objects. A [WILDCARD] segment resolves the remaining
/// segments in every child and gathers the hits into a sequence.
pub(crate) fn lookup(value: &Value, segments: &[Key]) -> Option<Value> {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Some(value.clone()),
    };

    let items = value.container_items()?;
    if head.as_str() == Some(WILDCARD) {
        let hits: Vec<Value> = items
            .values()
            .filter_map(|child| lookup(child, rest))
            .collect();
        return Some(Value::Map(sequence(hits)));
    }
    items.get(head).and_then(|child| lookup(child, rest))
}

fn put_in(items: &mut Items, segments: &[Key], value: Value) {
    match segments {
        [] => {}
        [last] => {
            items.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let slot = items
                .entry(head.clone())
                .or_insert_with(|| Value::Map(Items::new()));
            if let Value::Object(object) = slot {
                let converted = object.to_items();
                *slot = Value::Map(converted);
            }

            match slot {
                Value::Map(nested) => put_in(nested, rest, value),
                Value::Collection(collection) => put_in(collection.items_mut(), rest, value),
                other => {
                    log::debug!("Replacing {:?} at '{}' with a mapping", other, head);
                    let mut nested = Items::new();
                    put_in(&mut nested, rest, value);
                    *other = Value::Map(nested);
                }
            }
        }
    }
}

fn forget_in(items: &mut Items, segments: &[Key]) -> bool {
    match segments {
        [] => false,
        [last] => items.shift_remove(last).is_some(),
        [head, rest @ ..] => match items.get_mut(head) {
            Some(Value::Map(nested)) => forget_in(nested, rest),
            Some(Value::Collection(collection)) => forget_in(collection.items_mut(), rest),
            _ => false,
        },
    }
}

/// Ordered key-value storage addressed by paths.
///
/// Reads check a literal top-level key first, so a key that happens to
/// contain the separator (`"a.b"`) is still reachable.
///
/// The key the next append uses is cached. Writes the store cannot track
/// drop the cache, and the next append scans the keys again.
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    items: Items,
    config: StoreConfig,
    next_index: Option<i64>,
}

impl PathStore {
    pub fn new(config: StoreConfig) -> Self {
        PathStore {
            items: Items::new(),
            config,
            next_index: Some(0),
        }
    }

    pub fn with_items(items: Items, config: StoreConfig) -> Self {
        PathStore {
            items,
            config,
            next_index: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[inline]
    pub fn separator(&self) -> &str {
        self.config.separator()
    }

    /// Gets the value at a path; the whole store for [Path::Whole].
    pub fn get<P: Into<Path>>(&self, path: P) -> Option<Value> {
        match path.into() {
            Path::Whole => Some(Value::Map(self.items.clone())),
            Path::Key(key) => self.items.get(&key).cloned(),
            Path::Dotted(path) => {
                if let Some(value) = self.items.get(&Key::parse(&path)) {
                    return Some(value.clone());
                }
                if !path.contains(self.separator()) {
                    return None;
                }
                let segments = path_segments(&path, self.separator());
                let (head, rest) = segments.split_first()?;
                self.items.get(head).and_then(|value| lookup(value, rest))
            }
        }
    }

    /// Sets the value at a path, creating intermediate mappings as needed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the whole store is replaced by a value that is
    ///   not a container
    /// - `InvalidPath` if the path has an empty segment
    pub fn set<P: Into<Path>, V: Into<Value>>(&mut self, path: P, value: V) -> CollectionResult<()> {
        let value = value.into();
        match path.into() {
            Path::Whole => match value.container_items() {
                Some(items) => {
                    self.items = items.into_owned();
                    self.next_index = None;
                    Ok(())
                }
                None => {
                    log::error!("Cannot replace the whole store with {:?}", value);
                    Err(CollectionError::new(
                        &format!("Cannot replace the whole store with non-container value {:?}", value),
                        ErrorKind::InvalidArgument,
                    ))
                }
            },
            Path::Key(key) => {
                self.track_key(&key);
                self.items.insert(key, value);
                Ok(())
            }
            Path::Dotted(path) => {
                let segments = path_segments(&path, self.separator());
                if segments.iter().any(|key| key.as_str() == Some("")) {
                    log::error!("Path '{}' has an empty segment", path);
                    return Err(CollectionError::new(
                        &format!("Path '{}' has an empty segment", path),
                        ErrorKind::InvalidPath,
                    ));
                }
                if let Some(head) = segments.first() {
                    self.track_key(head);
                }
                put_in(&mut self.items, &segments, value);
                Ok(())
            }
        }
    }

    /// Removes the value at a path. Returns `true` if something was removed.
    pub fn forget<P: Into<Path>>(&mut self, path: P) -> bool {
        self.next_index = None;
        match path.into() {
            Path::Whole => {
                let removed = !self.items.is_empty();
                self.items.clear();
                removed
            }
            Path::Key(key) => self.items.shift_remove(&key).is_some(),
            Path::Dotted(path) => {
                if self.items.shift_remove(&Key::parse(&path)).is_some() {
                    return true;
                }
                let segments = path_segments(&path, self.separator());
                forget_in(&mut self.items, &segments)
            }
        }
    }

    /// Checks if a path resolves, even to a null value.
    pub fn has<P: Into<Path>>(&self, path: P) -> bool {
        match path.into() {
            Path::Key(key) => self.items.contains_key(&key),
            path => self.get(path).is_some(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn items(&self) -> &Items {
        &self.items
    }

    #[inline]
    pub fn items_mut(&mut self) -> &mut Items {
        self.next_index = None;
        &mut self.items
    }

    /// The integer key an append would use: one past the largest integer
    /// key, `0` when there is none.
    pub fn next_index(&mut self) -> i64 {
        match self.next_index {
            Some(index) => index,
            None => {
                let index = self
                    .items
                    .keys()
                    .filter_map(Key::as_int)
                    .max()
                    .map_or(0, |max| max.saturating_add(1));
                self.next_index = Some(index);
                index
            }
        }
    }

    /// Appends a value under [PathStore::next_index].
    pub fn append(&mut self, value: Value) {
        let index = self.next_index();
        self.items.insert(Key::Int(index), value);
        self.next_index = Some(index.saturating_add(1));
    }

    fn track_key(&mut self, key: &Key) {
        if let (Some(next), Some(index)) = (self.next_index, key.as_int()) {
            self.next_index = Some(next.max(index.saturating_add(1)));
        }
    }

    pub fn into_items(self) -> Items {
        self.items
    }
}
