use crate::collection::Collection;
use crate::common::{get_arrayable_items, loose_eq, Key, Source, Value};
use crate::store::Path;

impl Collection {
    /// Keeps the values that are not loosely equal to any value of the
    /// source. Keys are preserved.
    pub fn diff<S: Into<Source>>(&self, source: S) -> Collection {
        let other = get_arrayable_items(source);
        self.filter(|value, _| !other.values().any(|candidate| loose_eq(value, candidate)))
    }

    /// Keeps the entries whose key is not a key of the source.
    pub fn diff_keys<S: Into<Source>>(&self, source: S) -> Collection {
        let other = get_arrayable_items(source);
        self.filter(|_, key| !other.contains_key(key))
    }

    /// Keeps the values that are loosely equal to some value of the source.
    /// Keys are preserved.
    pub fn intersect<S: Into<Source>>(&self, source: S) -> Collection {
        let other = get_arrayable_items(source);
        self.filter(|value, _| other.values().any(|candidate| loose_eq(value, candidate)))
    }

    /// Adds the entries of the source whose keys are not present yet.
    /// Existing entries win.
    pub fn union<S: Into<Source>>(&self, source: S) -> Collection {
        let mut items = self.items().clone();
        for (key, value) in get_arrayable_items(source) {
            items.entry(key).or_insert(value);
        }
        self.derive(items)
    }

    /// Uses the values of this collection as keys for the values of the
    /// source, pairing them by position.
    ///
    /// Positions beyond the shorter side are dropped.
    pub fn combine<S: Into<Source>>(&self, source: S) -> Collection {
        let values = get_arrayable_items(source);
        if values.len() != self.len() {
            log::warn!(
                "Combining {} keys with {} values, extra positions are dropped",
                self.len(),
                values.len()
            );
        }
        self.derive(
            self.items()
                .values()
                .zip(values.into_values())
                .map(|(key, value)| (Key::from_value(key), value))
                .collect(),
        )
    }

    /// Pairs the values of this collection with the values of every source
    /// by position.
    ///
    /// The result has one nested collection per value of this collection.
    /// Sources shorter than this collection contribute null.
    pub fn zip<S, I>(&self, sources: I) -> Collection
    where
        S: Into<Source>,
        I: IntoIterator<Item = S>,
    {
        let others: Vec<Vec<Value>> = sources
            .into_iter()
            .map(|source| get_arrayable_items(source).into_values().collect())
            .collect();

        let rows = self.items().values().enumerate().map(|(position, value)| {
            let row = std::iter::once(value.clone()).chain(
                others
                    .iter()
                    .map(|other| other.get(position).cloned().unwrap_or_default()),
            );
            Value::Collection(self.derive_values(row))
        });
        self.derive_values(rows)
    }

    /// Keeps the entries whose keys are listed, in this collection's order.
    /// A null key list keeps everything.
    pub fn only<S: Into<Source>>(&self, keys: S) -> Collection {
        let keys = keys.into();
        if keys.is_null() {
            return self.clone();
        }
        let wanted: Vec<Key> = get_arrayable_items(keys)
            .values()
            .map(Key::from_value)
            .collect();
        self.filter(|_, key| wanted.contains(key))
    }

    /// Drops the listed keys. String keys are read as paths, so nested
    /// entries can be dropped too.
    pub fn except<S: Into<Source>>(&self, keys: S) -> Collection {
        let mut result = self.clone();
        for value in get_arrayable_items(keys).into_values() {
            let path = match value {
                Value::String(path) => Path::from(path),
                other => Path::Key(Key::from_value(&other)),
            };
            if !path.is_whole() {
                result.forget(path);
            }
        }
        result
    }
}
