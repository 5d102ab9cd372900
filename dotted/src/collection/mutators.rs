use crate::collection::slicing::slice_bounds;
use crate::collection::{reindex, Collection};
use crate::common::{get_arrayable_items, Items, Key, Source, Value};
use crate::store::Path;
use std::mem;

impl Collection {
    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<Value> {
        self.items_mut().pop().map(|(_, value)| value)
    }

    /// Removes and returns the first value. The remaining integer keys are
    /// renumbered from `0`.
    pub fn shift(&mut self) -> Option<Value> {
        let (_, value) = self.items_mut().shift_remove_index(0)?;
        let items = mem::take(self.items_mut());
        *self.items_mut() = reindex(items);
        Some(value)
    }

    /// Removes and returns the value at a path.
    pub fn pull<P: Into<Path>>(&mut self, path: P) -> Option<Value> {
        let path = path.into();
        let value = self.get(path.clone())?;
        self.forget(path);
        Some(value)
    }

    /// Removes and returns the value at a path, or the default if the path
    /// does not resolve.
    pub fn pull_or<P: Into<Path>, V: Into<Value>>(&mut self, path: P, default: V) -> Value {
        self.pull(path).unwrap_or_else(|| default.into())
    }

    /// Removes `length` entries from `offset` (all the rest for `None`) and
    /// inserts the values of `replacement` in their place.
    ///
    /// Offsets and lengths read like [Collection::slice]. Integer keys of the
    /// result are renumbered from `0`, string keys are kept. Returns the
    /// removed entries, renumbered the same way.
    ///
    /// ```rust
    /// use dotted::collect;
    ///
    /// let mut data = collect!["foo", "baz"];
    /// let cut = data.splice(1, Some(1), "bar");
    /// assert_eq!(data, collect!["foo", "bar"]);
    /// assert_eq!(cut, collect!["baz"]);
    /// ```
    pub fn splice<S: Into<Source>>(&mut self, offset: isize, length: Option<isize>, replacement: S) -> Collection {
        let (start, end) = slice_bounds(self.len(), offset, length);
        let mut entries: Vec<(Key, Value)> = mem::take(self.items_mut()).into_iter().collect();

        let inserted = get_arrayable_items(replacement)
            .into_values()
            .map(|value| (Key::Int(0), value));
        let removed: Vec<(Key, Value)> = entries.splice(start..end, inserted).collect();

        *self.items_mut() = reindex(entries);
        self.derive(reindex(removed))
    }

    /// Replaces every value with the result of `f(value, key)`.
    pub fn transform<F: Fn(&Value, &Key) -> Value>(&mut self, f: F) -> &mut Self {
        let mapped = self.map(f).into_items();
        *self.items_mut() = mapped;
        self
    }

    /// Adds a value at the front. Integer keys are renumbered from `0`.
    pub fn prepend<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        let items = mem::take(self.items_mut());
        *self.items_mut() = reindex(std::iter::once((Key::Int(0), value.into())).chain(items));
        self
    }

    /// Adds a value under `key` at the front. An existing entry with the same
    /// key is replaced.
    pub fn prepend_keyed<K: Into<Key>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        let mut items = mem::take(self.items_mut());
        items.shift_remove(&key);

        let mut prepended = Items::with_capacity(items.len() + 1);
        prepended.insert(key, value.into());
        prepended.extend(items);
        *self.items_mut() = prepended;
        self
    }
}
