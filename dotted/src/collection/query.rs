use crate::collection::Collection;
use crate::common::{
    get_arrayable_items, values_equal, Comparison, Key, Operator, Selector, Source, Value,
};
use crate::store::{lookup, path_segments};

impl Collection {
    /// The value an item is compared by in the `where` family: the value at
    /// `path` inside container items, the item itself otherwise.
    fn where_target(&self, item: &Value, path: &str) -> Value {
        if path.is_empty() || !item.is_container() {
            return item.clone();
        }
        lookup(item, &path_segments(path, self.separator())).unwrap_or_default()
    }

    /// Keeps the items whose value at `path` satisfies `operator` against
    /// `value`. Keys are preserved.
    ///
    /// ```rust
    /// use dotted::collect;
    ///
    /// let items = collect![{"v" => 1}, {"v" => 2}, {"v" => 3}, {"v" => "3"}, {"v" => 4}];
    /// assert_eq!(items.where_op("v", "===", 3).len(), 1);
    /// assert_eq!(items.where_op("v", "==", 3).len(), 2);
    /// assert_eq!(items.where_op("v", ">=", 3).len(), 3);
    /// ```
    pub fn where_op<O: Into<Operator>, V: Into<Value>>(&self, path: &str, operator: O, value: V) -> Collection {
        let operator = operator.into();
        let value = value.into();
        self.filter(|item, _| operator.evaluate(&self.where_target(item, path), &value))
    }

    /// Keeps the items whose value at `path` is loosely equal to `value`.
    pub fn where_eq<V: Into<Value>>(&self, path: &str, value: V) -> Collection {
        self.where_op(path, Operator::Equal, value)
    }

    /// Keeps the items whose value at `path` is strictly equal to `value`.
    pub fn where_strict<V: Into<Value>>(&self, path: &str, value: V) -> Collection {
        self.where_op(path, Operator::StrictEqual, value)
    }

    /// Keeps the items whose value at `path` is loosely equal to one of the
    /// candidates.
    pub fn where_in<S: Into<Source>>(&self, path: &str, candidates: S) -> Collection {
        self.where_in_with(path, candidates.into(), Comparison::Loose)
    }

    /// Keeps the items whose value at `path` is strictly equal to one of the
    /// candidates.
    pub fn where_in_strict<S: Into<Source>>(&self, path: &str, candidates: S) -> Collection {
        self.where_in_with(path, candidates.into(), Comparison::Strict)
    }

    fn where_in_with(&self, path: &str, candidates: Source, comparison: Comparison) -> Collection {
        let candidates = get_arrayable_items(candidates);
        self.filter(|item, _| {
            let target = self.where_target(item, path);
            candidates
                .values()
                .any(|candidate| values_equal(&target, candidate, comparison))
        })
    }

    /// Checks if any value is loosely equal to `value`.
    pub fn contains<V: Into<Value>>(&self, value: V) -> bool {
        self.search(value).is_some()
    }

    /// Checks if any value is strictly equal to `value`.
    pub fn contains_strict<V: Into<Value>>(&self, value: V) -> bool {
        self.search_strict(value).is_some()
    }

    /// Checks if any entry satisfies the predicate.
    pub fn contains_where<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> bool {
        self.search_where(predicate).is_some()
    }

    /// Checks if any item holds a value loosely equal to `value` at `path`.
    pub fn contains_key_value<V: Into<Value>>(&self, path: &str, value: V) -> bool {
        self.contains_key_value_with(path, value.into(), Comparison::Loose)
    }

    /// Checks if any item holds a value strictly equal to `value` at `path`.
    pub fn contains_key_value_strict<V: Into<Value>>(&self, path: &str, value: V) -> bool {
        self.contains_key_value_with(path, value.into(), Comparison::Strict)
    }

    fn contains_key_value_with(&self, path: &str, value: Value, comparison: Comparison) -> bool {
        let selector = Selector::path(path);
        self.contains_where(|item, key| {
            values_equal(&selector.resolve(item, key, self.separator()), &value, comparison)
        })
    }

    /// The key of the first value loosely equal to `value`.
    pub fn search<V: Into<Value>>(&self, value: V) -> Option<Key> {
        let needle = value.into();
        self.search_where(|item, _| values_equal(item, &needle, Comparison::Loose))
    }

    /// The key of the first value strictly equal to `value`.
    pub fn search_strict<V: Into<Value>>(&self, value: V) -> Option<Key> {
        let needle = value.into();
        self.search_where(|item, _| values_equal(item, &needle, Comparison::Strict))
    }

    /// The key of the first entry satisfying the predicate.
    pub fn search_where<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Option<Key> {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(key, _)| key.clone())
    }
}
