use crate::collection::Collection;
use crate::common::{
    get_arrayable_items, loose_eq, values_equal, Comparison, Items, Key, Selector, Source, Value,
};

impl Collection {
    /// Keeps the entries for which `predicate(value, key)` holds. Keys are
    /// preserved.
    pub fn filter<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Collection {
        self.derive(
            self.iter()
                .filter(|(key, value)| predicate(value, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Keeps the truthy values.
    pub fn filter_truthy(&self) -> Collection {
        self.filter(|value, _| value.is_truthy())
    }

    /// Drops the entries for which `predicate(value, key)` holds.
    pub fn reject<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Collection {
        self.filter(|value, key| !predicate(value, key))
    }

    /// Drops the values loosely equal to `value`.
    pub fn reject_value<V: Into<Value>>(&self, value: V) -> Collection {
        let rejected = value.into();
        self.filter(|value, _| !loose_eq(value, &rejected))
    }

    /// Applies `f(value, key)` to every entry. Keys are preserved.
    pub fn map<F: Fn(&Value, &Key) -> Value>(&self, f: F) -> Collection {
        self.derive(
            self.iter()
                .map(|(key, value)| (key.clone(), f(value, key)))
                .collect(),
        )
    }

    /// Maps, then appends the values of every container result into one
    /// sequence.
    pub fn flat_map<F: Fn(&Value, &Key) -> Value>(&self, f: F) -> Collection {
        self.map(f).collapse()
    }

    /// Maps every entry to key-value pairs and merges them into one
    /// collection. Later keys overwrite earlier ones.
    pub fn map_with_keys<F: Fn(&Value, &Key) -> Value>(&self, f: F) -> Collection {
        let mut items = Items::new();
        for (key, value) in self.iter() {
            items.extend(get_arrayable_items(f(value, key)));
        }
        self.derive(items)
    }

    /// Flattens nested containers at any depth into one sequence.
    pub fn flatten(&self) -> Collection {
        let mut values = Vec::new();
        flatten_into(self.items(), None, &mut values);
        self.derive_values(values)
    }

    /// Flattens nested containers `depth` levels deep into one sequence.
    /// A depth of zero flattens nothing but still discards the keys.
    pub fn flatten_depth(&self, depth: usize) -> Collection {
        if depth == 0 {
            return self.values();
        }
        let mut values = Vec::new();
        flatten_into(self.items(), Some(depth), &mut values);
        self.derive_values(values)
    }

    /// Appends the values of every container item into one sequence; items
    /// that are not containers are skipped.
    pub fn collapse(&self) -> Collection {
        let values = self
            .items()
            .values()
            .filter_map(|value| value.container_items())
            .flat_map(|items| items.into_owned().into_values());
        self.derive_values(values)
    }

    /// Resolves `path` in every item. Unresolved paths give null.
    pub fn pluck<'a, S: Into<Selector<'a>>>(&self, path: S) -> Collection {
        let selector = path.into();
        let values = self
            .iter()
            .map(|(key, value)| selector.resolve(value, key, self.separator()));
        self.derive_values(values)
    }

    /// Resolves `path` in every item and keys the result by the value at
    /// `key_path`. Later keys overwrite earlier ones.
    pub fn pluck_keyed<'a, 'b, S, K>(&self, path: S, key_path: K) -> Collection
    where
        S: Into<Selector<'a>>,
        K: Into<Selector<'b>>,
    {
        let selector = path.into();
        let key_selector = key_path.into();
        let separator = self.separator();
        self.derive(
            self.iter()
                .map(|(key, value)| {
                    let new_key = Key::from_value(&key_selector.resolve(value, key, separator));
                    (new_key, selector.resolve(value, key, separator))
                })
                .collect(),
        )
    }

    /// Groups the items into nested collections by the label the selector
    /// computes.
    ///
    /// A selector that yields a container puts the item into one group per
    /// value it holds. Groups appear in the order their labels are first
    /// seen. Inside a group items are re-keyed `0..n`, unless `preserve_keys`
    /// is set.
    pub fn group_by<'a, S: Into<Selector<'a>>>(&self, selector: S, preserve_keys: bool) -> Collection {
        let selector = selector.into();
        let mut groups: Items = Items::new();

        for (key, value) in self.iter() {
            let labels = selector.resolve(value, key, self.separator());
            let labels: Vec<Value> = match labels.container_items() {
                Some(items) => items.into_owned().into_values().collect(),
                None => vec![labels],
            };

            for label in labels {
                let group = groups
                    .entry(Key::from_value(&label))
                    .or_insert_with(|| Value::Collection(self.derive(Items::new())));
                if let Value::Collection(bucket) = group {
                    if preserve_keys {
                        bucket.items_mut().insert(key.clone(), value.clone());
                    } else {
                        bucket.push(value.clone());
                    }
                }
            }
        }
        self.derive(groups)
    }

    /// Keys every item by the value the selector computes. Later items
    /// overwrite earlier ones with the same key.
    pub fn key_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Collection {
        let selector = selector.into();
        self.derive(
            self.iter()
                .map(|(key, value)| {
                    let new_key = Key::from_value(&selector.resolve(value, key, self.separator()));
                    (new_key, value.clone())
                })
                .collect(),
        )
    }

    /// Keeps the first of every group of loosely equal values. Keys are
    /// preserved.
    pub fn unique(&self) -> Collection {
        self.unique_with(Selector::Identity, Comparison::Loose)
    }

    /// Keeps the first item for every loosely distinct selector result.
    pub fn unique_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Collection {
        self.unique_with(selector.into(), Comparison::Loose)
    }

    /// Keeps the first of every group of strictly equal values.
    pub fn unique_strict(&self) -> Collection {
        self.unique_with(Selector::Identity, Comparison::Strict)
    }

    /// Keeps the first item for every strictly distinct selector result.
    pub fn unique_strict_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Collection {
        self.unique_with(selector.into(), Comparison::Strict)
    }

    fn unique_with(&self, selector: Selector<'_>, comparison: Comparison) -> Collection {
        let mut seen: Vec<Value> = Vec::new();
        let mut items = Items::new();
        for (key, value) in self.iter() {
            let identity = selector.resolve(value, key, self.separator());
            if seen.iter().any(|other| values_equal(&identity, other, comparison)) {
                continue;
            }
            seen.push(identity);
            items.insert(key.clone(), value.clone());
        }
        self.derive(items)
    }

    /// The values, re-keyed `0..n`.
    pub fn values(&self) -> Collection {
        self.derive_values(self.items().values().cloned())
    }

    /// The keys, as a sequence of values.
    pub fn keys(&self) -> Collection {
        self.derive_values(self.items().keys().map(Key::to_value))
    }

    /// Swaps keys and values. Values that are neither integers nor strings
    /// cannot be keys and are skipped.
    pub fn flip(&self) -> Collection {
        let mut items = Items::new();
        for (key, value) in self.iter() {
            match value {
                Value::Int(_) | Value::String(_) => {
                    items.insert(Key::from_value(value), key.to_value());
                }
                other => log::warn!("Cannot flip {:?} into a key, skipping it", other),
            }
        }
        self.derive(items)
    }

    /// Merges a source in: integer keys are appended after renumbering,
    /// string keys overwrite.
    pub fn merge<S: Into<Source>>(&self, source: S) -> Collection {
        let mut items = Items::new();
        let mut next = 0i64;
        let incoming = get_arrayable_items(source);
        for (key, value) in self.iter().map(|(k, v)| (k.clone(), v.clone())).chain(incoming) {
            match key {
                Key::Int(_) => {
                    items.insert(Key::Int(next), value);
                    next += 1;
                }
                key => {
                    items.insert(key, value);
                }
            }
        }
        self.derive(items)
    }
}

fn flatten_into(items: &Items, depth: Option<usize>, out: &mut Vec<Value>) {
    for value in items.values() {
        match value.container_items() {
            None => out.push(value.clone()),
            Some(nested) => match depth {
                Some(1) => out.extend(nested.values().cloned()),
                Some(depth) => flatten_into(&nested, Some(depth - 1), out),
                None => flatten_into(&nested, None, out),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collect;
    use crate::collection::Collection;
    use crate::common::{Key, Selector, Value};
    use crate::value;

    #[test]
    fn test_filter_preserves_keys() {
        let collection = collect![1, 2, 3, 4];
        let even = collection.filter(|value, _| value.as_int().unwrap_or(0) % 2 == 0);
        assert_eq!(even, collect!{1 => 2, 3 => 4});
    }

    #[test]
    fn test_filter_truthy() {
        let collection = collect!["", "Hello", "0", 0, null, "World"];
        assert_eq!(collection.filter_truthy(), collect!{1 => "Hello", 5 => "World"});
    }

    #[test]
    fn test_reject() {
        let collection = collect!["foo", "bar"];
        assert_eq!(collection.reject_value("bar").values(), collect!["foo"]);
        assert_eq!(
            collection.reject(|value, _| value.as_str() == Some("foo")).values(),
            collect!["bar"]
        );
        let with_nulls = collect!["foo", null];
        assert_eq!(with_nulls.reject_value(Value::Null), collect!["foo"]);
    }

    #[test]
    fn test_map_preserves_keys() {
        let collection = collect!{"first" => "taylor", "last" => "otwell"};
        let mapped = collection.map(|value, key| Value::from(format!("{}-{}", key, value)));
        assert_eq!(mapped, collect!{"first" => "first-taylor", "last" => "last-otwell"});
    }

    #[test]
    fn test_flat_map() {
        let people = collect![
            {"name" => "taylor", "hobbies" => ["programming", "basketball"]},
            {"name" => "adam", "hobbies" => ["music", "powerlifting"]},
        ];
        let hobbies = people.flat_map(|person, _| {
            person.container_items().and_then(|p| p.get(&Key::from("hobbies")).cloned()).unwrap_or_default()
        });
        assert_eq!(hobbies, collect!["programming", "basketball", "music", "powerlifting"]);
    }

    #[test]
    fn test_map_with_keys() {
        let people = collect![
            {"name" => "Blastoise", "type" => "Water", "idx" => 9},
            {"name" => "Charmander", "type" => "Fire", "idx" => 4},
            {"name" => "Dragonair", "type" => "Dragon", "idx" => 148},
        ];
        let mapped = people.map_with_keys(|pokemon, _| {
            let items = pokemon.container_items().unwrap_or_default().into_owned();
            let name = items.get(&Key::from("name")).cloned().unwrap_or_default();
            let kind = items.get(&Key::from("type")).cloned().unwrap_or_default();
            let mut pair = crate::common::Items::new();
            pair.insert(Key::from_value(&name), kind);
            Value::Map(pair)
        });
        assert_eq!(
            mapped,
            collect!{"Blastoise" => "Water", "Charmander" => "Fire", "Dragonair" => "Dragon"}
        );
    }

    #[test]
    fn test_flatten_laws() {
        let nested = collect![["#foo", ["#bar", ["#baz"]]], "#zap"];
        assert_eq!(nested.flatten_depth(1), collect!["#foo", ["#bar", ["#baz"]], "#zap"]);
        assert_eq!(nested.flatten(), collect!["#foo", "#bar", "#baz", "#zap"]);
        assert_eq!(nested.flatten_depth(2), collect!["#foo", "#bar", ["#baz"], "#zap"]);
    }

    #[test]
    fn test_flatten_discards_keys_and_unwraps_collections() {
        let mut collection = collect!{"lang" => {"php" => "PHP", "rust" => "Rust"}};
        collection.put("more", collect!["Go"]).unwrap();
        assert_eq!(collection.flatten(), collect!["PHP", "Rust", "Go"]);
    }

    #[test]
    fn test_collapse_skips_scalars() {
        let collection = collect![[1, 2], 3, [4], {"x" => 5}];
        assert_eq!(collection.collapse(), collect![1, 2, 4, 5]);
    }

    #[test]
    fn test_pluck() {
        let data = collect![{"name" => "lee", "email" => "foo"}, {"name" => "dayle", "email" => "bar"}];
        assert_eq!(data.pluck("email"), collect!["foo", "bar"]);
        assert_eq!(data.pluck_keyed("email", "name"), collect!{"lee" => "foo", "dayle" => "bar"});
        assert_eq!(data.pluck("missing"), collect![null, null]);
    }

    #[test]
    fn test_group_by_path() {
        let data = collect![{"rating" => 1, "url" => "1"}, {"rating" => 1, "url" => "1"}, {"rating" => 2, "url" => "2"}];
        let grouped = data.group_by("rating", false);
        assert_eq!(grouped.keys(), collect![1, 2]);
        assert_eq!(grouped[1].as_collection().map(Collection::len), Some(2));
        assert_eq!(grouped[2].as_collection().map(Collection::len), Some(1));
    }

    #[test]
    fn test_group_by_preserving_keys() {
        let data = collect!{10 => {"rating" => 1}, 20 => {"rating" => 1}, 30 => {"rating" => 2}};
        let grouped = data.group_by("rating", true);
        let first = grouped[1].as_collection().cloned().unwrap_or_default();
        assert_eq!(first.keys(), collect![10, 20]);
    }

    #[test]
    fn test_group_by_multiple_labels() {
        let users = collect![
            {"user" => 1, "roles" => ["Role_1", "Role_3"]},
            {"user" => 2, "roles" => ["Role_1", "Role_2"]},
            {"user" => 3, "roles" => ["Role_1"]},
        ];
        let grouped = users.group_by("roles", false);
        assert_eq!(grouped.keys(), collect!["Role_1", "Role_3", "Role_2"]);
        assert_eq!(grouped.get("Role_1").and_then(|g| g.as_collection().map(Collection::len)), Some(3));
        assert_eq!(grouped.get("Role_2.0.user"), Some(Value::Int(2)));
        assert_eq!(grouped.get("Role_3.0.user"), Some(Value::Int(1)));
    }

    #[test]
    fn test_group_by_function() {
        let words = collect!["apple", "avocado", "banana"];
        let grouped = words.group_by(
            Selector::func(|value, _| Value::from(value.to_string().chars().next().unwrap_or(' '))),
            false,
        );
        assert_eq!(grouped.keys(), collect!["a", "b"]);
    }

    #[test]
    fn test_key_by() {
        let data = collect![{"rating" => 1, "name" => "1"}, {"rating" => 2, "name" => "2"}, {"rating" => 3, "name" => "3"}];
        let keyed = data.key_by("rating");
        assert_eq!(keyed.keys(), collect![1, 2, 3]);
        let keyed = data.key_by(Selector::func(|item, _| {
            Value::from(item.to_plain().as_map().and_then(|m| m.get(&Key::from("rating")).and_then(Value::as_int)).unwrap_or(0) * 2)
        }));
        assert_eq!(keyed.keys(), collect![2, 4, 6]);
    }

    #[test]
    fn test_unique() {
        let collection = collect!["Hello", "World", "World"];
        assert_eq!(collection.unique(), collect!["Hello", "World"]);
        let mixed = collect![1, "1", 2, "2", 3];
        assert_eq!(mixed.unique(), collect!{0 => 1, 2 => 2, 4 => 3});
        assert_eq!(mixed.unique_strict(), mixed);
    }

    #[test]
    fn test_unique_by() {
        let people = collect![
            {"id" => 1, "first" => "Taylor", "last" => "Otwell"},
            {"id" => 2, "first" => "Taylor", "last" => "Otwell"},
            {"id" => 3, "first" => "Abigail", "last" => "Otwell"},
        ];
        assert_eq!(people.unique_by("first").pluck("id").values(), collect![1, 3]);
        assert_eq!(people.unique_strict_by("last").len(), 1);
    }

    #[test]
    fn test_values_and_keys_are_idempotent() {
        let collection = collect!{"b" => 1, "a" => 2};
        assert_eq!(collection.values(), collect![1, 2]);
        assert_eq!(collection.values().values(), collection.values());
        assert_eq!(collection.keys(), collect!["b", "a"]);
        assert_eq!(collection.keys().keys(), collect![0, 1]);
        assert_eq!(collection.keys().values(), collection.keys());
    }

    #[test]
    fn test_flip() {
        let data = collect!{"name" => "lee", "framework" => "ecfectus"};
        assert_eq!(data.flip(), collect!{"lee" => "name", "ecfectus" => "framework"});
        let skipped = collect![[1], "x"];
        assert_eq!(skipped.flip(), collect!{"x" => 1});
    }

    #[test]
    fn test_merge() {
        let collection = collect!{"name" => "Hello"};
        assert_eq!(collection.merge(value!({"id" => 1})), collect!{"name" => "Hello", "id" => 1});
        assert_eq!(collection.merge(Value::Null), collection);
        let collection = collect!{"name" => "Hello", "id" => 1};
        assert_eq!(
            collection.merge(collect!{"name" => "World", "id" => 1}),
            collect!{"name" => "World", "id" => 1}
        );
        let numbers = collect!{5 => "a"};
        assert_eq!(numbers.merge(vec!["b"]), collect!["a", "b"]);
    }
}
