use crate::collection::Collection;
use crate::common::util::{average, median, mode, sum};
use crate::common::{loose_cmp, Key, Selector, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use itertools::Itertools;
use rand::seq::index::sample;
use rand::{thread_rng, Rng};
use std::cmp::Ordering;

impl Collection {
    /// Values computed by the selector for every item, in order.
    fn selected<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Vec<Value> {
        let selector = selector.into();
        self.iter()
            .map(|(key, value)| selector.resolve(value, key, self.separator()))
            .collect()
    }

    /// Like [Collection::selected], without the null values.
    fn selected_non_null<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Vec<Value> {
        self.selected(selector)
            .into_iter()
            .filter(|value| !value.is_null())
            .collect()
    }

    /// Sum of the values. Integral unless a float takes part; `0` for an
    /// empty collection. Non-numeric values count as zero.
    pub fn sum(&self) -> Value {
        sum(self.items().values()).into_value()
    }

    /// Sum of the values the selector computes for every item.
    ///
    /// ```rust
    /// use dotted::collect;
    /// use dotted::common::Value;
    ///
    /// let orders = collect![{"total" => 10}, {"total" => 5.5}];
    /// assert_eq!(orders.sum_by("total"), Value::Float(15.5));
    /// ```
    pub fn sum_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Value {
        sum(&self.selected(selector)).into_value()
    }

    /// Mean of the non-null values, `None` if there are none.
    pub fn avg(&self) -> Option<Value> {
        self.avg_by(Selector::Identity)
    }

    pub fn avg_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Option<Value> {
        average(&self.selected_non_null(selector)).map(|number| number.into_value())
    }

    /// Smallest non-null value in loose order. The first of equal values wins.
    pub fn min(&self) -> Option<Value> {
        self.min_by(Selector::Identity)
    }

    pub fn min_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Option<Value> {
        self.extremum(selector, Ordering::Less)
    }

    /// Largest non-null value in loose order. The first of equal values wins.
    pub fn max(&self) -> Option<Value> {
        self.max_by(Selector::Identity)
    }

    pub fn max_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Option<Value> {
        self.extremum(selector, Ordering::Greater)
    }

    fn extremum<'a, S: Into<Selector<'a>>>(&self, selector: S, wanted: Ordering) -> Option<Value> {
        self.selected_non_null(selector)
            .into_iter()
            .reduce(|best, candidate| {
                if loose_cmp(&candidate, &best) == wanted {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Median of the non-null values; the mean of the two middle values for
    /// an even count.
    ///
    /// ```rust
    /// use dotted::collect;
    /// use dotted::common::Value;
    ///
    /// assert_eq!(collect![1, 2, 2, 4].median(), Some(Value::Int(2)));
    /// assert_eq!(collect![0, 3].median(), Some(Value::Float(1.5)));
    /// ```
    pub fn median(&self) -> Option<Value> {
        self.median_by(Selector::Identity)
    }

    pub fn median_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Option<Value> {
        median(self.selected_non_null(selector))
    }

    /// Every value sharing the highest frequency, in ascending order. `None`
    /// for an empty collection.
    pub fn mode(&self) -> Option<Vec<Value>> {
        self.mode_by(Selector::Identity)
    }

    pub fn mode_by<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Option<Vec<Value>> {
        mode(self.selected(selector))
    }

    /// Folds the entries in order, starting from `initial`.
    pub fn reduce<T, F: FnMut(T, &Value, &Key) -> T>(&self, mut f: F, initial: T) -> T {
        self.iter()
            .fold(initial, |carry, (key, value)| f(carry, value, key))
    }

    /// Joins items into a string.
    ///
    /// When the first item is a container, `first` is read as a path plucked
    /// from every item and `glue` separates the results. Otherwise `first`
    /// itself is the glue and the values are joined directly.
    ///
    /// ```rust
    /// use dotted::collect;
    ///
    /// let people = collect![{"name" => "lee"}, {"name" => "dayle"}];
    /// assert_eq!(people.implode("name", Some(",")), "lee,dayle");
    /// assert_eq!(collect!["lee", "dayle"].implode(",", None), "lee,dayle");
    /// ```
    pub fn implode(&self, first: &str, glue: Option<&str>) -> String {
        match self.first() {
            Some(value) if value.is_container() => self.implode_by(first, glue.unwrap_or_default()),
            _ => self.join(first),
        }
    }

    /// Joins the values at `path` of every item with `glue`.
    pub fn implode_by(&self, path: &str, glue: &str) -> String {
        self.pluck(path).join(glue)
    }

    /// Joins the string forms of the values with `glue`.
    pub fn join(&self, glue: &str) -> String {
        self.items().values().join(glue)
    }

    /// A random value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the collection is empty.
    pub fn random(&self) -> CollectionResult<Value> {
        self.random_with(&mut thread_rng())
    }

    /// A random value drawn with the given generator.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CollectionResult<Value> {
        if self.is_empty() {
            log::error!("Cannot pick a random item from an empty collection");
            return Err(CollectionError::new(
                "Cannot pick a random item from an empty collection",
                ErrorKind::InvalidArgument,
            ));
        }
        let position = rng.gen_range(0..self.len());
        self.items()
            .get_index(position)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                log::error!("Random position {} is out of bounds", position);
                CollectionError::new("Random position is out of bounds", ErrorKind::InternalError)
            })
    }

    /// `count` distinct random entries, in their original order and with
    /// their original keys.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `count` exceeds the number of items.
    pub fn random_many(&self, count: usize) -> CollectionResult<Collection> {
        self.random_many_with(count, &mut thread_rng())
    }

    /// Like [Collection::random_many], drawing with the given generator.
    pub fn random_many_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> CollectionResult<Collection> {
        if count > self.len() {
            let message = format!(
                "You requested {} items, but there are only {} items in the collection",
                count,
                self.len()
            );
            log::error!("{}", message);
            return Err(CollectionError::new(&message, ErrorKind::InvalidArgument));
        }

        let positions = sample(rng, self.len(), count).into_iter().sorted();
        Ok(self.derive(
            positions
                .filter_map(|position| self.items().get_index(position))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::collect;
    use crate::collection::Collection;
    use crate::common::{Key, Selector, Value};
    use crate::errors::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sum() {
        assert_eq!(collect![1, 2, 3, 4, 5].sum(), Value::Int(15));
        assert_eq!(Collection::new().sum(), Value::Int(0));
        let items = collect![{"foo" => 50}, {"foo" => 50}];
        assert_eq!(items.sum_by("foo"), Value::Int(100));
        assert_eq!(Collection::new().sum_by("foo"), Value::Int(0));
        assert_eq!(
            items.sum_by(Selector::func(|item, _| item.as_map().map_or(Value::Null, |m| m[&Key::from("foo")].clone()))),
            Value::Int(100)
        );
    }

    #[test]
    fn test_avg() {
        let items = collect![{"foo" => 10}, {"foo" => 20}];
        assert_eq!(items.avg_by("foo"), Some(Value::Int(15)));
        assert_eq!(collect![1, 2, 3, 4, 5].avg(), Some(Value::Int(3)));
        assert_eq!(collect![1, 2].avg(), Some(Value::Float(1.5)));
        assert_eq!(collect![1, null, 3].avg(), Some(Value::Int(2)));
        assert_eq!(Collection::new().avg(), None);
    }

    #[test]
    fn test_min_and_max() {
        let items = collect![{"foo" => 10}, {"foo" => 20}];
        assert_eq!(items.max_by("foo"), Some(Value::Int(20)));
        assert_eq!(items.min_by("foo"), Some(Value::Int(10)));
        assert_eq!(collect![1, 2, 3, 4, 5].max(), Some(Value::Int(5)));
        assert_eq!(collect![1, 2, 3, 4, 5].min(), Some(Value::Int(1)));
        assert_eq!(collect![null, 3, 2].min(), Some(Value::Int(2)));
        assert_eq!(Collection::new().max(), None);
        assert_eq!(Collection::new().min(), None);
    }

    #[test]
    fn test_extremum_ties_keep_first() {
        let values = collect![1, "1", 0];
        assert_eq!(values.max(), Some(Value::Int(1)));
        let values = collect!["2", 2];
        assert_eq!(values.min(), Some(Value::from("2")));
    }

    #[test]
    fn test_median() {
        assert_eq!(collect![1, 2, 2, 4].median(), Some(Value::Int(2)));
        assert_eq!(collect![{"foo" => 0}, {"foo" => 3}].median_by("foo"), Some(Value::Float(1.5)));
        assert_eq!(collect![{"foo" => 0}, {"foo" => 5}, {"foo" => 3}].median_by("foo"), Some(Value::Int(3)));
        assert_eq!(Collection::new().median(), None);
    }

    #[test]
    fn test_mode() {
        assert_eq!(Collection::new().mode(), None);
        assert_eq!(collect![1, 2, 3, 4, 4, 5].mode(), Some(vec![Value::Int(4)]));
        assert_eq!(collect![1, 2, 2, 1].mode(), Some(vec![Value::Int(1), Value::Int(2)]));
        let items = collect![{"foo" => 1}, {"foo" => 1}, {"foo" => 2}, {"foo" => 4}];
        assert_eq!(items.mode_by("foo"), Some(vec![Value::Int(1)]));
    }

    #[test]
    fn test_reduce() {
        let data = collect![1, 2, 3];
        let total = data.reduce(|carry, value, _| carry + value.as_int().unwrap_or(0), 0);
        assert_eq!(total, 6);
        let keys = collect!{"a" => 1, "b" => 2}.reduce(
            |mut carry: Vec<String>, _, key| {
                carry.push(key.to_string());
                carry
            },
            Vec::new(),
        );
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_implode() {
        let data = collect![{"name" => "lee", "email" => "foo"}, {"name" => "dayle", "email" => "bar"}];
        assert_eq!(data.implode("email", None), "foobar");
        assert_eq!(data.implode("email", Some(",")), "foo,bar");

        let data = collect!["lee", "dayle"];
        assert_eq!(data.implode("", None), "leedayle");
        assert_eq!(data.implode(",", None), "lee,dayle");
        assert_eq!(data.join(", "), "lee, dayle");
        assert_eq!(collect![1, 2.5, true, null].join("|"), "1|2.5|1|");
        assert_eq!(Collection::new().implode(",", None), "");
    }

    #[test]
    fn test_random() {
        let data = collect![1, 2, 3, 4, 5, 6];
        let value = data.random().unwrap();
        assert!(value.is_int());
        assert!(data.contains_strict(value));

        let many = data.random_many(3).unwrap();
        assert_eq!(many.len(), 3);
        assert!(many.iter().all(|(key, value)| data.items().get(key) == Some(value)));
        assert!(data.random_many(0).unwrap().is_empty());
        assert_eq!(data.random_many(6).unwrap(), data);
    }

    #[test]
    fn test_random_is_reproducible_with_seeded_rng() {
        let data = collect![1, 2, 3, 4, 5, 6];
        let first = data.random_many_with(3, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = data.random_many_with(3, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            data.random_with(&mut StdRng::seed_from_u64(7)).unwrap(),
            data.random_with(&mut StdRng::seed_from_u64(7)).unwrap()
        );
    }

    #[test]
    fn test_random_errors() {
        let err = Collection::new().random().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

        let err = collect![1, 2, 3].random_many(4).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
        assert_eq!(
            err.message(),
            "You requested 4 items, but there are only 3 items in the collection"
        );
    }
}
