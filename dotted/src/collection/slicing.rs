use crate::collection::Collection;
use crate::common::{Items, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

/// Resolves slice bounds the way negative offsets and lengths are read:
/// a negative offset counts from the end, a negative length stops that many
/// items before the end.
pub(crate) fn slice_bounds(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let len_signed = len as isize;
    let start = if offset < 0 {
        (len_signed + offset).max(0)
    } else {
        offset.min(len_signed)
    };
    let end = match length {
        None => len_signed,
        Some(length) if length < 0 => (len_signed + length).max(start),
        Some(length) => start.saturating_add(length).min(len_signed),
    };
    (start as usize, end.max(start) as usize)
}

impl Collection {
    /// Takes the entries from `offset`, `length` of them or all the rest.
    /// Keys are preserved.
    pub fn slice(&self, offset: isize, length: Option<isize>) -> Collection {
        let (start, end) = slice_bounds(self.len(), offset, length);
        self.derive(
            self.iter()
                .skip(start)
                .take(end - start)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Takes the first `limit` entries, or the last `-limit` entries for a
    /// negative limit.
    pub fn take(&self, limit: isize) -> Collection {
        if limit < 0 {
            self.slice(limit, None)
        } else {
            self.slice(0, Some(limit))
        }
    }

    /// Takes the entries of a 1-based page. Page `0` reads as page `1`.
    pub fn for_page(&self, page: usize, per_page: usize) -> Collection {
        let offset = page.max(1).saturating_sub(1).saturating_mul(per_page);
        let offset = isize::try_from(offset).unwrap_or(isize::MAX);
        let per_page = isize::try_from(per_page).unwrap_or(isize::MAX);
        self.slice(offset, Some(per_page))
    }

    /// Splits the entries into nested collections of `size` entries each;
    /// the last one may be smaller. Keys are preserved inside each chunk.
    pub fn chunk(&self, size: usize) -> Collection {
        if size == 0 {
            log::warn!("Chunk size must be positive, returning an empty collection");
            return self.derive(Items::new());
        }

        let entries: Vec<_> = self.iter().collect();
        let chunks = entries.chunks(size).map(|chunk| {
            Value::Collection(
                self.derive(
                    chunk
                        .iter()
                        .map(|(key, value)| ((*key).clone(), (*value).clone()))
                        .collect(),
                ),
            )
        });
        self.derive_values(chunks)
    }

    /// Splits the entries into at most `groups` chunks of equal size,
    /// except the last.
    pub fn split(&self, groups: usize) -> Collection {
        if groups == 0 {
            log::warn!("Cannot split into zero groups, returning an empty collection");
            return self.derive(Items::new());
        }
        if self.is_empty() {
            return self.derive(Items::new());
        }
        self.chunk(self.len().div_ceil(groups))
    }

    /// Takes every `step`-th value starting at position `offset`, re-keyed
    /// `0..n`. Positions count from zero regardless of keys.
    pub fn nth(&self, step: usize, offset: usize) -> Collection {
        if step == 0 {
            log::warn!("Step must be positive, returning an empty collection");
            return self.derive(Items::new());
        }
        let values = self
            .items()
            .values()
            .enumerate()
            .filter(|(position, _)| position % step == offset)
            .map(|(_, value)| value.clone());
        self.derive_values(values)
    }

    /// Reverses the order of the entries, keeping every key with its value.
    pub fn reverse(&self) -> Collection {
        self.derive(
            self.iter()
                .rev()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Shuffles the values into a random order, re-keyed `0..n`.
    ///
    /// With a seed the order is reproducible: the same seed always gives the
    /// same permutation of the same values.
    pub fn shuffle(&self, seed: Option<u64>) -> Collection {
        let mut values: Vec<Value> = self.items().values().cloned().collect();
        match seed {
            Some(seed) => values.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => values.shuffle(&mut thread_rng()),
        }
        self.derive_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect;

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice_bounds(8, 3, None), (3, 8));
        assert_eq!(slice_bounds(8, -3, None), (5, 8));
        assert_eq!(slice_bounds(8, 3, Some(3)), (3, 6));
        assert_eq!(slice_bounds(8, 3, Some(-1)), (3, 7));
        assert_eq!(slice_bounds(8, -5, Some(-3)), (3, 5));
        assert_eq!(slice_bounds(8, 10, None), (8, 8));
        assert_eq!(slice_bounds(8, -20, Some(2)), (0, 2));
        assert_eq!(slice_bounds(3, 2, Some(-2)), (2, 2));
    }

    #[test]
    fn test_slice_preserves_keys() {
        let collection = collect![1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(collection.slice(3, None).values(), collect![4, 5, 6, 7, 8]);
        assert_eq!(collection.slice(-3, None), collect!{5 => 6, 6 => 7, 7 => 8});
        assert_eq!(collection.slice(-5, Some(3)).values(), collect![4, 5, 6]);
        assert_eq!(collection.slice(3, Some(-1)).values(), collect![4, 5, 6, 7]);
        assert_eq!(collection.slice(-5, Some(-3)).values(), collect![4, 5]);
    }

    #[test]
    fn test_take() {
        let collection = collect!["taylor", "dayle", "shawn"];
        assert_eq!(collection.take(2), collect!["taylor", "dayle"]);
        assert_eq!(collection.take(-2), collect!{1 => "dayle", 2 => "shawn"});
        assert!(collection.take(0).is_empty());
    }

    #[test]
    fn test_for_page() {
        let collection = collect!["one", "two", "three", "four"];
        assert_eq!(collection.for_page(1, 2), collect!["one", "two"]);
        assert_eq!(collection.for_page(2, 2), collect!{2 => "three", 3 => "four"});
        assert!(collection.for_page(3, 2).is_empty());
        assert_eq!(collection.for_page(0, 2), collection.for_page(1, 2));
    }

    #[test]
    fn test_chunk() {
        let collection = collect![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let chunks = collection.chunk(3);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], Value::Collection(collect![1, 2, 3]));
        assert_eq!(chunks[3], Value::Collection(collect!{9 => 10}));
        assert!(collection.chunk(0).is_empty());
    }

    #[test]
    fn test_split() {
        let values_of = |split: Collection| split.map(|chunk, _| {
            chunk.as_collection().map(|c| Value::Collection(c.values())).unwrap_or_default()
        });

        let even = collect!["a", "b", "c", "d"].split(2);
        assert_eq!(values_of(even).to_json().unwrap(), r#"[["a","b"],["c","d"]]"#);
        let uneven = collect!["a", "b", "c"].split(2);
        assert_eq!(values_of(uneven).to_json().unwrap(), r#"[["a","b"],["c"]]"#);
        let fewer = collect!["a"].split(2);
        assert_eq!(values_of(fewer).to_json().unwrap(), r#"[["a"]]"#);
        assert!(Collection::new().split(2).is_empty());
        assert!(collect![1].split(0).is_empty());
    }

    #[test]
    fn test_nth() {
        let data = collect!{6 => "a", 4 => "b", 7 => "c", 1 => "d", 5 => "e", 3 => "f"};
        assert_eq!(data.nth(4, 0), collect!["a", "e"]);
        assert_eq!(data.nth(4, 1), collect!["b", "f"]);
        assert_eq!(data.nth(4, 2), collect!["c"]);
        assert_eq!(data.nth(4, 3), collect!["d"]);
        assert!(data.nth(0, 0).is_empty());
    }

    #[test]
    fn test_reverse_keeps_keys() {
        let data = collect!{"name" => "taylor", "framework" => "rocket"};
        assert_eq!(data.reverse(), collect!{"framework" => "rocket", "name" => "taylor"});
        assert_eq!(collect!["zaeed", "alan"].reverse(), collect!{1 => "alan", 0 => "zaeed"});
    }

    #[test]
    fn test_shuffle_with_seed_is_reproducible() {
        let data = collect![1, 2, 3, 4, 5, 6];
        let first = data.shuffle(Some(1234));
        let second = data.shuffle(Some(1234));
        assert_eq!(first, second);
        assert_eq!(first.sort().values().len(), 6);
        assert_eq!(first.keys(), collect![0, 1, 2, 3, 4, 5]);
    }
}
