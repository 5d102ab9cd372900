use crate::collection::Collection;
use crate::common::{sort_cmp, Key, Selector, SortFlags, SortOrder, Value};
use std::cmp::Ordering;

fn compare_with_flags(left: &Value, right: &Value, flags: SortFlags) -> Ordering {
    match flags {
        SortFlags::Regular => sort_cmp(left, right),
        SortFlags::Numeric => left.to_number_lossy().total_cmp(right.to_number_lossy()),
        SortFlags::String => left.to_string().cmp(&right.to_string()),
    }
}

impl Collection {
    /// Sorts the values in ascending [sort_cmp] order. The sort is stable and
    /// keeps every key with its value.
    pub fn sort(&self) -> Collection {
        self.sort_with(sort_cmp)
    }

    /// Sorts the values with a comparator. The sort is stable and keeps every
    /// key with its value.
    pub fn sort_with<F: Fn(&Value, &Value) -> Ordering>(&self, comparator: F) -> Collection {
        let mut entries: Vec<(&Key, &Value)> = self.iter().collect();
        entries.sort_by(|(_, left), (_, right)| comparator(left, right));
        self.derive(
            entries
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Sorts by the value the selector computes for every item.
    ///
    /// Sort keys are computed once per item; the items are then read back in
    /// sorted order with their original keys. Items with equal sort keys keep
    /// their relative order in both directions.
    pub fn sort_by<'a, S: Into<Selector<'a>>>(&self, selector: S, flags: SortFlags, order: SortOrder) -> Collection {
        let selector = selector.into();
        let mut entries: Vec<(Value, &Key, &Value)> = self
            .iter()
            .map(|(key, value)| (selector.resolve(value, key, self.separator()), key, value))
            .collect();

        entries.sort_by(|(left, _, _), (right, _, _)| {
            let ordering = compare_with_flags(left, right, flags);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        self.derive(
            entries
                .into_iter()
                .map(|(_, key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Sorts by the selector in descending loose order.
    pub fn sort_by_desc<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Collection {
        self.sort_by(selector, SortFlags::Regular, SortOrder::Descending)
    }
}
