/// Specifies the direction for sorting collection items.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value
/// - `Descending`: Sort from largest to smallest value
///
/// # Usage
/// ```rust
/// use dotted::collect;
/// use dotted::common::{SortFlags, SortOrder};
///
/// let sorted = collect![3, 1, 2].sort_by("", SortFlags::Regular, SortOrder::Descending);
/// assert_eq!(sorted.values().to_json().unwrap(), "[3,2,1]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest)
    #[default]
    Ascending,
    /// Sort in descending order (largest to smallest)
    Descending,
}

/// How sort keys are compared.
///
/// - `Regular`: loose ordering of the values themselves
/// - `Numeric`: values are read as numbers, non-numeric values count as zero
/// - `String`: values are compared by their string conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortFlags {
    #[default]
    Regular,
    Numeric,
    String,
}
