//! Value model shared by the store and the collection.
//!
//! - [Key] and [Value]: the entries collections are made of
//! - [Source] and [Arrayable]: what collections are built from and compared against
//! - [Comparison], [Operator] and the `loose_*`/`strict_*` functions: value comparison
//! - [sort_cmp]: the total order sorting and statistics use
//! - [Selector]: per-item projection used by grouping, sorting and aggregation
//! - [SortOrder] and [SortFlags]: sort options

mod arrayable;
mod compare;
mod key;
mod selector;
mod sort_order;
pub mod util;
mod value;

pub use arrayable::*;
pub use compare::*;
pub use key::*;
pub use selector::*;
pub use sort_order::*;
pub use value::*;
