//! The chainable collection and its combinators.
//!
//! A [Collection] wraps a [crate::store::PathStore] and layers on it:
//!
//! - construction from any [crate::common::Source]
//! - path-addressed access (`get`, `put`, `forget`, `has`)
//! - transforms that return new collections (`filter`, `map`, `group_by`, `sort_by`, ...)
//! - set algebra against foreign sources (`diff`, `intersect`, `union`, `zip`, ...)
//! - slicing and pagination (`slice`, `chunk`, `split`, `for_page`, `nth`)
//! - reductions (`sum`, `avg`, `median`, `mode`, `reduce`, `search`, `random`, ...)
//! - in-place mutators (`pop`, `shift`, `pull`, `splice`, `transform`, `prepend`)
//!
//! ```rust
//! use dotted::collect;
//! use dotted::common::Value;
//!
//! let orders = collect![
//!     {"id" => 1, "status" => "paid", "total" => 30},
//!     {"id" => 2, "status" => "open", "total" => 12},
//!     {"id" => 3, "status" => "paid", "total" => 25},
//! ];
//!
//! let paid = orders.where_eq("status", "paid");
//! assert_eq!(paid.sum_by("total"), Value::Int(55));
//! assert_eq!(paid.pluck("id").values().to_json().unwrap(), "[1,3]");
//! ```

mod aggregate;
mod builder;
#[allow(clippy::module_inception)]
mod collection;
mod mutators;
mod query;
mod set_ops;
mod slicing;
mod sorting;
mod transform;

pub use builder::*;
pub use collection::*;
