//! # Dotted - Chainable Ordered Collections
//!
//! Dotted provides an ordered key-value container with a large vocabulary of
//! composable query, transform and aggregation operations, plus
//! path-addressed access into nested data (`"user.address.city"`).
//!
//! ## Key Features
//!
//! - **Ordered**: entries keep their insertion order; keys are integers or strings
//! - **Path access**: `get`, `put`, `has` and `forget` resolve separator-delimited paths
//! - **Chainable**: transforms return new collections, mutators return `&mut Self`
//! - **Loose and strict comparison**: explicit comparison modes for `where`, `contains`, `unique`, ...
//! - **Statistics**: `sum`, `avg`, `min`, `max`, `median`, `mode`
//! - **Foreign sources**: anything [common::Arrayable], serde-serializable or iterable
//! - **JSON projection**: `Serialize`, `Deserialize`, `to_json` and `Display`
//!
//! ## Quick Start
//!
//! ```rust
//! use dotted::collect;
//! use dotted::common::{SortFlags, SortOrder, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut people = collect![
//!     {"name" => "lee", "role" => "admin", "age" => 34},
//!     {"name" => "kim", "role" => "user", "age" => 27},
//!     {"name" => "sam", "role" => "admin", "age" => 41},
//! ];
//!
//! let admins = people
//!     .where_eq("role", "admin")
//!     .sort_by("age", SortFlags::Regular, SortOrder::Descending)
//!     .pluck("name")
//!     .values();
//! assert_eq!(admins.to_json()?, r#"["sam","lee"]"#);
//!
//! people.put("1.role", "admin")?;
//! assert_eq!(people.where_eq("role", "admin").len(), 3);
//! assert_eq!(people.avg_by("age"), Some(Value::Int(34)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - The [Collection], its builder and its combinators
//! - [`common`] - Keys, values, sources, comparison and selectors
//! - [`errors`] - Error types and result definitions
//! - [`store`] - The path-addressed [store::PathStore] and its configuration

pub mod collection;
pub mod common;
pub mod errors;
pub mod store;

pub use collection::{Collection, CollectionBuilder};
pub use common::{get_arrayable_items, Arrayable, Items, Key, Source, Value};
pub use errors::{CollectionError, CollectionResult, ErrorKind};
