//! Path-addressed storage.
//!
//! A [PathStore] owns ordered key-value items and resolves separator-delimited
//! paths (`"user.address.city"`) into them. The empty path addresses the whole
//! store.
//!
//! ```rust
//! use dotted::store::{PathStore, StoreConfig};
//!
//! let mut store = PathStore::new(StoreConfig::default());
//! store.set("user.address.city", "Paris").unwrap();
//! assert!(store.has("user.address"));
//! assert_eq!(store.get("user.address.city").unwrap().as_str(), Some("Paris"));
//! store.forget("user.address");
//! assert!(!store.has("user.address.city"));
//! ```

mod path_store;
mod store_config;

pub use path_store::*;
pub use store_config::*;
