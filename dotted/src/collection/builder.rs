use crate::collection::Collection;
use crate::common::Source;
use crate::errors::{CollectionError, CollectionResult};
use crate::store::{PathStore, StoreConfig};

/// Fluent builder for collections with a custom configuration.
///
/// Configuration errors are captured and returned by `build`/`build_from`,
/// so a chain of setters never has to be interrupted.
///
/// # Examples
///
/// ```rust
/// use dotted::collection::Collection;
/// use dotted::common::Value;
///
/// let mut settings = Collection::builder().separator("/").build().unwrap();
/// settings.put("db/host", "localhost").unwrap();
/// assert_eq!(settings.get("db/host"), Some(Value::from("localhost")));
///
/// assert!(Collection::builder().separator("").build().is_err());
/// ```
#[derive(Default)]
pub struct CollectionBuilder {
    error: Option<CollectionError>,
    config: StoreConfig,
}

impl CollectionBuilder {
    /// Creates a new `CollectionBuilder` with the default configuration:
    /// `"."` as path separator.
    pub fn new() -> Self {
        CollectionBuilder {
            error: None,
            config: StoreConfig::new(),
        }
    }

    /// Sets the separator used to split paths.
    ///
    /// An empty separator is captured as an error and returned when the
    /// collection is built.
    pub fn separator(mut self, separator: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_separator(separator) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Builds an empty collection.
    pub fn build(self) -> CollectionResult<Collection> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Collection::with_store(PathStore::new(self.config))),
        }
    }

    /// Builds a collection from a source with a key-value shape.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error, or `TypeError` if the source
    /// is a scalar.
    pub fn build_from<S: Into<Source>>(self, source: S) -> CollectionResult<Collection> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let items = source.into().into_items()?;
        Ok(Collection::with_store(PathStore::with_items(items, self.config)))
    }
}
