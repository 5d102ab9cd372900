use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use std::sync::Arc;

/// The separator used by dot-paths unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Configuration of a [crate::store::PathStore].
///
/// Cloning is cheap; collections derived from another collection share its
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    separator: Arc<str>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        StoreConfig {
            separator: Arc::from(DEFAULT_SEPARATOR),
        }
    }

    /// Gets the path separator.
    #[inline]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Sets the path separator.
    ///
    /// # Errors
    ///
    /// Returns error if separator is empty.
    pub fn set_separator(&mut self, separator: &str) -> CollectionResult<()> {
        if separator.is_empty() {
            log::error!("Path separator cannot be empty");
            return Err(CollectionError::new(
                "Path separator cannot be empty",
                ErrorKind::InvalidArgument,
            ));
        }
        self.separator = Arc::from(separator);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_separator() {
        assert_eq!(StoreConfig::default().separator(), ".");
    }

    #[test]
    fn test_set_separator() {
        let mut config = StoreConfig::new();
        config.set_separator("/").unwrap();
        assert_eq!(config.separator(), "/");
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        let mut config = StoreConfig::new();
        let err = config.set_separator("").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
        assert_eq!(config.separator(), ".");
    }
}
