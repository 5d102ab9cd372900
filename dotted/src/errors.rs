use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for collection operations.
///
/// Almost every collection operation is total: a missing key or path yields
/// `None` or a caller-supplied default. The kinds below cover the few places
/// where an operation cannot produce a meaningful result.
///
/// # Examples
///
/// ```rust
/// use dotted::errors::{CollectionError, CollectionResult, ErrorKind};
///
/// fn example() -> CollectionResult<()> {
///     Err(CollectionError::new("requested 4 items", ErrorKind::InvalidArgument))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::InvalidArgument);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// An argument is outside the domain the operation accepts
    /// (e.g. sampling more items than a collection holds).
    InvalidArgument,
    /// A value has no valid normalization into ordered key-value items.
    TypeError,
    /// A path is malformed for the requested write.
    InvalidPath,
    /// Error encoding or decoding a JSON projection.
    EncodingError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::TypeError => write!(f, "Type error"),
            ErrorKind::InvalidPath => write!(f, "Invalid path"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom collection error type.
///
/// `CollectionError` carries the error message, its kind, an optional cause
/// and the backtrace captured where the error was raised.
///
/// # Examples
///
/// ```rust
/// use dotted::errors::{CollectionError, ErrorKind};
///
/// let cause = CollectionError::new("expected an object", ErrorKind::TypeError);
/// let err = CollectionError::new_with_cause("cannot decode", ErrorKind::EncodingError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct CollectionError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CollectionError>>,
    backtrace: Backtrace,
}

impl CollectionError {
    /// Creates a new `CollectionError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `CollectionError` that wraps the error which caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CollectionError) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CollectionError> {
        self.cause.as_deref()
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for fallible collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

impl de::Error for CollectionError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectionError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl ser::Error for CollectionError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectionError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        CollectionError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<std::fmt::Error> for CollectionError {
    fn from(err: std::fmt::Error) -> Self {
        CollectionError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for CollectionError {
    fn from(msg: String) -> Self {
        CollectionError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CollectionError {
    fn from(msg: &str) -> Self {
        CollectionError::new(msg, ErrorKind::InternalError)
    }
}
