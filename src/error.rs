//! Error types for form encoding.
//!
//! Encoding a [`Value`](crate::Value) itself never fails; the only fallible
//! paths are the serde conversion (`to_value`/`to_string`) and writer I/O.
//!
//! ## Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use urlform::{to_string, Error};
//!
//! // Sequences are not valid map keys in a form body.
//! let mut bad = BTreeMap::new();
//! bad.insert(vec![1, 2], "value");
//! let result: Result<String, Error> = to_string(&bad);
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while converting a value
/// into form-encoded text.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing encoded output
    #[error("IO error: {0}")]
    Io(String),

    /// The value contains a type the form encoding cannot represent
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A mapping key that cannot be rendered as a form key
    #[error("invalid map key: {0}")]
    InvalidKey(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::Error;
    ///
    /// let err = Error::unsupported_type("tuple variants");
    /// assert!(err.to_string().contains("tuple variants"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid key error for map keys with no form representation.
    pub fn invalid_key(msg: &str) -> Self {
        Error::InvalidKey(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
