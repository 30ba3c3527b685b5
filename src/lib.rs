//! # urlform
//!
//! Encode arbitrary, possibly deeply nested values into the
//! `application/x-www-form-urlencoded` wire format used by HTTP form bodies
//! and query strings — `key=value&key=value…` with percent-encoded keys and
//! values — without writing a per-type marshaler by hand.
//!
//! ## Key Features
//!
//! - **One traversal**: a single recursive, type-directed encoder over a
//!   closed [`Value`] model; composite kinds recurse, leaf kinds write text
//! - **Serde Compatible**: any `#[derive(Serialize)]` type encodes via
//!   [`to_string`]
//! - **Field descriptors**: [`Record`] tables carry per-field key names,
//!   `omitempty` semantics, and time/duration format overrides
//! - **Time aware**: `chrono` instants (RFC3339 by default) and
//!   `std::time::Duration` values (human-readable by default) are first-class
//!   leaves
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use urlform::to_string;
//!
//! #[derive(Serialize)]
//! struct Login {
//!     user: String,
//!     password: String,
//! }
//!
//! let login = Login {
//!     user: "root".to_string(),
//!     password: "hunter two".to_string(),
//! };
//!
//! assert_eq!(to_string(&login).unwrap(), "user=root&password=hunter+two");
//! ```
//!
//! ### Field descriptors
//!
//! When you need per-field naming, omission, or format control, build a
//! [`Record`] explicitly:
//!
//! ```rust
//! use urlform::{Record, Value};
//!
//! let record = Record::builder()
//!     .tagged("Device", Some("device"), None, "pixel 8")
//!     .tagged("Note", Some("note,omitempty"), None, "")
//!     .build();
//!
//! // the empty note is omitted
//! assert_eq!(Value::Record(record).encode(), "device=pixel+8");
//! ```
//!
//! ### Dynamic values with the urlform! macro
//!
//! ```rust
//! use urlform::urlform;
//!
//! let body = urlform!({
//!     "device": "pixel",
//!     "ip": "10.0.0.1"
//! });
//! assert_eq!(body.encode(), "device=pixel&ip=10.0.0.1");
//! ```
//!
//! ## Encoding contract
//!
//! Two properties of the format are easy to misread as bugs and are part of
//! the contract:
//!
//! - A record field holding a composite value (record, mapping, sequence)
//!   drops its own key: only the composite's internal pairs appear. Scalar
//!   fields encode as `name=value`; composite fields splice in their nested
//!   pairs unnamed.
//! - Sequence elements never carry key names and encode as `=value`
//!   segments.
//!
//! Encoding a [`Value`] is infallible ([`Value::encode`]); only the serde
//! conversion path ([`to_value`], [`to_string`], [`to_writer`]) can fail.
//! There is no decoding direction.

pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod record;
pub mod ser;
pub mod value;

pub use encode::escape;
pub use error::{Error, Result};
pub use map::FormMap;
pub use record::{DurationFormat, Field, Record, RecordBuilder};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// A type-level override of the default traversal: a value implementing
/// this capability supplies its own complete encoded text, which is spliced
/// into the output verbatim.
///
/// # Examples
///
/// ```rust
/// use urlform::{ToUrlencoded, Value};
///
/// struct Presigned(&'static str);
///
/// impl ToUrlencoded for Presigned {
///     fn to_urlencoded(&self) -> String {
///         format!("token={}", self.0)
///     }
/// }
///
/// assert_eq!(Value::from_custom(&Presigned("abc")).encode(), "token=abc");
/// ```
pub trait ToUrlencoded {
    fn to_urlencoded(&self) -> String;
}

/// Serializes any `T: Serialize` to form-encoded text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use urlform::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (enum variants with
/// payloads, structured map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_value(value)?.encode())
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// Useful for composing ad-hoc bodies out of typed pieces before encoding.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use urlform::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes any `T: Serialize` as form-encoded text into a writer.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use urlform::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let encoded = to_string(value)?;
    writer
        .write_all(encoded.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Device {
        name: String,
        port: u16,
        active: bool,
    }

    #[test]
    fn test_to_string_struct() {
        let device = Device {
            name: "edge router".to_string(),
            port: 443,
            active: true,
        };
        assert_eq!(
            to_string(&device).unwrap(),
            "name=edge+router&port=443&active=true"
        );
    }

    #[test]
    fn test_to_string_nil() {
        assert_eq!(to_string(&None::<i32>).unwrap(), "");
    }

    #[test]
    fn test_composite_field_drops_its_key() {
        #[derive(Serialize)]
        struct Tagged {
            name: String,
            tags: Vec<String>,
        }

        let tagged = Tagged {
            name: "alice".to_string(),
            tags: vec!["admin".to_string(), "ops".to_string()],
        };
        assert_eq!(to_string(&tagged).unwrap(), "name=alice&=admin&=ops");
    }

    #[test]
    fn test_to_writer() {
        let device = Device {
            name: "a".to_string(),
            port: 1,
            active: false,
        };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &device).unwrap();
        assert_eq!(buffer, b"name=a&port=1&active=false");
    }

    #[test]
    fn test_escape_reexport() {
        assert_eq!(escape("1 + 1 = 2"), "1+%2B+1+%3D+2");
    }
}
