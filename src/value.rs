//! Dynamic value representation for form encoding.
//!
//! This module provides the [`Value`] enum, a closed set of the shapes the
//! encoder understands. Classification happens once, when a `Value` is
//! built, so the encoder itself is a plain match over this enum.
//!
//! ## Core Types
//!
//! - [`Value`]: any encodable value (null, bool, number, string, bytes,
//!   time instant, duration, sequence, mapping, record, pointer, custom)
//! - [`Number`]: signed, unsigned, and floating-point numerics
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use urlform::Value;
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let text = Value::from("hello");
//! ```
//!
//! ### Encoding
//!
//! ```rust
//! use urlform::Value;
//!
//! let items = Value::Seq(vec![Value::from("a"), Value::from("b")]);
//! assert_eq!(items.encode(), "=a&=b");
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use serde::Serialize;
//! use urlform::{to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! assert!(value.is_record());
//! ```

use crate::record::Record;
use crate::{encode, FormMap, ToUrlencoded};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A dynamically-typed representation of any encodable value.
///
/// Composite kinds ([`Seq`](Value::Seq), [`Map`](Value::Map),
/// [`Record`](Value::Record)) nest further `Value`s; the remaining kinds are
/// leaves. [`Pointer`](Value::Pointer) models explicit indirection: the
/// encoder unwraps it repeatedly and a `None` at any depth contributes an
/// empty string. [`Custom`](Value::Custom) carries pre-rendered text from a
/// [`ToUrlencoded`] implementation and short-circuits traversal entirely.
///
/// # Examples
///
/// ```rust
/// use urlform::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// assert!(num.is_number());
/// assert_eq!(num.encode(), "=42");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Instant(DateTime<Utc>),
    Duration(Duration),
    Seq(Vec<Value>),
    Map(FormMap),
    Record(Record),
    Pointer(Option<Box<Value>>),
    Custom(String),
}

/// A numeric value.
///
/// Unsigned integers keep their own representation so `u64` values above
/// `i64::MAX` encode exactly.
///
/// # Examples
///
/// ```rust
/// use urlform::Number;
///
/// let integer = Number::Integer(-7);
/// assert_eq!(integer.as_i64(), Some(-7));
/// assert_eq!(integer.to_string(), "-7");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    UInteger(u64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer (signed or unsigned) value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::UInteger(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::UInteger(u64::MAX).as_i64(), None);
    /// assert_eq!(Number::Float(1.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::UInteger(u) => i64::try_from(*u).ok(),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::UInteger(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }

    /// Returns `true` if this number is zero, the empty value for numerics.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => *i == 0,
            Number::UInteger(u) => *u == 0,
            Number::Float(f) => *f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::UInteger(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::UInteger(value as u64)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::UInteger(value as u64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::UInteger(value as u64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::UInteger(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Encodes this value into `application/x-www-form-urlencoded` text.
    ///
    /// This is the top-level entry point of the encoder: leaves render as
    /// `=value` segments, records and mappings as `key=value` pairs joined
    /// by `&`, sequences as the concatenation of their elements. A null
    /// value yields the empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::Value;
    ///
    /// assert_eq!(Value::from("a b").encode(), "=a+b");
    /// assert_eq!(Value::Null.encode(), "");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        encode::encode_value(self)
    }

    /// Builds a [`Value::Custom`] from a type implementing [`ToUrlencoded`].
    ///
    /// The resulting value bypasses the default traversal entirely: its text
    /// is spliced into the output verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::{ToUrlencoded, Value};
    ///
    /// struct Signature(String);
    ///
    /// impl ToUrlencoded for Signature {
    ///     fn to_urlencoded(&self) -> String {
    ///         format!("sig={}", self.0)
    ///     }
    /// }
    ///
    /// let value = Value::from_custom(&Signature("abc".to_string()));
    /// assert_eq!(value.encode(), "sig=abc");
    /// ```
    #[must_use]
    pub fn from_custom<T: ToUrlencoded + ?Sized>(value: &T) -> Value {
        Value::Custom(value.to_urlencoded())
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if the value is a record.
    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` if the value is a time instant.
    #[inline]
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        matches!(self, Value::Instant(_))
    }

    /// Returns `true` if the value is a duration.
    #[inline]
    #[must_use]
    pub const fn is_duration(&self) -> bool {
        matches!(self, Value::Duration(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer number that fits in `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&FormMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a record, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// If the value is a time instant, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Instant(instant) => Some(instant),
            _ => None,
        }
    }

    /// If the value is a duration, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(duration) => Some(*duration),
            _ => None,
        }
    }

    /// Returns `true` if this value is empty for its kind.
    ///
    /// This is the test behind the `omitempty` field modifier: length zero
    /// for strings, bytes, sequences and mappings, zero for numerics and
    /// durations, `false` for booleans, nil for nulls and pointers. Records,
    /// instants and custom text are never empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::Value;
    ///
    /// assert!(Value::from("").is_empty());
    /// assert!(Value::from(0).is_empty());
    /// assert!(!Value::from("x").is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.is_zero(),
            Value::String(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Duration(d) => d.as_nanos() == 0,
            Value::Seq(seq) => seq.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Pointer(ptr) => ptr.is_none(),
            Value::Instant(_) | Value::Record(_) | Value::Custom(_) => false,
        }
    }
}

impl fmt::Display for Value {
    /// Plain textual form of a leaf, or the encoded form of a composite.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Value::Instant(instant) => write!(f, "{}", instant.to_rfc3339()),
            Value::Duration(duration) => {
                write!(f, "{}", encode::format_duration_human(*duration))
            }
            Value::Pointer(Some(inner)) => write!(f, "{}", inner),
            Value::Pointer(None) => Ok(()),
            Value::Custom(text) => write!(f, "{}", text),
            Value::Seq(_) | Value::Map(_) | Value::Record(_) => {
                write!(f, "{}", self.encode())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::UInteger(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Instant(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            Value::Duration(duration) => {
                serializer.serialize_str(&encode::format_duration_human(*duration))
            }
            Value::Seq(seq) => {
                use serde::ser::SerializeSeq;
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    out.serialize_element(element)?;
                }
                out.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Record(record) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(record.len()))?;
                for field in record.fields() {
                    out.serialize_entry(field.key(), field.value())?;
                }
                out.end()
            }
            Value::Pointer(Some(inner)) => inner.serialize(serializer),
            Value::Pointer(None) => serializer.serialize_unit(),
            Value::Custom(text) => serializer.serialize_str(text),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Instant(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

impl From<FormMap> for Value {
    fn from(value: FormMap) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Pointer(value.map(|inner| Box::new(inner.into())))
    }
}
