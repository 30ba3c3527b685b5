//! Field descriptor tables for struct-like values.
//!
//! A [`Record`] is the encoder's view of a struct: an ordered list of
//! [`Field`]s, each carrying a resolved key, an omit-empty flag, optional
//! time and duration format overrides, and the field's value. Descriptors
//! are resolved once, when the record is built, so the encoder never
//! re-derives naming rules per call.
//!
//! Two ways to build a record:
//!
//! - [`Field::new`] plus the `with`-style modifiers, when keys are known
//!   statically;
//! - [`RecordBuilder::tagged`], which resolves Go-style annotation strings
//!   (`"name,omitempty"`) with the precedence primary annotation > fallback
//!   annotation > field identifier. A literal `-` excludes the field.
//!
//! Embedded structs flatten at build time via [`RecordBuilder::embed`];
//! private fields are represented by simply not adding them.
//!
//! ## Examples
//!
//! ```rust
//! use urlform::{Record, Value};
//!
//! let record = Record::builder()
//!     .tagged("Device", Some("device"), None, "pixel 8")
//!     .tagged("Retired", Some("retired,omitempty"), None, false)
//!     .build();
//!
//! assert_eq!(Value::Record(record).encode(), "device=pixel+8");
//! ```

use crate::Value;

/// Rendering unit for duration-valued fields.
///
/// [`Human`](DurationFormat::Human) (the default) renders Go-style
/// compound text such as `10.001s` or `1m30s`. The fixed units render the
/// magnitude in that unit with its suffix: integral for `Nanos`/`Micros`/
/// `Millis`, six-decimal fractional for `Seconds`/`Minutes`/`Hours`/`Days`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurationFormat {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    #[default]
    Human,
}

impl DurationFormat {
    /// Parses a duration-format annotation token.
    ///
    /// Recognized tokens: `ns`, `us`/`µs`, `ms`, `s`/`second`,
    /// `m`/`minute`, `h`/`hour`, `d`/`day`, `human`/`normal`. Anything
    /// else, including the empty string, falls back to
    /// [`DurationFormat::Human`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::DurationFormat;
    ///
    /// assert_eq!(DurationFormat::parse("ms"), DurationFormat::Millis);
    /// assert_eq!(DurationFormat::parse("second"), DurationFormat::Seconds);
    /// assert_eq!(DurationFormat::parse(""), DurationFormat::Human);
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> DurationFormat {
        match token {
            "ns" => DurationFormat::Nanos,
            "us" | "µs" => DurationFormat::Micros,
            "ms" => DurationFormat::Millis,
            "s" | "second" => DurationFormat::Seconds,
            "m" | "minute" => DurationFormat::Minutes,
            "h" | "hour" => DurationFormat::Hours,
            "d" | "day" => DurationFormat::Days,
            _ => DurationFormat::Human,
        }
    }
}

/// A single field descriptor plus its value.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) key: String,
    pub(crate) omit_empty: bool,
    pub(crate) time_format: Option<String>,
    pub(crate) duration_format: DurationFormat,
    pub(crate) value: Value,
}

impl Field {
    /// Creates a field with an explicit key and no modifiers.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Field {
        Field {
            key: key.into(),
            omit_empty: false,
            time_format: None,
            duration_format: DurationFormat::default(),
            value: value.into(),
        }
    }

    /// Creates a field from annotation strings, resolving the key with the
    /// precedence primary > fallback > identifier.
    ///
    /// Annotation strings are comma-separated: the first token is the key
    /// (an empty token falls back to `ident`), remaining tokens are
    /// modifiers; `omitempty` is the only recognized modifier. Returns
    /// `None` when the resolved annotation is the literal `-`, which
    /// excludes the field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urlform::Field;
    ///
    /// let field = Field::tagged("NotEmpty", Some("notempty,omitempty"), None, "x").unwrap();
    /// assert_eq!(field.key(), "notempty");
    ///
    /// assert!(Field::tagged("Secret", None, Some("-"), "x").is_none());
    /// ```
    pub fn tagged(
        ident: &str,
        primary: Option<&str>,
        fallback: Option<&str>,
        value: impl Into<Value>,
    ) -> Option<Field> {
        let (key, omit_empty) = resolve_key(ident, primary, fallback)?;
        Some(Field {
            key,
            omit_empty,
            time_format: None,
            duration_format: DurationFormat::default(),
            value: value.into(),
        })
    }

    /// Marks the field to be skipped when its value is empty for its kind.
    #[must_use]
    pub fn omit_empty(mut self) -> Field {
        self.omit_empty = true;
        self
    }

    /// Overrides the format string used when the value is a time instant.
    ///
    /// Accepts a [`chrono::format::strftime`] pattern; without an override
    /// instants render as RFC3339. A pattern that fails to parse also
    /// renders as RFC3339 rather than failing the encode.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Field {
        self.time_format = Some(format.into());
        self
    }

    /// Overrides the unit used when the value is a duration.
    #[must_use]
    pub fn duration_format(mut self, format: DurationFormat) -> Field {
        self.duration_format = format;
        self
    }

    /// The resolved key of this field.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The field's value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// An ordered field descriptor table: the struct kind of the value model.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    pub(crate) fields: Vec<Field>,
}

impl Record {
    /// Starts building a record.
    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder { fields: Vec::new() }
    }

    /// The fields of this record, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for Record {
    fn from(fields: Vec<Field>) -> Self {
        Record { fields }
    }
}

/// Builder for [`Record`].
#[derive(Debug, Default)]
pub struct RecordBuilder {
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Appends a fully-constructed field.
    #[must_use]
    pub fn field(mut self, field: Field) -> RecordBuilder {
        self.fields.push(field);
        self
    }

    /// Appends a field resolved from annotation strings; a `-` annotation
    /// drops the field entirely. See [`Field::tagged`].
    #[must_use]
    pub fn tagged(
        mut self,
        ident: &str,
        primary: Option<&str>,
        fallback: Option<&str>,
        value: impl Into<Value>,
    ) -> RecordBuilder {
        if let Some(field) = Field::tagged(ident, primary, fallback, value) {
            self.fields.push(field);
        }
        self
    }

    /// Flattens an embedded record: its fields are spliced in as if they
    /// were declared on this record.
    #[must_use]
    pub fn embed(mut self, record: Record) -> RecordBuilder {
        self.fields.extend(record.fields);
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> Record {
        Record {
            fields: self.fields,
        }
    }
}

/// Resolves a field key from its identifier and annotations.
///
/// Returns `None` when the field is excluded via a `-` annotation,
/// otherwise the resolved key and whether `omitempty` was requested.
fn resolve_key(
    ident: &str,
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Option<(String, bool)> {
    let annotation = match primary {
        Some(tag) if !tag.is_empty() => Some(tag),
        _ => match fallback {
            Some(tag) if !tag.is_empty() => Some(tag),
            _ => None,
        },
    };

    let Some(annotation) = annotation else {
        return Some((ident.to_string(), false));
    };

    let mut tokens = annotation.split(',');
    let name = tokens.next().unwrap_or("");
    if name == "-" {
        return None;
    }

    let omit_empty = tokens.any(|token| token == "omitempty");
    let key = if name.is_empty() { ident } else { name };
    Some((key.to_string(), omit_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_primary_wins() {
        assert_eq!(
            resolve_key("Ident", Some("primary"), Some("fallback")),
            Some(("primary".to_string(), false))
        );
    }

    #[test]
    fn test_precedence_fallback_then_ident() {
        assert_eq!(
            resolve_key("Ident", None, Some("fallback")),
            Some(("fallback".to_string(), false))
        );
        assert_eq!(
            resolve_key("Ident", None, None),
            Some(("Ident".to_string(), false))
        );
        assert_eq!(
            resolve_key("Ident", Some(""), Some("")),
            Some(("Ident".to_string(), false))
        );
    }

    #[test]
    fn test_omitempty_modifier() {
        assert_eq!(
            resolve_key("Ident", Some("name,omitempty"), None),
            Some(("name".to_string(), true))
        );
        assert_eq!(
            resolve_key("Ident", None, Some("name,omitempty")),
            Some(("name".to_string(), true))
        );
        // empty leading token falls back to the identifier
        assert_eq!(
            resolve_key("Ident", Some(",omitempty"), None),
            Some(("Ident".to_string(), true))
        );
    }

    #[test]
    fn test_dash_excludes() {
        assert_eq!(resolve_key("Ident", Some("-"), None), None);
        assert_eq!(resolve_key("Ident", None, Some("-")), None);
        // a primary annotation shadows an excluding fallback
        assert_eq!(
            resolve_key("Ident", Some("name"), Some("-")),
            Some(("name".to_string(), false))
        );
    }

    #[test]
    fn test_embed_flattens_in_place() {
        let inner = Record::builder()
            .tagged("X", None, None, "123")
            .build();
        let outer = Record::builder()
            .tagged("A", Some("a"), None, "1")
            .embed(inner)
            .tagged("B", Some("b"), None, "2")
            .build();

        let keys: Vec<_> = outer.fields().iter().map(Field::key).collect();
        assert_eq!(keys, vec!["a", "X", "b"]);
    }

    #[test]
    fn test_duration_format_tokens() {
        assert_eq!(DurationFormat::parse("ns"), DurationFormat::Nanos);
        assert_eq!(DurationFormat::parse("us"), DurationFormat::Micros);
        assert_eq!(DurationFormat::parse("µs"), DurationFormat::Micros);
        assert_eq!(DurationFormat::parse("ms"), DurationFormat::Millis);
        assert_eq!(DurationFormat::parse("s"), DurationFormat::Seconds);
        assert_eq!(DurationFormat::parse("minute"), DurationFormat::Minutes);
        assert_eq!(DurationFormat::parse("hour"), DurationFormat::Hours);
        assert_eq!(DurationFormat::parse("day"), DurationFormat::Days);
        assert_eq!(DurationFormat::parse("normal"), DurationFormat::Human);
        assert_eq!(DurationFormat::parse("bogus"), DurationFormat::Human);
    }
}
