//! The form-encoding traversal.
//!
//! One recursive entry point, [`write_value`], with one case per kind of
//! [`Value`]. Composite kinds recurse, threading an `is_last` flag that
//! controls trailing-`&` emission; leaf kinds terminate the recursion by
//! writing `=value` text into the output buffer. [`encode_value`] wraps the
//! recursion with a pooled buffer and is re-exported as
//! [`Value::encode`](crate::Value::encode).
//!
//! Two deliberate asymmetries are preserved from the wire contract:
//!
//! - A composite-valued record field drops its own key and splices in only
//!   the nested pairs (see [`Record`] field handling below).
//! - A mapping marks only its final entry as last; the caller's `is_last`
//!   is not consulted.

use crate::record::{DurationFormat, Record};
use crate::{FormMap, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use std::sync::Mutex;
use std::time::Duration;

const BUFFER_SIZE: usize = 1024;
const POOL_LIMIT: usize = 32;

/// Reusable output buffers, shared across encode calls to cut allocation
/// churn. Buffers are cleared before they re-enter the pool and are never
/// aliased: each is exclusively owned by one encode step at a time.
static BUFFER_POOL: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn acquire_buffer() -> String {
    BUFFER_POOL
        .lock()
        .ok()
        .and_then(|mut pool| pool.pop())
        .unwrap_or_else(|| String::with_capacity(BUFFER_SIZE))
}

fn release_buffer(mut buffer: String) {
    buffer.clear();
    if let Ok(mut pool) = BUFFER_POOL.lock() {
        if pool.len() < POOL_LIMIT {
            pool.push(buffer);
        }
    }
}

/// The characters escaped by form encoding: every non-alphanumeric byte
/// except `*`, `-`, `.` and `_`. Space is handled separately, as `+`.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

fn escape_into(bytes: &[u8], out: &mut String) {
    for part in percent_encoding::percent_encode(bytes, FORM_ENCODE_SET) {
        for ch in part.chars() {
            out.push(if ch == ' ' { '+' } else { ch });
        }
    }
}

/// Percent-encodes `input` per the form-submission rules (space as `+`).
///
/// # Examples
///
/// ```rust
/// use urlform::escape;
///
/// assert_eq!(escape("a b&c"), "a+b%26c");
/// assert_eq!(escape("safe-text_1.0*"), "safe-text_1.0*");
/// ```
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_into(input.as_bytes(), &mut out);
    out
}

/// Top-level entry: encodes `value` with `is_last = true`.
pub(crate) fn encode_value(value: &Value) -> String {
    let mut buffer = acquire_buffer();
    write_value(value, true, &mut buffer);
    let encoded = buffer.clone();
    release_buffer(buffer);
    encoded
}

/// The recursive encode step. `is_last` decides whether this value's
/// contribution must be followed by a separator.
fn write_value(value: &Value, is_last: bool, out: &mut String) {
    match value {
        // nil contributes nothing, not even a separator
        Value::Null => {}

        // self-encoded text is spliced verbatim; the implementation owns
        // its own formatting and separator handling
        Value::Custom(text) => out.push_str(text),

        Value::Pointer(Some(inner)) => write_value(inner, is_last, out),
        Value::Pointer(None) => {}

        Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Bytes(_) => {
            out.push('=');
            write_scalar_escaped(value, out);
            if !is_last {
                out.push('&');
            }
        }

        Value::Instant(instant) => {
            out.push('=');
            escape_into(format_instant(instant, None).as_bytes(), out);
            if !is_last {
                out.push('&');
            }
        }

        Value::Duration(duration) => {
            out.push('=');
            escape_into(format_duration_human(*duration).as_bytes(), out);
            if !is_last {
                out.push('&');
            }
        }

        Value::Seq(elements) => write_seq(elements, is_last, out),
        Value::Map(map) => write_map(map, out),
        Value::Record(record) => write_record(record, is_last, out),
    }
}

/// Escaped textual form of a scalar leaf. Bytes escape their raw octets.
fn write_scalar_escaped(value: &Value, out: &mut String) {
    match value {
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => escape_into(n.to_string().as_bytes(), out),
        Value::String(s) => escape_into(s.as_bytes(), out),
        Value::Bytes(b) => escape_into(b, out),
        _ => {}
    }
}

/// Unwraps pointer indirection until a non-pointer value or a nil pointer.
fn deref(value: &Value) -> &Value {
    let mut current = value;
    while let Value::Pointer(Some(inner)) = current {
        current = inner;
    }
    current
}

/// Elements never carry key names; all but the last encode as non-last.
fn write_seq(elements: &[Value], is_last: bool, out: &mut String) {
    let Some((last, rest)) = elements.split_last() else {
        return;
    };
    for element in rest {
        write_value(element, false, out);
    }
    write_value(last, is_last, out);
}

/// Mapping entries are dynamic slots: scalar-like values emit `key=value`
/// pairs in place, anything structured recurses. Only the final entry is
/// marked last.
fn write_map(map: &FormMap, out: &mut String) {
    let len = map.len();
    for (index, (key, value)) in map.iter().enumerate() {
        let entry_is_last = index + 1 == len;
        let value = deref(value);
        match value {
            Value::Null | Value::Pointer(_) => {}

            Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Bytes(_) => {
                escape_into(key.as_bytes(), out);
                out.push('=');
                write_scalar_escaped(value, out);
                if !entry_is_last {
                    out.push('&');
                }
            }

            Value::Duration(duration) => {
                escape_into(key.as_bytes(), out);
                out.push('=');
                escape_into(format_duration_human(*duration).as_bytes(), out);
                if !entry_is_last {
                    out.push('&');
                }
            }

            Value::Instant(instant) => {
                escape_into(key.as_bytes(), out);
                out.push('=');
                escape_into(format_instant(instant, None).as_bytes(), out);
                if !entry_is_last {
                    out.push('&');
                }
            }

            Value::Seq(_) | Value::Map(_) | Value::Record(_) | Value::Custom(_) => {
                write_value(value, entry_is_last, out);
            }
        }
    }
}

/// Record fields, in declaration order. Composite-valued fields discard
/// their own key and splice in the nested pairs; instant-valued fields
/// always emit (the omit-empty check does not reach them); everything else
/// honors `omit_empty` and emits `key=value`.
fn write_record(record: &Record, is_last: bool, out: &mut String) {
    let start = out.len();
    let mut pieces: Vec<String> = Vec::with_capacity(record.fields.len());

    for field in &record.fields {
        let value = deref(&field.value);
        match value {
            Value::Instant(instant) => {
                let mut piece = acquire_buffer();
                escape_into(field.key.as_bytes(), &mut piece);
                piece.push('=');
                escape_into(
                    format_instant(instant, field.time_format.as_deref()).as_bytes(),
                    &mut piece,
                );
                pieces.push(piece);
            }

            // the key resolved for a composite field is discarded; only the
            // composite's own internal keys appear
            Value::Seq(_) | Value::Map(_) | Value::Record(_) => {
                let mut piece = acquire_buffer();
                write_value(value, true, &mut piece);
                pieces.push(piece);
            }

            Value::Custom(text) => {
                let mut piece = acquire_buffer();
                piece.push_str(text);
                pieces.push(piece);
            }

            other => {
                if field.omit_empty && other.is_empty() {
                    continue;
                }
                let mut piece = acquire_buffer();
                escape_into(field.key.as_bytes(), &mut piece);
                piece.push('=');
                match other {
                    Value::Duration(duration) => escape_into(
                        format_duration(*duration, field.duration_format).as_bytes(),
                        &mut piece,
                    ),
                    Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Bytes(_) => {
                        write_scalar_escaped(other, &mut piece);
                    }
                    // a nil reached through a named slot keeps the key with
                    // an empty value
                    _ => {}
                }
                pieces.push(piece);
            }
        }
    }

    let mut first = true;
    for piece in pieces {
        if !first {
            out.push('&');
        }
        out.push_str(&piece);
        release_buffer(piece);
        first = false;
    }

    if !is_last && out.len() > start {
        out.push('&');
    }
}

/// RFC3339 unless the field carries a format override. An override that
/// does not parse as a strftime pattern falls back to RFC3339; formatting
/// with an invalid pattern would panic in the `Display` impl.
fn format_instant(instant: &DateTime<Utc>, format: Option<&str>) -> String {
    if let Some(format) = format {
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if !items.iter().any(|item| matches!(item, Item::Error)) {
            return instant.format_with_items(items.into_iter()).to_string();
        }
    }
    instant.to_rfc3339()
}

/// Renders a duration in the requested unit.
pub(crate) fn format_duration(duration: Duration, format: DurationFormat) -> String {
    match format {
        DurationFormat::Nanos => format!("{}ns", duration.as_nanos()),
        DurationFormat::Micros => format!("{}us", duration.as_micros()),
        DurationFormat::Millis => format!("{}ms", duration.as_millis()),
        DurationFormat::Seconds => format!("{:.6}s", duration.as_secs_f64()),
        DurationFormat::Minutes => format!("{:.6}m", duration.as_secs_f64() / 60.0),
        DurationFormat::Hours => format!("{:.6}h", duration.as_secs_f64() / 3600.0),
        DurationFormat::Days => format!("{:.6}d", duration.as_secs_f64() / 86_400.0),
        DurationFormat::Human => format_duration_human(duration),
    }
}

/// Human-readable compound rendering: `0s`, `512ns`, `1.5µs`, `10.001s`,
/// `1m30s`, `2h45m0s`. Sub-second magnitudes pick the largest unit that
/// keeps the whole part non-zero; at a second and above, hour and minute
/// components are prefixed and the seconds component always appears.
pub(crate) fn format_duration_human(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format_with_frac(nanos, 1_000, "µs");
    }
    if nanos < 1_000_000_000 {
        return format_with_frac(nanos, 1_000_000, "ms");
    }

    let total_secs = (nanos / 1_000_000_000) as u64;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let second_nanos = nanos % 60_000_000_000;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&hours.to_string());
        out.push('h');
    }
    if minutes > 0 || hours > 0 {
        out.push_str(&minutes.to_string());
        out.push('m');
    }
    out.push_str(&format_with_frac(second_nanos, 1_000_000_000, "s"));
    out
}

/// `nanos / unit` with the remainder as a fraction, trailing zeros trimmed.
fn format_with_frac(nanos: u128, unit: u128, suffix: &str) -> String {
    let whole = nanos / unit;
    let frac = nanos % unit;
    if frac == 0 {
        return format!("{}{}", whole, suffix);
    }
    let width = unit.ilog10() as usize;
    let mut frac_text = format!("{:0width$}", frac, width = width);
    while frac_text.ends_with('0') {
        frac_text.pop();
    }
    format!("{}.{}{}", whole, frac_text, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved() {
        assert_eq!(escape("device=1&x"), "device%3D1%26x");
        assert_eq!(escape("a b"), "a+b");
        assert_eq!(escape("safe*-._09AZ"), "safe*-._09AZ");
        assert_eq!(escape("café"), "caf%C3%A9");
    }

    #[test]
    fn test_escape_raw_bytes() {
        let mut out = String::new();
        escape_into(&[0x00, 0xFF, b'a'], &mut out);
        assert_eq!(out, "%00%FFa");
    }

    #[test]
    fn test_duration_human() {
        assert_eq!(format_duration_human(Duration::ZERO), "0s");
        assert_eq!(format_duration_human(Duration::from_nanos(512)), "512ns");
        assert_eq!(format_duration_human(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration_human(Duration::from_micros(2_250)), "2.25ms");
        assert_eq!(format_duration_human(Duration::from_secs(10)), "10s");
        assert_eq!(
            format_duration_human(Duration::from_millis(10_001)),
            "10.001s"
        );
        assert_eq!(format_duration_human(Duration::from_secs(60)), "1m0s");
        assert_eq!(format_duration_human(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration_human(Duration::from_secs(9_900)), "2h45m0s");
        assert_eq!(
            format_duration_human(Duration::from_secs(3_661)),
            "1h1m1s"
        );
    }

    #[test]
    fn test_duration_units() {
        let d = Duration::from_millis(10_001);
        assert_eq!(format_duration(d, DurationFormat::Nanos), "10001000000ns");
        assert_eq!(format_duration(d, DurationFormat::Micros), "10001000us");
        assert_eq!(format_duration(d, DurationFormat::Millis), "10001ms");
        assert_eq!(format_duration(d, DurationFormat::Seconds), "10.001000s");
        assert_eq!(
            format_duration(Duration::from_secs(90), DurationFormat::Minutes),
            "1.500000m"
        );
        assert_eq!(
            format_duration(Duration::from_secs(5_400), DurationFormat::Hours),
            "1.500000h"
        );
        assert_eq!(
            format_duration(Duration::from_secs(129_600), DurationFormat::Days),
            "1.500000d"
        );
    }

    #[test]
    fn test_instant_format_override() {
        use chrono::TimeZone;

        let instant = Utc.with_ymd_and_hms(2002, 5, 31, 0, 0, 0).unwrap();
        assert_eq!(format_instant(&instant, Some("%Y%m%d")), "20020531");
        assert_eq!(format_instant(&instant, None), instant.to_rfc3339());
        // an unparseable pattern degrades to the default
        assert_eq!(format_instant(&instant, Some("%Q")), instant.to_rfc3339());
    }

    #[test]
    fn test_pool_reuse_keeps_output_stable() {
        let value = Value::Seq(vec![Value::from("a"), Value::from("b")]);
        let first = value.encode();
        for _ in 0..100 {
            assert_eq!(value.encode(), first);
        }
    }

    #[test]
    fn test_deref_unwraps_nested_pointers() {
        let value = Value::Pointer(Some(Box::new(Value::Pointer(Some(Box::new(
            Value::from(1),
        ))))));
        assert_eq!(deref(&value), &Value::from(1));

        let nil = Value::Pointer(Some(Box::new(Value::Pointer(None))));
        assert_eq!(deref(&nil), &Value::Pointer(None));
    }
}
