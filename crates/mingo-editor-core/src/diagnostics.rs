//! Diagnostics data model and the marker mapper.
//!
//! The diagnostics oracle reports point positions as [`DiagnosticRecord`]s. The mapper widens each
//! record into a [`Marker`] (a 1-based, half-open line/column range) that renderers and the
//! quick-fix synthesizer consume. A [`MarkerSet`] ties the markers to the buffer [`Generation`]
//! they were computed for.

use crate::buffer::Generation;
use crate::edit::TextPosition;
use serde::de::{self, Deserializer, IgnoredAny, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace under which markers are published to the UI marker sink.
pub const MARKER_OWNER: &str = "mingo";

/// Message used when the oracle sends a record without text.
pub const DEFAULT_MESSAGE: &str = "Error";

/// A raw diagnostic as produced by the external oracle.
///
/// Both lower-case and capitalized keys are accepted (`msg`/`Msg`, `line`/`Line`,
/// `column`/`Column`). Decoding never fails on a single field: `null`, missing or non-numeric
/// coordinates become 0 (coerced to 1 by the mapper), floats are truncated, numeric strings are
/// parsed, and a `null` or non-string message becomes empty (shown as [`DEFAULT_MESSAGE`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// 1-based line.
    #[serde(default, alias = "Line", deserialize_with = "lenient_coordinate")]
    pub line: i64,
    /// 1-based column.
    #[serde(default, alias = "Column", deserialize_with = "lenient_coordinate")]
    pub column: i64,
    /// Diagnostic text.
    #[serde(
        default,
        rename = "msg",
        alias = "Msg",
        alias = "message",
        deserialize_with = "lenient_message"
    )]
    pub message: String,
}

impl DiagnosticRecord {
    /// Create a record.
    pub fn new(line: i64, column: i64, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

fn lenient_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(CoordinateVisitor)
}

fn lenient_message<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(MessageVisitor)
}

struct CoordinateVisitor;

impl<'de> Visitor<'de> for CoordinateVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a line or column number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        Ok(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        // `as` saturates and maps NaN to 0.
        Ok(value as i64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
        let value = value.trim();
        Ok(value
            .parse::<i64>()
            .or_else(|_| value.parse::<f64>().map(|v| v as i64))
            .unwrap_or(0))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<i64, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(0)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<i64, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(0)
    }
}

struct MessageVisitor;

impl<'de> Visitor<'de> for MessageVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a diagnostic message")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }
}

/// A UI-facing diagnostic range. Lines and columns are 1-based; the end is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Start line.
    pub start_line: usize,
    /// Start column (inclusive).
    pub start_column: usize,
    /// End line.
    pub end_line: usize,
    /// End column (exclusive).
    pub end_column: usize,
    /// Diagnostic message.
    pub message: String,
}

impl Marker {
    /// Widen `record` into a one-column range.
    pub fn from_record(record: &DiagnosticRecord) -> Self {
        Self::from_record_with_width(record, 1)
    }

    /// Widen `record` into a range `width` columns wide (at least one).
    pub fn from_record_with_width(record: &DiagnosticRecord, width: usize) -> Self {
        let line = coerce(record.line);
        let column = coerce(record.column);
        let message = if record.message.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            record.message.clone()
        };
        Self {
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column.saturating_add(width.max(1)),
            message,
        }
    }

    /// Range start.
    pub fn start(&self) -> TextPosition {
        TextPosition::new(self.start_line, self.start_column)
    }

    /// Range end (exclusive).
    pub fn end(&self) -> TextPosition {
        TextPosition::new(self.end_line, self.end_column)
    }
}

fn coerce(value: i64) -> usize {
    if value <= 0 {
        1
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

/// Map oracle records to markers, preserving order. Duplicates are kept.
pub fn map_records(records: &[DiagnosticRecord]) -> Vec<Marker> {
    records.iter().map(Marker::from_record).collect()
}

/// The markers published for one buffer generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkerSet {
    /// Generation the markers were computed for.
    pub generation: Generation,
    /// Markers in oracle order.
    pub markers: Vec<Marker>,
    /// Raw error text when the oracle output could not be used.
    pub error: Option<String>,
}

impl MarkerSet {
    /// A marker set built from oracle records.
    pub fn from_records(generation: Generation, records: &[DiagnosticRecord]) -> Self {
        Self {
            generation,
            markers: map_records(records),
            error: None,
        }
    }

    /// An empty marker set carrying the oracle failure text.
    pub fn failed(generation: Generation, error: impl Into<String>) -> Self {
        Self {
            generation,
            markers: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Returns `true` if the set belongs to `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
