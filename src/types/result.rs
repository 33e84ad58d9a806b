//! Recognized text regions as produced by the OCR front-end.
//!
//! Field names serialize in camelCase so blobs written by the browser
//! front-end load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Axis-aligned box around a recognized region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(deserialize_with = "nullable_number::deserialize")]
    pub left: f64,
    #[serde(deserialize_with = "nullable_number::deserialize")]
    pub top: f64,
    #[serde(deserialize_with = "nullable_number::deserialize")]
    pub width: f64,
    #[serde(deserialize_with = "nullable_number::deserialize")]
    pub height: f64,
}

impl Rectangle {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// One recognized text region within a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    /// Source file or page within the batch.
    pub file_index: u32,
    pub file_name: String,
    /// Region within that file.
    pub rectangle_index: u32,
    pub rectangle: Rectangle,
    /// Recognized (possibly user-edited) content.
    pub text: String,
    /// Recognizer confidence, opaque to the store.
    #[serde(deserialize_with = "nullable_number::deserialize")]
    pub confidence: f64,
    /// Capture time of the source image, used only for ordering.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "image_timestamp"
    )]
    pub image_created_at: Option<DateTime<Utc>>,
}

impl ParsedResult {
    /// Create a result without a capture timestamp.
    pub fn new(
        file_index: u32,
        file_name: impl Into<String>,
        rectangle_index: u32,
        rectangle: Rectangle,
        text: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            file_index,
            file_name: file_name.into(),
            rectangle_index,
            rectangle,
            text: text.into(),
            confidence,
            image_created_at: None,
        }
    }

    /// Set the capture timestamp.
    pub fn with_image_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.image_created_at = Some(created_at);
        self
    }

    /// Check whether this result addresses the given region.
    pub fn is_region(&self, file_index: u32, rectangle_index: u32) -> bool {
        self.file_index == file_index && self.rectangle_index == rectangle_index
    }
}

/// Reader for numbers that may be stored as `null`.
///
/// serde_json writes NaN and infinities as `null`, as `JSON.stringify` does,
/// so a stored `null` reads back as NaN.
mod nullable_number {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Codec for `imageCreatedAt`.
///
/// Written as an RFC 3339 string with millisecond precision. Read from an
/// RFC 3339 string, a plain date-time string, an epoch-millisecond number
/// or `null`. Empty or unparseable strings read as absent.
mod image_timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Millis(ms)) => from_millis(ms).map(Some).ok_or_else(|| {
                D::Error::custom(format!("timestamp out of range: {}", ms))
            }),
            Some(Raw::Float(ms)) if ms.is_finite() => from_millis(ms as i64)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
            Some(Raw::Float(_)) => Ok(None),
            Some(Raw::Text(s)) => Ok(parse_text(&s)),
        }
    }

    fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(ms)
    }

    fn parse_text(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
