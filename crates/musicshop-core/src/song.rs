//! Songs, their lenient request drafts, and the joined read model.
//!
//! A song references at most one singer, composer and record company. The
//! references are plain ids: they may be null or point at a row that no
//! longer exists, and readers must tolerate both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::id::RecordId;

/// A stored song row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: RecordId,
    pub title: String,
    pub movie_name: String,
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub available_as: String,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub singer_id: Option<RecordId>,
    #[serde(default)]
    pub composer_id: Option<RecordId>,
    #[serde(default)]
    pub record_company_id: Option<RecordId>,
}

impl Song {
    /// Combines an assigned id with validated fields.
    pub fn from_fields(id: RecordId, fields: SongFields) -> Self {
        Song {
            id,
            title: fields.title,
            movie_name: fields.movie_name,
            price: fields.price,
            duration: fields.duration,
            category: fields.category,
            available_as: fields.available_as,
            size: fields.size,
            singer_id: fields.singer_id,
            composer_id: fields.composer_id,
            record_company_id: fields.record_company_id,
        }
    }
}

/// Validated, non-id fields of a song. Numbers are already coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongFields {
    pub title: String,
    pub movie_name: String,
    pub price: f64,
    pub duration: String,
    pub category: String,
    pub available_as: String,
    pub size: Option<f64>,
    pub singer_id: Option<RecordId>,
    pub composer_id: Option<RecordId>,
    pub record_company_id: Option<RecordId>,
}

impl SongFields {
    /// Re-checks required fields and numeric sanity. Stores call this before writing.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::MissingField { field: "title" });
        }
        if self.movie_name.trim().is_empty() {
            return Err(CoreError::MissingField { field: "movie_name" });
        }
        if !self.price.is_finite() {
            return Err(CoreError::InvalidNumber {
                field: "price",
                value: self.price.to_string(),
            });
        }
        if let Some(size) = self.size {
            if !size.is_finite() {
                return Err(CoreError::InvalidNumber {
                    field: "size",
                    value: size.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A song request body as it arrives over the wire.
///
/// Numeric fields accept numbers or numeric strings, and references accept
/// ids, numeric strings, `null` or `""`. Anything JSON can carry is accepted
/// here so that every malformed value surfaces as a [`CoreError`] from
/// [`SongDraft::into_fields`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub movie_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available_as: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singer_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_company_id: Option<Value>,
}

impl SongDraft {
    pub fn into_fields(self) -> Result<SongFields, CoreError> {
        let title = required_text("title", self.title)?;
        let movie_name = required_text("movie_name", self.movie_name)?;
        let price = coerce_number("price", self.price.as_ref())?
            .ok_or(CoreError::MissingField { field: "price" })?;
        let size = coerce_number("size", self.size.as_ref())?;

        let fields = SongFields {
            title,
            movie_name,
            price,
            duration: self.duration.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            available_as: self.available_as.unwrap_or_default(),
            size,
            singer_id: coerce_reference("singer_id", self.singer_id.as_ref())?,
            composer_id: coerce_reference("composer_id", self.composer_id.as_ref())?,
            record_company_id: coerce_reference(
                "record_company_id",
                self.record_company_id.as_ref(),
            )?,
        };
        fields.validate()?;
        Ok(fields)
    }
}

impl From<SongFields> for SongDraft {
    fn from(fields: SongFields) -> Self {
        SongDraft {
            title: Some(fields.title),
            movie_name: Some(fields.movie_name),
            price: Some(Value::from(fields.price)),
            duration: Some(fields.duration),
            category: Some(fields.category),
            available_as: Some(fields.available_as),
            size: fields.size.map(Value::from),
            singer_id: fields.singer_id.map(|id| Value::from(id.0)),
            composer_id: fields.composer_id.map(|id| Value::from(id.0)),
            record_company_id: fields.record_company_id.map(|id| Value::from(id.0)),
        }
    }
}

/// A song together with the display names of the rows it references.
///
/// Each name is empty when the reference is null or dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedSong {
    #[serde(flatten)]
    pub song: Song,
    #[serde(default)]
    pub singer_name: String,
    #[serde(default)]
    pub composer_name: String,
    #[serde(default)]
    pub record_company_name: String,
}

impl JoinedSong {
    pub fn id(&self) -> RecordId {
        self.song.id
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoreError::MissingField { field }),
    }
}

/// Coerces a JSON number or numeric string, rounded to cents.
///
/// Absent, `null` and blank strings yield `None`.
fn coerce_number(field: &'static str, value: Option<&Value>) -> Result<Option<f64>, CoreError> {
    let invalid = |raw: String| CoreError::InvalidNumber { field, value: raw };
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n.to_string()))?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(s.clone()))?,
        Some(other) => return Err(invalid(other.to_string())),
    };
    if !parsed.is_finite() {
        return Err(invalid(parsed.to_string()));
    }
    Ok(Some(round_cents(parsed)))
}

fn coerce_reference(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<RecordId>, CoreError> {
    let invalid = |raw: String| CoreError::InvalidReference { field, value: raw };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|id| Some(RecordId(id)))
            .ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(|id| Some(RecordId(id)))
            .map_err(|_| invalid(s.clone())),
        Some(other) => Err(invalid(other.to_string())),
    }
}

// Matches the DECIMAL(10,2) columns the shop schema has always used.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(body: Value) -> SongDraft {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn string_price_is_coerced_to_number() {
        let fields = draft(json!({
            "title": "T",
            "movie_name": "M",
            "price": "19.99",
            "size": "4.5",
        }))
        .into_fields()
        .unwrap();
        assert_eq!(fields.price, 19.99);
        assert_eq!(fields.size, Some(4.5));
    }

    #[test]
    fn numeric_price_passes_through() {
        let fields = draft(json!({"title": "T", "movie_name": "M", "price": 10}))
            .into_fields()
            .unwrap();
        assert_eq!(fields.price, 10.0);
        assert_eq!(fields.size, None);
    }

    #[test]
    fn unparseable_price_is_a_validation_error() {
        let err = draft(json!({"title": "T", "movie_name": "M", "price": "cheap"}))
            .into_fields()
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidNumber {
                field: "price",
                value: "cheap".into()
            }
        );
    }

    #[test]
    fn unparseable_size_is_a_validation_error() {
        let err = draft(json!({"title": "T", "movie_name": "M", "price": 1, "size": "big"}))
            .into_fields()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumber { field: "size", .. }));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = draft(json!({"title": "T", "movie_name": "M", "price": "inf"}))
            .into_fields()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumber { field: "price", .. }));
    }

    #[test]
    fn missing_price_is_a_missing_field() {
        let err = draft(json!({"title": "T", "movie_name": "M"}))
            .into_fields()
            .unwrap_err();
        assert_eq!(err, CoreError::MissingField { field: "price" });
    }

    #[test]
    fn title_and_movie_are_required() {
        let err = draft(json!({"movie_name": "M", "price": 1}))
            .into_fields()
            .unwrap_err();
        assert_eq!(err, CoreError::MissingField { field: "title" });

        let err = draft(json!({"title": "T", "movie_name": " ", "price": 1}))
            .into_fields()
            .unwrap_err();
        assert_eq!(err, CoreError::MissingField { field: "movie_name" });
    }

    #[test]
    fn empty_string_reference_means_none() {
        let fields = draft(json!({
            "title": "T",
            "movie_name": "M",
            "price": 1,
            "singer_id": "",
            "composer_id": null,
            "record_company_id": "3",
        }))
        .into_fields()
        .unwrap();
        assert_eq!(fields.singer_id, None);
        assert_eq!(fields.composer_id, None);
        assert_eq!(fields.record_company_id, Some(RecordId(3)));
    }

    #[test]
    fn fractional_reference_is_rejected() {
        let err = draft(json!({"title": "T", "movie_name": "M", "price": 1, "singer_id": 1.5}))
            .into_fields()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidReference { field: "singer_id", .. }
        ));
    }

    #[test]
    fn prices_round_to_cents() {
        let fields = draft(json!({"title": "T", "movie_name": "M", "price": 3.14159}))
            .into_fields()
            .unwrap();
        assert_eq!(fields.price, 3.14);
    }

    #[test]
    fn joined_song_flattens_song_fields() {
        let song = Song {
            id: RecordId(5),
            title: "T".into(),
            movie_name: "M".into(),
            price: 9.99,
            duration: "3:10".into(),
            category: "Pop".into(),
            available_as: "CD".into(),
            size: None,
            singer_id: Some(RecordId(1)),
            composer_id: None,
            record_company_id: None,
        };
        let joined = JoinedSong {
            song,
            singer_name: "A".into(),
            composer_name: String::new(),
            record_company_name: String::new(),
        };
        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["singer_id"], 1);
        assert_eq!(json["composer_id"], Value::Null);
        assert_eq!(json["singer_name"], "A");
        assert_eq!(json["composer_name"], "");

        let back: JoinedSong = serde_json::from_value(json).unwrap();
        assert_eq!(back, joined);
    }

    #[test]
    fn fields_survive_draft_conversion() {
        let fields = SongFields {
            title: "T".into(),
            movie_name: "M".into(),
            price: 2.5,
            duration: String::new(),
            category: String::new(),
            available_as: String::new(),
            size: Some(1.25),
            singer_id: None,
            composer_id: Some(RecordId(2)),
            record_company_id: None,
        };
        assert_eq!(SongDraft::from(fields.clone()).into_fields().unwrap(), fields);
    }
}
