//! Input normalization and the validation gate.
//!
//! Raw input (an HTML form submission or a JSON request body) is first
//! normalized into a [`ReviewDraft`]. Normalization never fails: missing
//! fields become empty strings and a non-numeric rating becomes NaN, so that
//! rejection happens in exactly one place, [`ReviewDraft::validate`]. Only a
//! draft that passes the gate may reach the store.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Maximum number of tags kept on a single review.
pub const MAX_TAGS: usize = 6;

/// Inclusive rating bounds.
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// A normalized, not-yet-validated review: every author-editable field of a
/// [`Review`](crate::Review), before the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub title: String,
    pub film: String,
    pub director: String,
    /// NaN when the raw input was not numeric.
    pub rating: f64,
    pub watch_date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub body: String,
}

/// Why a draft failed the validation gate.
///
/// Field names in messages are the wire names, since these errors are
/// surfaced to API clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("rating is not a number")]
    RatingNotANumber,

    #[error("rating {0} is outside the 1-10 range")]
    RatingOutOfRange(f64),
}

impl ReviewDraft {
    /// Normalize a decoded JSON body.
    ///
    /// Accepts arbitrary value types: strings are trimmed, numbers and bools
    /// are coerced via their display form, anything else becomes empty.
    /// `tags` may be either an array of strings or a single comma-delimited
    /// string; both forms normalize identically.
    pub fn from_json(payload: &Value) -> Self {
        let field = |name: &str| text_of(payload.get(name));

        let rating = match payload.get("rating") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(raw)) => parse_rating(raw),
            _ => f64::NAN,
        };

        let tags = match payload.get("tags") {
            Some(Value::Array(items)) => normalize_tags(items.iter().map(|v| text_of(Some(v)))),
            Some(Value::String(raw)) => split_tags(raw),
            _ => Vec::new(),
        };

        Self {
            title: field("title"),
            film: field("film"),
            director: field("director"),
            rating,
            watch_date: field("watchDate"),
            tags,
            excerpt: field("excerpt"),
            body: field("body"),
        }
    }

    /// Normalize key/value pairs from a submitted form.
    ///
    /// Form values are always strings, so `tags` is the comma-delimited form
    /// and `rating` is parsed from its text.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let field = |name: &str| {
            fields
                .get(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            title: field("title"),
            film: field("film"),
            director: field("director"),
            rating: fields
                .get("rating")
                .map(|raw| parse_rating(raw))
                .unwrap_or(f64::NAN),
            watch_date: field("watchDate"),
            tags: split_tags(fields.get("tags").map(String::as_str).unwrap_or("")),
            excerpt: field("excerpt"),
            body: field("body"),
        }
    }

    /// The single gate before persistence.
    ///
    /// Fails when any required text field is empty after trimming, or when
    /// the rating is not a number in [1, 10].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("film", &self.film),
            ("director", &self.director),
            ("watchDate", &self.watch_date),
            ("excerpt", &self.excerpt),
            ("body", &self.body),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        if self.rating.is_nan() {
            return Err(ValidationError::RatingNotANumber);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }

        Ok(())
    }

    /// True when [`validate`](Self::validate) would accept the draft.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Coerce an arbitrary JSON value to trimmed text; absent values and
/// non-scalar values become empty.
fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Split a comma-delimited tag string and normalize the pieces.
fn split_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Trim, lower-case, drop empties, cap at [`MAX_TAGS`]; order preserved.
fn normalize_tags<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .take(MAX_TAGS)
        .collect()
}
