//! The persisted review record.
//!
//! Field names on the wire and on disk are camelCase; the backing document
//! is a JSON array of these records and must round-trip exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One published film review.
///
/// `id` and `created_at` are assigned by the store when the review is first
/// published and never change afterwards; every other field is replaced
/// wholesale on edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review identifier, assigned on create.
    pub id: Uuid,
    /// Review headline.
    pub title: String,
    /// The film under review.
    pub film: String,
    /// The film's director.
    pub director: String,
    /// Score on a 1-10 scale; may be fractional.
    pub rating: f64,
    /// Calendar date the film was watched, as entered by the author.
    pub watch_date: String,
    /// Lower-cased tags, at most [`MAX_TAGS`](crate::MAX_TAGS) entries,
    /// insertion order preserved.
    pub tags: Vec<String>,
    /// Short teaser shown on the review card.
    pub excerpt: String,
    /// Full review text, multi-line.
    pub body: String,
    /// When the review was first published.
    pub created_at: DateTime<Utc>,
}
