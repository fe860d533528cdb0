//! Pure presentation logic: filtering, ordering, and derived figures.
//!
//! Rendering layers own their DOM concerns and call in here for the data.
//! Every function takes the full review list by reference and never mutates
//! it; what the reader is currently looking at is carried in an explicit
//! [`ViewState`] rather than module-level state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::review::Review;

/// Assumed reading speed for the "min read" figure.
const WORDS_PER_MINUTE: f64 = 220.0;

/// Sort order for the visible review list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first, by publication time. The default.
    #[default]
    Recent,
    /// Highest rating first.
    Rating,
}

/// What the reader is currently looking at: a free-text query plus a sort
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub sort: SortKey,
}

impl ViewState {
    pub fn new(query: impl Into<String>, sort: SortKey) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    /// The ordered subset of `reviews` matching the current query.
    pub fn visible<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        visible(reviews, &self.query, self.sort)
    }
}

/// Filter `reviews` by a case-insensitive substring query, then order them.
///
/// The trimmed query is matched against title, film, director, excerpt and
/// the space-joined tags; an empty query matches everything. The input slice
/// is never reordered: sorting happens on the returned references, and the
/// underlying sort is stable, so equal keys keep their original order.
pub fn visible<'a>(reviews: &'a [Review], query: &str, sort: SortKey) -> Vec<&'a Review> {
    let needle = query.trim().to_lowercase();

    let mut matched: Vec<&Review> = reviews
        .iter()
        .filter(|review| needle.is_empty() || haystack(review).contains(&needle))
        .collect();

    match sort {
        SortKey::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Recent => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    matched
}

/// Aggregate figures shown above the review list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    /// Number of published reviews.
    pub count: usize,
    /// Mean rating rounded to one decimal; 0.0 for an empty list.
    pub average_rating: f64,
    /// Publication time of the newest review, if any.
    pub most_recent: Option<DateTime<Utc>>,
}

pub fn stats(reviews: &[Review]) -> LibraryStats {
    let count = reviews.len();

    let average_rating = if count == 0 {
        0.0
    } else {
        let sum: f64 = reviews.iter().map(|review| review.rating).sum();
        round_to_tenth(sum / count as f64)
    };

    let most_recent = reviews.iter().map(|review| review.created_at).max();

    LibraryStats {
        count,
        average_rating,
        most_recent,
    }
}

/// The single highest-rated review; the earliest listed wins a tie.
pub fn featured(reviews: &[Review]) -> Option<&Review> {
    let mut best: Option<&Review> = None;
    for review in reviews {
        // Replace only on strictly greater, so the first maximal entry wins.
        if best.map_or(true, |b| review.rating > b.rating) {
            best = Some(review);
        }
    }
    best
}

/// Estimated minutes to read `text`, never below one.
pub fn reading_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    ((words as f64 / WORDS_PER_MINUTE).round() as u32).max(1)
}

/// Searchable text for one review.
fn haystack(review: &Review) -> String {
    [
        review.title.as_str(),
        review.film.as_str(),
        review.director.as_str(),
        review.excerpt.as_str(),
        &review.tags.join(" "),
    ]
    .join(" ")
    .to_lowercase()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
