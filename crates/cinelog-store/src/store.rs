//! The JSON-document review store.
//!
//! Every mutation reads the entire backing document, applies the change in
//! memory, and rewrites the whole file. A mutex held across that
//! read-modify-write cycle serializes mutations; reads go straight to disk.
//! A missing or unparsable document reads as an empty collection, so first
//! runs and corrupted state stay non-fatal.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cinelog_shared::{Review, ReviewDraft};

use crate::error::{Result, StoreError};

/// Handle to the review collection persisted at a fixed path.
#[derive(Debug)]
pub struct ReviewStore {
    path: PathBuf,
    /// Held across every read-modify-write cycle.
    write_lock: Mutex<()>,
}

impl ReviewStore {
    /// Open a store backed by the document at `path`.
    ///
    /// The parent directory is created if missing; the document itself is
    /// only written on the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        info!(path = %path.display(), "Review store initialized");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Filesystem path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every review currently in the document. Order is not significant;
    /// ordering is a presentation concern.
    pub async fn list_all(&self) -> Result<Vec<Review>> {
        self.read_document().await
    }

    /// Validate and persist a new review.
    ///
    /// The id and publication time are assigned here; the caller's draft
    /// supplies everything else.
    pub async fn create(&self, draft: ReviewDraft) -> Result<Review> {
        draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut reviews = self.read_document().await?;

        let review = Review {
            id: Uuid::new_v4(),
            title: draft.title,
            film: draft.film,
            director: draft.director,
            rating: draft.rating,
            watch_date: draft.watch_date,
            tags: draft.tags,
            excerpt: draft.excerpt,
            body: draft.body,
            created_at: Utc::now(),
        };

        reviews.insert(0, review.clone());
        self.write_document(&reviews).await?;

        debug!(id = %review.id, film = %review.film, "Created review");
        Ok(review)
    }

    /// Replace every author-editable field of the review at `id`.
    ///
    /// `id` and `createdAt` are kept from the stored record; all other
    /// fields come from the draft, so a field missing from the caller's
    /// payload ends up blanked, not preserved.
    pub async fn update(&self, id: Uuid, draft: ReviewDraft) -> Result<Review> {
        draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut reviews = self.read_document().await?;

        let slot = reviews
            .iter_mut()
            .find(|review| review.id == id)
            .ok_or(StoreError::NotFound(id))?;

        slot.title = draft.title;
        slot.film = draft.film;
        slot.director = draft.director;
        slot.rating = draft.rating;
        slot.watch_date = draft.watch_date;
        slot.tags = draft.tags;
        slot.excerpt = draft.excerpt;
        slot.body = draft.body;
        let updated = slot.clone();

        self.write_document(&reviews).await?;

        debug!(id = %id, "Updated review");
        Ok(updated)
    }

    /// Remove the review at `id` permanently.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut reviews = self.read_document().await?;

        let before = reviews.len();
        reviews.retain(|review| review.id != id);
        if reviews.len() == before {
            return Err(StoreError::NotFound(id));
        }

        self.write_document(&reviews).await?;

        debug!(id = %id, "Deleted review");
        Ok(())
    }

    /// Read the backing document.
    ///
    /// A missing file is a first run and reads as empty. A file that fails
    /// to parse as a review array also reads as empty (logged, never
    /// fatal). Any other IO failure propagates.
    async fn read_document(&self) -> Result<Vec<Review>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(reviews) => Ok(reviews),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Backing document is not a review array; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the backing document: pretty-printed JSON array, UTF-8,
    /// trailing newline.
    async fn write_document(&self, reviews: &[Review]) -> Result<()> {
        let mut body = serde_json::to_string_pretty(reviews)?;
        body.push('\n');
        fs::write(&self.path, body).await?;
        Ok(())
    }
}
