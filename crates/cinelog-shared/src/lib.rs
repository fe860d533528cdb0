//! # cinelog-shared
//!
//! Domain types and pure logic shared by the Cinelog server and its clients.
//!
//! Everything in this crate is side-effect free: the [`Review`] record and
//! its wire shape, the normalization/validation pipeline that turns raw form
//! or JSON input into a [`ReviewDraft`], and the presentation logic
//! (filtering, ordering, derived figures) that rendering layers call into.

pub mod draft;
pub mod review;
pub mod view;

pub use draft::{ReviewDraft, ValidationError, MAX_TAGS};
pub use review::Review;
pub use view::{LibraryStats, SortKey, ViewState};
