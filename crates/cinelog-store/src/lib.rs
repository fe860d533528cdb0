//! # cinelog-store
//!
//! Durable storage for review records.
//!
//! The whole collection lives in a single pretty-printed JSON array on disk
//! (the backing document). The crate exposes an async [`ReviewStore`] handle
//! with typed CRUD operations; every mutation validates its input, rewrites
//! the full document, and is serialized against other mutations so that
//! concurrent requests cannot clobber each other's writes.

pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use store::ReviewStore;
