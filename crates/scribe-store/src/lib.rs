//! Entity storage for Scribe.
//!
//! This crate persists [`Author`](scribe_types::Author) and
//! [`Blogpost`](scribe_types::Blogpost) documents and offers the CRUD
//! primitives the consistency layer sequences: create, find-by-id, find-one,
//! find-all, update-by-id, delete-by-id and delete-by-filter.
//!
//! # Storage Backends
//!
//! All backends implement the [`EntityStore`] trait:
//!
//! - [`InMemoryEntityStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileEntityStore`] -- in-memory store persisted as a JSON snapshot
//!
//! # Design Rules
//!
//! 1. `userName` is a unique index: creates and updates that would duplicate
//!    it fail inside the same write with [`StoreError::UniqueViolation`].
//! 2. A referenced-author post is only written if the author exists at write
//!    time, otherwise [`StoreError::MissingReference`].
//! 3. `created` is assigned by the store and never rewritten.
//! 4. Comment ids are assigned by the store; comment order is insertion order.
//! 5. Deleting posts by author is idempotent: an empty match set is not an error.
//! 6. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileEntityStore;
pub use memory::{InMemoryEntityStore, StoreSnapshot};
pub use traits::EntityStore;
