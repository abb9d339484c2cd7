//! High-level SDK for Scribe.
//!
//! [`Scribe`] sequences entity store calls so that authors, posts and their
//! comments stay consistent: posts are only created for existing authors,
//! `userName` stays unique, and deleting an author removes every post that
//! references it. The [`request`] module validates loosely typed input before
//! anything reaches the store.

pub mod error;
pub mod request;
pub mod scribe;

pub use error::{ErrorKind, SdkError, SdkResult};
pub use request::{
    CreateAuthorRequest, CreateCommentRequest, CreatePostRequest, UpdateAuthorRequest,
    UpdatePostRequest,
};
pub use scribe::{CascadeReport, Scribe};

// Re-export key types
pub use scribe_store::{EntityStore, FileEntityStore, InMemoryEntityStore, StoreError};
pub use scribe_types::{
    AuthorId, AuthorName, AuthorPatch, AuthorRef, AuthorView, BlogpostId, BlogpostPatch,
    NewAuthor, NewBlogpost, PostView,
};
