//! Foundation types for Scribe, a small blogging service.
//!
//! This crate holds the stored entity shapes and the externally visible views
//! derived from them. Every other Scribe crate depends on `scribe-types`.
//!
//! # Key Types
//!
//! - [`AuthorId`], [`BlogpostId`], [`CommentId`] — UUID v7 identifiers assigned by the store
//! - [`Author`] — a writer with a globally unique `userName`
//! - [`Blogpost`] — a post whose author is either referenced or embedded ([`AuthorRef`])
//! - [`Comment`] — owned by exactly one post, ordered by insertion
//! - [`AuthorView`], [`PostView`] — serialized representations with the derived display name

pub mod author;
pub mod error;
pub mod identity;
pub mod post;
pub mod view;

pub use author::{display_name, Author, AuthorPatch, NewAuthor};
pub use error::TypeError;
pub use identity::{AuthorId, BlogpostId, CommentId};
pub use post::{AuthorName, AuthorRef, Blogpost, BlogpostPatch, Comment, NewBlogpost};
pub use view::{AuthorView, CommentView, PostView};
