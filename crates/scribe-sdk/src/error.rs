use std::fmt;

use thiserror::Error;

use scribe_store::StoreError;
use scribe_types::{AuthorId, TypeError};

pub const AUTHOR_NOT_FOUND: &str = "Author not found";
pub const BLOGPOST_NOT_FOUND: &str = "Blogpost not found";
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Coarse classification of an [`SdkError`], used to pick an external status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input field is missing or malformed.
    Validation,
    /// A referenced entity does not exist.
    Reference,
    /// A uniqueness rule would be violated.
    Conflict,
    /// The target entity does not exist.
    NotFound,
    /// The underlying store failed.
    Store,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "ValidationError",
            Self::Reference => "ReferenceError",
            Self::Conflict => "ConflictError",
            Self::NotFound => "NotFoundError",
            Self::Store => "StoreError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Reference(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Posts were removed but the author record could not be.
    #[error("removed {posts_removed} posts of author {author} but failed to delete the author: {source}")]
    CascadeIncomplete {
        author: AuthorId,
        posts_removed: usize,
        #[source]
        source: StoreError,
    },

    #[error("store error: {0}")]
    Store(StoreError),
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Reference(_) => ErrorKind::Reference,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::CascadeIncomplete { .. } | Self::Store(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing `{field}` in request body"))
    }
}

impl From<StoreError> for SdkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => Self::Conflict(USERNAME_TAKEN.into()),
            StoreError::MissingReference(_) => Self::Reference(AUTHOR_NOT_FOUND.into()),
            StoreError::AuthorNotFound(_) => Self::NotFound(AUTHOR_NOT_FOUND.into()),
            StoreError::BlogpostNotFound(_) => Self::NotFound(BLOGPOST_NOT_FOUND.into()),
            other => Self::Store(other),
        }
    }
}

impl From<TypeError> for SdkError {
    fn from(err: TypeError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
