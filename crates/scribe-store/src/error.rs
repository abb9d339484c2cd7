use scribe_types::{AuthorId, BlogpostId};

/// Errors from entity store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The target author does not exist.
    #[error("author not found: {0}")]
    AuthorNotFound(AuthorId),

    /// The target blogpost does not exist.
    #[error("blogpost not found: {0}")]
    BlogpostNotFound(BlogpostId),

    /// A write would duplicate a uniquely indexed field.
    #[error("duplicate value for unique field {field}: {value}")]
    UniqueViolation { field: &'static str, value: String },

    /// A post references an author that does not exist.
    #[error("referenced author does not exist: {0}")]
    MissingReference(AuthorId),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Returns `true` for the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AuthorNotFound(_) | Self::BlogpostNotFound(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
