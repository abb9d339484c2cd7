use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Declares a store-assigned entity identifier backed by a UUID v7.
///
/// UUID v7 values are time-ordered, so ids generated later compare greater.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh time-ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short representation (first 8 hex characters).
            pub fn short_id(&self) -> String {
                let mut simple = self.0.simple().to_string();
                simple.truncate(8);
                simple
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

entity_id!(
    /// Identity of an [`Author`](crate::Author).
    AuthorId,
    "author"
);

entity_id!(
    /// Identity of a [`Blogpost`](crate::Blogpost).
    BlogpostId,
    "blogpost"
);

entity_id!(
    /// Identity of a [`Comment`](crate::Comment) within its parent post.
    CommentId,
    "comment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(AuthorId::new(), AuthorId::new());
    }

    #[test]
    fn display_then_parse() {
        let id = BlogpostId::new();
        let parsed: BlogpostId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-an-id".parse::<AuthorId>().unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidId {
                kind: "author",
                value: "not-an-id".into()
            }
        );
        assert_eq!(err.to_string(), "invalid author id: not-an-id");
    }

    #[test]
    fn short_id_is_eight_chars() {
        let id = CommentId::new();
        assert_eq!(id.short_id().len(), 8);
        assert!(format!("{id:?}").starts_with("CommentId("));
    }

    #[test]
    fn serializes_as_plain_string() {
        let uuid = Uuid::nil();
        let id = AuthorId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
