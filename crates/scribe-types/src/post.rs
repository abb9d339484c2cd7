use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::author::display_name;
use crate::identity::{AuthorId, BlogpostId, CommentId};

/// An author name pair embedded directly in a post.
///
/// Embedded authors have no identity of their own: they take no part in
/// `userName` uniqueness and are never touched by cascade deletes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorName {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl AuthorName {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// How a post names its author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorRef {
    /// Points at a stored [`Author`](crate::Author).
    Referenced(AuthorId),
    /// Carries a copy of the name with no backing author record.
    Embedded(AuthorName),
}

impl AuthorRef {
    /// The referenced author id, if any.
    pub fn author_id(&self) -> Option<&AuthorId> {
        match self {
            Self::Referenced(id) => Some(id),
            Self::Embedded(_) => None,
        }
    }
}

/// A comment owned by a single post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
}

impl Comment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            content: content.into(),
        }
    }
}

/// A stored blogpost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blogpost {
    pub id: BlogpostId,
    pub title: String,
    pub content: String,
    pub author: AuthorRef,
    /// Insertion order is significant.
    pub comments: Vec<Comment>,
    /// Set once at creation, never updated.
    pub created: DateTime<Utc>,
}

impl Blogpost {
    /// Build a post from creation fields, a store-assigned id and a creation time.
    ///
    /// Each initial comment receives its own id, in the order given.
    pub fn from_new(id: BlogpostId, new: NewBlogpost, created: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
            comments: new.comments.into_iter().map(Comment::new).collect(),
            created,
        }
    }

    /// Returns `true` if this post references the given author.
    pub fn is_by(&self, author: &AuthorId) -> bool {
        self.author.author_id() == Some(author)
    }
}

/// Fields required to create a [`Blogpost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBlogpost {
    pub title: String,
    pub content: String,
    pub author: AuthorRef,
    /// Initial comment contents, in order.
    pub comments: Vec<String>,
}

/// Partial update of a [`Blogpost`].
///
/// Only `title` and `content` are mutable; author, comments and the creation
/// time cannot be changed through a patch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogpostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl BlogpostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn apply(&self, post: &mut Blogpost) {
        if let Some(title) = &self.title {
            post.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            post.content.clone_from(content);
        }
    }
}
