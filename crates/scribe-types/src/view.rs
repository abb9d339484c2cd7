//! Externally visible representations of stored entities.
//!
//! Views are pure projections: building one never touches stored state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::author::Author;
use crate::identity::{AuthorId, BlogpostId, CommentId};
use crate::post::{AuthorRef, Blogpost, Comment};

/// Public representation of an [`Author`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: AuthorId,
    pub name: String,
    pub user_name: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.display_name(),
            user_name: author.user_name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
        }
    }
}

/// Public representation of a [`Blogpost`].
///
/// `author` is the display name, resolved from the embedded name pair or from
/// the joined author record. `comments` is present on single-post views and
/// omitted from list views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: BlogpostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView>>,
}

impl PostView {
    /// Single-post view, comments included.
    pub fn detail(post: &Blogpost, joined: Option<&Author>) -> Self {
        Self {
            comments: Some(post.comments.iter().map(CommentView::from).collect()),
            ..Self::summary(post, joined)
        }
    }

    /// List view, comments omitted.
    pub fn summary(post: &Blogpost, joined: Option<&Author>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: author_string(&post.author, joined),
            created: post.created,
            comments: None,
        }
    }
}

/// Resolve the display name for a post's author.
///
/// A referenced author that is not supplied (or does not match) renders as an
/// empty string.
pub fn author_string(author: &AuthorRef, joined: Option<&Author>) -> String {
    match author {
        AuthorRef::Embedded(name) => name.display_name(),
        AuthorRef::Referenced(id) => joined
            .filter(|a| a.id == *id)
            .map(Author::display_name)
            .unwrap_or_default(),
    }
}
