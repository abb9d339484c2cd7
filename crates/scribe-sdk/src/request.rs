//! Loosely typed request bodies and their validation.
//!
//! Fields arrive as `Option`s straight from JSON. Validation reports the first
//! missing field and runs before any store call, so a rejected request has no
//! side effect.

use serde::Deserialize;

use scribe_types::{
    AuthorId, AuthorName, AuthorPatch, AuthorRef, BlogpostId, BlogpostPatch, NewAuthor,
    NewBlogpost,
};

use crate::error::{SdkError, SdkResult, AUTHOR_NOT_FOUND};

fn require(field: &str, value: Option<String>) -> SdkResult<String> {
    value.ok_or_else(|| SdkError::missing_field(field))
}

fn check_ids_match(path_id: &str, body_id: Option<&str>) -> SdkResult<()> {
    match body_id {
        Some(body_id) if body_id == path_id => Ok(()),
        other => Err(SdkError::Validation(format!(
            "Request path id ({path_id}) and request body id ({}) must match",
            other.unwrap_or("undefined")
        ))),
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl CreateAuthorRequest {
    pub fn validate(self) -> SdkResult<NewAuthor> {
        let first_name = require("firstName", self.first_name)?;
        let last_name = require("lastName", self.last_name)?;
        let user_name = require("userName", self.user_name)?;
        if user_name.trim().is_empty() {
            return Err(SdkError::Validation("`userName` must not be blank".into()));
        }
        Ok(NewAuthor {
            first_name,
            last_name,
            user_name,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl UpdateAuthorRequest {
    /// Validate against the author id taken from the request path.
    ///
    /// A body id is optional, but when present it must equal the path id.
    pub fn validate(self, path_id: &AuthorId) -> SdkResult<AuthorPatch> {
        if self.id.is_some() {
            check_ids_match(&path_id.to_string(), self.id.as_deref())?;
        }
        if let Some(user_name) = &self.user_name {
            if user_name.trim().is_empty() {
                return Err(SdkError::Validation("`userName` must not be blank".into()));
            }
        }
        Ok(AuthorPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
        })
    }
}

/// Body of a post creation request.
///
/// `author_id` selects the referenced-author variant; otherwise an embedded
/// `author` name pair is required.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "authorId")]
    pub author_id: Option<String>,
    pub author: Option<AuthorName>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl CreatePostRequest {
    pub fn validate(self) -> SdkResult<NewBlogpost> {
        let title = require("title", self.title)?;
        let content = require("content", self.content)?;
        let author = match (self.author_id, self.author) {
            // An id that cannot be parsed cannot name an existing author.
            (Some(raw), _) => AuthorRef::Referenced(
                raw.parse::<AuthorId>()
                    .map_err(|_| SdkError::Reference(AUTHOR_NOT_FOUND.into()))?,
            ),
            (None, Some(name)) => AuthorRef::Embedded(name),
            (None, None) => return Err(SdkError::missing_field("author_id")),
        };
        Ok(NewBlogpost {
            title,
            content,
            author,
            comments: self.comments,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    /// Validate against the post id taken from the request path.
    ///
    /// The body must repeat the path id. Only title and content are taken.
    pub fn validate(self, path_id: &BlogpostId) -> SdkResult<BlogpostPatch> {
        check_ids_match(&path_id.to_string(), self.id.as_deref())?;
        Ok(BlogpostPatch {
            title: self.title,
            content: self.content,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

impl CreateCommentRequest {
    pub fn validate(self) -> SdkResult<String> {
        require("content", self.content)
    }
}
