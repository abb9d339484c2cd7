use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use scribe_store::{EntityStore, FileEntityStore, InMemoryEntityStore};
use scribe_types::{
    Author, AuthorId, AuthorPatch, AuthorRef, AuthorView, Blogpost, BlogpostId, BlogpostPatch,
    NewAuthor, NewBlogpost, PostView,
};

use crate::error::{SdkError, SdkResult, AUTHOR_NOT_FOUND, BLOGPOST_NOT_FOUND};

/// Outcome of a cascading author delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeReport {
    pub author: AuthorId,
    pub posts_removed: usize,
}

/// High-level Scribe API over an [`EntityStore`].
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Scribe {
    store: Arc<dyn EntityStore>,
}

impl Scribe {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Scribe over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryEntityStore::new()))
    }

    /// Scribe over a JSON snapshot file, loading it if it exists.
    pub fn open_file(path: &Path) -> SdkResult<Self> {
        Ok(Self::new(Arc::new(FileEntityStore::open(path)?)))
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    // ---- Authors ----

    pub fn create_author(&self, new: NewAuthor) -> SdkResult<AuthorView> {
        let user_name = new.user_name.clone();
        let author = self.store.create_author(new).inspect_err(|e| {
            debug!(user_name = %user_name, error = %e, "author creation rejected");
        })?;
        info!(author = %author.id, user_name = %author.user_name, "author created");
        Ok(AuthorView::from(&author))
    }

    pub fn get_author(&self, id: &AuthorId) -> SdkResult<AuthorView> {
        let author = self
            .store
            .find_author(id)?
            .ok_or_else(|| SdkError::NotFound(AUTHOR_NOT_FOUND.into()))?;
        Ok(AuthorView::from(&author))
    }

    pub fn find_author_by_user_name(&self, user_name: &str) -> SdkResult<Option<AuthorView>> {
        Ok(self
            .store
            .find_author_by_user_name(user_name)?
            .as_ref()
            .map(AuthorView::from))
    }

    pub fn list_authors(&self) -> SdkResult<Vec<AuthorView>> {
        Ok(self
            .store
            .find_all_authors()?
            .iter()
            .map(AuthorView::from)
            .collect())
    }

    /// Partially update an author.
    ///
    /// A new `userName` must not belong to any other author; keeping the
    /// author's own `userName` is not a conflict.
    pub fn update_author(&self, id: &AuthorId, patch: &AuthorPatch) -> SdkResult<AuthorView> {
        let author = self.store.update_author(id, patch).inspect_err(|e| {
            debug!(author = %id, error = %e, "author update rejected");
        })?;
        info!(author = %author.id, "author updated");
        Ok(AuthorView::from(&author))
    }

    /// Delete an author and every post referencing it.
    ///
    /// Runs as two store operations: the bulk post delete, then the author
    /// delete. If the bulk delete fails the author is left untouched. If the
    /// author delete fails after posts were removed, the failure is reported
    /// as [`SdkError::CascadeIncomplete`]; retrying converges because the bulk
    /// delete is idempotent.
    pub fn delete_author(&self, id: &AuthorId) -> SdkResult<CascadeReport> {
        let posts_removed = self.store.delete_blogposts_by_author(id)?;
        debug!(author = %id, posts_removed, "cascade removed posts");

        match self.store.delete_author(id) {
            Ok(()) => {
                info!(author = %id, posts_removed, "author deleted");
                Ok(CascadeReport {
                    author: *id,
                    posts_removed,
                })
            }
            Err(e) if e.is_not_found() => Err(SdkError::NotFound(AUTHOR_NOT_FOUND.into())),
            Err(source) => {
                warn!(
                    author = %id,
                    posts_removed,
                    error = %source,
                    "posts removed but author delete failed"
                );
                Err(SdkError::CascadeIncomplete {
                    author: *id,
                    posts_removed,
                    source,
                })
            }
        }
    }

    // ---- Blogposts ----

    /// Create a post.
    ///
    /// For a referenced author the author must exist; otherwise the call fails
    /// with a reference error and no post is written. An embedded author needs
    /// no lookup.
    pub fn create_blogpost(&self, new: NewBlogpost) -> SdkResult<PostView> {
        let joined = match &new.author {
            AuthorRef::Referenced(author_id) => Some(
                self.store
                    .find_author(author_id)?
                    .ok_or_else(|| {
                        debug!(author = %author_id, "post rejected, author missing");
                        SdkError::Reference(AUTHOR_NOT_FOUND.into())
                    })?,
            ),
            AuthorRef::Embedded(_) => None,
        };
        // The store re-checks the reference inside the write.
        let post = self.store.create_blogpost(new)?;
        info!(blogpost = %post.id, "blogpost created");
        Ok(PostView::detail(&post, joined.as_ref()))
    }

    pub fn get_blogpost(&self, id: &BlogpostId) -> SdkResult<PostView> {
        let post = self
            .store
            .find_blogpost(id)?
            .ok_or_else(|| SdkError::NotFound(BLOGPOST_NOT_FOUND.into()))?;
        self.detail(&post)
    }

    /// All posts as list views (comments omitted).
    pub fn list_blogposts(&self) -> SdkResult<Vec<PostView>> {
        let authors: HashMap<AuthorId, Author> = self
            .store
            .find_all_authors()?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        Ok(self
            .store
            .find_all_blogposts()?
            .iter()
            .map(|post| {
                let joined = post.author.author_id().and_then(|id| authors.get(id));
                PostView::summary(post, joined)
            })
            .collect())
    }

    /// Update title and/or content. Author, comments and `created` are kept.
    pub fn update_blogpost(&self, id: &BlogpostId, patch: &BlogpostPatch) -> SdkResult<PostView> {
        let post = self.store.update_blogpost(id, patch)?;
        info!(blogpost = %post.id, "blogpost updated");
        self.detail(&post)
    }

    pub fn add_comment(&self, id: &BlogpostId, content: &str) -> SdkResult<PostView> {
        let post = self.store.append_comment(id, content)?;
        info!(blogpost = %post.id, comments = post.comments.len(), "comment added");
        self.detail(&post)
    }

    pub fn delete_blogpost(&self, id: &BlogpostId) -> SdkResult<()> {
        self.store.delete_blogpost(id)?;
        info!(blogpost = %id, "blogpost deleted");
        Ok(())
    }

    fn detail(&self, post: &Blogpost) -> SdkResult<PostView> {
        let joined = match post.author.author_id() {
            Some(author_id) => self.store.find_author(author_id)?,
            None => None,
        };
        Ok(PostView::detail(post, joined.as_ref()))
    }
}

impl std::fmt::Debug for Scribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scribe").finish_non_exhaustive()
    }
}
