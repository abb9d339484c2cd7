use scribe_types::{
    Author, AuthorId, AuthorPatch, Blogpost, BlogpostId, BlogpostPatch, NewAuthor, NewBlogpost,
};

use crate::error::StoreResult;

/// Author and blogpost document store.
///
/// All implementations must satisfy these invariants:
/// - Each operation is atomic with respect to every other operation on the
///   same store. Sequences of operations are not.
/// - `userName` is unique across all authors at all times.
/// - A post is only created with a referenced author that exists.
/// - Find-by-id returns `Ok(None)` for a missing record; update and delete
///   return a not-found error instead.
pub trait EntityStore: Send + Sync {
    /// Insert a new author with a fresh id.
    ///
    /// Fails with `UniqueViolation` if `userName` is already taken.
    fn create_author(&self, new: NewAuthor) -> StoreResult<Author>;

    fn find_author(&self, id: &AuthorId) -> StoreResult<Option<Author>>;

    /// Look up an author by its unique `userName`.
    fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>>;

    /// All authors in creation order.
    fn find_all_authors(&self) -> StoreResult<Vec<Author>>;

    /// Apply a partial update and return the updated author.
    ///
    /// The uniqueness check on `userName` excludes the author being updated.
    fn update_author(&self, id: &AuthorId, patch: &AuthorPatch) -> StoreResult<Author>;

    fn delete_author(&self, id: &AuthorId) -> StoreResult<()>;

    /// Insert a new post with a fresh id and `created` set to now.
    ///
    /// Fails with `MissingReference` if the post references an absent author.
    fn create_blogpost(&self, new: NewBlogpost) -> StoreResult<Blogpost>;

    fn find_blogpost(&self, id: &BlogpostId) -> StoreResult<Option<Blogpost>>;

    /// All posts in creation order.
    fn find_all_blogposts(&self) -> StoreResult<Vec<Blogpost>>;

    /// Apply a partial update of title/content and return the updated post.
    fn update_blogpost(&self, id: &BlogpostId, patch: &BlogpostPatch) -> StoreResult<Blogpost>;

    /// Append a comment with a fresh id to the end of a post's comments.
    fn append_comment(&self, id: &BlogpostId, content: &str) -> StoreResult<Blogpost>;

    fn delete_blogpost(&self, id: &BlogpostId) -> StoreResult<()>;

    /// Delete every post referencing `author`. Returns the number removed.
    ///
    /// Matching nothing is not an error, so retries converge.
    fn delete_blogposts_by_author(&self, author: &AuthorId) -> StoreResult<usize>;

    /// Posts referencing `author`, in creation order.
    ///
    /// Default implementation filters [`find_all_blogposts`](Self::find_all_blogposts).
    fn find_blogposts_by_author(&self, author: &AuthorId) -> StoreResult<Vec<Blogpost>> {
        Ok(self
            .find_all_blogposts()?
            .into_iter()
            .filter(|post| post.is_by(author))
            .collect())
    }
}
