use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scribe_types::{
    Author, AuthorId, AuthorPatch, AuthorRef, Blogpost, BlogpostId, BlogpostPatch, Comment,
    NewAuthor, NewBlogpost,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

const USER_NAME: &str = "userName";

/// Point-in-time copy of both collections, in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub authors: Vec<Author>,
    pub blogposts: Vec<Blogpost>,
}

#[derive(Default)]
struct Collections {
    authors: HashMap<AuthorId, Author>,
    blogposts: HashMap<BlogpostId, Blogpost>,
}

impl Collections {
    fn user_name_taken(&self, user_name: &str, except: Option<&AuthorId>) -> bool {
        self.authors
            .values()
            .any(|a| a.user_name == user_name && Some(&a.id) != except)
    }

    fn sorted_authors(&self) -> Vec<Author> {
        let mut authors: Vec<Author> = self.authors.values().cloned().collect();
        authors.sort_by_key(|a| a.id);
        authors
    }

    fn sorted_blogposts(&self) -> Vec<Blogpost> {
        let mut posts: Vec<Blogpost> = self.blogposts.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        posts
    }
}

/// In-memory, HashMap-based entity store.
///
/// Both collections sit behind a single `RwLock`, so the unique `userName`
/// index and the author-exists check on post creation are enforced in the
/// same critical section as the write they guard.
pub struct InMemoryEntityStore {
    state: RwLock<Collections>,
}

impl InMemoryEntityStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Collections::default()),
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// Fails with `UniqueViolation` if the snapshot repeats a `userName`.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        let mut state = Collections::default();
        for author in snapshot.authors {
            if state.user_name_taken(&author.user_name, None) {
                return Err(StoreError::UniqueViolation {
                    field: USER_NAME,
                    value: author.user_name,
                });
            }
            state.authors.insert(author.id, author);
        }
        for post in snapshot.blogposts {
            state.blogposts.insert(post.id, post);
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Copy both collections out of the store.
    pub fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        let state = self.read()?;
        Ok(StoreSnapshot {
            authors: state.sorted_authors(),
            blogposts: state.sorted_blogposts(),
        })
    }

    /// Number of authors currently stored.
    pub fn author_count(&self) -> usize {
        self.read().map(|s| s.authors.len()).unwrap_or_default()
    }

    /// Number of blogposts currently stored.
    pub fn blogpost_count(&self) -> usize {
        self.read().map(|s| s.blogposts.len()).unwrap_or_default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn create_author(&self, new: NewAuthor) -> StoreResult<Author> {
        let mut state = self.write()?;
        if state.user_name_taken(&new.user_name, None) {
            return Err(StoreError::UniqueViolation {
                field: USER_NAME,
                value: new.user_name,
            });
        }
        let author = Author::from_new(AuthorId::new(), new);
        state.authors.insert(author.id, author.clone());
        debug!(author = %author.id, "author inserted");
        Ok(author)
    }

    fn find_author(&self, id: &AuthorId) -> StoreResult<Option<Author>> {
        Ok(self.read()?.authors.get(id).cloned())
    }

    fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>> {
        Ok(self
            .read()?
            .authors
            .values()
            .find(|a| a.user_name == user_name)
            .cloned())
    }

    fn find_all_authors(&self) -> StoreResult<Vec<Author>> {
        Ok(self.read()?.sorted_authors())
    }

    fn update_author(&self, id: &AuthorId, patch: &AuthorPatch) -> StoreResult<Author> {
        let mut state = self.write()?;
        if !state.authors.contains_key(id) {
            return Err(StoreError::AuthorNotFound(*id));
        }
        if let Some(user_name) = &patch.user_name {
            if state.user_name_taken(user_name, Some(id)) {
                return Err(StoreError::UniqueViolation {
                    field: USER_NAME,
                    value: user_name.clone(),
                });
            }
        }
        let author = state
            .authors
            .get_mut(id)
            .ok_or(StoreError::AuthorNotFound(*id))?;
        patch.apply(author);
        Ok(author.clone())
    }

    fn delete_author(&self, id: &AuthorId) -> StoreResult<()> {
        self.write()?
            .authors
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::AuthorNotFound(*id))
    }

    fn create_blogpost(&self, new: NewBlogpost) -> StoreResult<Blogpost> {
        let mut state = self.write()?;
        if let AuthorRef::Referenced(author) = &new.author {
            if !state.authors.contains_key(author) {
                return Err(StoreError::MissingReference(*author));
            }
        }
        let post = Blogpost::from_new(BlogpostId::new(), new, Utc::now());
        state.blogposts.insert(post.id, post.clone());
        debug!(blogpost = %post.id, "blogpost inserted");
        Ok(post)
    }

    fn find_blogpost(&self, id: &BlogpostId) -> StoreResult<Option<Blogpost>> {
        Ok(self.read()?.blogposts.get(id).cloned())
    }

    fn find_all_blogposts(&self) -> StoreResult<Vec<Blogpost>> {
        Ok(self.read()?.sorted_blogposts())
    }

    fn update_blogpost(&self, id: &BlogpostId, patch: &BlogpostPatch) -> StoreResult<Blogpost> {
        let mut state = self.write()?;
        let post = state
            .blogposts
            .get_mut(id)
            .ok_or(StoreError::BlogpostNotFound(*id))?;
        patch.apply(post);
        Ok(post.clone())
    }

    fn append_comment(&self, id: &BlogpostId, content: &str) -> StoreResult<Blogpost> {
        let mut state = self.write()?;
        let post = state
            .blogposts
            .get_mut(id)
            .ok_or(StoreError::BlogpostNotFound(*id))?;
        post.comments.push(Comment::new(content));
        Ok(post.clone())
    }

    fn delete_blogpost(&self, id: &BlogpostId) -> StoreResult<()> {
        self.write()?
            .blogposts
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::BlogpostNotFound(*id))
    }

    fn delete_blogposts_by_author(&self, author: &AuthorId) -> StoreResult<usize> {
        let mut state = self.write()?;
        let before = state.blogposts.len();
        state.blogposts.retain(|_, post| !post.is_by(author));
        Ok(before - state.blogposts.len())
    }
}

impl std::fmt::Debug for InMemoryEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEntityStore")
            .field("author_count", &self.author_count())
            .field("blogpost_count", &self.blogpost_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scribe_types::AuthorName;

    fn new_author(user_name: &str) -> NewAuthor {
        NewAuthor {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            user_name: user_name.into(),
        }
    }

    fn new_post(author: AuthorRef) -> NewBlogpost {
        NewBlogpost {
            title: "T".into(),
            content: "C".into(),
            author,
            comments: vec![],
        }
    }

    // -----------------------------------------------------------------------
    // Authors
    // -----------------------------------------------------------------------

    #[test]
    fn create_and_find_author() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();

        assert_eq!(store.find_author(&author.id).unwrap(), Some(author.clone()));
        assert_eq!(
            store.find_author_by_user_name("jdoe").unwrap(),
            Some(author)
        );
        assert!(store.find_author_by_user_name("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_user_name_is_rejected() {
        let store = InMemoryEntityStore::new();
        store.create_author(new_author("jdoe")).unwrap();
        let err = store.create_author(new_author("jdoe")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UniqueViolation { field: "userName", .. }
        ));
        assert_eq!(store.author_count(), 1);
    }

    #[test]
    fn update_author_keeping_own_user_name() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();
        let patch = AuthorPatch {
            first_name: Some("Janet".into()),
            user_name: Some("jdoe".into()),
            ..Default::default()
        };
        let updated = store.update_author(&author.id, &patch).unwrap();
        assert_eq!(updated.first_name, "Janet");
        assert_eq!(updated.user_name, "jdoe");
    }

    #[test]
    fn update_author_to_taken_user_name() {
        let store = InMemoryEntityStore::new();
        store.create_author(new_author("taken")).unwrap();
        let author = store.create_author(new_author("jdoe")).unwrap();
        let patch = AuthorPatch {
            user_name: Some("taken".into()),
            ..Default::default()
        };
        let err = store.update_author(&author.id, &patch).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(
            store.find_author(&author.id).unwrap().unwrap().user_name,
            "jdoe"
        );
    }

    #[test]
    fn update_and_delete_missing_author() {
        let store = InMemoryEntityStore::new();
        let id = AuthorId::new();
        assert!(store
            .update_author(&id, &AuthorPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(store.delete_author(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn update_missing_author_to_taken_user_name_is_not_found() {
        let store = InMemoryEntityStore::new();
        store.create_author(new_author("taken")).unwrap();
        let patch = AuthorPatch {
            user_name: Some("taken".into()),
            ..Default::default()
        };
        let err = store.update_author(&AuthorId::new(), &patch).unwrap_err();
        assert!(matches!(err, StoreError::AuthorNotFound(_)));
    }

    #[test]
    fn authors_listed_in_creation_order() {
        let store = InMemoryEntityStore::new();
        let a = store.create_author(new_author("a")).unwrap();
        let b = store.create_author(new_author("b")).unwrap();
        let c = store.create_author(new_author("c")).unwrap();
        let ids: Vec<AuthorId> = store
            .find_all_authors()
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    // -----------------------------------------------------------------------
    // Blogposts
    // -----------------------------------------------------------------------

    #[test]
    fn create_post_for_existing_author() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();
        let post = store
            .create_blogpost(new_post(AuthorRef::Referenced(author.id)))
            .unwrap();
        assert!(post.is_by(&author.id));
        assert_eq!(store.find_blogpost(&post.id).unwrap(), Some(post));
    }

    #[test]
    fn create_post_for_missing_author() {
        let store = InMemoryEntityStore::new();
        let missing = AuthorId::new();
        let err = store
            .create_blogpost(new_post(AuthorRef::Referenced(missing)))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference(id) if id == missing));
        assert_eq!(store.blogpost_count(), 0);
    }

    #[test]
    fn embedded_author_needs_no_record() {
        let store = InMemoryEntityStore::new();
        let post = store
            .create_blogpost(new_post(AuthorRef::Embedded(AuthorName {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            })))
            .unwrap();
        assert_eq!(store.find_all_blogposts().unwrap(), vec![post]);
    }

    #[test]
    fn update_post_keeps_author_and_created() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();
        let post = store
            .create_blogpost(new_post(AuthorRef::Referenced(author.id)))
            .unwrap();
        let patch = BlogpostPatch {
            title: Some("New".into()),
            content: Some("Body".into()),
        };
        let updated = store.update_blogpost(&post.id, &patch).unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.author, post.author);
        assert_eq!(updated.created, post.created);
    }

    #[test]
    fn comments_append_in_order() {
        let store = InMemoryEntityStore::new();
        let post = store
            .create_blogpost(NewBlogpost {
                comments: vec!["one".into()],
                ..new_post(AuthorRef::Embedded(AuthorName::default()))
            })
            .unwrap();
        store.append_comment(&post.id, "two").unwrap();
        let post = store.append_comment(&post.id, "three").unwrap();
        let contents: Vec<&str> = post.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[test]
    fn missing_post_operations() {
        let store = InMemoryEntityStore::new();
        let id = BlogpostId::new();
        assert!(store.find_blogpost(&id).unwrap().is_none());
        assert!(store
            .update_blogpost(&id, &BlogpostPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(store.append_comment(&id, "x").unwrap_err().is_not_found());
        assert!(store.delete_blogpost(&id).unwrap_err().is_not_found());
    }

    // -----------------------------------------------------------------------
    // Bulk delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_by_author_removes_only_matches() {
        let store = InMemoryEntityStore::new();
        let a = store.create_author(new_author("a")).unwrap();
        let b = store.create_author(new_author("b")).unwrap();
        for _ in 0..3 {
            store
                .create_blogpost(new_post(AuthorRef::Referenced(a.id)))
                .unwrap();
        }
        let kept = store
            .create_blogpost(new_post(AuthorRef::Referenced(b.id)))
            .unwrap();

        assert_eq!(store.find_blogposts_by_author(&a.id).unwrap().len(), 3);
        assert_eq!(store.delete_blogposts_by_author(&a.id).unwrap(), 3);
        assert_eq!(store.find_all_blogposts().unwrap(), vec![kept]);
    }

    #[test]
    fn delete_by_author_is_idempotent() {
        let store = InMemoryEntityStore::new();
        let a = store.create_author(new_author("a")).unwrap();
        store
            .create_blogpost(new_post(AuthorRef::Referenced(a.id)))
            .unwrap();
        assert_eq!(store.delete_blogposts_by_author(&a.id).unwrap(), 1);
        assert_eq!(store.delete_blogposts_by_author(&a.id).unwrap(), 0);
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_restores_both_collections() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();
        store
            .create_blogpost(new_post(AuthorRef::Referenced(author.id)))
            .unwrap();
        let snapshot = store.snapshot().unwrap();

        let restored = InMemoryEntityStore::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn snapshot_with_duplicate_user_names_is_rejected() {
        let store = InMemoryEntityStore::new();
        let author = store.create_author(new_author("jdoe")).unwrap();
        let twin = Author {
            id: AuthorId::new(),
            ..author.clone()
        };
        let snapshot = StoreSnapshot {
            authors: vec![author, twin],
            blogposts: vec![],
        };
        assert!(InMemoryEntityStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn concurrent_creates_keep_user_name_unique() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryEntityStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.create_author(new_author("race")).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.author_count(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryEntityStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryEntityStore"));
        assert!(debug.contains("author_count"));
    }

    proptest! {
        #[test]
        fn user_names_stay_unique(names in proptest::collection::vec("[a-c]{1,2}", 0..20)) {
            let store = InMemoryEntityStore::new();
            for name in &names {
                let _ = store.create_author(new_author(name));
            }
            let mut seen: Vec<String> = store
                .find_all_authors()
                .unwrap()
                .into_iter()
                .map(|a| a.user_name)
                .collect();
            let total = seen.len();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), total);

            let mut expected = names.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(seen, expected);
        }
    }
}
