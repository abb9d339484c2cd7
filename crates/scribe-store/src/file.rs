//! File-backed entity store.
//!
//! Holds the collections in an [`InMemoryEntityStore`] and rewrites a JSON
//! snapshot after every successful mutation. The snapshot is written to a
//! sibling temp file and renamed over the target, so a crash mid-write leaves
//! the previous snapshot intact.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use scribe_types::{
    Author, AuthorId, AuthorPatch, Blogpost, BlogpostId, BlogpostPatch, NewAuthor, NewBlogpost,
};

use crate::error::{StoreError, StoreResult};
use crate::memory::{InMemoryEntityStore, StoreSnapshot};
use crate::traits::EntityStore;

/// Entity store persisted as a JSON snapshot on disk.
pub struct FileEntityStore {
    path: PathBuf,
    inner: InMemoryEntityStore,
    /// Serializes snapshot writers.
    flush: Mutex<()>,
}

impl FileEntityStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let inner = match fs::read(path) {
            Ok(bytes) => {
                let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
                info!(
                    path = %path.display(),
                    authors = snapshot.authors.len(),
                    blogposts = snapshot.blogposts.len(),
                    "loaded store snapshot"
                );
                InMemoryEntityStore::from_snapshot(snapshot)?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot found, starting empty");
                InMemoryEntityStore::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner,
            flush: Mutex::new(()),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> StoreResult<()> {
        let _guard = self.flush.lock().map_err(|_| StoreError::Poisoned)?;
        // Taken under the flush lock so the last writer always sees the latest state.
        let snapshot = self.inner.snapshot()?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    fn mutate<T>(&self, op: impl FnOnce(&InMemoryEntityStore) -> StoreResult<T>) -> StoreResult<T> {
        let out = op(&self.inner)?;
        self.persist()?;
        Ok(out)
    }
}

impl EntityStore for FileEntityStore {
    fn create_author(&self, new: NewAuthor) -> StoreResult<Author> {
        self.mutate(|s| s.create_author(new))
    }

    fn find_author(&self, id: &AuthorId) -> StoreResult<Option<Author>> {
        self.inner.find_author(id)
    }

    fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>> {
        self.inner.find_author_by_user_name(user_name)
    }

    fn find_all_authors(&self) -> StoreResult<Vec<Author>> {
        self.inner.find_all_authors()
    }

    fn update_author(&self, id: &AuthorId, patch: &AuthorPatch) -> StoreResult<Author> {
        self.mutate(|s| s.update_author(id, patch))
    }

    fn delete_author(&self, id: &AuthorId) -> StoreResult<()> {
        self.mutate(|s| s.delete_author(id))
    }

    fn create_blogpost(&self, new: NewBlogpost) -> StoreResult<Blogpost> {
        self.mutate(|s| s.create_blogpost(new))
    }

    fn find_blogpost(&self, id: &BlogpostId) -> StoreResult<Option<Blogpost>> {
        self.inner.find_blogpost(id)
    }

    fn find_all_blogposts(&self) -> StoreResult<Vec<Blogpost>> {
        self.inner.find_all_blogposts()
    }

    fn update_blogpost(&self, id: &BlogpostId, patch: &BlogpostPatch) -> StoreResult<Blogpost> {
        self.mutate(|s| s.update_blogpost(id, patch))
    }

    fn append_comment(&self, id: &BlogpostId, content: &str) -> StoreResult<Blogpost> {
        self.mutate(|s| s.append_comment(id, content))
    }

    fn delete_blogpost(&self, id: &BlogpostId) -> StoreResult<()> {
        self.mutate(|s| s.delete_blogpost(id))
    }

    fn delete_blogposts_by_author(&self, author: &AuthorId) -> StoreResult<usize> {
        self.mutate(|s| s.delete_blogposts_by_author(author))
    }
}

impl std::fmt::Debug for FileEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntityStore")
            .field("path", &self.path)
            .field("inner", &self.inner)
            .finish()
    }
}
