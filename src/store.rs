// Flat-file datastore: a single JSON array of blog posts on disk.
//
// Every append is a read-modify-write of the whole file. There is no lock
// and no atomic rename, so two appends that overlap can lose one of the
// records (the second writer overwrites the first). Callers that need
// concurrent writers must serialize them themselves.

use crate::error::StoreError;
use crate::post::BlogPost;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the store, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "data/blog-posts.json";

/// Handle on the JSON array file. Cheap to clone; it only holds the path.
#[derive(Debug, Clone)]
pub struct BlogStore {
    path: PathBuf,
}

impl BlogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BlogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with `[]` if it does not exist yet. Returns `true`
    /// when the file was created.
    pub fn ensure_exists(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::fs(parent, e))?;
        }
        fs::write(&self.path, "[]").map_err(|e| StoreError::fs(&self.path, e))?;
        info!(path = %self.path.display(), "created blog post store");
        Ok(true)
    }

    /// Append one record and return the number of records now stored.
    pub fn append(&self, post: &BlogPost) -> Result<usize, StoreError> {
        self.begin_append()?.commit(post)
    }

    /// Read and parse the current content, keeping it in memory until
    /// [`PendingAppend::commit`] writes it back with the new record.
    ///
    /// Nothing guards the file between the two steps.
    pub fn begin_append(&self) -> Result<PendingAppend<'_>, StoreError> {
        let existing = self.load_values()?;
        Ok(PendingAppend {
            store: self,
            existing,
        })
    }

    /// Every stored record, oldest first.
    pub fn read_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        match self.read_text()? {
            Some(text) => serde_json::from_str(&text).map_err(|e| StoreError::parse(&self.path, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Existing entries as raw JSON so unknown keys and key order survive
    /// the rewrite.
    fn load_values(&self) -> Result<Vec<Value>, StoreError> {
        match self.read_text()? {
            Some(text) => {
                serde_json::from_str::<Vec<Value>>(&text).map_err(|e| StoreError::parse(&self.path, e))
            }
            None => Ok(Vec::new()),
        }
    }

    /// `None` stands for "treat as an empty array": the file is missing,
    /// blank, or not UTF-8.
    fn read_text(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => {
                debug!(path = %self.path.display(), "store is empty");
                Ok(None)
            }
            Ok(text) => {
                debug!(path = %self.path.display(), bytes = text.len(), "read store");
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), "store is not valid UTF-8, starting a new array");
                Ok(None)
            }
            Err(e) => Err(StoreError::fs(&self.path, e)),
        }
    }
}

/// First half of an append: the parsed array as it was when read.
#[derive(Debug)]
pub struct PendingAppend<'a> {
    store: &'a BlogStore,
    existing: Vec<Value>,
}

impl PendingAppend<'_> {
    /// Number of records seen when the file was read.
    pub fn len(&self) -> usize {
        self.existing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty()
    }

    /// Push `post` onto the array read earlier and overwrite the file.
    pub fn commit(mut self, post: &BlogPost) -> Result<usize, StoreError> {
        let value = serde_json::to_value(post).map_err(StoreError::Serialize)?;
        self.existing.push(value);
        let text = serde_json::to_string(&self.existing).map_err(StoreError::Serialize)?;
        let path = self.store.path();
        fs::write(path, text).map_err(|e| StoreError::fs(path, e))?;
        debug!(path = %path.display(), records = self.existing.len(), "wrote store");
        Ok(self.existing.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{BlogPost, PostDraft};
    use tempfile::tempdir;

    fn post(title: &str) -> BlogPost {
        let draft = PostDraft {
            title: title.into(),
            author: "Ada".into(),
            categories: vec!["notes".into()],
            published_date: "2024-01-15".into(),
            description: "desc".into(),
            body: "body".into(),
        };
        BlogPost::from_draft(draft, "excerpt".into()).unwrap()
    }

    #[test]
    fn ensure_exists_writes_empty_array_once() {
        let dir = tempdir().unwrap();
        let store = BlogStore::new(dir.path().join("data").join("blog-posts.json"));

        assert!(store.ensure_exists().unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");

        fs::write(store.path(), "[{\"keep\":true}]").unwrap();
        assert!(!store.ensure_exists().unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[{\"keep\":true}]");
    }

    #[test]
    fn zero_length_file_is_treated_as_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, "").unwrap();
        let store = BlogStore::new(&path);

        assert_eq!(store.append(&post("First")).unwrap(), 1);
        assert_eq!(store.read_all().unwrap(), vec![post("First")]);
    }

    #[test]
    fn whitespace_only_file_is_treated_as_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, " \n\t\n").unwrap();
        let store = BlogStore::new(&path);

        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(store.append(&post("First")).unwrap(), 1);
        assert_eq!(store.read_all().unwrap(), vec![post("First")]);
    }

    #[test]
    fn non_utf8_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let store = BlogStore::new(&path);

        assert_eq!(store.append(&post("First")).unwrap(), 1);
    }

    #[test]
    fn object_at_top_level_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, "{\"title\":\"x\"}").unwrap();
        let store = BlogStore::new(&path);

        let err = store.append(&post("First")).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }), "{err}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"title\":\"x\"}");
    }

    #[test]
    fn foreign_entries_survive_with_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, r#"[{"z":1,"a":{"y":2,"b":3}}]"#).unwrap();
        let store = BlogStore::new(&path);

        store.append(&post("Second")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(r#"[{"z":1,"a":{"y":2,"b":3}},{"title":"Second""#), "{text}");
    }

    #[test]
    fn unwritable_path_reports_file_system_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be.
        let store = BlogStore::new(dir.path());
        let err = store.append(&post("First")).unwrap_err();
        assert!(matches!(err, StoreError::FileSystem { .. }), "{err}");
    }
}
