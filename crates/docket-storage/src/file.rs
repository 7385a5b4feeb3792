//! JSON-file store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docket_core::{Attributes, Document, DocumentId, Error, Result};
use docket_query::ListQuery;
use tokio::sync::Mutex;

use crate::memory::MemoryStore;
use crate::store::Store;

/// A [`MemoryStore`] persisted to a JSON array of documents.
///
/// The file is read once on [`FileStore::open`]. Each mutation is applied
/// to a staged copy, the copy is written out, and only then does it become
/// visible; a failed write leaves the store as it was. Mutations are
/// serialized so the file always reflects the latest one.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = load_documents(&path).await?;
        log::debug!(
            "Opened file store: {} documents from {}",
            documents.len(),
            path.display()
        );
        Ok(Self {
            path,
            memory: MemoryStore::with_documents(documents),
            write_lock: Mutex::new(()),
        })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn stage(&self) -> MemoryStore {
        MemoryStore::with_documents(self.memory.snapshot().await)
    }

    async fn commit(&self, staged: MemoryStore) -> Result<()> {
        self.persist(&staged.snapshot().await).await?;
        self.memory.adopt(staged).await;
        Ok(())
    }

    async fn persist(&self, documents: &[Document]) -> Result<()> {

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::store_with_source(format!("failed to create {}", parent.display()), e)
            })?;
        }

        let json = serde_json::to_string_pretty(documents)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            Error::store_with_source(format!("failed to write {}", self.path.display()), e)
        })?;

        log::debug!(
            "Saved file store: {} documents to {}",
            documents.len(),
            self.path.display()
        );
        Ok(())
    }
}

async fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::store_with_source(
                format!("failed to read {}", path.display()),
                e,
            ));
        }
    };
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&json).map_err(|e| {
        Error::store_with_source(format!("invalid store file {}", path.display()), e)
    })
}

#[async_trait]
impl Store<Attributes> for FileStore {
    async fn create(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let document = staged.create(id, attributes).await?;
        self.commit(staged).await?;
        Ok(document)
    }

    async fn read(&self, id: &DocumentId) -> Result<Option<Document>> {
        self.memory.read(id).await
    }

    async fn replace(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let document = staged.replace(id, attributes).await?;
        self.commit(staged).await?;
        Ok(document)
    }

    async fn destroy(&self, id: &DocumentId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.memory.read(id).await?.is_none() {
            return Ok(());
        }
        let staged = self.stage().await;
        staged.destroy(id).await?;
        self.commit(staged).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Document>> {
        self.memory.list(query).await
    }

    async fn shallow_update(
        &self,
        id: &DocumentId,
        attributes: Attributes,
    ) -> Result<Option<Document>> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let document = staged.shallow_update(id, attributes).await?;
        self.commit(staged).await?;
        Ok(document)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn attrs(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("docs.json")).await.unwrap();
        assert!(store.list(&ListQuery::new()).await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("docs.json");
        let a = DocumentId::new("a");
        let b = DocumentId::new("b");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.create(&a, attrs(json!({"title": "x"}))).await.unwrap();
            store.create(&b, attrs(json!({"title": "y"}))).await.unwrap();
            store
                .shallow_update(&a, attrs(json!({"body": "z"})))
                .await
                .unwrap();
            store.destroy(&b).await.unwrap();
        }

        let reopened = FileStore::open(&path).await.unwrap();
        let docs = reopened.list(&ListQuery::new()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, a);
        assert_eq!(docs[0].attributes, attrs(json!({"title": "x", "body": "z"})));
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        let store = FileStore::open(&path).await.unwrap();

        let err = store
            .replace(&DocumentId::new("nope"), Attributes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("sub");
        let store = FileStore::open(parent.join("docs.json")).await.unwrap();
        let kept = DocumentId::new("kept");
        let id = DocumentId::new("d1");

        std::fs::create_dir(&parent).unwrap();
        store.create(&kept, attrs(json!({"n": 1}))).await.unwrap();

        // A regular file where the directory should be makes every write fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "not a directory").unwrap();

        let err = store.create(&id, Attributes::new()).await.unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
        assert!(store.read(&id).await.unwrap().is_none());

        assert!(store.replace(&kept, attrs(json!({"n": 2}))).await.is_err());
        assert!(
            store
                .shallow_update(&kept, attrs(json!({"m": 3})))
                .await
                .is_err()
        );
        assert!(store.destroy(&kept).await.is_err());
        let unchanged = store.read(&kept).await.unwrap().unwrap();
        assert_eq!(unchanged.attributes, attrs(json!({"n": 1})));

        std::fs::remove_file(&parent).unwrap();
        store.create(&id, Attributes::new()).await.unwrap();
        assert_eq!(store.list(&ListQuery::new()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_store_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
    }
}
