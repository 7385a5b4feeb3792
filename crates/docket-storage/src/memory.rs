//! In-memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use docket_core::{AttributeMap, Attributes, Document, DocumentId, Error, Result};
use docket_query::ListQuery;
use tokio::sync::RwLock;

use crate::store::Store;

/// Documents held in a `BTreeMap` behind an async lock.
///
/// `list` returns documents in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<DocumentId, Document>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `documents`. Later duplicates win.
    pub fn with_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns `true` if the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Copy of every document, in id order.
    pub async fn snapshot(&self) -> Vec<Document> {
        self.documents.read().await.values().cloned().collect()
    }

    /// Swap the whole contents for `other`'s.
    pub(crate) async fn adopt(&self, other: MemoryStore) {
        *self.documents.write().await = other.documents.into_inner();
    }
}

#[async_trait]
impl Store<Attributes> for MemoryStore {
    async fn create(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(id) {
            return Err(Error::conflict(id.as_str()));
        }
        let document = Document::new(id.clone(), attributes);
        documents.insert(id.clone(), document.clone());
        Ok(document)
    }

    async fn read(&self, id: &DocumentId) -> Result<Option<Document>> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn replace(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| Error::not_found(id.as_str()))?;
        document.attributes = attributes;
        Ok(document.clone())
    }

    async fn destroy(&self, id: &DocumentId) -> Result<()> {
        self.documents.write().await.remove(id);
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .filter(|doc| query.matches_document(doc))
            .cloned()
            .collect())
    }

    async fn shallow_update(
        &self,
        id: &DocumentId,
        attributes: Attributes,
    ) -> Result<Option<Document>> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| Error::not_found(id.as_str()))?;
        document.attributes.merge(attributes);
        Ok(Some(document.clone()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
