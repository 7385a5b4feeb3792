//! Spy store for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use docket_core::{AttributeMap, Document, DocumentId, Result};
use docket_query::ListQuery;

use crate::store::Store;

/// One call observed by a [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `create(id)`
    Create(DocumentId),
    /// `read(id)`
    Read(DocumentId),
    /// `replace(id)`
    Replace(DocumentId),
    /// `destroy(id)`
    Destroy(DocumentId),
    /// `list`
    List,
    /// `shallow_update(id)`
    ShallowUpdate(DocumentId),
}

/// Wraps a store and records every call made to it.
#[derive(Debug, Default)]
pub struct RecordingStore<St> {
    inner: St,
    calls: Mutex<Vec<StoreCall>>,
}

impl<St> RecordingStore<St> {
    /// Wrap `inner`.
    pub fn new(inner: St) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &St {
        &self.inner
    }

    /// Calls so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: StoreCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl<A, St> Store<A> for RecordingStore<St>
where
    A: AttributeMap,
    St: Store<A>,
{
    async fn create(&self, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        self.record(StoreCall::Create(id.clone()));
        self.inner.create(id, attributes).await
    }

    async fn read(&self, id: &DocumentId) -> Result<Option<Document<A>>> {
        self.record(StoreCall::Read(id.clone()));
        self.inner.read(id).await
    }

    async fn replace(&self, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        self.record(StoreCall::Replace(id.clone()));
        self.inner.replace(id, attributes).await
    }

    async fn destroy(&self, id: &DocumentId) -> Result<()> {
        self.record(StoreCall::Destroy(id.clone()));
        self.inner.destroy(id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Document<A>>> {
        self.record(StoreCall::List);
        self.inner.list(query).await
    }

    async fn shallow_update(
        &self,
        id: &DocumentId,
        attributes: A,
    ) -> Result<Option<Document<A>>> {
        self.record(StoreCall::ShallowUpdate(id.clone()));
        self.inner.shallow_update(id, attributes).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
