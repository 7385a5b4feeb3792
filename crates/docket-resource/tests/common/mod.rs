//! Common test utilities and harness for resource integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docket_acl::{AccessController, CollectionAuthorizer, DocumentAuthorizer};
use docket_core::{Action, Attributes, Document, DocumentId, Result};
use docket_query::ListQuery;
use docket_resource::Resource;
use docket_storage::testing::{RecordingStore, StoreCall};
use docket_storage::{MemoryStore, Store};

/// Session used throughout the suite.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
}

impl User {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Build attributes from a JSON object literal.
pub fn attrs(value: serde_json::Value) -> Attributes {
    value.as_object().cloned().unwrap()
}

/// One decision request seen by a [`RecordingAuthorizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizerCall {
    pub action: Action,
    pub new_attributes: Option<Attributes>,
    pub old_attributes: Option<Attributes>,
}

/// Authorizer spy that answers with a fixed decision.
#[derive(Debug)]
pub struct RecordingAuthorizer {
    allow: bool,
    calls: Mutex<Vec<AuthorizerCall>>,
}

impl RecordingAuthorizer {
    pub fn allowing() -> Arc<Self> {
        Arc::new(Self {
            allow: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            allow: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<AuthorizerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AuthorizerCall) -> Result<bool> {
        self.calls.lock().unwrap().push(call);
        Ok(self.allow)
    }
}

#[async_trait]
impl CollectionAuthorizer<User> for RecordingAuthorizer {
    async fn authorize(&self, _session: &User, action: &Action) -> Result<bool> {
        self.record(AuthorizerCall {
            action: action.clone(),
            new_attributes: None,
            old_attributes: None,
        })
    }
}

#[async_trait]
impl DocumentAuthorizer<Attributes, User> for RecordingAuthorizer {
    async fn authorize(
        &self,
        _session: &User,
        action: &Action,
        new_attributes: Option<&Attributes>,
        old_attributes: Option<&Attributes>,
    ) -> Result<bool> {
        self.record(AuthorizerCall {
            action: action.clone(),
            new_attributes: new_attributes.cloned(),
            old_attributes: old_attributes.cloned(),
        })
    }
}

/// A store that cannot merge in place, so patches fall back to a full
/// replace.
#[derive(Debug, Default)]
pub struct ReplaceOnlyStore(pub MemoryStore);

#[async_trait]
impl Store<Attributes> for ReplaceOnlyStore {
    async fn create(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        self.0.create(id, attributes).await
    }

    async fn read(&self, id: &DocumentId) -> Result<Option<Document>> {
        self.0.read(id).await
    }

    async fn replace(&self, id: &DocumentId, attributes: Attributes) -> Result<Document> {
        self.0.replace(id, attributes).await
    }

    async fn destroy(&self, id: &DocumentId) -> Result<()> {
        self.0.destroy(id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Document>> {
        self.0.list(query).await
    }

    fn name(&self) -> &str {
        "replace-only"
    }
}

/// A resource wired to spies.
pub struct TestHarness {
    pub store: Arc<RecordingStore<MemoryStore>>,
    pub collection: Arc<RecordingAuthorizer>,
    pub document: Arc<RecordingAuthorizer>,
    pub resource: Resource<Attributes, User>,
}

impl TestHarness {
    /// Harness with both authorizers allowing and permissive filters.
    pub fn new() -> Self {
        Self::with_controller(
            RecordingAuthorizer::allowing(),
            RecordingAuthorizer::allowing(),
            |builder| builder,
        )
    }

    /// Harness with the given authorizers; `configure` adds filters.
    pub fn with_controller<F>(
        collection: Arc<RecordingAuthorizer>,
        document: Arc<RecordingAuthorizer>,
        configure: F,
    ) -> Self
    where
        F: FnOnce(
            docket_acl::AccessControllerBuilder<Attributes, User>,
        ) -> docket_acl::AccessControllerBuilder<Attributes, User>,
    {
        let store = Arc::new(RecordingStore::new(MemoryStore::new()));
        let builder = AccessController::builder()
            .authorize_collection(Arc::clone(&collection))
            .authorize_document(Arc::clone(&document));
        let access = configure(builder).build();
        let shared: Arc<dyn Store<Attributes>> = store.clone();
        let resource = Resource::with_shared_store("test", shared, access);
        Self {
            store,
            collection,
            document,
            resource,
        }
    }

    /// Insert a document directly, bypassing access control, and forget
    /// the calls that made.
    pub async fn seed(&self, id: &str, attributes: Attributes) -> Document {
        let store: &dyn Store<Attributes> = self.store.as_ref();
        let document = store.create(&DocumentId::new(id), attributes).await.unwrap();
        self.store.clear();
        document
    }

    pub fn store_calls(&self) -> Vec<StoreCall> {
        self.store.calls()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
