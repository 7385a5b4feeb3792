//! Access-controlled resources.

use std::fmt;
use std::sync::Arc;

use docket_acl::AccessController;
use docket_core::{Action, AttributeMap, Attributes, Document, DocumentId, Error, Result, Session};
use docket_query::ListQuery;
use docket_storage::Store;

use crate::pipeline::{Operation, Stage};

/// One store bound to one access controller.
///
/// Every operation runs the checks of its [`Operation::stages`] plan before
/// the store is written, and returns documents with unreadable attributes
/// removed. Cloning is cheap; clones share the store.
pub struct Resource<A: AttributeMap = Attributes, S: Session = ()> {
    name: String,
    store: Arc<dyn Store<A>>,
    access: AccessController<A, S>,
    #[cfg(test)]
    entered: Arc<std::sync::Mutex<Vec<(Operation, Stage)>>>,
}

impl<A: AttributeMap, S: Session> Resource<A, S> {
    /// Bind `store` to `access` under `name`.
    pub fn new<St>(name: impl Into<String>, store: St, access: AccessController<A, S>) -> Self
    where
        St: Store<A> + 'static,
    {
        Self::with_shared_store(name, Arc::new(store), access)
    }

    /// Like [`Resource::new`] for a store that is shared elsewhere.
    pub fn with_shared_store(
        name: impl Into<String>,
        store: Arc<dyn Store<A>>,
        access: AccessController<A, S>,
    ) -> Self {
        Self {
            name: name.into(),
            store,
            access,
            #[cfg(test)]
            entered: Arc::default(),
        }
    }

    /// Resource name, used in log records.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The access controller.
    pub fn access(&self) -> &AccessController<A, S> {
        &self.access
    }

    /// The underlying store. Calls made through it bypass access control.
    pub fn store(&self) -> &Arc<dyn Store<A>> {
        &self.store
    }

    fn enter(&self, op: Operation, stage: Stage) {
        log::trace!("{} {op}: {stage}", self.name);
        #[cfg(test)]
        if let Ok(mut entered) = self.entered.lock() {
            entered.push((op, stage));
        }
    }

    async fn load(&self, op: Operation, id: &DocumentId) -> Result<Option<Document<A>>> {
        self.enter(op, Stage::Load);
        self.store.read(id).await
    }

    async fn load_existing(&self, op: Operation, id: &DocumentId) -> Result<Document<A>> {
        self.load(op, id)
            .await?
            .ok_or_else(|| Error::not_found(id.as_str()))
    }

    fn readable(&self, op: Operation, session: &S, document: &Document<A>) -> Document<A> {
        self.enter(op, Stage::FilterReadable);
        self.access.filter_readable(session, document)
    }

    /// Create a document with a freshly generated id.
    pub async fn create(&self, session: &S, attributes: A) -> Result<Document<A>> {
        let op = Operation::Create;
        let action = op.action();

        self.enter(op, Stage::AuthorizeCollection);
        self.access.authorize_collection(session, &action).await?;

        self.enter(op, Stage::CheckWritable);
        self.access.assert_writable(session, &attributes)?;

        self.enter(op, Stage::AuthorizeDocument);
        self.access
            .authorize_document(session, &action, Some(&attributes), None)
            .await?;

        self.enter(op, Stage::Write);
        let id = DocumentId::generate();
        let created = self.store.create(&id, attributes).await?;
        log::debug!("{}: created {}", self.name, created.id);

        Ok(self.readable(op, session, &created))
    }

    /// Fetch one document. `NotFound` if absent.
    pub async fn read(&self, session: &S, id: &DocumentId) -> Result<Document<A>> {
        let op = Operation::Read;
        let existing = self.load_existing(op, id).await?;

        self.enter(op, Stage::AuthorizeDocument);
        self.access
            .authorize_document(session, &op.action(), None, Some(&existing.attributes))
            .await?;

        Ok(self.readable(op, session, &existing))
    }

    /// Overwrite a document's attributes.
    ///
    /// Attributes not resubmitted are erased, so the session must be able to
    /// write every stored attribute as well as every submitted one.
    pub async fn replace(&self, session: &S, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        let op = Operation::Replace;

        self.enter(op, Stage::CheckWritable);
        self.access.assert_writable(session, &attributes)?;

        let existing = self.load_existing(op, id).await?;

        self.enter(op, Stage::CheckExistingWritable);
        self.access.assert_writable(session, &existing.attributes)?;

        self.enter(op, Stage::AuthorizeDocument);
        self.access
            .authorize_document(
                session,
                &op.action(),
                Some(&attributes),
                Some(&existing.attributes),
            )
            .await?;

        self.enter(op, Stage::Write);
        let replaced = self.store.replace(id, attributes).await?;
        log::debug!("{}: replaced {id}", self.name);

        Ok(self.readable(op, session, &replaced))
    }

    /// Merge `attributes` into a document.
    ///
    /// Only the submitted keys must be writable. The document authorizer
    /// sees the merged result as the new attributes.
    pub async fn patch(&self, session: &S, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        let op = Operation::Patch;

        self.enter(op, Stage::CheckWritable);
        self.access.assert_writable(session, &attributes)?;

        let existing = self.load_existing(op, id).await?;

        self.enter(op, Stage::Merge);
        let mut merged = existing.attributes.clone();
        merged.merge(attributes.clone());

        self.enter(op, Stage::AuthorizeDocument);
        self.access
            .authorize_document(
                session,
                &op.action(),
                Some(&merged),
                Some(&existing.attributes),
            )
            .await?;

        self.enter(op, Stage::Write);
        let patched = match self.store.shallow_update(id, attributes).await? {
            Some(document) => document,
            None => self.store.replace(id, merged).await?,
        };
        log::debug!("{}: patched {id}", self.name);

        Ok(self.readable(op, session, &patched))
    }

    /// Remove a document. Destroying a missing document succeeds without
    /// consulting any authorizer.
    pub async fn destroy(&self, session: &S, id: &DocumentId) -> Result<()> {
        let op = Operation::Destroy;
        let Some(existing) = self.load(op, id).await? else {
            log::trace!("{}: destroy of missing {id} is a no-op", self.name);
            return Ok(());
        };

        self.enter(op, Stage::AuthorizeDocument);
        self.access
            .authorize_document(session, &op.action(), None, Some(&existing.attributes))
            .await?;

        self.enter(op, Stage::Write);
        self.store.destroy(id).await?;
        log::debug!("{}: destroyed {id}", self.name);
        Ok(())
    }

    /// Documents matching `query`, each filtered for reading.
    ///
    /// Filters are applied by the store to unfiltered attributes.
    pub async fn list(&self, session: &S, query: &ListQuery) -> Result<Vec<Document<A>>> {
        let op = Operation::List;

        self.enter(op, Stage::AuthorizeCollection);
        self.access.authorize_collection(session, &op.action()).await?;

        self.enter(op, Stage::Query);
        let documents = self.store.list(query).await?;

        self.enter(op, Stage::FilterReadable);
        Ok(documents
            .iter()
            .map(|doc| self.access.filter_readable(session, doc))
            .collect())
    }

    /// Run the collection check for an arbitrary action, for custom
    /// collection-level handlers.
    pub async fn authorize_collection_action(&self, session: &S, action: &Action) -> Result<()> {
        log::trace!("{} {action}: authorize-collection", self.name);
        self.access.authorize_collection(session, action).await
    }

    /// Load a document and run the post-load check for `action`, for custom
    /// document-level handlers. Returns the readable view.
    pub async fn load_for_action(
        &self,
        session: &S,
        id: &DocumentId,
        action: &Action,
    ) -> Result<Document<A>> {
        log::trace!("{} {action}: load", self.name);
        let existing = self
            .store
            .read(id)
            .await?
            .ok_or_else(|| Error::not_found(id.as_str()))?;

        log::trace!("{} {action}: authorize-document", self.name);
        self.access
            .authorize_document(session, action, None, Some(&existing.attributes))
            .await?;

        Ok(self.access.filter_readable(session, &existing))
    }
}

impl<A: AttributeMap, S: Session> Clone for Resource<A, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: Arc::clone(&self.store),
            access: self.access.clone(),
            #[cfg(test)]
            entered: Arc::clone(&self.entered),
        }
    }
}

impl<A: AttributeMap, S: Session> fmt::Debug for Resource<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}
