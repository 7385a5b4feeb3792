//! The `Store` trait.

use std::sync::Arc;

use async_trait::async_trait;
use docket_core::{AttributeMap, Attributes, Document, DocumentId, Result};
use docket_query::ListQuery;

/// Persistence for one collection of documents.
///
/// Stores do no access control. They are only reached through a resource,
/// after the relevant checks have passed.
///
/// # Errors
///
/// - `create` on an id that already exists: `Conflict`
/// - `replace` or `shallow_update` on a missing id: `NotFound`
/// - `destroy` of a missing id: success, nothing happens
/// - backend failures: `Store`
#[async_trait]
pub trait Store<A: AttributeMap = Attributes>: Send + Sync {
    /// Insert a new document.
    async fn create(&self, id: &DocumentId, attributes: A) -> Result<Document<A>>;

    /// Fetch a document, `None` if absent.
    async fn read(&self, id: &DocumentId) -> Result<Option<Document<A>>>;

    /// Overwrite a document's attributes wholesale.
    async fn replace(&self, id: &DocumentId, attributes: A) -> Result<Document<A>>;

    /// Remove a document.
    async fn destroy(&self, id: &DocumentId) -> Result<()>;

    /// Documents matching `query`.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Document<A>>>;

    /// Merge `attributes` into the stored document in place.
    ///
    /// Returns `Ok(None)` when the store has no native partial update; the
    /// caller then writes the merged document with [`Store::replace`].
    async fn shallow_update(
        &self,
        _id: &DocumentId,
        _attributes: A,
    ) -> Result<Option<Document<A>>> {
        Ok(None)
    }

    /// Store name for diagnostics.
    fn name(&self) -> &str;
}

#[async_trait]
impl<A, T> Store<A> for Arc<T>
where
    A: AttributeMap,
    T: Store<A> + ?Sized,
{
    async fn create(&self, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        (**self).create(id, attributes).await
    }

    async fn read(&self, id: &DocumentId) -> Result<Option<Document<A>>> {
        (**self).read(id).await
    }

    async fn replace(&self, id: &DocumentId, attributes: A) -> Result<Document<A>> {
        (**self).replace(id, attributes).await
    }

    async fn destroy(&self, id: &DocumentId) -> Result<()> {
        (**self).destroy(id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Document<A>>> {
        (**self).list(query).await
    }

    async fn shallow_update(
        &self,
        id: &DocumentId,
        attributes: A,
    ) -> Result<Option<Document<A>>> {
        (**self).shallow_update(id, attributes).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
