//! Access controllers.
//!
//! An [`AccessController`] bundles the four policy hooks of a resource type:
//! one collection authorizer, one document authorizer, and a read and a write
//! attribute filter. It is built once with [`AccessControllerBuilder`] and
//! treated as immutable afterwards.
//!
//! Hooks left unset resolve at [`build`](AccessControllerBuilder::build):
//! authorizers default to [`DenyAll`], filters to [`PermissiveFilter`]. An
//! incompletely configured controller therefore grants no action, while
//! field restrictions must be stated explicitly.
//!
//! # Example
//!
//! ```rust
//! use docket_acl::AccessController;
//! use docket_core::{Action, Attributes};
//!
//! struct User { id: String }
//!
//! let controller = AccessController::<Attributes, User>::builder()
//!     .authorize_collection_with(|_user, action| *action == Action::Create)
//!     .authorize_document_with(|user, _action, _new, old| match old {
//!         None => true,
//!         Some(old) => old.get("ownerId").and_then(|v| v.as_str()) == Some(user.id.as_str()),
//!     })
//!     .write_filter_with(|_user, key| key != "ownerId")
//!     .build();
//! ```

use std::fmt;
use std::sync::Arc;

use docket_core::{Action, AttributeMap, Attributes, Document, Error, Result, Session};

use crate::authorizer::{
    AllowAll, CollectionAuthorizer, DenyAll, DocumentAuthorizer, FnCollectionAuthorizer,
    FnDocumentAuthorizer,
};
use crate::enforcement::{assert_all_attributes_allowed, filter_readable_document};
use crate::filter::{AttributeFilter, FnFilter, PermissiveFilter, RestrictiveFilter};

/// The complete access policy of one resource type.
///
/// Cheap to clone (Arc internals).
pub struct AccessController<A: AttributeMap = Attributes, S: Session = ()> {
    collection: Arc<dyn CollectionAuthorizer<S>>,
    document: Arc<dyn DocumentAuthorizer<A, S>>,
    read_filter: Arc<dyn AttributeFilter<S>>,
    write_filter: Arc<dyn AttributeFilter<S>>,
}

impl<A: AttributeMap, S: Session> AccessController<A, S> {
    /// Start building a controller.
    pub fn builder() -> AccessControllerBuilder<A, S> {
        AccessControllerBuilder::new()
    }

    /// A controller that allows every action and every attribute.
    ///
    /// Intended for tests and development setups.
    pub fn permissive() -> Self {
        Self::builder()
            .authorize_collection(AllowAll)
            .authorize_document(AllowAll)
            .build()
    }

    /// A controller that forbids every action and hides every attribute.
    pub fn restrictive() -> Self {
        Self::builder()
            .read_filter(RestrictiveFilter)
            .write_filter(RestrictiveFilter)
            .build()
    }

    /// The collection authorizer.
    pub fn collection_authorizer(&self) -> &dyn CollectionAuthorizer<S> {
        &*self.collection
    }

    /// The document authorizer.
    pub fn document_authorizer(&self) -> &dyn DocumentAuthorizer<A, S> {
        &*self.document
    }

    /// The read filter.
    pub fn read_filter(&self) -> &dyn AttributeFilter<S> {
        &*self.read_filter
    }

    /// The write filter.
    pub fn write_filter(&self) -> &dyn AttributeFilter<S> {
        &*self.write_filter
    }

    /// Require the collection authorizer to allow `action`.
    ///
    /// An authorizer error is treated as a denial.
    pub async fn authorize_collection(&self, session: &S, action: &Action) -> Result<()> {
        match self.collection.authorize(session, action).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::forbidden(format!(
                "collection action '{action}' denied"
            ))),
            Err(err) => {
                log::warn!("Collection authorizer failed on '{action}', denying: {err}");
                Err(Error::forbidden(format!(
                    "collection action '{action}' denied"
                )))
            }
        }
    }

    /// Require the document authorizer to allow `action`.
    ///
    /// Pass `old_attributes = None` for a pre-load check. An authorizer error
    /// is treated as a denial.
    pub async fn authorize_document(
        &self,
        session: &S,
        action: &Action,
        new_attributes: Option<&A>,
        old_attributes: Option<&A>,
    ) -> Result<()> {
        match self
            .document
            .authorize(session, action, new_attributes, old_attributes)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::forbidden(format!(
                "document action '{action}' denied"
            ))),
            Err(err) => {
                log::warn!("Document authorizer failed on '{action}', denying: {err}");
                Err(Error::forbidden(format!(
                    "document action '{action}' denied"
                )))
            }
        }
    }

    /// Require every key of `attributes` to pass the write filter.
    pub fn assert_writable(&self, session: &S, attributes: &A) -> Result<()> {
        assert_all_attributes_allowed(session, attributes, &*self.write_filter)
    }

    /// Copy of `document` with only the attributes the read filter allows.
    pub fn filter_readable(&self, session: &S, document: &Document<A>) -> Document<A> {
        filter_readable_document(session, document, &*self.read_filter)
    }
}

impl<A: AttributeMap, S: Session> Clone for AccessController<A, S> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            document: Arc::clone(&self.document),
            read_filter: Arc::clone(&self.read_filter),
            write_filter: Arc::clone(&self.write_filter),
        }
    }
}

impl<A: AttributeMap, S: Session> Default for AccessController<A, S> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<A: AttributeMap, S: Session> fmt::Debug for AccessController<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessController").finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`AccessController`].
pub struct AccessControllerBuilder<A: AttributeMap, S: Session> {
    collection: Option<Arc<dyn CollectionAuthorizer<S>>>,
    document: Option<Arc<dyn DocumentAuthorizer<A, S>>>,
    read_filter: Option<Arc<dyn AttributeFilter<S>>>,
    write_filter: Option<Arc<dyn AttributeFilter<S>>>,
}

impl<A: AttributeMap, S: Session> AccessControllerBuilder<A, S> {
    /// Create a builder with every hook unset.
    pub fn new() -> Self {
        Self {
            collection: None,
            document: None,
            read_filter: None,
            write_filter: None,
        }
    }

    /// Set the collection authorizer.
    pub fn authorize_collection<C>(mut self, authorizer: C) -> Self
    where
        C: CollectionAuthorizer<S> + 'static,
    {
        self.collection = Some(Arc::new(authorizer));
        self
    }

    /// Set the collection authorizer from a synchronous closure.
    pub fn authorize_collection_with<F>(self, f: F) -> Self
    where
        F: Fn(&S, &Action) -> bool + Send + Sync + 'static,
    {
        self.authorize_collection(FnCollectionAuthorizer::new(f))
    }

    /// Set the document authorizer.
    pub fn authorize_document<D>(mut self, authorizer: D) -> Self
    where
        D: DocumentAuthorizer<A, S> + 'static,
    {
        self.document = Some(Arc::new(authorizer));
        self
    }

    /// Set the document authorizer from a synchronous closure.
    pub fn authorize_document_with<F>(self, f: F) -> Self
    where
        F: Fn(&S, &Action, Option<&A>, Option<&A>) -> bool + Send + Sync + 'static,
    {
        self.authorize_document(FnDocumentAuthorizer::new(f))
    }

    /// Set the read filter.
    pub fn read_filter<F>(mut self, filter: F) -> Self
    where
        F: AttributeFilter<S> + 'static,
    {
        self.read_filter = Some(Arc::new(filter));
        self
    }

    /// Set the read filter from a `(session, key) -> bool` closure.
    pub fn read_filter_with<F>(self, f: F) -> Self
    where
        F: Fn(&S, &str) -> bool + Send + Sync + 'static,
    {
        self.read_filter(FnFilter::new(f))
    }

    /// Set the write filter.
    pub fn write_filter<F>(mut self, filter: F) -> Self
    where
        F: AttributeFilter<S> + 'static,
    {
        self.write_filter = Some(Arc::new(filter));
        self
    }

    /// Set the write filter from a `(session, key) -> bool` closure.
    pub fn write_filter_with<F>(self, f: F) -> Self
    where
        F: Fn(&S, &str) -> bool + Send + Sync + 'static,
    {
        self.write_filter(FnFilter::new(f))
    }

    /// Resolve unset hooks to their defaults and build the controller.
    pub fn build(self) -> AccessController<A, S> {
        AccessController {
            collection: self.collection.unwrap_or_else(|| Arc::new(DenyAll)),
            document: self.document.unwrap_or_else(|| Arc::new(DenyAll)),
            read_filter: self.read_filter.unwrap_or_else(|| Arc::new(PermissiveFilter)),
            write_filter: self
                .write_filter
                .unwrap_or_else(|| Arc::new(PermissiveFilter)),
        }
    }
}

impl<A: AttributeMap, S: Session> Default for AccessControllerBuilder<A, S> {
    fn default() -> Self {
        Self::new()
    }
}
