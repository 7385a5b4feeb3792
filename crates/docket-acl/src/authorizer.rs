//! Collection and document authorizers.
//!
//! Authorizers are async so that a decision may involve one round trip to an
//! external policy service. Returning `Err` means no decision could be made;
//! the access controller treats that exactly like a denial.

use std::sync::Arc;

use async_trait::async_trait;
use docket_core::{Action, AttributeMap, Result, Session};

/// Decides whether a session may perform an action on a collection as a
/// whole (`create`, `list`, custom collection actions).
///
/// Called before any document is loaded or written.
#[async_trait]
pub trait CollectionAuthorizer<S: Session>: Send + Sync {
    /// Returns `Ok(true)` to allow the action.
    async fn authorize(&self, session: &S, action: &Action) -> Result<bool>;
}

/// Decides whether a session may perform an action on one document.
///
/// The same method serves two modes:
///
/// - **pre-load**: `old_attributes` is `None`; only the incoming payload (if
///   any) is known. Used by `create`.
/// - **post-load**: `old_attributes` holds the stored attributes, and
///   `new_attributes` the attributes that would be written, if any.
#[async_trait]
pub trait DocumentAuthorizer<A: AttributeMap, S: Session>: Send + Sync {
    /// Returns `Ok(true)` to allow the action.
    async fn authorize(
        &self,
        session: &S,
        action: &Action,
        new_attributes: Option<&A>,
        old_attributes: Option<&A>,
    ) -> Result<bool>;
}

#[async_trait]
impl<S: Session, T: CollectionAuthorizer<S> + ?Sized> CollectionAuthorizer<S> for Arc<T> {
    async fn authorize(&self, session: &S, action: &Action) -> Result<bool> {
        (**self).authorize(session, action).await
    }
}

#[async_trait]
impl<A, S, T> DocumentAuthorizer<A, S> for Arc<T>
where
    A: AttributeMap,
    S: Session,
    T: DocumentAuthorizer<A, S> + ?Sized,
{
    async fn authorize(
        &self,
        session: &S,
        action: &Action,
        new_attributes: Option<&A>,
        old_attributes: Option<&A>,
    ) -> Result<bool> {
        (**self)
            .authorize(session, action, new_attributes, old_attributes)
            .await
    }
}

// ============================================================================
// Canonical authorizers
// ============================================================================

/// Authorizer that allows every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

/// Authorizer that denies every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

#[async_trait]
impl<S: Session> CollectionAuthorizer<S> for AllowAll {
    async fn authorize(&self, _session: &S, _action: &Action) -> Result<bool> {
        Ok(true)
    }
}

#[async_trait]
impl<A: AttributeMap, S: Session> DocumentAuthorizer<A, S> for AllowAll {
    async fn authorize(
        &self,
        _session: &S,
        _action: &Action,
        _new_attributes: Option<&A>,
        _old_attributes: Option<&A>,
    ) -> Result<bool> {
        Ok(true)
    }
}

#[async_trait]
impl<S: Session> CollectionAuthorizer<S> for DenyAll {
    async fn authorize(&self, _session: &S, _action: &Action) -> Result<bool> {
        Ok(false)
    }
}

#[async_trait]
impl<A: AttributeMap, S: Session> DocumentAuthorizer<A, S> for DenyAll {
    async fn authorize(
        &self,
        _session: &S,
        _action: &Action,
        _new_attributes: Option<&A>,
        _old_attributes: Option<&A>,
    ) -> Result<bool> {
        Ok(false)
    }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Adapts a synchronous `(session, action) -> bool` closure.
pub struct FnCollectionAuthorizer<F>(F);

impl<F> FnCollectionAuthorizer<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<S, F> CollectionAuthorizer<S> for FnCollectionAuthorizer<F>
where
    S: Session,
    F: Fn(&S, &Action) -> bool + Send + Sync,
{
    async fn authorize(&self, session: &S, action: &Action) -> Result<bool> {
        Ok((self.0)(session, action))
    }
}

/// Adapts a synchronous `(session, action, new, old) -> bool` closure.
pub struct FnDocumentAuthorizer<F>(F);

impl<F> FnDocumentAuthorizer<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<A, S, F> DocumentAuthorizer<A, S> for FnDocumentAuthorizer<F>
where
    A: AttributeMap,
    S: Session,
    F: Fn(&S, &Action, Option<&A>, Option<&A>) -> bool + Send + Sync,
{
    async fn authorize(
        &self,
        session: &S,
        action: &Action,
        new_attributes: Option<&A>,
        old_attributes: Option<&A>,
    ) -> Result<bool> {
        Ok((self.0)(session, action, new_attributes, old_attributes))
    }
}
