//! Attribute filters.
//!
//! An [`AttributeFilter`] decides, per attribute key, whether a session may
//! see (read filter) or set (write filter) that attribute. The same shape
//! serves both roles; the access controller holds one of each.

use std::collections::BTreeSet;
use std::sync::Arc;

use docket_core::Session;

/// Per-attribute access predicate.
///
/// Filters are pure and synchronous. They receive no document context;
/// document-dependent decisions belong in a
/// [`DocumentAuthorizer`](crate::DocumentAuthorizer).
pub trait AttributeFilter<S: Session>: Send + Sync {
    /// Returns `true` if `session` may access the attribute named `key`.
    fn allows(&self, session: &S, key: &str) -> bool;
}

impl<S: Session, T: AttributeFilter<S> + ?Sized> AttributeFilter<S> for Arc<T> {
    fn allows(&self, session: &S, key: &str) -> bool {
        (**self).allows(session, key)
    }
}

/// Filter that allows every attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveFilter;

impl<S: Session> AttributeFilter<S> for PermissiveFilter {
    fn allows(&self, _session: &S, _key: &str) -> bool {
        true
    }
}

/// Filter that allows no attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictiveFilter;

impl<S: Session> AttributeFilter<S> for RestrictiveFilter {
    fn allows(&self, _session: &S, _key: &str) -> bool {
        false
    }
}

/// Adapts a plain closure `(session, key) -> bool` into a filter.
pub struct FnFilter<F>(F);

impl<F> FnFilter<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<S, F> AttributeFilter<S> for FnFilter<F>
where
    S: Session,
    F: Fn(&S, &str) -> bool + Send + Sync,
{
    fn allows(&self, session: &S, key: &str) -> bool {
        (self.0)(session, key)
    }
}

// ============================================================================
// Allow-lists
// ============================================================================

/// The set of attributes a session may access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedAttributes {
    /// Every attribute
    All,
    /// Only the named attributes (possibly none)
    Only(BTreeSet<String>),
}

impl AllowedAttributes {
    /// No attributes at all.
    pub fn none() -> Self {
        AllowedAttributes::Only(BTreeSet::new())
    }

    /// Only the given attribute names.
    pub fn only<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        AllowedAttributes::Only(keys.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if `key` is in the set.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            AllowedAttributes::All => true,
            AllowedAttributes::Only(keys) => keys.contains(key),
        }
    }

    /// Combine two sets; the result allows anything either allows.
    pub fn union(self, other: Self) -> Self {
        match (self, other) {
            (AllowedAttributes::All, _) | (_, AllowedAttributes::All) => AllowedAttributes::All,
            (AllowedAttributes::Only(mut a), AllowedAttributes::Only(b)) => {
                a.extend(b);
                AllowedAttributes::Only(a)
            }
        }
    }
}

/// Filter backed by a per-session allow-list.
///
/// The closure computes the session's [`AllowedAttributes`]; a key passes
/// when it is in that set.
pub struct AllowList<F>(F);

impl<F> AllowList<F> {
    /// Wrap a `session -> AllowedAttributes` closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<S, F> AttributeFilter<S> for AllowList<F>
where
    S: Session,
    F: Fn(&S) -> AllowedAttributes + Send + Sync,
{
    fn allows(&self, session: &S, key: &str) -> bool {
        (self.0)(session).contains(key)
    }
}
