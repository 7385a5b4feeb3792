//! Declarative role-based policies.
//!
//! A [`PolicyConfig`] describes, per role, which actions are granted and
//! which attributes are readable or writable. It deserializes from the
//! `[policy]` section of a TOML config and compiles into an
//! [`AccessController`] over JSON attributes.
//!
//! ```toml
//! owner_attribute = "ownerId"
//!
//! [[roles]]
//! name = "editor"
//! collection_actions = ["create", "list"]
//! document_actions = ["read"]
//! owned_document_actions = ["replace", "patch", "destroy"]
//! readable = ["*"]
//! writable = ["title", "body", "ownerId"]
//! ```
//!
//! Owned actions are only granted when the stored `owner_attribute` equals
//! the session's subject; when attributes are being written, the new owner
//! must be the subject too, so ownership cannot be handed away. For
//! `create` there is nothing stored yet, and the submitted owner is checked
//! instead.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use docket_core::{Action, Attributes, Result, Session};
use serde::{Deserialize, Serialize};

use crate::authorizer::{CollectionAuthorizer, DocumentAuthorizer};
use crate::controller::AccessController;
use crate::filter::{AllowList, AllowedAttributes};

/// Wildcard matching every action or attribute.
pub const WILDCARD: &str = "*";

/// What a declarative policy needs to know about a session.
pub trait PolicySubject {
    /// Stable identifier of the authenticated principal, if any.
    fn subject(&self) -> Option<&str>;

    /// Role names held by the session.
    fn roles(&self) -> &[String];
}

/// Grants of a single role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePolicy {
    /// Role name matched against [`PolicySubject::roles`].
    pub name: String,
    /// Collection actions this role may perform.
    pub collection_actions: Vec<String>,
    /// Document actions this role may perform on any document.
    pub document_actions: Vec<String>,
    /// Document actions allowed only on documents the session owns.
    pub owned_document_actions: Vec<String>,
    /// Readable attributes (`"*"` for all).
    pub readable: Vec<String>,
    /// Writable attributes (`"*"` for all).
    pub writable: Vec<String>,
}

/// A complete declarative policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Attribute holding the owner's subject, for owned actions.
    pub owner_attribute: Option<String>,
    /// Role grants.
    pub roles: Vec<RolePolicy>,
}

impl PolicyConfig {
    /// Compile into an access controller.
    pub fn into_controller<S>(self) -> AccessController<Attributes, S>
    where
        S: Session + PolicySubject,
    {
        let policy = Arc::new(CompiledPolicy::from(self));
        let readable = Arc::clone(&policy);
        let writable = Arc::clone(&policy);

        AccessController::builder()
            .authorize_collection(Arc::clone(&policy))
            .authorize_document(policy)
            .read_filter(AllowList::new(move |s: &S| readable.readable_for(s)))
            .write_filter(AllowList::new(move |s: &S| writable.writable_for(s)))
            .build()
    }
}

// ============================================================================
// Compiled form
// ============================================================================

#[derive(Debug, Default)]
struct Grants {
    all: bool,
    names: BTreeSet<String>,
}

impl Grants {
    fn from_names(names: Vec<String>) -> Self {
        Self {
            all: names.iter().any(|n| n == WILDCARD),
            names: names.into_iter().filter(|n| n != WILDCARD).collect(),
        }
    }

    fn grants(&self, name: &str) -> bool {
        self.all || self.names.contains(name)
    }

    fn to_allowed(&self) -> AllowedAttributes {
        if self.all {
            AllowedAttributes::All
        } else {
            AllowedAttributes::Only(self.names.clone())
        }
    }
}

#[derive(Debug)]
struct CompiledRole {
    name: String,
    collection_actions: Grants,
    document_actions: Grants,
    owned_document_actions: Grants,
    readable: Grants,
    writable: Grants,
}

/// A [`PolicyConfig`] with grant lists turned into lookup sets.
#[derive(Debug)]
pub struct CompiledPolicy {
    owner_attribute: Option<String>,
    roles: Vec<CompiledRole>,
}

impl From<PolicyConfig> for CompiledPolicy {
    fn from(config: PolicyConfig) -> Self {
        let roles = config
            .roles
            .into_iter()
            .map(|role| CompiledRole {
                name: role.name,
                collection_actions: Grants::from_names(role.collection_actions),
                document_actions: Grants::from_names(role.document_actions),
                owned_document_actions: Grants::from_names(role.owned_document_actions),
                readable: Grants::from_names(role.readable),
                writable: Grants::from_names(role.writable),
            })
            .collect();
        Self {
            owner_attribute: config.owner_attribute,
            roles,
        }
    }
}

impl CompiledPolicy {
    fn roles_of<'a, S: PolicySubject>(
        &'a self,
        session: &'a S,
    ) -> impl Iterator<Item = &'a CompiledRole> + 'a {
        self.roles
            .iter()
            .filter(move |role| session.roles().iter().any(|r| *r == role.name))
    }

    /// Attributes the session may read, across all its roles.
    pub fn readable_for<S: PolicySubject>(&self, session: &S) -> AllowedAttributes {
        self.roles_of(session)
            .fold(AllowedAttributes::none(), |acc, role| {
                acc.union(role.readable.to_allowed())
            })
    }

    /// Attributes the session may write, across all its roles.
    pub fn writable_for<S: PolicySubject>(&self, session: &S) -> AllowedAttributes {
        self.roles_of(session)
            .fold(AllowedAttributes::none(), |acc, role| {
                acc.union(role.writable.to_allowed())
            })
    }

    fn owned_by(&self, attributes: &Attributes, subject: &str) -> bool {
        self.owner_attribute
            .as_deref()
            .and_then(|key| attributes.get(key))
            .and_then(|value| value.as_str())
            == Some(subject)
    }

    fn owns(
        &self,
        subject: Option<&str>,
        new_attributes: Option<&Attributes>,
        old_attributes: Option<&Attributes>,
    ) -> bool {
        let Some(subject) = subject else {
            return false;
        };
        match (new_attributes, old_attributes) {
            (None, None) => false,
            (Some(new), None) => self.owned_by(new, subject),
            (None, Some(old)) => self.owned_by(old, subject),
            (Some(new), Some(old)) => self.owned_by(old, subject) && self.owned_by(new, subject),
        }
    }
}

#[async_trait]
impl<S> CollectionAuthorizer<S> for CompiledPolicy
where
    S: Session + PolicySubject,
{
    async fn authorize(&self, session: &S, action: &Action) -> Result<bool> {
        Ok(self
            .roles_of(session)
            .any(|role| role.collection_actions.grants(action.as_str())))
    }
}

#[async_trait]
impl<S> DocumentAuthorizer<Attributes, S> for CompiledPolicy
where
    S: Session + PolicySubject,
{
    async fn authorize(
        &self,
        session: &S,
        action: &Action,
        new_attributes: Option<&Attributes>,
        old_attributes: Option<&Attributes>,
    ) -> Result<bool> {
        let name = action.as_str();
        let mut owned = false;
        for role in self.roles_of(session) {
            if role.document_actions.grants(name) {
                return Ok(true);
            }
            owned |= role.owned_document_actions.grants(name);
        }
        Ok(owned && self.owns(session.subject(), new_attributes, old_attributes))
    }
}
