//! Docket umbrella crate.
//!
//! This crate re-exports all Docket components for convenience. Most
//! applications only need the [`prelude`].

pub use docket_acl as acl;
pub use docket_core as core;
pub use docket_query as query;
pub use docket_resource as resource;
pub use docket_storage as storage;

/// The types needed to define and use a resource.
pub mod prelude {
    pub use docket_acl::{
        AccessController, AllowList, AllowedAttributes, AttributeFilter, CollectionAuthorizer,
        DocumentAuthorizer, PolicyConfig, PolicySubject,
    };
    pub use docket_core::{Action, Attributes, Document, DocumentId, Error, Result, Session};
    pub use docket_query::ListQuery;
    pub use docket_resource::Resource;
    pub use docket_storage::{FileStore, MemoryStore, Store};
}
