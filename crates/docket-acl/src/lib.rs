//! # docket-acl
//!
//! Access control for Docket resources.
//!
//! This crate holds the policy half of the access pipeline:
//! - [`AttributeFilter`]: per-attribute read and write predicates
//! - [`CollectionAuthorizer`] and [`DocumentAuthorizer`]: action decisions
//! - [`AccessController`]: the four hooks bundled, with fail-closed defaults
//! - [`policy`]: declarative role policies loaded from TOML
//!
//! ```
//! use docket_acl::AccessController;
//! use docket_core::{Action, Attributes};
//!
//! struct User {
//!     admin: bool,
//! }
//!
//! let controller = AccessController::<Attributes, User>::builder()
//!     .authorize_collection_with(|user, action| user.admin || *action == Action::List)
//!     .read_filter_with(|user, key| user.admin || key != "secret")
//!     .build();
//! # let _ = controller;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod authorizer;
pub mod controller;
pub mod enforcement;
pub mod filter;
pub mod policy;

mod proptests;

pub use authorizer::{
    AllowAll, CollectionAuthorizer, DenyAll, DocumentAuthorizer, FnCollectionAuthorizer,
    FnDocumentAuthorizer,
};
pub use controller::{AccessController, AccessControllerBuilder};
pub use enforcement::{
    assert_access, assert_all_attributes_allowed, filter_readable_attributes,
    filter_readable_document,
};
pub use filter::{AllowList, AllowedAttributes, AttributeFilter, FnFilter, PermissiveFilter, RestrictiveFilter};
pub use policy::{PolicyConfig, PolicySubject, RolePolicy};
