//! # docket-resource
//!
//! A [`Resource`] binds one document store to one access controller and
//! exposes `create`, `read`, `replace`, `patch`, `destroy` and `list` with
//! every check run in a fixed order before the store is touched.
//!
//! ```
//! use docket_acl::AccessController;
//! use docket_core::Attributes;
//! use docket_query::ListQuery;
//! use docket_resource::Resource;
//! use docket_storage::MemoryStore;
//!
//! # tokio_test::block_on(async {
//! let notes: Resource = Resource::new("notes", MemoryStore::new(), AccessController::permissive());
//!
//! let mut attributes = Attributes::new();
//! attributes.insert("title".into(), "hello".into());
//! let created = notes.create(&(), attributes).await?;
//!
//! assert_eq!(notes.list(&(), &ListQuery::new()).await?.len(), 1);
//! notes.destroy(&(), &created.id).await?;
//! # Ok::<(), docket_core::Error>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod pipeline;
pub mod resource;

pub use pipeline::{Operation, Stage};
pub use resource::Resource;
