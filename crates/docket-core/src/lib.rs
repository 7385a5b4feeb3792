//! Docket Core: shared types, identifiers, and errors.
//!
//! This crate provides the foundational types used across all Docket crates.
//! It has no internal Docket dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`action`]: Named actions handed to authorizers
//! - [`attributes`]: The attribute-map abstraction documents carry
//! - [`document`]: Stored documents
//! - [`error`]: Error types and Result alias
//! - [`id`]: Document identifiers and UUID validation
//! - [`session`]: The bound every opaque session type satisfies

pub mod action;
pub mod attributes;
pub mod document;
pub mod error;
pub mod id;
pub mod session;

mod proptests;

// Re-export key types at crate root for convenience
pub use action::Action;
pub use attributes::{AttributeMap, Attributes};
pub use document::Document;
pub use error::{Error, Result};
pub use id::{DocumentId, UuidVersion, is_uuid_string};
pub use session::Session;
