//! # docket-storage
//!
//! Document persistence for Docket.
//!
//! This crate provides:
//! - The [`Store`] trait resources are built on
//! - [`MemoryStore`]: an in-process map
//! - [`FileStore`]: a JSON file, rewritten on every mutation
//! - [`testing::RecordingStore`]: a spy for tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod file;
pub mod memory;
pub mod store;
pub mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::Store;
