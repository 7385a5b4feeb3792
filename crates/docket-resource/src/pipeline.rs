//! Operation plans.
//!
//! Each [`Operation`] runs a fixed sequence of [`Stage`]s. A failing stage
//! aborts the operation, so nothing after it (in particular the store
//! write) happens.

use std::fmt;

use docket_core::Action;

/// A resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a new document
    Create,
    /// Fetch one document
    Read,
    /// Overwrite a document
    Replace,
    /// Merge into a document
    Patch,
    /// Remove a document
    Destroy,
    /// Fetch matching documents
    List,
}

/// One step of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Collection authorizer
    AuthorizeCollection,
    /// Write filter over the submitted attributes
    CheckWritable,
    /// Store read of the target document
    Load,
    /// Write filter over the stored attributes
    CheckExistingWritable,
    /// Stored attributes overlaid with the submitted ones
    Merge,
    /// Document authorizer
    AuthorizeDocument,
    /// Store mutation
    Write,
    /// Store query
    Query,
    /// Read filter over the result
    FilterReadable,
}

impl Operation {
    /// The stages this operation runs, in order.
    pub fn stages(&self) -> &'static [Stage] {
        use Stage::*;
        match self {
            Operation::Create => &[
                AuthorizeCollection,
                CheckWritable,
                AuthorizeDocument,
                Write,
                FilterReadable,
            ],
            Operation::Read => &[Load, AuthorizeDocument, FilterReadable],
            Operation::Replace => &[
                CheckWritable,
                Load,
                CheckExistingWritable,
                AuthorizeDocument,
                Write,
                FilterReadable,
            ],
            Operation::Patch => &[
                CheckWritable,
                Load,
                Merge,
                AuthorizeDocument,
                Write,
                FilterReadable,
            ],
            Operation::Destroy => &[Load, AuthorizeDocument, Write],
            Operation::List => &[AuthorizeCollection, Query, FilterReadable],
        }
    }

    /// The action name authorizers see.
    pub fn action(&self) -> Action {
        match self {
            Operation::Create => Action::Create,
            Operation::Read => Action::Read,
            Operation::Replace => Action::Replace,
            Operation::Patch => Action::Patch,
            Operation::Destroy => Action::Destroy,
            Operation::List => Action::List,
        }
    }

    /// Returns `true` if the operation may change the store.
    pub fn is_mutation(&self) -> bool {
        self.stages().contains(&Stage::Write)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.action(), f)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AuthorizeCollection => "authorize-collection",
            Stage::CheckWritable => "check-writable",
            Stage::Load => "load",
            Stage::CheckExistingWritable => "check-existing-writable",
            Stage::Merge => "merge",
            Stage::AuthorizeDocument => "authorize-document",
            Stage::Write => "write",
            Stage::Query => "query",
            Stage::FilterReadable => "filter-readable",
        };
        f.write_str(name)
    }
}
