//! # docket-query
//!
//! Filter queries for Docket `list` operations.
//!
//! A [`ListQuery`] is parsed from a JSON filter object or from
//! query-string pairs and evaluated against document attributes by stores.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod filter;
pub mod query;

mod proptests;

pub use filter::{FilterExpression, FilterOp};
pub use query::ListQuery;
