//! Enforcement helpers: turn policy decisions into errors or filtered data.

use docket_core::{AttributeMap, Document, Error, Result, Session};

use crate::filter::AttributeFilter;

/// Fails with [`Error::Forbidden`] unless `allowed` is true.
pub fn assert_access(allowed: bool, message: impl Into<String>) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(Error::forbidden(message))
    }
}

/// Fails if any attribute key is rejected by `filter`.
///
/// The error names every rejected key, not just the first, so the caller
/// sees the complete list in one round trip.
pub fn assert_all_attributes_allowed<S, A, F>(session: &S, attributes: &A, filter: &F) -> Result<()>
where
    S: Session,
    A: AttributeMap,
    F: AttributeFilter<S> + ?Sized,
{
    let disallowed: Vec<&str> = attributes
        .attribute_keys()
        .filter(|key| !filter.allows(session, key))
        .collect();

    if disallowed.is_empty() {
        Ok(())
    } else {
        Err(Error::unwritable(disallowed))
    }
}

/// Returns a copy of `attributes` holding only the keys `filter` allows.
///
/// Values are carried over unchanged; the input is never modified.
pub fn filter_readable_attributes<S, A, F>(session: &S, attributes: &A, filter: &F) -> A
where
    S: Session,
    A: AttributeMap,
    F: AttributeFilter<S> + ?Sized,
{
    let mut readable = attributes.clone();
    readable.retain_attributes(|key| filter.allows(session, key));
    readable
}

/// [`filter_readable_attributes`] applied to a whole document.
pub fn filter_readable_document<S, A, F>(session: &S, document: &Document<A>, filter: &F) -> Document<A>
where
    S: Session,
    A: AttributeMap,
    F: AttributeFilter<S> + ?Sized,
{
    document.filtered(|key| filter.allows(session, key))
}
