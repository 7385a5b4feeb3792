//! Stored documents.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeMap, Attributes};
use crate::id::DocumentId;

/// A document as produced by a store: an ID plus its attributes.
///
/// Documents returned to callers are never mutated in place; filtering
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<A = Attributes> {
    /// Document identifier
    pub id: DocumentId,
    /// Attribute payload
    pub attributes: A,
}

impl<A> Document<A> {
    /// Creates a document from its parts.
    pub fn new(id: impl Into<DocumentId>, attributes: A) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Replaces the attributes, keeping the ID.
    pub fn with_attributes<B>(self, attributes: B) -> Document<B> {
        Document {
            id: self.id,
            attributes,
        }
    }
}

impl<A: AttributeMap> Document<A> {
    /// Returns a copy containing only the attributes accepted by `keep`.
    pub fn filtered<F>(&self, keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let mut attributes = self.attributes.clone();
        attributes.retain_attributes(keep);
        Self {
            id: self.id.clone(),
            attributes,
        }
    }
}
