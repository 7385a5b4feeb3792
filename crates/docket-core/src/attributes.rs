//! Attribute maps.
//!
//! A document's payload is a mapping from attribute name to value. The
//! pipeline only needs to enumerate keys, drop keys, and overlay one map on
//! another, so any string-keyed map can serve as the attribute type.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Default attribute type: a JSON object.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// String-keyed attribute map the access-control pipeline can operate on.
pub trait AttributeMap: Clone + Send + Sync + 'static {
    /// Iterate over the attribute names.
    fn attribute_keys(&self) -> impl Iterator<Item = &str>;

    /// Keep only the attributes whose name satisfies `keep`.
    fn retain_attributes<F>(&mut self, keep: F)
    where
        F: FnMut(&str) -> bool;

    /// Overlay `other` on top of `self`; keys in `other` win.
    fn merge(&mut self, other: Self);

    /// Returns `true` if an attribute with this name is present.
    fn has_attribute(&self, key: &str) -> bool {
        self.attribute_keys().any(|k| k == key)
    }
}

impl AttributeMap for serde_json::Map<String, serde_json::Value> {
    fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().map(String::as_str)
    }

    fn retain_attributes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.retain(|k, _| keep(k));
    }

    fn merge(&mut self, other: Self) {
        self.extend(other);
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<V> AttributeMap for BTreeMap<String, V>
where
    V: Clone + Send + Sync + 'static,
{
    fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().map(String::as_str)
    }

    fn retain_attributes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.retain(|k, _| keep(k));
    }

    fn merge(&mut self, other: Self) {
        self.extend(other);
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<V, H> AttributeMap for HashMap<String, V, H>
where
    V: Clone + Send + Sync + 'static,
    H: BuildHasher + Clone + Send + Sync + 'static,
{
    fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().map(String::as_str)
    }

    fn retain_attributes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.retain(|k, _| keep(k));
    }

    fn merge(&mut self, other: Self) {
        self.extend(other);
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}
