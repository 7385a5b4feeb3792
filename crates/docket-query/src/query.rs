//! List queries.

use docket_core::{Attributes, Document, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::{FilterExpression, FilterOp};

/// Conjunction of filter expressions applied by `list`.
///
/// An empty query matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListQuery {
    filters: Vec<FilterExpression>,
}

impl ListQuery {
    /// A query matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn with(mut self, expression: FilterExpression) -> Self {
        self.filters.push(expression);
        self
    }

    /// The conditions, in parse order.
    pub fn filters(&self) -> &[FilterExpression] {
        &self.filters
    }

    /// Returns `true` if there are no conditions.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Parse a JSON filter object.
    ///
    /// - `{"k": "v"}` means `k eq v`
    /// - `{"k": {"op": v}}` means `k op v`
    /// - `{"k": {"op": [v1, v2]}}` adds one condition per element
    ///
    /// A value that is not an object yields the empty query.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Ok(Self::new());
        };

        let mut query = Self::new();
        for (key, conditions) in entries {
            match conditions {
                Value::Object(ops) => {
                    for (op, operand) in ops {
                        let op: FilterOp = op.parse()?;
                        match operand {
                            Value::Array(values) => {
                                for v in values {
                                    query.filters.push(FilterExpression::new(key, op, v.clone()));
                                }
                            }
                            v => query.filters.push(FilterExpression::new(key, op, v.clone())),
                        }
                    }
                }
                Value::Array(_) | Value::Null => {
                    return Err(Error::bad_request(format!(
                        "invalid filter for '{key}'"
                    )));
                }
                v => query.filters.push(FilterExpression::new(key, FilterOp::Eq, v.clone())),
            }
        }
        log::trace!("parsed list query with {} condition(s)", query.filters.len());
        Ok(query)
    }

    /// Parse query-string style pairs: `("title", "x")` or `("count[gt]", "3")`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (raw_key, value) in pairs {
            let raw_key = raw_key.as_ref();
            let (key, op) = match raw_key.split_once('[') {
                Some((key, rest)) => {
                    let op = rest.strip_suffix(']').ok_or_else(|| {
                        Error::bad_request(format!("malformed filter key '{raw_key}'"))
                    })?;
                    (key, op.parse()?)
                }
                None => (raw_key, FilterOp::Eq),
            };
            if key.is_empty() {
                return Err(Error::bad_request("empty filter key"));
            }
            query
                .filters
                .push(FilterExpression::new(key, op, Value::String(value.into())));
        }
        Ok(query)
    }

    /// Returns `true` if every condition holds.
    pub fn matches(&self, attributes: &Attributes) -> bool {
        self.filters.iter().all(|f| f.matches(attributes))
    }

    /// [`matches`](Self::matches) on a document.
    pub fn matches_document(&self, document: &Document) -> bool {
        self.matches(&document.attributes)
    }
}
