//! Filter expressions and attribute matching.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use docket_core::{Attributes, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operator of a [`FilterExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Substring of a string, or member of an array
    Contains,
}

impl FilterOp {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Contains => "contains",
        }
    }
}

impl FromStr for FilterOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "ne" => Ok(FilterOp::Ne),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "contains" => Ok(FilterOp::Contains),
            other => Err(Error::bad_request(format!(
                "unknown filter operator '{other}'"
            ))),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `key op value` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpression {
    /// Attribute name.
    pub key: String,
    /// Operator.
    pub op: FilterOp,
    /// Operand.
    pub value: Value,
}

impl FilterExpression {
    /// Build an expression.
    pub fn new(key: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluate against a document's attributes.
    ///
    /// A missing attribute only satisfies `ne`.
    pub fn matches(&self, attributes: &Attributes) -> bool {
        let Some(actual) = attributes.get(&self.key) else {
            return self.op == FilterOp::Ne;
        };
        match self.op {
            FilterOp::Eq => compare(actual, &self.value) == Some(Ordering::Equal),
            FilterOp::Ne => compare(actual, &self.value) != Some(Ordering::Equal),
            FilterOp::Lt => compare(actual, &self.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Contains => contains(actual, &self.value),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.op, self.value)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Orders a stored value against an operand.
///
/// Numbers compare numerically (a numeric string operand is coerced, since
/// query strings carry no types); strings compare lexically; anything else
/// only compares equal to an identical value.
fn compare(actual: &Value, operand: &Value) -> Option<Ordering> {
    match (actual, operand) {
        (Value::Number(_), _) | (_, Value::Number(_)) => {
            as_number(actual)?.partial_cmp(&as_number(operand)?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::String(b)) => b.parse::<bool>().ok().map(|b| a.cmp(&b)),
        (a, b) if a == b => Some(Ordering::Equal),
        _ => None,
    }
}

fn contains(actual: &Value, operand: &Value) -> bool {
    match (actual, operand) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), operand) => items
            .iter()
            .any(|item| compare(item, operand) == Some(Ordering::Equal)),
        _ => false,
    }
}
