//! Named actions passed to authorizers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action a session attempts against a collection or a document.
///
/// The built-in CRUD actions have fixed names; anything else is carried as
/// [`Action::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Create a document in a collection
    Create,
    /// Read a single document
    Read,
    /// Overwrite a document
    Replace,
    /// Partially update a document
    Patch,
    /// Delete a document
    Destroy,
    /// List a collection
    List,
    /// Application-defined action
    Custom(String),
}

impl Action {
    /// Parses an action name. Unknown names become [`Action::Custom`].
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_core::Action;
    ///
    /// assert_eq!(Action::parse("patch"), Action::Patch);
    /// assert_eq!(Action::parse("publish"), Action::Custom("publish".into()));
    /// ```
    pub fn parse(name: &str) -> Self {
        match name {
            "create" => Action::Create,
            "read" => Action::Read,
            "replace" => Action::Replace,
            "patch" => Action::Patch,
            "destroy" => Action::Destroy,
            "list" => Action::List,
            other => Action::Custom(other.to_string()),
        }
    }

    /// The name handed to authorizers.
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Replace => "replace",
            Action::Patch => "patch",
            Action::Destroy => "destroy",
            Action::List => "list",
            Action::Custom(name) => name,
        }
    }

    /// Returns `true` for actions scoped to a collection rather than a
    /// single document.
    pub fn is_collection_action(&self) -> bool {
        matches!(self, Action::Create | Action::List)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::parse(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action::parse(&name)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}
