//! The session a command runs as.

use docket_acl::PolicySubject;

/// Identity taken from `--user` and `--role`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliSession {
    /// Acting user, if any.
    pub user: Option<String>,
    /// Roles held.
    pub roles: Vec<String>,
}

impl CliSession {
    /// Session for `user` holding `roles`. Blank role names are dropped.
    pub fn new(user: Option<String>, roles: Vec<String>) -> Self {
        let roles = roles
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        Self { user, roles }
    }
}

impl PolicySubject for CliSession {
    fn subject(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}
