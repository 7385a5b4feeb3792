//! Error types for Docket.
//!
//! Every stage of the access-control pipeline fails with one of these
//! variants. The calling layer (router, RPC handler, CLI) translates them
//! into a protocol response, usually via [`Error::status_code`].

/// Errors that can occur while operating on a Docket resource.
///
/// Marked `#[non_exhaustive]` to allow adding new error types without
/// breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A collection or document authorizer denied the action.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable reason
        message: String,
    },

    /// One or more submitted attributes failed the write filter.
    #[error("Unwritable attributes: {}", .keys.join(","))]
    UnwritableAttributes {
        /// Every disallowed key, in submission order
        keys: Vec<String>,
    },

    /// The target document does not exist.
    #[error("Document not found: {id}")]
    NotFound {
        /// ID that was looked up
        id: String,
    },

    /// Malformed input that never reached the pipeline (bad id, bad filter).
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was wrong with the input
        message: String,
    },

    /// A document with the given ID already exists.
    #[error("Document already exists: {id}")]
    Conflict {
        /// Conflicting ID
        id: String,
    },

    /// An authorizer could not reach a decision.
    #[error("Policy error: {message}")]
    Policy {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend failure.
    #[error("Store error: {message}")]
    Store {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O error (file-backed stores, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Docket operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new forbidden error.
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Error::Forbidden {
            message: message.into(),
        }
    }

    /// Creates an unwritable-attributes error from the offending keys.
    pub fn unwritable<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Error::UnwritableAttributes {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Creates a new bad-request error.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Error::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a new conflict error.
    pub fn conflict<S: Into<String>>(id: S) -> Self {
        Error::Conflict { id: id.into() }
    }

    /// Creates a new policy error.
    pub fn policy<S: Into<String>>(message: S) -> Self {
        Error::Policy {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new policy error with a source error.
    pub fn policy_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Policy {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new store error.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Error::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new store error with a source error.
    pub fn store_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status code a routing layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Forbidden { .. } | Error::UnwritableAttributes { .. } => 403,
            Error::NotFound { .. } => 404,
            Error::BadRequest { .. } => 400,
            Error::Conflict { .. } => 409,
            Error::Policy { .. }
            | Error::Store { .. }
            | Error::Io(_)
            | Error::Serialization(_) => 500,
        }
    }

    /// Whether the caller (rather than the server) is at fault.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns the disallowed keys of an [`Error::UnwritableAttributes`].
    pub fn unwritable_keys(&self) -> Option<&[String]> {
        match self {
            Error::UnwritableAttributes { keys } => Some(keys),
            _ => None,
        }
    }
}
