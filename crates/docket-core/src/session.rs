//! Opaque sessions.
//!
//! Docket never looks inside a session. Whatever the authentication layer
//! produces is handed by reference to the authorizers and filters, which are
//! the only code that interprets it.

/// Bound for session types passed through the pipeline.
///
/// Blanket-implemented for every `Send + Sync + 'static` type.
pub trait Session: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Session for T {}
