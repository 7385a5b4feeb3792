//! Property-based tests for list queries.
