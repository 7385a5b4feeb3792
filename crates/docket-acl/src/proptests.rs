//! Property-based tests for attribute enforcement.
