//! Unit tests for event notification.
