//! Test support for unit tests.
