//! Repository unit tests
