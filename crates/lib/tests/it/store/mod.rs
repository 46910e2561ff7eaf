//! Block store integration tests
//!
//! This module tests `MemoryStore` as a content-addressed block store and as
//! the link loader of traversals, including the link failure and revisit
//! policies.

mod memory_store_tests;
