//! Test utilities
//!
//! In-memory store implementations and test fixtures for unit testing.
//!
//! The in-memory stores are `Clone` and share their state, so a test can keep
//! a handle to inspect rows after handing a copy to a service.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
