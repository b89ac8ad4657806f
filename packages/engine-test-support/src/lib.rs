//! Engine test support utilities
//!
//! Shared by the engine's unit tests, its integration tests and the
//! simulator's tests: one logging bootstrap and a few roster fixtures.

pub mod fixtures;
pub mod logging;
