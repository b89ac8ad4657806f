//! Authoritative rules engine for a hidden-role bluffing card game.
//!
//! [`domain`] is a pure reducer over [`domain::MatchState`];
//! [`services`] runs it against a Session Store with optimistic
//! concurrency.

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::{apply_intent, Intent, IntentEnvelope, MatchState, PlayerView};
pub use error::AppError;
pub use services::{InMemorySessionStore, MatchFlowService, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
