//! Orchestration: drives the pure reducer against a Session Store.

pub mod match_flow;
pub mod session_store;

pub use match_flow::{MatchFlowService, SubmitOutcome};
pub use session_store::{InMemorySessionStore, MatchSnapshot, SaveOutcome, SessionStore};
