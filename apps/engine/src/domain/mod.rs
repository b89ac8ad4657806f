//! Domain layer: the pure rules engine.

pub mod actions;
pub mod challenge;
pub mod deck;
pub mod elimination;
pub mod intent;
pub mod invariants;
pub mod legal;
pub mod lobby;
pub mod machine;
pub mod player_view;
pub mod players;
pub mod resolver;
pub mod roles;
pub mod rules;
pub mod seed_derivation;
pub mod state;
pub mod turns;

pub mod game_transition;
#[cfg(test)]
pub(crate) mod test_state_helpers;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_invariants;
#[cfg(test)]
mod tests_scenarios;

// Re-exports for ergonomics
pub use actions::{ActionKind, ActionSpec, CostTiming};
pub use deck::Deck;
pub use game_transition::{derive_match_transitions, MatchTransition};
pub use intent::{Intent, IntentEnvelope};
pub use invariants::check_invariants;
pub use legal::legal_intents;
pub use machine::apply_intent;
pub use player_view::PlayerView;
pub use players::{Card, Player, PlayerId};
pub use roles::Role;
pub use rules::MatchConfig;
pub use state::{
    ChallengeContext, LogEntry, LogTone, LoseReason, MatchId, MatchState, MatchStatus,
    PendingAction, TurnState,
};
