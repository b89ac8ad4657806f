//! Match flow service: load, reduce, compare-and-set, retry.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session_store::{MatchSnapshot, SaveOutcome, SessionStore};
use crate::config::EngineConfig;
use crate::domain::{
    apply_intent, derive_match_transitions, IntentEnvelope, MatchState, MatchTransition, Player,
    PlayerId, PlayerView,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::ErrorCode;

/// Result of a committed intent.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub revision: u64,
    pub state: MatchState,
    pub transitions: Vec<MatchTransition>,
    /// Load-reduce-save rounds it took, 1 when uncontended.
    pub attempts: u32,
}

pub struct MatchFlowService<S: SessionStore> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: SessionStore> MatchFlowService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Opens a lobby for `roster` (first seat hosts). A missing seed is
    /// drawn from the OS.
    pub async fn create_match(
        &self,
        match_id: &str,
        roster: Vec<(PlayerId, String)>,
        seed: Option<u64>,
    ) -> Result<MatchSnapshot, AppError> {
        if roster.is_empty() {
            return Err(AppError::invalid(
                ErrorCode::InvalidPlayerCount,
                "A match needs at least one seat",
            ));
        }
        let seed = seed.unwrap_or_else(rand::random);
        let players = roster
            .into_iter()
            .map(|(id, name)| Player::seated(id, name))
            .collect();
        let state = MatchState::lobby(match_id, players, self.config.match_defaults, seed);
        let snapshot = self.store.create_match(state).await?;
        info!(match_id, "match created");
        Ok(snapshot)
    }

    /// Applies one intent with optimistic concurrency. On a stale save the
    /// intent is re-validated against the fresh state, so a raced vote
    /// comes back as a rejection instead of being applied twice.
    pub async fn submit(&self, envelope: IntentEnvelope) -> Result<SubmitOutcome, AppError> {
        let IntentEnvelope {
            match_id,
            player_id,
            intent,
        } = envelope;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let current = self.store.load_match(&match_id).await?;
            let next = match apply_intent(&current.state, &player_id, &intent) {
                Ok(next) => next,
                Err(err) => {
                    warn!(
                        match_id = %match_id,
                        player_id = %player_id,
                        intent = intent.name(),
                        error = %err,
                        "intent rejected"
                    );
                    return Err(err.into());
                }
            };

            match self
                .store
                .save_match(&match_id, next.clone(), current.revision)
                .await?
            {
                SaveOutcome::Saved { revision } => {
                    let transitions = derive_match_transitions(&current.state, &next);
                    for transition in &transitions {
                        info!(match_id = %match_id, revision, ?transition, "match transition");
                    }
                    return Ok(SubmitOutcome {
                        revision,
                        state: next,
                        transitions,
                        attempts,
                    });
                }
                SaveOutcome::Conflict { current: seen } => {
                    if attempts > self.config.max_save_retries {
                        warn!(match_id = %match_id, attempts, "giving up after repeated conflicts");
                        return Err(AppError::conflict(
                            ErrorCode::OptimisticLock,
                            format!(
                                "Match {match_id} kept changing underneath (last revision {seen})"
                            ),
                        ));
                    }
                    debug!(
                        match_id = %match_id,
                        expected = current.revision,
                        seen,
                        "revision moved, retrying"
                    );
                }
            }
        }
    }

    /// The match as `player_id` may see it.
    pub async fn view(&self, match_id: &str, player_id: &str) -> Result<PlayerView, AppError> {
        let snapshot = self.store.load_match(match_id).await?;
        if snapshot.state.player(player_id).is_none() {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("{player_id} is not seated in {match_id}"),
            )
            .into());
        }
        Ok(PlayerView::for_player(&snapshot.state, player_id))
    }
}
