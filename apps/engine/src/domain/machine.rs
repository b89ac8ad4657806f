//! The reducer: one intent in, one successor state out.

use tracing::{debug, error};

use super::intent::Intent;
use super::invariants::check_invariants;
use super::state::{MatchState, MatchStatus};
use super::{challenge, elimination, lobby, resolver};
use crate::errors::domain::{DomainError, ValidationKind};

/// Applies `intent` from `player_id` to a copy of `state`.
///
/// Rejections carry a [`ValidationKind`] and leave `state` untouched; the
/// caller keeps its last good state. A successor that breaks a structural
/// invariant is never returned.
pub fn apply_intent(
    state: &MatchState,
    player_id: &str,
    intent: &Intent,
) -> Result<MatchState, DomainError> {
    let next = reduce(state, player_id, intent)?;
    if let Err(err) = check_invariants(&next) {
        error!(
            match_id = %state.match_id,
            player_id,
            intent = intent.name(),
            error = %err,
            "reduction broke a match invariant"
        );
        return Err(err);
    }
    debug!(
        match_id = %state.match_id,
        player_id,
        intent = intent.name(),
        turn_state = next.turn_state.name(),
        "intent applied"
    );
    Ok(next)
}

/// Dispatch without the invariant pass or logging. Used for legality
/// probing.
pub(crate) fn reduce(
    state: &MatchState,
    player_id: &str,
    intent: &Intent,
) -> Result<MatchState, DomainError> {
    if state.player(player_id).is_none() {
        return Err(DomainError::validation(
            ValidationKind::NotAParticipant,
            format!("{player_id} is not seated in match {}", state.match_id),
        ));
    }
    if !intent.is_lifecycle() {
        match state.status {
            MatchStatus::Playing => {}
            MatchStatus::Lobby => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "Match has not started",
                ))
            }
            MatchStatus::Finished { .. } => {
                return Err(DomainError::validation(
                    ValidationKind::MatchFinished,
                    "Match is over",
                ))
            }
        }
    }

    let mut next = state.clone();
    match intent {
        Intent::DeclareAction { action, target_id } => {
            resolver::declare_action(&mut next, player_id, *action, target_id.clone())?
        }
        Intent::Pass => challenge::pass_action(&mut next, player_id)?,
        Intent::DeclareBlock { claimed_role } => {
            challenge::declare_block(&mut next, player_id, *claimed_role)?
        }
        Intent::Challenge => challenge::challenge(&mut next, player_id)?,
        Intent::RevealCard { card_index } => {
            challenge::reveal_card(&mut next, player_id, *card_index)?
        }
        Intent::Surrender => challenge::surrender(&mut next, player_id)?,
        Intent::PickLostCard { card_index } => {
            elimination::pick_lost_card(&mut next, player_id, *card_index)?
        }
        Intent::SelectExchangeKeep { indices } => {
            resolver::select_exchange_keep(&mut next, player_id, indices)?
        }
        Intent::StartMatch => lobby::start_match(&mut next, player_id)?,
        Intent::RestartMatch => lobby::restart_match(&mut next, player_id)?,
        Intent::ConfigureMatch { hand_size } => {
            lobby::configure_match(&mut next, player_id, *hand_size)?
        }
        Intent::LeaveMatch => lobby::leave_match(&mut next, player_id)?,
    }
    Ok(next)
}
