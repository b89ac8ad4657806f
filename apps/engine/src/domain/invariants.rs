//! Structural checks every successor state must pass.

use super::state::{MatchState, MatchStatus, TurnState};
use crate::errors::domain::{DomainError, InfraErrorKind};

fn corrupt(detail: String) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

pub fn check_invariants(state: &MatchState) -> Result<(), DomainError> {
    if state.status == MatchStatus::Lobby {
        return Ok(());
    }

    for player in &state.players {
        let all_flipped = !player.hand.is_empty() && player.hand.iter().all(|c| c.flipped);
        if player.eliminated != all_flipped {
            return Err(corrupt(format!(
                "{} eliminated={} but all_flipped={all_flipped}",
                player.id, player.eliminated
            )));
        }
    }

    let in_play = state.deck.len() + state.cards_in_hands() + state.exchange_draw().len();
    if in_play != state.config.total_cards() {
        return Err(corrupt(format!(
            "card count drifted: {in_play} in play, {} expected",
            state.config.total_cards()
        )));
    }

    if !state.is_playing() {
        return Ok(());
    }

    let current = state
        .current_player()
        .ok_or_else(|| corrupt(format!("turn index {} out of range", state.turn_index)))?;
    if !current.is_alive() {
        return Err(corrupt(format!("{} holds the turn but is eliminated", current.id)));
    }

    match &state.turn_state {
        TurnState::Idle => {
            if state.pending.is_some() {
                return Err(corrupt("pending action left over in IDLE".into()));
            }
        }
        TurnState::ActionPending | TurnState::ExchangeSelect { .. } => {
            let pending = state
                .pending
                .as_ref()
                .ok_or_else(|| corrupt(format!("{} without pending action", state.turn_state.name())))?;
            if pending.actor_id != current.id {
                return Err(corrupt("pending actor is not the current player".into()));
            }
        }
        TurnState::BlockPending => {
            let blocked = state
                .pending
                .as_ref()
                .is_some_and(|p| p.blocker_id.is_some() && p.block_claim.is_some());
            if !blocked {
                return Err(corrupt("BLOCK_PENDING without a blocker".into()));
            }
        }
        TurnState::ChallengeResolve { challenge } => {
            let seated = |id: &str| state.player(id).is_some_and(|p| p.is_alive());
            if !seated(&challenge.accused_id) || !seated(&challenge.challenger_id) {
                return Err(corrupt("challenge parties must be living players".into()));
            }
        }
        TurnState::LoseCard { loser_id, .. } => {
            if !state.player(loser_id).is_some_and(|p| p.is_alive()) {
                return Err(corrupt(format!("{loser_id} owes a card but has none")));
            }
        }
    }
    Ok(())
}
