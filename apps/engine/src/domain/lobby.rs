//! Match lifecycle: configure, start, restart and leave.

use tracing::info;

use super::challenge::{consensus_reached, settle_blocked};
use super::elimination::finish_if_over;
use super::players::Card;
use super::resolver::resolve_action;
use super::rules::HAND_SIZES;
use super::state::{require_player, LogTone, MatchState, MatchStatus, TurnState};
use super::turns::{advance_turn, living_seat_from};
use super::Role;
use crate::errors::domain::{DomainError, ValidationKind};

fn require_host(state: &MatchState, player_id: &str) -> Result<(), DomainError> {
    require_player(state, player_id)?;
    if state.host_id != player_id {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            "Only the host can do that",
        ));
    }
    Ok(())
}

fn require_lobby(state: &MatchState) -> Result<(), DomainError> {
    if state.status != MatchStatus::Lobby {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Match has already started",
        ));
    }
    Ok(())
}

/// Fresh deck, fresh hands, starting coins, first seat to act.
fn deal(state: &mut MatchState) -> Result<(), DomainError> {
    state.config.validate_for(state.players.len())?;
    state.deck.refill(state.config.copies_per_role);
    let hand_size = state.config.hand_size as usize;
    for player in state.players.iter_mut() {
        let roles = state.deck.draw_many(hand_size)?;
        player.coins = state.config.starting_coins;
        player.set_hand(roles.into_iter().map(Card::face_down).collect());
    }
    state.status = MatchStatus::Playing;
    state.turn_index = 0;
    state.turn_state = TurnState::Idle;
    state.pending = None;
    Ok(())
}

pub fn configure_match(
    state: &mut MatchState,
    player_id: &str,
    hand_size: u8,
) -> Result<(), DomainError> {
    require_host(state, player_id)?;
    require_lobby(state)?;
    if !HAND_SIZES.contains(&hand_size) {
        return Err(DomainError::validation(
            ValidationKind::InvalidHandSize,
            format!("Hand size must be in {HAND_SIZES:?}, got {hand_size}"),
        ));
    }
    state.config.hand_size = hand_size;
    state.push_log(LogTone::Info, format!("Hand size set to {hand_size}."));
    Ok(())
}

pub fn start_match(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    require_host(state, player_id)?;
    require_lobby(state)?;
    deal(state)?;
    info!(match_id = %state.match_id, players = state.players.len(), "match started");
    state.push_log(LogTone::Info, "The match begins.");
    let first = state.players[0].name.clone();
    state.push_log(LogTone::Neutral, format!("It is {first}'s turn."));
    Ok(())
}

pub fn restart_match(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    require_host(state, player_id)?;
    if state.status == MatchStatus::Lobby {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Match has not started yet",
        ));
    }
    deal(state)?;
    state.log.clear();
    info!(match_id = %state.match_id, players = state.players.len(), "match restarted");
    state.push_log(LogTone::Info, "The match restarts with fresh hands.");
    let first = state.players[0].name.clone();
    state.push_log(LogTone::Neutral, format!("It is {first}'s turn."));
    Ok(())
}

/// Anyone holding a stake in the decision currently on the table.
fn is_involved(state: &MatchState, player_id: &str) -> bool {
    if state.current_player().is_some_and(|p| p.id == player_id) {
        return true;
    }
    let in_pending = state.pending.as_ref().is_some_and(|p| {
        p.actor_id == player_id
            || p.target_id.as_deref() == Some(player_id)
            || p.blocker_id.as_deref() == Some(player_id)
    });
    let in_turn = match &state.turn_state {
        TurnState::ChallengeResolve { challenge } => {
            challenge.challenger_id == player_id || challenge.accused_id == player_id
        }
        TurnState::LoseCard { loser_id, .. } => loser_id == player_id,
        _ => false,
    };
    in_pending || in_turn
}

/// Removes `player_id` from the roster. Their cards (and an exchange
/// buffer they were holding) go back into the deck.
pub fn leave_match(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    let idx = state.index_of(player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotAParticipant,
            format!("{player_id} is not seated in match {}", state.match_id),
        )
    })?;
    let playing = state.is_playing();
    let involved = playing && is_involved(state, player_id);
    let was_current = idx == state.turn_index;

    let leaver = state.players.remove(idx);
    let mut returned: Vec<Role> = leaver.hand.iter().map(|c| c.role).collect();
    if involved {
        returned.extend(state.take_exchange_draw());
    }
    if !returned.is_empty() {
        state.deck.return_and_shuffle(returned);
    }
    if state.host_id == leaver.id {
        state.host_id = state
            .players
            .get(idx)
            .or_else(|| state.players.first())
            .map(|p| p.id.clone())
            .unwrap_or_default();
    }
    info!(match_id = %state.match_id, player_id, involved, "player left");
    state.push_log(LogTone::Warning, format!("{} left the match.", leaver.name));

    if !playing {
        if state.turn_index >= state.players.len() {
            state.turn_index = 0;
        }
        return Ok(());
    }

    let n = state.players.len();
    if idx < state.turn_index {
        state.turn_index -= 1;
    } else if was_current && n > 0 {
        state.turn_index = idx % n;
    }
    if let Some(pending) = state.pending.as_mut() {
        pending.votes.remove(player_id);
    }
    if finish_if_over(state) {
        return Ok(());
    }

    if involved {
        state.push_log(LogTone::Neutral, "The current turn is abandoned.");
        state.pending = None;
        state.turn_state = TurnState::Idle;
        if was_current {
            if let Some(seat) = living_seat_from(&state.players, state.turn_index) {
                state.turn_index = seat;
                let name = state.players[seat].name.clone();
                state.push_log(LogTone::Neutral, format!("It is {name}'s turn."));
            }
        } else {
            advance_turn(state);
        }
        return Ok(());
    }

    let (actor_id, blocker_id) = match state.pending.as_ref() {
        Some(p) => (p.actor_id.clone(), p.blocker_id.clone().unwrap_or_default()),
        None => return Ok(()),
    };
    match state.turn_state {
        TurnState::ActionPending if consensus_reached(state, &actor_id) => resolve_action(state),
        TurnState::BlockPending if consensus_reached(state, &blocker_id) => settle_blocked(state),
        _ => Ok(()),
    }
}
