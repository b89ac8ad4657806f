//! Card loss, elimination and the win check.

use tracing::{error, info};

use super::players::{Player, PlayerId};
use super::resolver;
use super::state::{phase_mismatch, LogTone, LoseReason, MatchState, MatchStatus, TurnState};
use super::turns;
use crate::errors::domain::{DomainError, ValidationKind};

/// True once at most one player is still standing.
pub fn check_game_over(players: &[Player]) -> bool {
    players.iter().filter(|p| p.is_alive()).count() <= 1
}

/// Moves the match to `Finished` if the win condition holds. Returns true
/// when the match ended on this call.
pub fn finish_if_over(state: &mut MatchState) -> bool {
    if !state.is_playing() || !check_game_over(&state.players) {
        return false;
    }
    let winner: Option<PlayerId> = state.living().next().map(|p| p.id.clone());
    match &winner {
        Some(id) => {
            let name = state.name_of(id);
            info!(match_id = %state.match_id, winner = %id, "match finished");
            state.push_log(LogTone::Success, format!("{name} wins the match!"));
        }
        None if state.players.is_empty() => {
            info!(match_id = %state.match_id, "match finished with an empty table");
            state.push_log(LogTone::Warning, "Everyone left. The match is over.");
        }
        None => {
            error!(
                match_id = %state.match_id,
                players = state.players.len(),
                "no living players at game over"
            );
            state.push_log(LogTone::Danger, "No one is left standing.");
        }
    }
    let drawn = state.take_exchange_draw();
    if !drawn.is_empty() {
        state.deck.return_and_shuffle(drawn);
    }
    state.status = MatchStatus::Finished { winner };
    state.pending = None;
    state.turn_state = TurnState::Idle;
    true
}

/// Parks the match until `loser_id` flips a card.
pub fn demand_card(state: &mut MatchState, loser_id: PlayerId, reason: LoseReason) {
    let name = state.name_of(&loser_id);
    state.push_log(
        LogTone::Warning,
        format!("{name} must lose a card ({}).", reason.as_str()),
    );
    state.turn_state = TurnState::LoseCard { loser_id, reason };
}

/// `LOSE_CARD` handler: flip, check for a winner, then either fire the
/// owed deferred effect or close the turn.
pub fn pick_lost_card(
    state: &mut MatchState,
    player_id: &str,
    card_index: usize,
) -> Result<(), DomainError> {
    let TurnState::LoseCard { loser_id, .. } = &state.turn_state else {
        return Err(phase_mismatch(state, "LOSE_CARD"));
    };
    if loser_id != player_id {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{player_id} is not the player losing a card"),
        ));
    }
    let loser = state.player_mut(player_id).ok_or_else(|| {
        DomainError::validation(ValidationKind::NotAParticipant, player_id.to_string())
    })?;
    let role = loser.live_card(card_index)?.role;
    let eliminated = loser.flip(card_index)?;
    let name = loser.name.clone();

    state.push_log(LogTone::Danger, format!("{name} reveals and loses {role}."));
    if eliminated {
        info!(match_id = %state.match_id, player_id, "player eliminated");
        state.push_log(LogTone::Danger, format!("{name} is out of the match."));
    }
    if finish_if_over(state) {
        return Ok(());
    }

    let deferred = state
        .pending
        .as_ref()
        .is_some_and(|p| p.deferred_effect_pending);
    if deferred {
        resolver::fire_deferred_effect(state)
    } else {
        turns::end_turn(state);
        Ok(())
    }
}
