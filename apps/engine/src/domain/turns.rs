//! Turn sequencing over the seat order.

use tracing::debug;

use super::players::Player;
use super::state::{LogTone, MatchState, TurnState};

/// Next living seat after `from`, wrapping. Scans each seat at most once,
/// so a lone survivor gets the turn back and an all-eliminated table
/// yields `None`.
pub fn next_turn_index(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| players[idx].is_alive())
}

/// First living seat at or after `from`.
pub fn living_seat_from(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    (0..n)
        .map(|step| (from + step) % n)
        .find(|&idx| players[idx].is_alive())
}

pub fn advance_turn(state: &mut MatchState) {
    if let Some(next) = next_turn_index(&state.players, state.turn_index) {
        state.turn_index = next;
        let name = state.players[next].name.clone();
        debug!(match_id = %state.match_id, turn_index = next, "turn advanced");
        state.push_log(LogTone::Neutral, format!("It is {name}'s turn."));
    }
}

/// Closes the current turn: drops the pending action and hands play to the
/// next living seat. No-op for turn order once the match is over.
pub fn end_turn(state: &mut MatchState) {
    state.pending = None;
    state.turn_state = TurnState::Idle;
    if state.is_playing() {
        advance_turn(state);
    }
}
