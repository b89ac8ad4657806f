use super::players::PlayerId;
use super::state::{MatchState, MatchStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: cards were dealt (first start or restart from a
    /// finished match).
    MatchStarted,

    /// Edge-triggered: match moved to Finished.
    MatchFinished { winner: Option<PlayerId> },

    /// Edge-triggered: a player's last card was flipped.
    PlayerEliminated { player_id: PlayerId },

    /// Explicit: a player left the roster.
    PlayerLeft { player_id: PlayerId },
}

fn current_turn(state: &MatchState) -> Option<&PlayerId> {
    if state.is_playing() {
        state.current_player().map(|p| &p.id)
    } else {
        None
    }
}

/// Derive match transitions from a before/after pair of states.
pub fn derive_match_transitions(before: &MatchState, after: &MatchState) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    // 1. Roster shrink
    for player in &before.players {
        if after.player(&player.id).is_none() {
            transitions.push(MatchTransition::PlayerLeft {
                player_id: player.id.clone(),
            });
        }
    }

    // 2. Start (Lobby/Finished -> Playing)
    if !before.is_playing() && after.is_playing() {
        transitions.push(MatchTransition::MatchStarted);
    }

    // 3. Eliminations among players seated on both sides
    for player in &after.players {
        let was_alive = before.player(&player.id).is_some_and(|p| p.is_alive());
        if was_alive && !player.is_alive() && before.is_playing() {
            transitions.push(MatchTransition::PlayerEliminated {
                player_id: player.id.clone(),
            });
        }
    }

    // 4. Turn change
    if let Some(player_id) = current_turn(after) {
        if current_turn(before) != Some(player_id) {
            transitions.push(MatchTransition::TurnBecame {
                player_id: player_id.clone(),
            });
        }
    }

    // 5. Finish
    if let MatchStatus::Finished { winner } = &after.status {
        if !matches!(before.status, MatchStatus::Finished { .. }) {
            transitions.push(MatchTransition::MatchFinished {
                winner: winner.clone(),
            });
        }
    }

    transitions
}
