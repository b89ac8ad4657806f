//! What one client is allowed to see.

use serde::Serialize;

use super::intent::Intent;
use super::legal::legal_intents;
use super::players::PlayerId;
use super::rules::MatchConfig;
use super::state::{LogEntry, MatchId, MatchState, MatchStatus, PendingAction, TurnState};
use super::Role;

/// A card as seen by the viewer. `role` is `None` for an opponent's
/// face-down card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCard {
    pub role: Option<Role>,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub coins: u32,
    pub cards: Vec<VisibleCard>,
    pub eliminated: bool,
    pub is_host: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub match_id: MatchId,
    pub viewer_id: PlayerId,
    pub status: MatchStatus,
    pub config: MatchConfig,
    pub seats: Vec<SeatView>,
    pub turn_player_id: Option<PlayerId>,
    pub turn_state: TurnState,
    pub pending: Option<PendingAction>,
    pub deck_count: usize,
    pub log: Vec<LogEntry>,
    pub legal_intents: Vec<Intent>,
}

impl PlayerView {
    pub fn for_player(state: &MatchState, viewer_id: &str) -> Self {
        let seats = state
            .players
            .iter()
            .map(|p| {
                let own = p.id == viewer_id;
                SeatView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    coins: p.coins,
                    cards: p
                        .hand
                        .iter()
                        .map(|c| VisibleCard {
                            role: (own || c.flipped).then_some(c.role),
                            flipped: c.flipped,
                        })
                        .collect(),
                    eliminated: p.eliminated,
                    is_host: p.id == state.host_id,
                }
            })
            .collect();

        let actor = state.pending.as_ref().map(|p| p.actor_id.as_str());
        let turn_state = match &state.turn_state {
            TurnState::ExchangeSelect { .. } if actor != Some(viewer_id) => {
                TurnState::ExchangeSelect { drawn: Vec::new() }
            }
            other => other.clone(),
        };

        Self {
            match_id: state.match_id.clone(),
            viewer_id: viewer_id.to_string(),
            status: state.status.clone(),
            config: state.config,
            seats,
            turn_player_id: state
                .is_playing()
                .then(|| state.current_player().map(|p| p.id.clone()))
                .flatten(),
            turn_state,
            pending: state.pending.clone(),
            deck_count: state.deck.len(),
            log: state.log.clone(),
            legal_intents: legal_intents(state, viewer_id),
        }
    }
}
