use serde::{Deserialize, Serialize};

use super::actions::ActionKind;
use super::players::PlayerId;
use super::state::MatchId;
use super::Role;

/// Everything a client can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    DeclareAction {
        action: ActionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_id: Option<PlayerId>,
    },
    Pass,
    DeclareBlock {
        claimed_role: Role,
    },
    Challenge,
    RevealCard {
        card_index: usize,
    },
    Surrender,
    PickLostCard {
        card_index: usize,
    },
    SelectExchangeKeep {
        indices: Vec<usize>,
    },
    StartMatch,
    RestartMatch,
    ConfigureMatch {
        hand_size: u8,
    },
    LeaveMatch,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::DeclareAction { .. } => "declareAction",
            Intent::Pass => "pass",
            Intent::DeclareBlock { .. } => "declareBlock",
            Intent::Challenge => "challenge",
            Intent::RevealCard { .. } => "revealCard",
            Intent::Surrender => "surrender",
            Intent::PickLostCard { .. } => "pickLostCard",
            Intent::SelectExchangeKeep { .. } => "selectExchangeKeep",
            Intent::StartMatch => "startMatch",
            Intent::RestartMatch => "restartMatch",
            Intent::ConfigureMatch { .. } => "configureMatch",
            Intent::LeaveMatch => "leaveMatch",
        }
    }

    /// Lifecycle intents are accepted outside of `Playing`.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Intent::StartMatch
                | Intent::RestartMatch
                | Intent::ConfigureMatch { .. }
                | Intent::LeaveMatch
        )
    }
}

/// An intent addressed to a match by an authenticated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentEnvelope {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub intent: Intent,
}
