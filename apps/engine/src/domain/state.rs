use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::actions::ActionKind;
use super::deck::Deck;
use super::players::{Player, PlayerId};
use super::rules::MatchConfig;
use super::Role;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

pub type MatchId = String;

/// Overall match lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MatchStatus {
    /// Roster assembled, no cards dealt.
    Lobby,
    Playing,
    /// At most one player left standing. `winner` is `None` only if the
    /// last two lives vanished together, which correct sequencing prevents.
    Finished { winner: Option<PlayerId> },
}

/// Why a player is being asked to give up a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoseReason {
    Kill,
    Stab,
    Challenge,
}

impl LoseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoseReason::Kill => "kill",
            LoseReason::Stab => "stab",
            LoseReason::Challenge => "challenge",
        }
    }
}

/// An outstanding accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeContext {
    pub challenger_id: PlayerId,
    pub accused_id: PlayerId,
    /// The role the accused must show.
    pub claim: Role,
    /// True when the contested claim is the block, not the action.
    pub is_block_challenge: bool,
}

/// Turn-level state. Each variant carries only what that step needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum TurnState {
    /// Current player may declare an action.
    Idle,
    /// Declared action awaits passes, a block or a challenge.
    ActionPending,
    /// A block awaits acceptance or a challenge.
    BlockPending,
    /// Accused must reveal or surrender.
    ChallengeResolve { challenge: ChallengeContext },
    /// `loser_id` must flip a card.
    LoseCard {
        loser_id: PlayerId,
        reason: LoseReason,
    },
    /// Acting player picks which roles to keep; `drawn` is the
    /// temporary two-card buffer.
    ExchangeSelect { drawn: Vec<Role> },
}

impl TurnState {
    pub fn name(&self) -> &'static str {
        match self {
            TurnState::Idle => "IDLE",
            TurnState::ActionPending => "ACTION_PENDING",
            TurnState::BlockPending => "BLOCK_PENDING",
            TurnState::ChallengeResolve { .. } => "CHALLENGE_RESOLVE",
            TurnState::LoseCard { .. } => "LOSE_CARD",
            TurnState::ExchangeSelect { .. } => "EXCHANGE_SELECT",
        }
    }
}

/// The in-flight action under contest. Lives until the turn ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub action: ActionKind,
    pub actor_id: PlayerId,
    pub target_id: Option<PlayerId>,
    /// Players who passed on the action, or accepted the block.
    pub votes: BTreeSet<PlayerId>,
    pub blocker_id: Option<PlayerId>,
    pub block_claim: Option<Role>,
    /// Target card loss or exchange still owed once the current card loss
    /// resolves.
    pub deferred_effect_pending: bool,
}

impl PendingAction {
    pub fn new(action: ActionKind, actor_id: PlayerId, target_id: Option<PlayerId>) -> Self {
        Self {
            action,
            actor_id,
            target_id,
            votes: BTreeSet::new(),
            blocker_id: None,
            block_claim: None,
            deferred_effect_pending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogTone {
    Info,
    Neutral,
    Success,
    Warning,
    Danger,
}

/// Human-readable event line. Observational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub tone: LogTone,
}

/// Authoritative per-match state; the single input and output of the
/// reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub match_id: MatchId,
    pub host_id: PlayerId,
    pub config: MatchConfig,
    pub status: MatchStatus,
    /// Seat order is turn order.
    pub players: Vec<Player>,
    pub turn_index: usize,
    pub turn_state: TurnState,
    pub pending: Option<PendingAction>,
    pub deck: Deck,
    pub log: Vec<LogEntry>,
}

impl MatchState {
    /// A lobby for `roster` (first entry hosts). `seed` drives every
    /// shuffle in the match.
    pub fn lobby(
        match_id: impl Into<MatchId>,
        roster: Vec<Player>,
        config: MatchConfig,
        seed: u64,
    ) -> Self {
        let host_id = roster.first().map(|p| p.id.clone()).unwrap_or_default();
        Self {
            match_id: match_id.into(),
            host_id,
            config,
            status: MatchStatus::Lobby,
            players: roster,
            turn_index: 0,
            turn_state: TurnState::Idle,
            pending: None,
            deck: Deck::empty(seed),
            log: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == MatchStatus::Playing
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn_index)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    pub fn name_of(&self, id: &str) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn push_log(&mut self, tone: LogTone, text: impl Into<String>) {
        self.log.push(LogEntry {
            text: text.into(),
            tone,
        });
    }

    /// Cards held by every seat, flipped or not.
    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }

    /// The exchange buffer, when one is outstanding.
    pub fn exchange_draw(&self) -> &[Role] {
        match &self.turn_state {
            TurnState::ExchangeSelect { drawn } => drawn,
            _ => &[],
        }
    }

    /// Ends an outstanding exchange, if any, and hands back its buffer.
    pub fn take_exchange_draw(&mut self) -> Vec<Role> {
        match std::mem::replace(&mut self.turn_state, TurnState::Idle) {
            TurnState::ExchangeSelect { drawn } => drawn,
            other => {
                self.turn_state = other;
                Vec::new()
            }
        }
    }
}

pub fn require_player<'a>(state: &'a MatchState, id: &str) -> Result<&'a Player, DomainError> {
    state.player(id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotAParticipant,
            format!("{id} is not seated in match {}", state.match_id),
        )
    })
}

pub fn require_living<'a>(state: &'a MatchState, id: &str) -> Result<&'a Player, DomainError> {
    let player = require_player(state, id)?;
    if !player.is_alive() {
        return Err(DomainError::validation(
            ValidationKind::PlayerEliminated,
            format!("{} is eliminated", player.name),
        ));
    }
    Ok(player)
}

pub fn require_pending<'a>(
    state: &'a MatchState,
    ctx: &'static str,
) -> Result<&'a PendingAction, DomainError> {
    state.pending.as_ref().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("pending action must be set ({ctx})"),
        )
    })
}

pub fn require_pending_mut<'a>(
    state: &'a mut MatchState,
    ctx: &'static str,
) -> Result<&'a mut PendingAction, DomainError> {
    state.pending.as_mut().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("pending action must be set ({ctx})"),
        )
    })
}

pub fn phase_mismatch(state: &MatchState, wanted: &str) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("Expected {wanted}, match is in {}", state.turn_state.name()),
    )
}
