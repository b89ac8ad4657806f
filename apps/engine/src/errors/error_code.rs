//! Error codes for the match engine.
//!
//! This module defines all error codes surfaced to clients.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in rejection payloads.

use core::fmt;

use crate::errors::domain::ValidationKind;

/// Centralized error codes for the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Intent validation
    /// Not this player's decision to make
    OutOfTurn,
    /// Intent not valid in the current turn state
    PhaseMismatch,
    /// Sender is not seated in the match
    NotAParticipant,
    /// Sender has been eliminated
    PlayerEliminated,
    /// Not enough coins for the declared action
    InsufficientCoins,
    /// Ten or more coins held; KILL is mandatory
    MustKill,
    /// Target missing, eliminated or the actor themself
    InvalidTarget,
    /// Player already passed on this decision
    AlreadyVoted,
    /// Pending action cannot be blocked
    NotBlockable,
    /// Pending action cannot be challenged
    NotChallengeable,
    /// Claimed role does not block this action
    IllegalBlockClaim,
    /// Only the target may block
    NotTarget,
    /// Players cannot block their own action
    SelfBlock,
    SelfChallenge,
    /// Card index out of range
    InvalidCardIndex,
    /// Card is already face up
    CardAlreadyFlipped,
    /// Exchange selection is malformed
    InvalidSelection,
    /// Only the host may do this
    NotHost,
    /// Player count outside the allowed range
    InvalidPlayerCount,
    /// Hand size outside the allowed range
    InvalidHandSize,
    /// Match is over
    MatchFinished,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Match not found
    MatchNotFound,
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Optimistic lock conflict
    OptimisticLock,
    /// Match id already in use
    MatchExists,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::PlayerEliminated => "PLAYER_ELIMINATED",
            Self::InsufficientCoins => "INSUFFICIENT_COINS",
            Self::MustKill => "MUST_KILL",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::NotBlockable => "NOT_BLOCKABLE",
            Self::NotChallengeable => "NOT_CHALLENGEABLE",
            Self::IllegalBlockClaim => "ILLEGAL_BLOCK_CLAIM",
            Self::NotTarget => "NOT_TARGET",
            Self::SelfBlock => "SELF_BLOCK",
            Self::SelfChallenge => "SELF_CHALLENGE",
            Self::InvalidCardIndex => "INVALID_CARD_INDEX",
            Self::CardAlreadyFlipped => "CARD_ALREADY_FLIPPED",
            Self::InvalidSelection => "INVALID_SELECTION",
            Self::NotHost => "NOT_HOST",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidHandSize => "INVALID_HAND_SIZE",
            Self::MatchFinished => "MATCH_FINISHED",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::MatchExists => "MATCH_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Maps a validation kind onto its public code.
    pub fn from_validation(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::OutOfTurn => Self::OutOfTurn,
            ValidationKind::PhaseMismatch => Self::PhaseMismatch,
            ValidationKind::NotAParticipant => Self::NotAParticipant,
            ValidationKind::PlayerEliminated => Self::PlayerEliminated,
            ValidationKind::InsufficientCoins => Self::InsufficientCoins,
            ValidationKind::MustKill => Self::MustKill,
            ValidationKind::InvalidTarget => Self::InvalidTarget,
            ValidationKind::AlreadyVoted => Self::AlreadyVoted,
            ValidationKind::NotBlockable => Self::NotBlockable,
            ValidationKind::NotChallengeable => Self::NotChallengeable,
            ValidationKind::IllegalBlockClaim => Self::IllegalBlockClaim,
            ValidationKind::NotTarget => Self::NotTarget,
            ValidationKind::SelfBlock => Self::SelfBlock,
            ValidationKind::SelfChallenge => Self::SelfChallenge,
            ValidationKind::InvalidCardIndex => Self::InvalidCardIndex,
            ValidationKind::CardAlreadyFlipped => Self::CardAlreadyFlipped,
            ValidationKind::InvalidSelection => Self::InvalidSelection,
            ValidationKind::NotHost => Self::NotHost,
            ValidationKind::InvalidPlayerCount => Self::InvalidPlayerCount,
            ValidationKind::InvalidHandSize => Self::InvalidHandSize,
            ValidationKind::MatchFinished => Self::MatchFinished,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
