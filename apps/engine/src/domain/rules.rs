use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const STARTING_COINS: u32 = 2;
pub const DEFAULT_HAND_SIZE: u8 = 2;
pub const HAND_SIZES: RangeInclusive<u8> = 2..=3;
/// Three copies of each role, doubled.
pub const DEFAULT_COPIES_PER_ROLE: u8 = 6;
/// Holding this many coins or more makes KILL mandatory.
pub const FORCED_KILL_THRESHOLD: u32 = 10;
pub const STEAL_LIMIT: u32 = 2;
pub const EXCHANGE_DRAW: usize = 2;

/// Per-match settings, fixed once the match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub hand_size: u8,
    pub starting_coins: u32,
    pub copies_per_role: u8,
    pub max_players: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            starting_coins: STARTING_COINS,
            copies_per_role: DEFAULT_COPIES_PER_ROLE,
            max_players: MAX_PLAYERS,
        }
    }
}

impl MatchConfig {
    /// Total number of role tokens in circulation for this match.
    pub fn total_cards(&self) -> usize {
        self.copies_per_role as usize * super::Role::ALL.len()
    }

    /// Checks that `player_count` players can be dealt in with room left
    /// for an exchange draw.
    pub fn validate_for(&self, player_count: usize) -> Result<(), DomainError> {
        if !HAND_SIZES.contains(&self.hand_size) {
            return Err(DomainError::validation(
                ValidationKind::InvalidHandSize,
                format!("Hand size must be in {HAND_SIZES:?}"),
            ));
        }
        if !(MIN_PLAYERS..=self.max_players.min(MAX_PLAYERS)).contains(&player_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!(
                    "Need {MIN_PLAYERS}..={} players, have {player_count}",
                    self.max_players.min(MAX_PLAYERS)
                ),
            ));
        }
        let needed = player_count * self.hand_size as usize + EXCHANGE_DRAW;
        if needed > self.total_cards() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!(
                    "Deck of {} cannot deal {player_count} hands of {}",
                    self.total_cards(),
                    self.hand_size
                ),
            ));
        }
        Ok(())
    }
}
