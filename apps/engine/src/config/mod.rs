use std::env;
use std::str::FromStr;

use crate::domain::rules::{self, MatchConfig, HAND_SIZES};
use crate::error::AppError;

/// Engine-wide settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How often `MatchFlowService::submit` reloads and retries after an
    /// optimistic-lock conflict before giving up.
    pub max_save_retries: u32,
    /// Defaults stamped into every newly created match.
    pub match_defaults: MatchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_save_retries: 5,
            match_defaults: MatchConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads `ENGINE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable lookup, so
    /// tests need not touch process state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_save_retries =
            parse_or(&lookup, "ENGINE_MAX_SAVE_RETRIES", defaults.max_save_retries)?;
        let hand_size = parse_or(&lookup, "ENGINE_DEFAULT_HAND_SIZE", rules::DEFAULT_HAND_SIZE)?;
        let starting_coins = parse_or(&lookup, "ENGINE_STARTING_COINS", rules::STARTING_COINS)?;
        let copies_per_role =
            parse_or(&lookup, "ENGINE_COPIES_PER_ROLE", rules::DEFAULT_COPIES_PER_ROLE)?;

        if !HAND_SIZES.contains(&hand_size) {
            return Err(AppError::config(format!(
                "ENGINE_DEFAULT_HAND_SIZE must be in {HAND_SIZES:?}, got {hand_size}"
            )));
        }
        let match_defaults = MatchConfig {
            hand_size,
            starting_coins,
            copies_per_role,
            max_players: rules::MAX_PLAYERS,
        };
        // A full table must still be dealable.
        match_defaults
            .validate_for(rules::MAX_PLAYERS)
            .map_err(|e| AppError::config(format!("ENGINE_COPIES_PER_ROLE too small: {e}")))?;

        Ok(Self {
            max_save_retries,
            match_defaults,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{key}={raw:?} is invalid: {e}"))),
    }
}
