//! Runs whole matches in memory and audits every reduction.

use engine::domain::{
    apply_intent, check_invariants, derive_match_transitions, Intent, MatchConfig, MatchState,
    MatchStatus, MatchTransition, Player,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::bot::RandomBot;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub seed: u64,
    pub winner: Option<String>,
    pub steps: u32,
    pub challenges: u32,
    pub blocks: u32,
    /// Seats in the order they were knocked out.
    pub eliminations: Vec<String>,
    pub finished: bool,
}

#[derive(Debug)]
pub enum SimError {
    /// The engine refused a move it had listed as legal.
    Rejected { step: u32, detail: String },
    /// A successor state failed an audit.
    Audit { step: u32, detail: String },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Rejected { step, detail } => write!(f, "step {step}: rejected: {detail}"),
            SimError::Audit { step, detail } => write!(f, "step {step}: audit failed: {detail}"),
        }
    }
}

impl std::error::Error for SimError {}

pub struct Simulator {
    pub players: usize,
    pub hand_size: u8,
    pub max_steps: u32,
}

fn total_coins(state: &MatchState) -> i64 {
    state.players.iter().map(|p| i64::from(p.coins)).sum()
}

/// Coin movement one reduction may cause: income, fees, or nothing.
const COIN_DELTAS: [i64; 6] = [0, 1, 2, 3, -3, -7];

impl Simulator {
    pub fn run_game(&self, seed: u64, bot: &RandomBot) -> Result<GameResult, SimError> {
        let roster = (0..self.players)
            .map(|i| Player::seated(format!("p{i}"), format!("Bot {i}")))
            .collect();
        let config = MatchConfig {
            hand_size: self.hand_size,
            ..MatchConfig::default()
        };
        let lobby = MatchState::lobby(format!("sim-{seed}"), roster, config, seed);
        let mut state = apply_intent(&lobby, "p0", &Intent::StartMatch).map_err(|e| {
            SimError::Rejected {
                step: 0,
                detail: e.to_string(),
            }
        })?;

        let mut result = GameResult {
            seed,
            ..GameResult::default()
        };

        while result.steps < self.max_steps {
            if let MatchStatus::Finished { winner } = &state.status {
                result.winner = winner.clone();
                result.finished = true;
                break;
            }
            result.steps += 1;
            let step = result.steps;

            let movers: Vec<String> = state
                .players
                .iter()
                .filter(|p| bot.has_move(&state, &p.id))
                .map(|p| p.id.clone())
                .collect();
            let Some(player) = bot.pick_actor(&movers).cloned() else {
                return Err(SimError::Audit {
                    step,
                    detail: "no player can move in a live match".into(),
                });
            };
            let Some(intent) = bot.choose(&state, &player) else {
                return Err(SimError::Audit {
                    step,
                    detail: format!("{player} lost its moves"),
                });
            };

            let next = apply_intent(&state, &player, &intent).map_err(|e| SimError::Rejected {
                step,
                detail: format!("{player} {intent:?}: {e}"),
            })?;
            self.audit(step, &state, &next)?;
            debug!(step, player = %player, intent = intent.name(), "applied");

            match intent {
                Intent::Challenge => result.challenges += 1,
                Intent::DeclareBlock { .. } => result.blocks += 1,
                _ => {}
            }
            for transition in derive_match_transitions(&state, &next) {
                if let MatchTransition::PlayerEliminated { player_id } = transition {
                    result.eliminations.push(player_id);
                }
            }
            state = next;
        }

        if let MatchStatus::Finished { winner } = &state.status {
            result.winner = winner.clone();
            result.finished = true;
        } else {
            warn!(seed, steps = result.steps, "match hit the step limit");
        }
        Ok(result)
    }

    fn audit(&self, step: u32, before: &MatchState, after: &MatchState) -> Result<(), SimError> {
        check_invariants(after).map_err(|e| SimError::Audit {
            step,
            detail: e.to_string(),
        })?;
        let delta = total_coins(after) - total_coins(before);
        if !COIN_DELTAS.contains(&delta) {
            return Err(SimError::Audit {
                step,
                detail: format!("coin total moved by {delta}"),
            });
        }
        Ok(())
    }
}
