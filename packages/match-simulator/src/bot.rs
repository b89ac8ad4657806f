//! Random legal-move bot.

use std::sync::Mutex;

use engine::domain::{legal_intents, Intent, MatchState};
use rand::prelude::*;

/// Picks uniformly among the intents the engine would accept.
///
/// The RNG sits behind a `Mutex` so one bot can be shared across seats
/// through `&self`.
pub struct RandomBot {
    rng: Mutex<StdRng>,
}

impl RandomBot {
    /// `Some(seed)` gives reproducible play; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Chooses a move for `player_id`, or `None` if it has none. Restarts
    /// are never chosen.
    pub fn choose(&self, state: &MatchState, player_id: &str) -> Option<Intent> {
        let options: Vec<Intent> = legal_intents(state, player_id)
            .into_iter()
            .filter(|i| !i.is_lifecycle())
            .collect();
        let mut rng = self.rng.lock().ok()?;
        options.choose(&mut *rng).cloned()
    }

    pub fn has_move(&self, state: &MatchState, player_id: &str) -> bool {
        legal_intents(state, player_id)
            .iter()
            .any(|i| !i.is_lifecycle())
    }

    /// Picks one of `ids` to move next.
    pub fn pick_actor<'a>(&self, ids: &'a [String]) -> Option<&'a String> {
        let mut rng = self.rng.lock().ok()?;
        ids.choose(&mut *rng)
    }
}
