//! The shared bag of face-down role tokens.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::seed_derivation::derive_shuffle_seed;
use super::Role;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Draw pile. Order is irrelevant to the rules but deterministic given
/// `seed` and `shuffle_nonce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    cards: Vec<Role>,
    seed: u64,
    shuffle_nonce: u64,
}

impl Deck {
    /// An empty pile that shuffles from `seed`.
    pub fn empty(seed: u64) -> Self {
        Self {
            cards: Vec::new(),
            seed,
            shuffle_nonce: 0,
        }
    }

    /// Refill with `copies_per_role` of every role and shuffle.
    ///
    /// Keeps the shuffle nonce running so a refilled deck never repeats an
    /// earlier order within the same match.
    pub fn refill(&mut self, copies_per_role: u8) {
        self.cards.clear();
        for role in Role::ALL {
            for _ in 0..copies_per_role {
                self.cards.push(role);
            }
        }
        self.shuffle();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Role] {
        &self.cards
    }

    pub fn shuffle(&mut self) {
        let seed = derive_shuffle_seed(self.seed, self.shuffle_nonce);
        self.shuffle_nonce = self.shuffle_nonce.wrapping_add(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    pub fn draw(&mut self) -> Result<Role, DomainError> {
        self.cards.pop().ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DataCorruption, "Deck is empty")
        })
    }

    /// Draws `n` tokens or none at all.
    pub fn draw_many(&mut self, n: usize) -> Result<Vec<Role>, DomainError> {
        if self.cards.len() < n {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Deck has {} cards, need {n}", self.cards.len()),
            ));
        }
        let at = self.cards.len() - n;
        Ok(self.cards.split_off(at))
    }

    /// Pulls one specific token out of the pile, for rigging test hands.
    #[cfg(test)]
    pub(crate) fn take(&mut self, role: Role) -> Option<Role> {
        let at = self.cards.iter().position(|&r| r == role)?;
        Some(self.cards.swap_remove(at))
    }

    /// Puts tokens back and reshuffles.
    pub fn return_and_shuffle(&mut self, roles: impl IntoIterator<Item = Role>) {
        self.cards.extend(roles);
        self.shuffle();
    }
}
