//! Seated players, their coins and their hands.

use serde::{Deserialize, Serialize};

use super::Role;
use crate::errors::domain::{DomainError, ValidationKind};

/// Externally issued, already-authenticated player identity.
pub type PlayerId = String;

/// One life. Once flipped it stays face up for the rest of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub role: Role,
    pub flipped: bool,
}

impl Card {
    pub fn face_down(role: Role) -> Self {
        Self {
            role,
            flipped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub coins: u32,
    pub hand: Vec<Card>,
    /// Mirrors "every card in `hand` is flipped"; kept in sync by
    /// [`Player::flip`] and [`Player::set_hand`].
    pub eliminated: bool,
}

impl Player {
    /// A seat with no cards yet (lobby).
    pub fn seated(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coins: 0,
            hand: Vec::new(),
            eliminated: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.eliminated
    }

    pub fn alive_count(&self) -> usize {
        self.hand.iter().filter(|c| !c.flipped).count()
    }

    /// Roles of the unflipped cards, in hand order.
    pub fn alive_roles(&self) -> Vec<Role> {
        self.hand
            .iter()
            .filter(|c| !c.flipped)
            .map(|c| c.role)
            .collect()
    }

    /// Validates that `index` names an unflipped card.
    pub fn live_card(&self, index: usize) -> Result<&Card, DomainError> {
        let card = self.hand.get(index).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidCardIndex,
                format!("{} has no card at index {index}", self.name),
            )
        })?;
        if card.flipped {
            return Err(DomainError::validation(
                ValidationKind::CardAlreadyFlipped,
                format!("{}'s card {index} is already face up", self.name),
            ));
        }
        Ok(card)
    }

    /// Flips the card at `index`. Returns true if that was the last life.
    pub fn flip(&mut self, index: usize) -> Result<bool, DomainError> {
        self.live_card(index)?;
        self.hand[index].flipped = true;
        self.eliminated = self.hand.iter().all(|c| c.flipped);
        Ok(self.eliminated)
    }

    pub fn set_hand(&mut self, hand: Vec<Card>) {
        self.eliminated = !hand.is_empty() && hand.iter().all(|c| c.flipped);
        self.hand = hand;
    }
}
