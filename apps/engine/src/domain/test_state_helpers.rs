//! Test-only match builders for domain unit tests.

use crate::domain::players::{Card, Player};
use crate::domain::rules::MatchConfig;
use crate::domain::state::MatchState;
use crate::domain::{apply_intent, Intent, Role};
use crate::errors::domain::ValidationKind;

/// Lobby with seats `p0..pN` named `P0..PN`; `p0` hosts.
pub fn lobby(players: usize, seed: u64) -> MatchState {
    let roster = (0..players)
        .map(|i| Player::seated(format!("p{i}"), format!("P{i}")))
        .collect();
    MatchState::lobby("m-test", roster, MatchConfig::default(), seed)
}

/// Dealt match, `p0` to act.
pub fn started(players: usize, seed: u64) -> MatchState {
    act(&lobby(players, seed), "p0", Intent::StartMatch)
}

/// Replaces each seat's hand with the given roles, keeping the card
/// total intact by trading with the deck.
pub fn rig_hands(state: &mut MatchState, hands: &[&[Role]]) {
    for (player, roles) in state.players.iter_mut().zip(hands) {
        state
            .deck
            .return_and_shuffle(player.hand.iter().map(|c| c.role));
        let hand = roles
            .iter()
            .map(|&role| {
                state.deck.take(role).expect("deck has enough copies");
                Card::face_down(role)
            })
            .collect();
        player.set_hand(hand);
    }
}

pub fn set_coins(state: &mut MatchState, coins: &[u32]) {
    for (player, &c) in state.players.iter_mut().zip(coins) {
        player.coins = c;
    }
}

/// Applies an intent that must be accepted.
#[track_caller]
pub fn act(state: &MatchState, player: &str, intent: Intent) -> MatchState {
    match apply_intent(state, player, &intent) {
        Ok(next) => next,
        Err(err) => panic!("{player} {intent:?} rejected: {err}"),
    }
}

/// Applies an intent that must be rejected and returns its kind.
#[track_caller]
pub fn reject(state: &MatchState, player: &str, intent: Intent) -> ValidationKind {
    match apply_intent(state, player, &intent) {
        Ok(_) => panic!("{player} {intent:?} unexpectedly accepted"),
        Err(err) => err
            .validation_kind()
            .cloned()
            .unwrap_or_else(|| panic!("expected a validation error, got {err}")),
    }
}

pub fn declare(action: crate::domain::ActionKind, target: Option<&str>) -> Intent {
    Intent::DeclareAction {
        action,
        target_id: target.map(str::to_string),
    }
}
