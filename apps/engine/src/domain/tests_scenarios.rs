//! Whole-turn walkthroughs through `apply_intent`.

use crate::domain::test_state_helpers::{act, declare, reject, rig_hands, set_coins, started};
use crate::domain::{ActionKind, Intent, LoseReason, MatchStatus, Role, TurnState};
use crate::errors::domain::ValidationKind;

#[test]
fn earn_pays_one_and_passes_the_turn() {
    let state = started(3, 1);
    assert_eq!(state.players[0].coins, 2);

    let state = act(&state, "p0", declare(ActionKind::Earn, None));

    assert_eq!(state.players[0].coins, 3);
    assert_eq!(state.turn_index, 1);
    assert_eq!(state.turn_state, TurnState::Idle);
    assert!(state.pending.is_none());
}

#[test]
fn steal_takes_at_most_what_the_target_has() {
    let mut state = started(3, 2);
    set_coins(&mut state, &[2, 1, 2]);

    let state = act(&state, "p0", declare(ActionKind::Steal, Some("p1")));
    assert_eq!(state.turn_state, TurnState::ActionPending);

    // A bystander's pass cannot settle it while the target is undecided.
    let state = act(&state, "p2", Intent::Pass);
    assert_eq!(state.turn_state, TurnState::ActionPending);

    let state = act(&state, "p1", Intent::Pass);
    assert_eq!(state.players[0].coins, 3);
    assert_eq!(state.players[1].coins, 0);
    assert_eq!(state.turn_index, 1);
}

#[test]
fn bluffed_tax_costs_a_card_and_pays_nothing() {
    let mut state = started(3, 3);
    rig_hands(&mut state, &[&[Role::Genie, Role::Robber]]);

    let state = act(&state, "p0", declare(ActionKind::Tax, None));
    let state = act(&state, "p2", Intent::Challenge);
    let state = act(&state, "p0", Intent::RevealCard { card_index: 0 });
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p0".into(),
            reason: LoseReason::Challenge
        }
    );

    let state = act(&state, "p0", Intent::PickLostCard { card_index: 1 });
    assert_eq!(state.players[0].coins, 2);
    assert!(state.players[0].hand[1].flipped);
    assert!(state.players[0].is_alive());
    assert_eq!(state.turn_index, 1);
}

#[test]
fn bluffer_on_last_life_is_eliminated() {
    let mut state = started(3, 4);
    rig_hands(&mut state, &[&[Role::Genie, Role::Robber]]);
    state.players[0].flip(1).unwrap();

    let state = act(&state, "p0", declare(ActionKind::Tax, None));
    let state = act(&state, "p1", Intent::Challenge);
    let state = act(&state, "p0", Intent::Surrender);
    let state = act(&state, "p0", Intent::PickLostCard { card_index: 0 });

    assert!(state.players[0].eliminated);
    assert_eq!(state.players[0].coins, 2);
    assert_eq!(state.status, MatchStatus::Playing);
    assert_eq!(state.turn_index, 1);
}

#[test]
fn failed_block_on_stab_costs_the_blocker_two_cards() {
    let mut state = started(3, 5);
    rig_hands(&mut state, &[&[Role::Monster, Role::Hero], &[Role::Hero, Role::Robber]]);
    set_coins(&mut state, &[5, 2, 2]);

    let state = act(&state, "p0", declare(ActionKind::Stab, Some("p1")));
    assert_eq!(state.players[0].coins, 2);

    let state = act(&state, "p1", Intent::DeclareBlock { claimed_role: Role::Genie });
    assert_eq!(state.turn_state, TurnState::BlockPending);

    let state = act(&state, "p2", Intent::Challenge);
    match &state.turn_state {
        TurnState::ChallengeResolve { challenge } => {
            assert!(challenge.is_block_challenge);
            assert_eq!(challenge.accused_id, "p1");
            assert_eq!(challenge.claim, Role::Genie);
        }
        other => panic!("unexpected {other:?}"),
    }

    let state = act(&state, "p1", Intent::Surrender);
    assert!(state.pending.as_ref().unwrap().deferred_effect_pending);

    let state = act(&state, "p1", Intent::PickLostCard { card_index: 0 });
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p1".into(),
            reason: LoseReason::Stab
        }
    );

    let state = act(&state, "p1", Intent::PickLostCard { card_index: 1 });
    assert!(state.players[1].eliminated);
    assert_eq!(state.players[0].coins, 2);
    assert_eq!(state.turn_index, 2);
}

#[test]
fn deferred_stab_skipped_when_target_already_out() {
    let mut state = started(3, 6);
    rig_hands(&mut state, &[&[Role::Monster, Role::Hero], &[Role::Hero, Role::Robber]]);
    set_coins(&mut state, &[5, 2, 2]);
    state.players[1].flip(1).unwrap();

    let state = act(&state, "p0", declare(ActionKind::Stab, Some("p1")));
    let state = act(&state, "p1", Intent::DeclareBlock { claimed_role: Role::Genie });
    let state = act(&state, "p2", Intent::Challenge);
    let state = act(&state, "p1", Intent::RevealCard { card_index: 0 });
    let state = act(&state, "p1", Intent::PickLostCard { card_index: 0 });

    assert!(state.players[1].eliminated);
    assert_eq!(state.turn_state, TurnState::Idle);
    assert_eq!(state.turn_index, 2);
    assert!(state
        .log
        .iter()
        .any(|entry| entry.text.contains("already out")));
}

#[test]
fn upheld_stab_chains_two_losses_for_the_challenging_target() {
    let mut state = started(3, 7);
    rig_hands(&mut state, &[&[Role::Hero, Role::Monster], &[Role::Genie, Role::Robber]]);
    set_coins(&mut state, &[3, 2, 2]);

    let state = act(&state, "p0", declare(ActionKind::Stab, Some("p1")));
    assert_eq!(state.players[0].coins, 0);
    let state = act(&state, "p1", Intent::Challenge);
    let deck_before = state.deck.len();
    let state = act(&state, "p0", Intent::RevealCard { card_index: 1 });
    assert_eq!(state.deck.len(), deck_before);
    assert!(!state.players[0].hand[1].flipped);

    let state = act(&state, "p1", Intent::PickLostCard { card_index: 0 });
    let state = act(&state, "p1", Intent::PickLostCard { card_index: 1 });
    assert!(state.players[1].eliminated);
    assert_eq!(state.turn_index, 2);
}

#[test]
fn proven_tax_pays_at_once_and_challenger_loses() {
    let mut state = started(3, 8);
    rig_hands(&mut state, &[&[Role::Hero, Role::Genie]]);

    let state = act(&state, "p0", declare(ActionKind::Tax, None));
    let state = act(&state, "p1", Intent::Challenge);
    let state = act(&state, "p0", Intent::RevealCard { card_index: 0 });
    assert_eq!(state.players[0].coins, 5);
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p1".into(),
            reason: LoseReason::Challenge
        }
    );

    let state = act(&state, "p1", Intent::PickLostCard { card_index: 0 });
    assert_eq!(state.players[0].coins, 5);
    assert_eq!(state.turn_index, 1);
}

#[test]
fn proven_steal_transfers_before_the_challenger_flips() {
    let mut state = started(3, 21);
    rig_hands(&mut state, &[&[Role::Robber, Role::Hero]]);
    set_coins(&mut state, &[2, 2, 2]);

    let state = act(&state, "p0", declare(ActionKind::Steal, Some("p1")));
    let state = act(&state, "p1", Intent::Challenge);
    let state = act(&state, "p0", Intent::RevealCard { card_index: 0 });
    assert_eq!(state.players[0].coins, 4);
    assert_eq!(state.players[1].coins, 0);
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p1".into(),
            reason: LoseReason::Challenge
        }
    );
    assert!(!state.pending.as_ref().unwrap().deferred_effect_pending);

    let state = act(&state, "p1", Intent::PickLostCard { card_index: 1 });
    assert!(state.players[1].hand[1].flipped);
    assert_eq!(state.players[0].coins, 4);
    assert_eq!(state.players[1].coins, 0);
    assert_eq!(state.turn_state, TurnState::Idle);
    assert_eq!(state.turn_index, 1);
    assert_eq!(state.deck.len() + state.cards_in_hands(), 30);
}

#[test]
fn proven_exchange_opens_after_the_challenger_flips() {
    let mut state = started(3, 22);
    rig_hands(&mut state, &[&[Role::Riddler, Role::Hero]]);

    let state = act(&state, "p0", declare(ActionKind::Exchange, None));
    let state = act(&state, "p2", Intent::Challenge);
    let state = act(&state, "p0", Intent::RevealCard { card_index: 0 });
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p2".into(),
            reason: LoseReason::Challenge
        }
    );
    assert!(state.pending.as_ref().unwrap().deferred_effect_pending);
    assert!(state.exchange_draw().is_empty());

    let state = act(&state, "p2", Intent::PickLostCard { card_index: 0 });
    assert!(state.players[2].hand[0].flipped);
    assert!(matches!(state.turn_state, TurnState::ExchangeSelect { .. }));
    assert_eq!(state.exchange_draw().len(), 2);
    assert_eq!(state.turn_index, 0);
    assert_eq!(
        state.deck.len() + state.cards_in_hands() + state.exchange_draw().len(),
        30
    );

    let held: Vec<Role> = state.players[0].hand.iter().map(|c| c.role).collect();
    let state = act(&state, "p0", Intent::SelectExchangeKeep { indices: vec![0, 1] });
    let kept: Vec<Role> = state.players[0].hand.iter().map(|c| c.role).collect();
    assert_eq!(kept, held);
    assert_eq!(state.turn_state, TurnState::Idle);
    assert_eq!(state.turn_index, 1);
    assert_eq!(state.deck.len() + state.cards_in_hands(), 30);
    assert_eq!(state.players[0].coins, 2);
}

#[test]
fn upheld_block_keeps_the_payoff_away() {
    let mut state = started(3, 9);
    rig_hands(&mut state, &[&[Role::Genie, Role::Genie], &[Role::Hero, Role::Robber]]);

    let state = act(&state, "p0", declare(ActionKind::Export, None));
    let state = act(&state, "p2", Intent::Pass);
    let state = act(&state, "p1", Intent::DeclareBlock { claimed_role: Role::Hero });
    assert!(state.pending.as_ref().unwrap().votes.is_empty());

    let state = act(&state, "p0", Intent::Challenge);
    let state = act(&state, "p1", Intent::RevealCard { card_index: 0 });
    let state = act(&state, "p0", Intent::PickLostCard { card_index: 0 });

    assert_eq!(state.players[0].coins, 2);
    assert!(state.players[0].hand[0].flipped);
    assert_eq!(state.turn_index, 1);
}

#[test]
fn accepted_block_forfeits_the_stab_fee() {
    let mut state = started(3, 10);
    set_coins(&mut state, &[4, 2, 2]);

    let state = act(&state, "p0", declare(ActionKind::Stab, Some("p2")));
    let state = act(&state, "p2", Intent::DeclareBlock { claimed_role: Role::Genie });
    let state = act(&state, "p0", Intent::Pass);
    assert_eq!(state.turn_state, TurnState::BlockPending);
    let state = act(&state, "p1", Intent::Pass);

    assert_eq!(state.turn_state, TurnState::Idle);
    assert_eq!(state.players[0].coins, 1);
    assert!(state.players[2].hand.iter().all(|c| !c.flipped));
    assert_eq!(state.turn_index, 1);
}

#[test]
fn kill_charges_seven_and_demands_a_card() {
    let mut state = started(3, 11);
    set_coins(&mut state, &[7, 2, 2]);

    let state = act(&state, "p0", declare(ActionKind::Kill, Some("p2")));
    assert_eq!(state.players[0].coins, 0);
    assert_eq!(
        state.turn_state,
        TurnState::LoseCard {
            loser_id: "p2".into(),
            reason: LoseReason::Kill
        }
    );
    let state = act(&state, "p2", Intent::PickLostCard { card_index: 1 });
    assert_eq!(state.turn_index, 1);
}

#[test]
fn last_two_standing_then_restart() {
    let mut state = started(2, 12);
    set_coins(&mut state, &[7, 2]);
    state.players[1].flip(0).unwrap();

    let state = act(&state, "p0", declare(ActionKind::Kill, Some("p1")));
    let state = act(&state, "p1", Intent::PickLostCard { card_index: 1 });
    assert_eq!(
        state.status,
        MatchStatus::Finished {
            winner: Some("p0".into())
        }
    );

    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Earn, None)),
        ValidationKind::MatchFinished
    );
    assert_eq!(
        reject(&state, "p1", Intent::RestartMatch),
        ValidationKind::NotHost
    );

    let state = act(&state, "p0", Intent::RestartMatch);
    assert_eq!(state.status, MatchStatus::Playing);
    assert!(state.players.iter().all(|p| p.is_alive() && p.coins == 2));
}

#[test]
fn exchange_swaps_live_cards_with_the_draw() {
    let mut state = started(3, 13);
    rig_hands(&mut state, &[&[Role::Riddler, Role::Hero]]);

    let state = act(&state, "p0", declare(ActionKind::Exchange, None));
    let state = act(&state, "p1", Intent::Pass);
    let state = act(&state, "p2", Intent::Pass);
    let drawn = state.exchange_draw().to_vec();
    assert_eq!(drawn.len(), 2);

    assert_eq!(
        reject(&state, "p0", Intent::SelectExchangeKeep { indices: vec![2, 2] }),
        ValidationKind::InvalidSelection
    );
    assert_eq!(
        reject(&state, "p0", Intent::SelectExchangeKeep { indices: vec![0] }),
        ValidationKind::InvalidSelection
    );
    assert_eq!(
        reject(&state, "p1", Intent::SelectExchangeKeep { indices: vec![2, 3] }),
        ValidationKind::OutOfTurn
    );

    let state = act(&state, "p0", Intent::SelectExchangeKeep { indices: vec![2, 3] });
    let kept: Vec<Role> = state.players[0].hand.iter().map(|c| c.role).collect();
    assert_eq!(kept, drawn);
    assert_eq!(state.turn_index, 1);
}

#[test]
fn exchange_keeps_flipped_cards_in_place() {
    let mut state = started(3, 14);
    rig_hands(&mut state, &[&[Role::Hero, Role::Riddler]]);
    state.players[0].flip(0).unwrap();

    let state = act(&state, "p0", declare(ActionKind::Exchange, None));
    let state = act(&state, "p1", Intent::Pass);
    let state = act(&state, "p2", Intent::Pass);
    let drawn = state.exchange_draw().to_vec();

    let state = act(&state, "p0", Intent::SelectExchangeKeep { indices: vec![1] });
    let hand = &state.players[0].hand;
    assert!(hand[0].flipped);
    assert_eq!(hand[0].role, Role::Hero);
    assert_eq!(hand[1].role, drawn[0]);
    assert!(!hand[1].flipped);
}

#[test]
fn declaration_guards() {
    let mut state = started(3, 15);
    assert_eq!(
        reject(&state, "p1", declare(ActionKind::Earn, None)),
        ValidationKind::OutOfTurn
    );
    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Kill, Some("p1"))),
        ValidationKind::InsufficientCoins
    );
    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Steal, None)),
        ValidationKind::InvalidTarget
    );
    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Steal, Some("p0"))),
        ValidationKind::InvalidTarget
    );
    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Tax, Some("p1"))),
        ValidationKind::InvalidTarget
    );
    assert_eq!(reject(&state, "p0", Intent::Pass), ValidationKind::PhaseMismatch);

    set_coins(&mut state, &[10, 2, 2]);
    assert_eq!(
        reject(&state, "p0", declare(ActionKind::Tax, None)),
        ValidationKind::MustKill
    );
    act(&state, "p0", declare(ActionKind::Kill, Some("p1")));
}
