//! Property-based tests: random legal play never breaks the match.

use proptest::prelude::*;

use crate::domain::test_state_helpers::{act, lobby};
use crate::domain::{
    apply_intent, check_invariants, legal_intents, test_gens, test_prelude, Intent, MatchState,
    MatchStatus, TurnState,
};
use crate::errors::domain::ValidationKind;

fn dealt(players: usize, hand_size: u8, seed: u64) -> MatchState {
    let state = act(&lobby(players, seed), "p0", Intent::ConfigureMatch { hand_size });
    act(&state, "p0", Intent::StartMatch)
}

/// Every (player, intent) pair that would be accepted, restarts aside.
fn moves(state: &MatchState) -> Vec<(String, Intent)> {
    state
        .players
        .iter()
        .flat_map(|p| {
            legal_intents(state, &p.id)
                .into_iter()
                .filter(|i| *i != Intent::RestartMatch)
                .map(|i| (p.id.clone(), i))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn total_coins(state: &MatchState) -> i64 {
    state.players.iter().map(|p| i64::from(p.coins)).sum()
}

/// Plays `script` and returns every intermediate state.
fn play(mut state: MatchState, script: &[usize]) -> Vec<MatchState> {
    let mut trail = vec![state.clone()];
    for &pick in script {
        let options = moves(&state);
        if options.is_empty() {
            break;
        }
        let (player, intent) = &options[pick % options.len()];
        state = act(&state, player, intent.clone());
        trail.push(state.clone());
    }
    trail
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: structural invariants (card conservation, elimination iff
    /// all flipped, turn holder alive) survive any legal sequence.
    #[test]
    fn prop_random_play_keeps_invariants(
        players in test_gens::player_count(),
        hand_size in test_gens::hand_size(),
        seed in test_gens::seed(),
        script in test_gens::script(160),
    ) {
        for state in play(dealt(players, hand_size, seed), &script) {
            prop_assert!(check_invariants(&state).is_ok(), "{:?}", check_invariants(&state));
            for p in &state.players {
                prop_assert_eq!(p.eliminated, p.hand.iter().all(|c| c.flipped));
            }
            let held = state.deck.len() + state.cards_in_hands() + state.exchange_draw().len();
            prop_assert_eq!(held, state.config.total_cards());
        }
    }

    /// Property: coins only enter through income and leave through fees.
    /// STEAL is zero-sum; a single reduction moves the table total by one
    /// of the known amounts.
    #[test]
    fn prop_coin_accounting(
        players in test_gens::player_count(),
        seed in test_gens::seed(),
        script in test_gens::script(160),
    ) {
        let trail = play(dealt(players, 2, seed), &script);
        for pair in trail.windows(2) {
            let delta = total_coins(&pair[1]) - total_coins(&pair[0]);
            prop_assert!(
                [0, 1, 2, 3, -3, -7].contains(&delta),
                "unexpected coin delta {delta}"
            );
        }
    }

    /// Property: a vote already cast is rejected when replayed.
    #[test]
    fn prop_replayed_pass_is_rejected(
        players in 3usize..=6,
        seed in test_gens::seed(),
        script in test_gens::script(120),
    ) {
        let trail = play(dealt(players, 2, seed), &script);
        for state in &trail {
            let Some(pending) = state.pending.as_ref() else { continue };
            if !matches!(state.turn_state, TurnState::ActionPending | TurnState::BlockPending) {
                continue;
            }
            for voter in &pending.votes {
                let err = apply_intent(state, voter, &Intent::Pass).unwrap_err();
                prop_assert_eq!(err.validation_kind(), Some(&ValidationKind::AlreadyVoted));
            }
        }
    }

    /// Property: the same seed and the same script replay to the same match.
    #[test]
    fn prop_replay_is_deterministic(
        players in test_gens::player_count(),
        seed in test_gens::seed(),
        script in test_gens::script(80),
    ) {
        let a = play(dealt(players, 2, seed), &script);
        let b = play(dealt(players, 2, seed), &script);
        prop_assert_eq!(a.last(), b.last());
    }

    /// Property: once finished, nothing but lifecycle intents is accepted.
    #[test]
    fn prop_finished_match_is_frozen(
        seed in test_gens::seed(),
        action in test_gens::action(),
        role in test_gens::role(),
    ) {
        let mut state = dealt(2, 2, seed);
        state.players[1].flip(0).unwrap();
        state.players[1].flip(1).unwrap();
        state.status = MatchStatus::Finished { winner: Some("p0".into()) };

        for intent in [
            Intent::DeclareAction { action, target_id: Some("p1".into()) },
            Intent::DeclareBlock { claimed_role: role },
            Intent::Pass,
            Intent::Challenge,
        ] {
            let err = apply_intent(&state, "p0", &intent).unwrap_err();
            prop_assert_eq!(err.validation_kind(), Some(&ValidationKind::MatchFinished));
        }
        prop_assert!(apply_intent(&state, "p0", &Intent::RestartMatch).is_ok());
    }
}

/// Random play only runs out of moves once the match is over.
#[test]
fn random_play_never_dead_ends() {
    for seed in 0..8u64 {
        let script: Vec<usize> = (0..4000).map(|i| (i * 7919 + seed as usize * 31) % 997).collect();
        let trail = play(dealt(4, 2, seed), &script);
        let last = trail.last().unwrap();
        if trail.len() <= script.len() {
            assert!(matches!(last.status, MatchStatus::Finished { .. }));
        }
    }
}
