//! Legal-intent enumeration for clients and bots.

use super::actions::ActionKind;
use super::intent::Intent;
use super::machine::reduce;
use super::state::{MatchState, TurnState};
use super::Role;

fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn walk(start: usize, n: usize, k: usize, acc: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if acc.len() == k {
            out.push(acc.clone());
            return;
        }
        for i in start..n {
            acc.push(i);
            walk(i + 1, n, k, acc, out);
            acc.pop();
        }
    }
    let mut out = Vec::new();
    walk(0, n, k, &mut Vec::new(), &mut out);
    out
}

/// Candidate intents worth probing in the current turn state.
fn candidates(state: &MatchState, player_id: &str) -> Vec<Intent> {
    let hand_len = state.player(player_id).map_or(0, |p| p.hand.len());
    let mut out = vec![Intent::StartMatch, Intent::RestartMatch];
    for hand_size in [2, 3] {
        out.push(Intent::ConfigureMatch { hand_size });
    }

    match &state.turn_state {
        TurnState::Idle => {
            for action in ActionKind::ALL {
                if action.spec().targeted {
                    for target in state.living().filter(|p| p.id != player_id) {
                        out.push(Intent::DeclareAction {
                            action,
                            target_id: Some(target.id.clone()),
                        });
                    }
                } else {
                    out.push(Intent::DeclareAction {
                        action,
                        target_id: None,
                    });
                }
            }
        }
        TurnState::ActionPending | TurnState::BlockPending => {
            out.push(Intent::Pass);
            out.push(Intent::Challenge);
            for claimed_role in Role::ALL {
                out.push(Intent::DeclareBlock { claimed_role });
            }
        }
        TurnState::ChallengeResolve { .. } => {
            out.push(Intent::Surrender);
            out.extend((0..hand_len).map(|card_index| Intent::RevealCard { card_index }));
        }
        TurnState::LoseCard { .. } => {
            out.extend((0..hand_len).map(|card_index| Intent::PickLostCard { card_index }));
        }
        TurnState::ExchangeSelect { drawn } => {
            let keep = state.player(player_id).map_or(0, |p| p.alive_count());
            for indices in combinations(keep + drawn.len(), keep) {
                out.push(Intent::SelectExchangeKeep { indices });
            }
        }
    }
    out
}

/// Intents `player_id` could submit right now and have accepted.
/// `LeaveMatch` is always available and therefore not listed.
pub fn legal_intents(state: &MatchState, player_id: &str) -> Vec<Intent> {
    candidates(state, player_id)
        .into_iter()
        .filter(|intent| reduce(state, player_id, intent).is_ok())
        .collect()
}
