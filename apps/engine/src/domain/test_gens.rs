// Proptest generators for domain types and random play scripts.

use proptest::prelude::*;

use crate::domain::{ActionKind, Role};

pub fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

pub fn action() -> impl Strategy<Value = ActionKind> {
    prop::sample::select(ActionKind::ALL.to_vec())
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

pub fn player_count() -> impl Strategy<Value = usize> {
    2usize..=6
}

pub fn hand_size() -> impl Strategy<Value = u8> {
    2u8..=3
}

/// Raw picks; each step reduces one modulo the number of legal moves.
pub fn script(max_steps: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 1..max_steps)
}
