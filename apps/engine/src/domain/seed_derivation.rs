//! RNG seed derivation utilities for deterministic shuffling.
//!
//! Each match carries a base seed; every shuffle derives its own seed from
//! the base and a monotonically increasing nonce so that replaying the
//! same intent against the same state always yields the same deck order.

/// Derive the seed for the `nonce`-th shuffle of a match.
pub fn derive_shuffle_seed(match_seed: u64, nonce: u64) -> u64 {
    // SplitMix64 finaliser over the combined inputs
    let mut z = match_seed
        .wrapping_add(nonce.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(3);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
