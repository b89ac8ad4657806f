//! Shared proptest configuration for domain property tests.

use proptest::test_runner::Config as ProptestConfig;

/// Case count honours `PROPTEST_CASES`; defaults stay small because every
/// case plays a whole match.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(48);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
