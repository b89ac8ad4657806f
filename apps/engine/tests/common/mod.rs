#![allow(dead_code)]

use std::sync::Arc;

use engine::domain::{Intent, IntentEnvelope};
use engine::{EngineConfig, InMemorySessionStore, MatchFlowService};
use engine_test_support::fixtures::{roster, unique_match_id};

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub type Service = MatchFlowService<InMemorySessionStore>;

pub fn service() -> Service {
    MatchFlowService::new(
        Arc::new(InMemorySessionStore::new()),
        EngineConfig::default(),
    )
}

pub fn envelope(match_id: &str, player: &str, intent: Intent) -> IntentEnvelope {
    IntentEnvelope {
        match_id: match_id.to_string(),
        player_id: player.to_string(),
        intent,
    }
}

/// Creates and starts a match with `players` seats; returns its id.
pub async fn started_match(svc: &Service, players: usize, seed: u64) -> String {
    let match_id = unique_match_id("it");
    svc.create_match(&match_id, roster(players), Some(seed))
        .await
        .expect("create match");
    svc.submit(envelope(&match_id, "p0", Intent::StartMatch))
        .await
        .expect("start match");
    match_id
}
