//! Session Store seam and its in-memory implementation.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{MatchId, MatchState};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// A committed match document.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    /// Bumped by one on every successful save.
    pub revision: u64,
    pub state: MatchState,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { revision: u64 },
    /// Someone else committed first; `current` is the revision they left.
    Conflict { current: u64 },
}

/// Persistence and fan-out for match documents. Implementations must
/// linearize writes to a single match.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_match(&self, state: MatchState) -> Result<MatchSnapshot, DomainError>;

    async fn load_match(&self, match_id: &str) -> Result<MatchSnapshot, DomainError>;

    /// Compare-and-set on `expected_revision`.
    async fn save_match(
        &self,
        match_id: &str,
        state: MatchState,
        expected_revision: u64,
    ) -> Result<SaveOutcome, DomainError>;

    /// Every committed snapshot of `match_id` from now on.
    async fn subscribe(
        &self,
        match_id: &str,
    ) -> Result<broadcast::Receiver<MatchSnapshot>, DomainError>;
}

struct Document {
    snapshot: MatchSnapshot,
    tx: broadcast::Sender<MatchSnapshot>,
}

/// Process-local store. Each match document sits behind its DashMap shard
/// lock, which serializes the compare-and-set.
pub struct InMemorySessionStore {
    docs: DashMap<MatchId, Document>,
    channel_capacity: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// `channel_capacity` bounds how far a slow subscriber may lag before
    /// it starts missing snapshots.
    pub fn with_capacity(channel_capacity: usize) -> Self {
        Self {
            docs: DashMap::new(),
            channel_capacity: channel_capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

fn match_not_found(match_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_match(&self, state: MatchState) -> Result<MatchSnapshot, DomainError> {
        match self.docs.entry(state.match_id.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::MatchExists,
                format!("Match {} already exists", state.match_id),
            )),
            Entry::Vacant(slot) => {
                let snapshot = MatchSnapshot {
                    match_id: state.match_id.clone(),
                    revision: 0,
                    state,
                    updated_at: OffsetDateTime::now_utc(),
                };
                let (tx, _) = broadcast::channel(self.channel_capacity);
                slot.insert(Document {
                    snapshot: snapshot.clone(),
                    tx,
                });
                Ok(snapshot)
            }
        }
    }

    async fn load_match(&self, match_id: &str) -> Result<MatchSnapshot, DomainError> {
        self.docs
            .get(match_id)
            .map(|doc| doc.snapshot.clone())
            .ok_or_else(|| match_not_found(match_id))
    }

    async fn save_match(
        &self,
        match_id: &str,
        state: MatchState,
        expected_revision: u64,
    ) -> Result<SaveOutcome, DomainError> {
        let mut doc = self
            .docs
            .get_mut(match_id)
            .ok_or_else(|| match_not_found(match_id))?;
        let current = doc.snapshot.revision;
        if current != expected_revision {
            debug!(match_id, expected_revision, current, "save rejected: stale revision");
            return Ok(SaveOutcome::Conflict { current });
        }

        let revision = current + 1;
        doc.snapshot = MatchSnapshot {
            match_id: match_id.to_string(),
            revision,
            state,
            updated_at: OffsetDateTime::now_utc(),
        };
        // No receivers is fine.
        let _ = doc.tx.send(doc.snapshot.clone());
        Ok(SaveOutcome::Saved { revision })
    }

    async fn subscribe(
        &self,
        match_id: &str,
    ) -> Result<broadcast::Receiver<MatchSnapshot>, DomainError> {
        self.docs
            .get(match_id)
            .map(|doc| doc.tx.subscribe())
            .ok_or_else(|| match_not_found(match_id))
    }
}
