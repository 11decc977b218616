//! Snapshot store: coarse-grained rollback through full-state checkpoints.
//!
//! A snapshot is an immutable, sequenced capture of entity data, not of the
//! lifecycle state, and with no knowledge of which command produced it. The
//! store is append-only until rollback trims it. Rollback restores a
//! previously *recorded* state rather than reversing one discrete operation,
//! which suits edits too fine-grained or numerous to reverse individually.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// An immutable, sequenced full copy of entity data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot<E> {
    /// Monotonic sequence number, unique within the store.
    pub seq: u64,
    /// When the snapshot was captured.
    pub taken_at: DateTime<Utc>,
    /// The captured entity data.
    pub data: E,
}

/// Append-only history of snapshots with a rollback cursor at the end.
///
/// # Caller discipline
///
/// The state *before the very first checkpoint* is only recoverable if the
/// caller checkpoints at session start. Rolling back past the last recorded
/// snapshot returns `E::default()`, which may not equal the true pre-session
/// state unless that discipline is followed. No implicit initial snapshot is
/// taken.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotStore<E> {
    snapshots: Vec<Snapshot<E>>,
    next_seq: u64,
}

impl<E: Clone> SnapshotStore<E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            next_seq: 0,
        }
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot<E>] {
        &self.snapshots
    }

    /// The most recent snapshot, if any.
    pub fn latest(&self) -> Option<&Snapshot<E>> {
        self.snapshots.last()
    }

    /// Append a snapshot of `data`, returning its sequence number.
    pub fn checkpoint(&mut self, data: &E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.snapshots.push(Snapshot {
            seq,
            taken_at: Utc::now(),
            data: data.clone(),
        });
        trace!(seq, total = self.snapshots.len(), "checkpoint recorded");
        seq
    }

    /// Roll back to the most recent checkpoint, consuming it.
    ///
    /// The current (possibly dirty) working state is abandoned; the newest
    /// recorded snapshot is removed from the store and its data returned.
    /// Each call steps back one checkpoint further. Rolling back past the
    /// last recorded checkpoint returns `E::default()`, a defined outcome,
    /// not an error.
    pub fn rollback_one(&mut self) -> E
    where
        E: Default,
    {
        match self.snapshots.pop() {
            Some(snapshot) => {
                trace!(
                    seq = snapshot.seq,
                    remaining = self.snapshots.len(),
                    "rolled back to snapshot"
                );
                snapshot.data
            }
            None => {
                trace!("rollback on empty snapshot store; returning default");
                E::default()
            }
        }
    }
}

impl<E: Clone> Default for SnapshotStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
