//! The single live Working Set, with a single-flight guard.
//!
//! Every ingestion pass takes a ticket before it starts. Only the holder of
//! the most recent ticket may install its result; a pass that was overtaken
//! by a newer pick or drop gets `IngestError::Superseded` and the newer
//! Working Set stays in place.

use super::WorkingSet;
use crate::error::IngestError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Proof that an ingestion pass was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestTicket {
    generation: u64,
}

/// Holder of the live Working Set
#[derive(Default)]
pub struct Workspace {
    generation: AtomicU64,
    current: RwLock<Arc<WorkingSet>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass. Any pass started earlier can no longer commit.
    pub fn begin(&self) -> IngestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        IngestTicket { generation }
    }

    /// Replace the live Working Set with `set` if `ticket` is still current.
    ///
    /// Readers see either the old set or the new one, never a mix.
    pub fn commit(&self, ticket: IngestTicket, set: WorkingSet) -> Result<Arc<WorkingSet>, IngestError> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if ticket.generation != self.generation.load(Ordering::SeqCst) {
            debug!(ticket = ticket.generation, "discarding superseded ingestion result");
            return Err(IngestError::Superseded);
        }

        let set = Arc::new(set);
        *current = Arc::clone(&set);
        Ok(set)
    }

    /// The live Working Set
    pub fn snapshot(&self) -> Arc<WorkingSet> {
        let current = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&current)
    }

    /// Drop the live Working Set and invalidate any pass in flight.
    ///
    /// Unconditional: the generation is bumped while the write lock is held,
    /// so no pass can slip in between.
    pub fn clear(&self) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "working set cleared");
        *current = Arc::new(WorkingSet::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::{IngestedItem, SourceFile};

    fn set_with(name: &str) -> WorkingSet {
        WorkingSet::new(vec![IngestedItem::file(
            SourceFile::new(name, 1, format!("/mem/{name}")),
            name,
        )])
    }

    #[test]
    fn commit_replaces_previous_set() {
        let workspace = Workspace::new();

        let first = workspace.begin();
        workspace.commit(first, set_with("a.txt")).unwrap();
        let second = workspace.begin();
        workspace.commit(second, set_with("b.txt")).unwrap();

        let live = workspace.snapshot();
        assert_eq!(live.items().len(), 1);
        assert_eq!(live.items()[0].relative_path(), "b.txt");
    }

    #[test]
    fn stale_pass_cannot_overwrite_newer_one() {
        let workspace = Workspace::new();

        let slow = workspace.begin();
        let fast = workspace.begin();
        workspace.commit(fast, set_with("fast.txt")).unwrap();

        assert!(matches!(
            workspace.commit(slow, set_with("slow.txt")),
            Err(IngestError::Superseded)
        ));
        assert_eq!(workspace.snapshot().items()[0].relative_path(), "fast.txt");
    }

    #[test]
    fn clear_invalidates_in_flight_pass() {
        let workspace = Workspace::new();
        let pending = workspace.begin();
        workspace.clear();

        assert!(workspace.commit(pending, set_with("late.txt")).is_err());
        assert!(workspace.snapshot().is_empty());
    }

    #[test]
    fn pass_started_after_clear_commits() {
        let workspace = Workspace::new();
        let t = workspace.begin();
        workspace.commit(t, set_with("old.txt")).unwrap();

        workspace.clear();
        assert!(workspace.snapshot().is_empty());

        let next = workspace.begin();
        workspace.commit(next, set_with("next.txt")).unwrap();
        assert_eq!(workspace.snapshot().items()[0].relative_path(), "next.txt");
    }

    #[test]
    fn snapshot_outlives_replacement() {
        let workspace = Workspace::new();
        let t = workspace.begin();
        workspace.commit(t, set_with("old.txt")).unwrap();
        let old = workspace.snapshot();

        let t = workspace.begin();
        workspace.commit(t, set_with("new.txt")).unwrap();

        assert_eq!(old.items()[0].relative_path(), "old.txt");
    }
}
