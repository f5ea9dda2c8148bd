//! Schema load lifecycle and readiness signaling.
//!
//! Schema metadata is loaded in the background while the caller's input loop
//! stays interactive, so a statement can arrive before the snapshot exists.
//! Analyzing against an empty or partial table set silently under-reports
//! issues (no tables means no indexes, so no coverage check ever fires).
//!
//! [`SchemaState`] makes the lifecycle explicit: a [`SchemaTracker`] is the
//! single writer owned by whatever drives the load, and any number of
//! [`SchemaWatcher`] clones observe it. Callers either reject analysis while
//! the snapshot is not ready ([`SchemaWatcher::snapshot`]) or block until it
//! is ([`SchemaWatcher::wait_ready`]). Dropping the tracker mid-load wakes
//! every waiter with an error, which doubles as cancellation when the
//! surrounding connection is torn down.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    error::{AppResult, schema_load_error, schema_not_ready_error},
    schema::SchemaSnapshot
};

/// Lifecycle of one database's schema snapshot.
#[derive(Debug, Clone, Default)]
pub enum SchemaState {
    #[default]
    NotLoaded,
    Loading,
    Ready(Arc<SchemaSnapshot>),
    Failed(String)
}

impl SchemaState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotLoaded => "not_loaded",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed"
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Create a tracker/watcher pair starting in [`SchemaState::NotLoaded`].
pub fn schema_channel() -> (SchemaTracker, SchemaWatcher) {
    let (tx, rx) = watch::channel(SchemaState::NotLoaded);
    (SchemaTracker { tx }, SchemaWatcher { rx })
}

/// Single writer for the schema load lifecycle.
#[derive(Debug)]
pub struct SchemaTracker {
    tx: watch::Sender<SchemaState>
}

impl SchemaTracker {
    pub fn begin_loading(&self) {
        info!("schema load started");
        self.tx.send_replace(SchemaState::Loading);
    }

    pub fn mark_ready(&self, snapshot: SchemaSnapshot) -> Arc<SchemaSnapshot> {
        let snapshot = Arc::new(snapshot);
        info!(
            database = %snapshot.database_name,
            tables = snapshot.tables.len(),
            "schema snapshot ready"
        );
        self.tx
            .send_replace(SchemaState::Ready(Arc::clone(&snapshot)));
        snapshot
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(reason = %reason, "schema load failed");
        self.tx.send_replace(SchemaState::Failed(reason));
    }

    pub fn subscribe(&self) -> SchemaWatcher {
        SchemaWatcher {
            rx: self.tx.subscribe()
        }
    }
}

/// Read side of the schema load lifecycle.
#[derive(Debug, Clone)]
pub struct SchemaWatcher {
    rx: watch::Receiver<SchemaState>
}

impl SchemaWatcher {
    /// Current state, without waiting.
    pub fn state(&self) -> SchemaState {
        self.rx.borrow().clone()
    }

    /// The ready snapshot, or an error for every other state.
    ///
    /// This is the synchronization point analysis callers consult: a
    /// statement submitted before the background load completes is rejected
    /// instead of being analyzed against an incomplete table set.
    pub fn snapshot(&self) -> AppResult<Arc<SchemaSnapshot>> {
        match &*self.rx.borrow() {
            SchemaState::Ready(snapshot) => Ok(Arc::clone(snapshot)),
            other => Err(schema_not_ready_error(other.name()))
        }
    }

    /// Wait until the load finishes, returning the snapshot or the load
    /// failure. Errors immediately if the tracker was dropped mid-load.
    pub async fn wait_ready(&mut self) -> AppResult<Arc<SchemaSnapshot>> {
        let state = self
            .rx
            .wait_for(|s| matches!(s, SchemaState::Ready(_) | SchemaState::Failed(_)))
            .await
            .map_err(|_| schema_load_error("schema loading was cancelled"))?;

        match &*state {
            SchemaState::Ready(snapshot) => Ok(Arc::clone(snapshot)),
            SchemaState::Failed(reason) => Err(schema_load_error(reason.clone())),
            other => Err(schema_not_ready_error(other.name()))
        }
    }
}
