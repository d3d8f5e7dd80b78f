//! Source health tracking.
//!
//! Provides [`SourceState`] and [`SourceHandle`] for observing whether the
//! upstream sheet is reachable. The sheet cache updates the handle after every
//! fetch; the health endpoint reads it.
//!
//! # Usage
//!
//! ```rust
//! use sprintsheet_core::service::{SourceHandle, SourceState};
//!
//! let handle = SourceHandle::new("gviz:abc123/Issues");
//! assert_eq!(handle.state(), SourceState::Unknown);
//!
//! handle.mark_ready();
//! assert!(handle.state().is_ready());
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

// ============================================================================
// SourceState
// ============================================================================

/// Reachability of the sheet source.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceState {
    /// No fetch has been attempted yet.
    Unknown,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed.
    Failed(String),
}

impl SourceState {
    /// Returns `true` if the last fetch succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if the last fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// SourceHandle
// ============================================================================

/// Thread-safe handle for observing and updating source state.
///
/// Cheap to clone (Arc internals). Clones share state.
#[derive(Clone)]
pub struct SourceHandle {
    inner: Arc<SourceHandleInner>,
}

struct SourceHandleInner {
    name: String,
    tx: watch::Sender<SourceState>,
    last_success: watch::Sender<Option<DateTime<Utc>>>,
}

impl SourceHandle {
    /// Create a new handle for the named source.
    ///
    /// Initial state is [`SourceState::Unknown`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(SourceState::Unknown);
        let (last_success, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(SourceHandleInner {
                name: name.into(),
                tx,
                last_success,
            }),
        }
    }

    /// Get the source name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the current source state.
    pub fn state(&self) -> SourceState {
        self.inner.tx.borrow().clone()
    }

    /// Time of the most recent successful fetch.
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_success.borrow()
    }

    /// Record a successful fetch.
    pub fn mark_ready(&self) {
        self.inner.last_success.send_replace(Some(Utc::now()));
        self.set_state(SourceState::Ready);
    }

    /// Record a failed fetch.
    pub fn mark_failed(&self, reason: impl Into<String>) {
        self.set_state(SourceState::Failed(reason.into()));
    }

    fn set_state(&self, state: SourceState) {
        let previous = self.inner.tx.send_replace(state.clone());
        if previous != state {
            tracing::info!(source = %self.inner.name, "Sheet source {previous} -> {state}");
        }
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
