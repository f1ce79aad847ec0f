//! Reentrancy tracking for notification dispatch.
//!
//! [`ReentrancyMonitor`] counts active dispatch frames. [`BusyGuard`] is the
//! scope that holds one frame open; its `Drop` releases the frame on every
//! exit path, including early `?` returns and unwinding panics.

use std::cell::Cell;

use crate::error::{CollectionError, Result};

/// Counter of nested dispatch frames for one collection.
#[derive(Debug, Default)]
pub(crate) struct ReentrancyMonitor {
    depth: Cell<usize>,
}

impl ReentrancyMonitor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open a busy frame for the lifetime of the returned guard.
    pub(crate) fn enter(&self) -> BusyGuard<'_> {
        self.depth.set(self.depth.get() + 1);
        BusyGuard { monitor: self }
    }

    /// Number of open frames.
    pub(crate) fn depth(&self) -> usize {
        self.depth.get()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.depth.get() > 0
    }

    /// Fail if a mutation now could be observed inconsistently.
    ///
    /// Mutation while busy is allowed as long as at most one structural
    /// listener is registered: a lone listener cannot be surprised by a
    /// change made by another listener.
    pub(crate) fn check(&self, listeners: usize) -> Result<()> {
        if self.is_busy() && listeners > 1 {
            tracing::debug!(
                depth = self.depth(),
                listeners,
                "rejected mutation during change notification"
            );
            return Err(CollectionError::ReentrancyViolation);
        }
        Ok(())
    }
}

/// Holds a collection busy until dropped.
#[derive(Debug)]
#[must_use = "the collection is only held busy while the guard is alive"]
pub struct BusyGuard<'a> {
    monitor: &'a ReentrancyMonitor,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.monitor.depth.set(self.monitor.depth.get() - 1);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
