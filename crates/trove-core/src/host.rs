//! The [`Host`] seam and a headless in-process implementation.
//!
//! The engine never talks to a game server or a UI directly. It asks a
//! `Host` to create containers, show them to viewers, and hide them again.
//! [`HeadlessHost`] does all of that in memory and counts every call, which
//! is what the engine's tests and the demos run against.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::container::{Container, ContainerKind, Inventory};
use crate::messages::ViewerId;

// ---------------------------------------------------------------------------
// Host trait
// ---------------------------------------------------------------------------

/// Platform operations the engine relies on.
///
/// Implementations must be callable from any thread.
pub trait Host: Send + Sync {
    /// Create a fresh empty container of `kind`.
    fn create_container(&self, kind: ContainerKind, title: &str) -> Arc<dyn Container>;

    /// Show `container` to `viewer`, replacing whatever they had open.
    fn open_container(&self, viewer: ViewerId, container: &Arc<dyn Container>);

    /// Hide whatever container `viewer` has open.
    fn close_container(&self, viewer: ViewerId);

    /// Change the title of the container `viewer` is looking at, without
    /// reopening it.
    fn retitle(&self, viewer: ViewerId, title: &str) {
        let _ = (viewer, title);
    }

    /// Push the current container contents to `viewer`.
    fn sync(&self, viewer: ViewerId) {
        let _ = viewer;
    }
}

// ---------------------------------------------------------------------------
// HeadlessHost
// ---------------------------------------------------------------------------

/// Call counters kept by [`HeadlessHost`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    pub created: usize,
    pub opened: usize,
    pub closed: usize,
    pub retitled: usize,
    pub synced: usize,
}

#[derive(Debug, Default)]
struct HeadlessState {
    open: HashMap<ViewerId, Arc<dyn Container>>,
    stats: HostStats,
}

/// A [`Host`] with no UI: it tracks which container each viewer has open
/// and counts calls.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    state: Mutex<HeadlessState>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the call counters.
    pub fn stats(&self) -> HostStats {
        self.state.lock().stats
    }

    /// The container `viewer` currently has open, if any.
    pub fn open_container_of(&self, viewer: ViewerId) -> Option<Arc<dyn Container>> {
        self.state.lock().open.get(&viewer).cloned()
    }

    /// Number of viewers with a container open.
    pub fn open_count(&self) -> usize {
        self.state.lock().open.len()
    }
}

impl Host for HeadlessHost {
    fn create_container(&self, kind: ContainerKind, title: &str) -> Arc<dyn Container> {
        self.state.lock().stats.created += 1;
        Arc::new(Inventory::new(kind, title))
    }

    fn open_container(&self, viewer: ViewerId, container: &Arc<dyn Container>) {
        let mut state = self.state.lock();
        state.stats.opened += 1;
        state.open.insert(viewer, Arc::clone(container));
    }

    fn close_container(&self, viewer: ViewerId) {
        let mut state = self.state.lock();
        state.stats.closed += 1;
        state.open.remove(&viewer);
    }

    fn retitle(&self, viewer: ViewerId, title: &str) {
        let mut state = self.state.lock();
        state.stats.retitled += 1;
        if let Some(container) = state.open.get(&viewer) {
            log::trace!("{viewer}: retitle {:?} -> {title:?}", container.title());
        }
    }

    fn sync(&self, viewer: ViewerId) {
        self.state.lock().stats.synced += 1;
        let _ = viewer;
    }
}
