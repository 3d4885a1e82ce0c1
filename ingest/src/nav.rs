use log::debug;
use std::sync::{Arc, Mutex};
use tldrkit_protocol::Platform;

/// A navigation intent from the routing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    Home,
    /// Show one command; `platform` is set when the inbound address already
    /// names it, and left empty to resolve against the current selection.
    Command {
        name: String,
        platform: Option<Platform>,
    },
    /// Show one category by its slug.
    Category { slug: String },
}

/// Single-slot holder for a navigation request that arrived before
/// ingestion reached a terminal state.
///
/// At most one request is outstanding: a later `defer` overwrites an
/// earlier one, and `take` hands the survivor out exactly once for replay.
/// Handles are cheap clones sharing the same slot.
#[derive(Debug, Clone, Default)]
pub struct PendingNav {
    slot: Arc<Mutex<Option<NavRequest>>>,
}

impl PendingNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a request, replacing any earlier one.
    pub fn defer(&self, request: NavRequest) {
        let mut slot = self.lock();
        if let Some(previous) = slot.replace(request) {
            debug!("pending navigation overwritten: {previous:?}");
        }
    }

    /// Remove and return the parked request, if any.
    pub fn take(&self) -> Option<NavRequest> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<NavRequest>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
