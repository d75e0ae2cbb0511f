//! Window-level listener bookkeeping.
//!
//! The renderer holds a resize listener for its whole mounted lifetime; the
//! range selector holds pointer listeners only while a drag is captured.
//! Every attach hands back an id that must be detached exactly once.

use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
pub struct EventRegistry {
    next_id: u64,
    active: BTreeMap<ListenerId, ListenerKind>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.insert(id, kind);
        trace!("attached {:?} listener {:?}", kind, id);
        id
    }

    /// Returns false if `id` was not attached.
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let removed = self.active.remove(&id);
        if let Some(kind) = removed {
            trace!("detached {:?} listener {:?}", kind, id);
        }
        removed.is_some()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.active.values().filter(|k| **k == kind).count()
    }
}
