//! BFS frontier: the FIFO queue of actors awaiting expansion and the set of
//! actor ids already discovered.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use costar_core::{ActorRef, ConnectionPath};

/// An actor waiting to be expanded, with the path that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub actor: ActorRef,
    pub path: ConnectionPath,
}

/// Level-synchronous queue plus visited set.
///
/// Ids are marked visited when first discovered, not when dequeued, so an
/// actor reachable through several co-stars is enqueued exactly once and keeps
/// the first (shortest) path that reached it. The visited set sits behind a
/// mutex: parallel workers consult it while expanding, and discoveries are
/// marked as their results are merged in entry order.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: Mutex<HashSet<String>>,
}

impl Frontier {
    /// A frontier holding only the start actor, already marked visited.
    pub fn seeded(start: ActorRef) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.id.clone());
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            actor: start,
            path: ConnectionPath::empty(),
        });
        Self {
            queue,
            visited: Mutex::new(visited),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove exactly the entries queued right now: one BFS level. Anything
    /// pushed afterwards belongs to the next level.
    pub fn take_level(&mut self) -> Vec<FrontierEntry> {
        let level_len = self.queue.len();
        self.queue.drain(..level_len).collect()
    }

    /// Append next-level entries in discovery order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = FrontierEntry>) {
        self.queue.extend(entries);
    }

    /// Atomically mark `actor_id` as discovered. Returns `true` for the
    /// first caller only.
    pub fn mark_discovered(&self, actor_id: &str) -> bool {
        let mut visited = self.visited.lock().unwrap_or_else(|e| e.into_inner());
        if visited.contains(actor_id) {
            return false;
        }
        visited.insert(actor_id.to_string())
    }

    pub fn is_visited(&self, actor_id: &str) -> bool {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(actor_id)
    }

    /// Number of distinct actor ids seen, the start actor included.
    pub fn visited_count(&self) -> usize {
        self.visited.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
