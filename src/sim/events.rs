//! Scheduled round events
//!
//! Mid-round happenings (enemy waves) are queued up front with absolute
//! due times instead of being driven by countdown timers scattered
//! around the state. The tick loop drains everything due each step, so
//! an event can never fire early, and a long hitch fires the backlog in
//! order rather than dropping it.

use serde::{Deserialize, Serialize};

use crate::config::EnemySpawn;

/// A batch of enemy spawns due at an absolute sim time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Sim-time seconds at which this fires
    pub due: f32,
    pub spawns: Vec<EnemySpawn>,
}

/// Events ordered by due time; ties keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping the queue sorted by due time. An event with the
    /// same due time as existing ones goes after them.
    pub fn schedule(&mut self, event: ScheduledEvent) {
        let at = self.events.partition_point(|e| e.due <= event.due);
        self.events.insert(at, event);
    }

    /// Remove and return the front event if its due time has passed.
    /// Call in a loop to drain everything due this tick.
    pub fn pop_due(&mut self, now: f32) -> Option<ScheduledEvent> {
        if self.events.first().is_some_and(|e| e.due <= now) {
            Some(self.events.remove(0))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop everything still pending (round over)
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
