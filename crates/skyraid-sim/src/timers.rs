//! Scheduled-event queue owned by the engine.
//!
//! Replaces background timer threads: events are scheduled against run time
//! and drained once per tick. Every event remembers the run that scheduled it
//! so a torn-down run's events can never touch a later run.

/// Handle used to cancel a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Put the hero back on its default pattern.
    RevertHeroPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub id: TimerId,
    pub run_id: u64,
    pub due_ms: u64,
    pub action: TimerAction,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<TimerEvent>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once run time reaches `due_ms`.
    pub fn schedule(&mut self, run_id: u64, due_ms: u64, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(TimerEvent {
            id,
            run_id,
            due_ms,
            action,
        });
        id
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|event| event.id != id);
        self.pending.len() != before
    }

    /// Remove and return every event for `run_id` that is due at `now_ms`,
    /// in scheduling order. Events left over from other runs are discarded.
    pub fn drain_due(&mut self, run_id: u64, now_ms: u64) -> Vec<TimerEvent> {
        let mut due = Vec::new();
        self.pending.retain(|event| {
            if event.run_id != run_id {
                return false;
            }
            if event.due_ms <= now_ms {
                due.push(*event);
                return false;
            }
            true
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
