// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic deferred task queue.
//!
//! The viewer never sleeps or spawns. Anything that must happen later is
//! pushed here with a deadline in milliseconds, and the host drives the
//! queue by calling [`Viewer::tick`](crate::Viewer::tick) from its timer or
//! animation-frame callback.
//!
//! ```
//! use loupe_viewer::timer::TimerQueue;
//!
//! let mut queue = TimerQueue::new();
//! let late = queue.schedule(200, "late");
//! queue.schedule(100, "early");
//! assert_eq!(queue.next_deadline(), Some(100));
//!
//! assert_eq!(queue.pop_due(150), Some("early"));
//! assert_eq!(queue.pop_due(150), None);
//! assert_eq!(queue.cancel(late), Some("late"));
//! assert!(queue.is_empty());
//! ```

/// Handle to a scheduled task, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    due: u64,
    task: T,
}

/// Tasks ordered by deadline, then by scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `task` to run once `now >= due`.
    pub fn schedule(&mut self, due: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due, task });
        id
    }

    /// Removes a scheduled task, returning it if it had not run yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).task)
    }

    /// Returns `true` if the task is still scheduled.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Removes and returns the earliest task due at `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<T> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)?;
        Some(self.entries.remove(index).task)
    }

    /// Earliest deadline, if any task is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Number of scheduled tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every scheduled task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
