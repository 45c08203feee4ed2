//! `CallQueue`: FIFO of calling windows awaiting service.
//!
//! The simulator pops the head, and either services it (the entry is gone
//! for good) or pushes it to the back to retry later.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::CallWindow;

/// FIFO queue of [`CallWindow`]s.
#[derive(Clone, Debug, Default)]
pub struct CallQueue {
    inner: VecDeque<CallWindow>,
}

impl CallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue holding `windows` in their given order.
    pub fn from_windows(windows: Vec<CallWindow>) -> Self {
        Self { inner: windows.into() }
    }

    /// Append `window` at the back.
    pub fn push_back(&mut self, window: CallWindow) {
        self.inner.push_back(window);
    }

    /// Remove and return the head, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<CallWindow> {
        self.inner.pop_front()
    }

    /// The head without removing it.
    pub fn front(&self) -> Option<&CallWindow> {
        self.inner.front()
    }

    /// The earliest window start among queued entries.
    pub fn earliest_start(&self) -> Option<DateTime<Utc>> {
        self.inner.iter().map(|w| w.start).min()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Queued entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &CallWindow> {
        self.inner.iter()
    }
}

impl FromIterator<CallWindow> for CallQueue {
    fn from_iter<I: IntoIterator<Item = CallWindow>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}
