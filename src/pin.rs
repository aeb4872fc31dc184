//! Periodic top-most re-assertion schedule.
//!
//! Other always-on-top surfaces can take the top slot at any time, so each
//! live window gets its top-most flag re-applied once a second. The schedule
//! holds one deadline per window and feeds `ControlFlow::WaitUntil`; closing
//! a window cancels its deadline so nothing fires for dead handles.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub const PIN_PERIOD: Duration = Duration::from_secs(1);

pub struct PinSchedule<H> {
    deadlines: HashMap<H, Instant>,
    period: Duration,
}

impl<H: Copy + Eq + Hash> PinSchedule<H> {
    pub fn new() -> Self {
        Self::with_period(PIN_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        PinSchedule {
            deadlines: HashMap::new(),
            period,
        }
    }

    /// Start re-asserting `handle`, first firing one period from `now`.
    pub fn track(&mut self, handle: H, now: Instant) {
        self.deadlines.insert(handle, now + self.period);
    }

    /// Stop re-asserting `handle`. Returns false if it was not tracked.
    pub fn untrack(&mut self, handle: &H) -> bool {
        self.deadlines.remove(handle).is_some()
    }

    /// Handles whose deadline has passed; each is rescheduled one period out.
    pub fn due(&mut self, now: Instant) -> Vec<H> {
        let mut fired = Vec::new();
        for (handle, deadline) in self.deadlines.iter_mut() {
            if *deadline <= now {
                fired.push(*handle);
                *deadline = now + self.period;
            }
        }
        fired
    }

    /// Earliest pending deadline, for `ControlFlow::WaitUntil`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

impl<H: Copy + Eq + Hash> Default for PinSchedule<H> {
    fn default() -> Self {
        Self::new()
    }
}
