//! Cancellable scheduled tasks, modelled as data.
//!
//! The interaction layer never sleeps or spawns. A [`TimerSlot`] stores at
//! most one pending deadline; the owning component checks it against the
//! timestamp of each incoming event (or an explicit tick) and reacts when it
//! is due. Scheduling into an occupied slot cancels the previous task, so a
//! component can never have two live timers of the same kind.
//!
//! Each schedule bumps a generation counter and hands back a [`TimerHandle`].
//! A handle only cancels the task it was issued for: a stale handle held
//! across a reschedule is inert.

/// Milliseconds on the caller's monotonic clock.
pub type Millis = u64;

/// Identifies one scheduled task within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
}

/// A slot holding zero or one pending deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Millis>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task `delay` ms after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Millis, delay: Millis) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now.saturating_add(delay));
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Cancel whatever is pending. Returns whether a task was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Cancel only if `handle` still refers to the pending task.
    pub fn cancel_handle(&mut self, handle: TimerHandle) -> bool {
        if handle.generation == self.generation {
            self.cancel()
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Consume the pending task if its deadline has been reached.
    ///
    /// Returns the deadline so the caller can run follow-up work "as of" the
    /// moment the timer fired rather than the moment it was noticed.
    pub fn take_due(&mut self, now: Millis) -> Option<Millis> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            }
            _ => None,
        }
    }
}
