//! Cancelable delayed-callback slots driven by host time

/// Milliseconds on the host's monotonic clock
pub type Millis = u64;

/// A single pending deadline.
///
/// The slot never fires on its own: the host polls it with the current time.
/// Re-arming requires an explicit [`cancel`](TimerSlot::cancel) first, so a slot
/// never holds more than one live deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Millis>,
}

impl TimerSlot {
    pub fn arm(&mut self, now: Millis, delay: Millis) {
        debug_assert!(self.deadline.is_none(), "timer slot armed twice without cancel");
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Drop the pending deadline; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    pub fn is_due(&self, now: Millis) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}
