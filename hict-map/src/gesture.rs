//! Gesture accumulator threaded through the wheel controller

use crate::geometry::{Coordinate, Pixel};
use crate::timer::{Millis, TimerSlot};
use hict_core::BpPair;

/// Input device guess for the current gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    #[default]
    Unknown,
    Trackpad,
    Wheel,
}

/// Where the pointer was, in genomic and screen terms, at the last hovered wheel event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorState {
    /// Start bp of the bins under the pointer, `[x, y]`
    pub bps: BpPair,
    /// Pointer position in view projection coordinates
    pub coordinate: Coordinate,
    pub pixel: Pixel,
    /// Viewport center, rounded to whole pixels
    pub center_pixel: Pixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Wheel deltas are being summed until the settle slot fires
    Accumulating,
    /// Trackpad zoom applied live, waiting for the end-of-interaction slot
    Trackpad,
}

/// State of one wheel gesture.
///
/// Owned by the caller and passed by value through every controller call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub total_delta: f64,
    pub last_delta: f64,
    pub start_time: Option<Millis>,
    /// Time of the last non-zero wheel event, kept across settles
    pub last_event: Option<Millis>,
    pub device: DeviceClass,
    pub settle: TimerSlot,
    pub trackpad_end: TimerSlot,
    pub anchor: Option<AnchorState>,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        if self.trackpad_end.is_armed() {
            GesturePhase::Trackpad
        } else if self.settle.is_armed() {
            GesturePhase::Accumulating
        } else {
            GesturePhase::Idle
        }
    }

    /// Earliest pending deadline, for hosts that sleep until the next poll
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.settle.deadline(), self.trackpad_end.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Forget the accumulated delta, the anchor and the settle deadline
    pub(crate) fn reset_accumulator(&mut self) {
        self.total_delta = 0.0;
        self.start_time = None;
        self.settle.cancel();
        self.anchor = None;
    }
}
