//! Live tracking record for one pointer.

use crate::element::{ElementId, Target};
use crate::geometry::Point;
use crate::input::{MotionInput, PointerId};
use crate::pinch::PinchRole;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// Tracking; tap, hold and swipe may still fire
    #[default]
    Armed,
    /// Ended, cancelled or consumed by a hold
    Closed,
}

/// Which single-pointer gestures a session can still produce.
///
/// Candidates only ever get revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Candidates {
    tap: bool,
    swipe: bool,
}

impl Candidates {
    /// Create with the given eligibility.
    #[must_use]
    pub const fn new(tap: bool, swipe: bool) -> Self {
        Self { tap, swipe }
    }

    /// Tap (and hold) still possible.
    #[must_use]
    pub const fn allows_tap(&self) -> bool {
        self.tap
    }

    /// Swipe/fling classification still pending.
    #[must_use]
    pub const fn allows_swipe(&self) -> bool {
        self.swipe
    }

    /// Rule out tap and hold for the rest of the session.
    pub fn revoke_tap(&mut self) {
        self.tap = false;
    }

    /// Rule out swipe and fling for the rest of the session.
    pub fn revoke_swipe(&mut self) {
        self.swipe = false;
    }
}

/// State tracked for one active pointer, delivered as the gesture payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSession {
    /// Contact being tracked
    pub pointer: PointerId,
    /// Element whose subscription created the session
    pub bound_element: ElementId,
    /// Element hit by the starting input
    pub original_target: Target,
    /// Element hit by the latest input
    pub current_target: Target,
    /// Position at start
    pub start: Point,
    /// Latest position
    pub current: Point,
    /// Position at end, once ended
    pub end: Option<Point>,
    /// Latest per-step movement
    pub delta: Point,
    /// Clock at start (ms)
    pub start_timestamp_ms: u64,
    /// Clock of the latest input (ms)
    pub current_timestamp_ms: u64,
    /// Clock at end (ms), once ended
    pub stop_timestamp_ms: Option<u64>,
    /// Time since start (ms)
    pub elapsed_ms: u64,
    /// Remaining gesture eligibility
    pub candidates: Candidates,
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// Role in the pinch relation
    pub pinch_role: PinchRole,
    /// Latest pinch delta (meaningful while pinching)
    pub pinch_delta: f32,
    /// Pending hold timer
    #[serde(skip)]
    pub pending_hold: Option<TimerId>,
}

impl MotionSession {
    /// Start tracking from `input` on behalf of `element`.
    #[must_use]
    pub fn new(element: ElementId, input: &MotionInput, candidates: Candidates) -> Self {
        Self {
            pointer: input.pointer,
            bound_element: element,
            original_target: input.target,
            current_target: input.target,
            start: input.position,
            current: input.position,
            end: None,
            delta: Point::ORIGIN,
            start_timestamp_ms: input.timestamp_ms,
            current_timestamp_ms: input.timestamp_ms,
            stop_timestamp_ms: None,
            elapsed_ms: 0,
            candidates,
            phase: SessionPhase::Armed,
            pinch_role: PinchRole::None,
            pinch_delta: 0.0,
            pending_hold: None,
        }
    }

    /// Fold a move sample into the session.
    pub fn track(&mut self, input: &MotionInput) {
        self.elapsed_ms = input.timestamp_ms.saturating_sub(self.start_timestamp_ms);
        self.current_target = input.target;
        self.delta = input.position - self.current;
        self.current = input.position;
        self.current_timestamp_ms = input.timestamp_ms;
    }

    /// Fold the final sample into the session and close it.
    pub fn finish(&mut self, input: &MotionInput) {
        self.track(input);
        self.end = Some(input.position);
        self.stop_timestamp_ms = Some(input.timestamp_ms);
        self.phase = SessionPhase::Closed;
    }

    /// Close the session as a hold: the end snaps back to the start.
    pub fn finish_as_hold(&mut self, now_ms: u64) {
        self.end = Some(self.start);
        self.stop_timestamp_ms = Some(now_ms);
        self.elapsed_ms = now_ms.saturating_sub(self.start_timestamp_ms);
        self.phase = SessionPhase::Closed;
    }

    /// Displacement from the start position.
    #[must_use]
    pub fn displacement(&self) -> Point {
        self.current - self.start
    }

    /// Whether the session is still tracking.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.phase == SessionPhase::Armed
    }
}
