//! Gesture notifications produced by the engine.

use crate::element::ElementId;
use crate::session::MotionSession;
use crate::subscription::GestureType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a swipe or fling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Towards negative x
    Left,
    /// Towards positive x
    Right,
    /// Towards negative y
    Up,
    /// Towards positive y
    Down,
}

/// Phase of a pinch, carried by the umbrella `pinch` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinchPhase {
    /// Pair completed
    Start,
    /// Distance changed
    Move,
    /// Pair broken
    End,
}

/// Kind of recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureKind {
    /// Short press and release
    Tap,
    /// Press held past the hold time
    Hold,
    /// Swipe below the fling speed
    Swipe {
        /// Swipe direction
        direction: Direction,
    },
    /// Swipe above the fling speed
    Fling {
        /// Fling direction
        direction: Direction,
    },
    /// Pinch began
    PinchStart,
    /// Pinch distance changed
    PinchMove,
    /// Pinch ended
    PinchEnd,
    /// Umbrella pinch notification
    Pinch {
        /// Which pinch phase triggered it
        phase: PinchPhase,
    },
}

impl GestureKind {
    /// Subscription type gating this kind.
    #[must_use]
    pub const fn gesture_type(self) -> GestureType {
        match self {
            Self::Tap => GestureType::Tap,
            Self::Hold => GestureType::Hold,
            Self::Swipe { direction } => match direction {
                Direction::Left => GestureType::SwipeLeft,
                Direction::Right => GestureType::SwipeRight,
                Direction::Up => GestureType::SwipeUp,
                Direction::Down => GestureType::SwipeDown,
            },
            Self::Fling { direction } => match direction {
                Direction::Left => GestureType::FlingLeft,
                Direction::Right => GestureType::FlingRight,
                Direction::Up => GestureType::FlingUp,
                Direction::Down => GestureType::FlingDown,
            },
            Self::PinchStart => GestureType::PinchStart,
            Self::PinchMove => GestureType::PinchMove,
            Self::PinchEnd => GestureType::PinchEnd,
            Self::Pinch { .. } => GestureType::Pinch,
        }
    }

    /// Event name as delivered to consumers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.gesture_type().name()
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized gesture with the session snapshot at emission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    /// What was recognized
    pub kind: GestureKind,
    /// Snapshot of the originating session
    pub session: MotionSession,
}

impl GestureEvent {
    /// Create an event from a session snapshot.
    #[must_use]
    pub fn new(kind: GestureKind, session: &MotionSession) -> Self {
        Self {
            kind,
            session: session.clone(),
        }
    }

    /// Element the event is scoped to.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.session.bound_element
    }

    /// Event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Pinch delta carried by the snapshot.
    #[must_use]
    pub const fn pinch_delta(&self) -> f32 {
        self.session.pinch_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Target;
    use crate::geometry::Point;
    use crate::input::{MotionInput, PointerId};
    use crate::session::Candidates;

    #[test]
    fn test_kind_names() {
        assert_eq!(GestureKind::Tap.name(), "tap");
        assert_eq!(
            GestureKind::Swipe {
                direction: Direction::Right
            }
            .name(),
            "swipeRight"
        );
        assert_eq!(
            GestureKind::Fling {
                direction: Direction::Up
            }
            .name(),
            "flingUp"
        );
        assert_eq!(
            GestureKind::Pinch {
                phase: PinchPhase::End
            }
            .name(),
            "pinch"
        );
    }

    #[test]
    fn test_event_serializes_with_payload() {
        let input = MotionInput::new(
            PointerId::Touch(4),
            Target::generic(ElementId::new(9)),
            Point::new(1.0, 2.0),
            10,
        );
        let session = MotionSession::new(ElementId::new(9), &input, Candidates::new(true, true));
        let event = GestureEvent::new(GestureKind::Hold, &session);
        assert_eq!(event.element(), ElementId::new(9));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"]["type"], "hold");
        assert_eq!(json["session"]["boundElement"], 9);
        assert_eq!(json["session"]["startTimestampMs"], 10);
    }
}
