//! Normalized pointer input consumed by the engine.

use crate::element::Target;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one active contact.
///
/// Each mouse button and each touch contact is tracked as its own session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerId {
    /// Mouse button by index (0 = primary)
    Mouse(u8),
    /// Touch contact by platform identifier
    Touch(u32),
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mouse(button) => write!(f, "mouse{button}"),
            Self::Touch(id) => write!(f, "touch{id}"),
        }
    }
}

/// One normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionInput {
    /// Contact this sample belongs to
    pub pointer: PointerId,
    /// Element under the pointer
    pub target: Target,
    /// Client coordinates
    pub position: Point,
    /// Input clock, in milliseconds
    pub timestamp_ms: u64,
    /// Pinch modifier key held
    pub modifier: bool,
}

impl MotionInput {
    /// Create an unmodified sample.
    #[must_use]
    pub const fn new(pointer: PointerId, target: Target, position: Point, timestamp_ms: u64) -> Self {
        Self {
            pointer,
            target,
            position,
            timestamp_ms,
            modifier: false,
        }
    }

    /// Set the modifier flag.
    #[must_use]
    pub const fn with_modifier(mut self, modifier: bool) -> Self {
        self.modifier = modifier;
        self
    }
}

/// One normalized wheel sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelInput {
    /// Vertical wheel delta, in pixels
    pub delta_y: f32,
    /// Input clock, in milliseconds
    pub timestamp_ms: u64,
    /// Pinch modifier key held
    pub modifier: bool,
}
