//! Platform input events.
//!
//! A thin, serializable description of what a windowing or browser layer
//! reports: mouse buttons, multi-touch contacts and the wheel.

use serde::{Deserialize, Serialize};
use tactus_core::{ElementId, Point, Target};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    /// Left (primary) button
    Left,
    /// Middle button (wheel click)
    Middle,
    /// Right (secondary) button
    Right,
    /// Back side button
    Back,
    /// Forward side button
    Forward,
    /// Any other button, by platform index
    Other(u8),
}

impl MouseButton {
    /// Platform button index (0 = left).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Back => 3,
            Self::Forward => 4,
            Self::Other(index) => index,
        }
    }

    /// Button for a platform index.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }
}

/// Keyboard modifiers held during an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift held
    pub shift: bool,
    /// Control held
    pub ctrl: bool,
    /// Alt/Option held
    pub alt: bool,
    /// Meta/Command held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only Shift.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether the pinch-emulation modifier (Shift) is held.
    #[must_use]
    pub const fn pinch(&self) -> bool {
        self.shift
    }
}

/// One changed touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Platform contact identifier
    pub id: u32,
    /// Client coordinates
    pub position: Point,
}

impl TouchPoint {
    /// Create a new touch point.
    #[must_use]
    pub const fn new(id: u32, position: Point) -> Self {
        Self { id, position }
    }
}

/// Raw platform input.
///
/// Start events carry the bound `element` whose listener received them;
/// move and end events are observed document-wide and carry only the hit
/// `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlatformEvent {
    /// Mouse button pressed on a bound element
    MouseDown {
        /// Element whose listener fired
        element: ElementId,
        /// Element under the cursor
        target: Target,
        /// Client coordinates
        position: Point,
        /// Button pressed
        button: MouseButton,
        /// Held modifiers
        #[serde(default)]
        modifiers: Modifiers,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Mouse moved
    MouseMove {
        /// Element under the cursor
        target: Target,
        /// Client coordinates
        position: Point,
        /// Held modifiers
        #[serde(default)]
        modifiers: Modifiers,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Mouse button released
    MouseUp {
        /// Element under the cursor
        target: Target,
        /// Client coordinates
        position: Point,
        /// Button released
        button: MouseButton,
        /// Held modifiers
        #[serde(default)]
        modifiers: Modifiers,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Touch contacts began on a bound element
    TouchStart {
        /// Element whose listener fired
        element: ElementId,
        /// Element under the contacts
        target: Target,
        /// Contacts that began
        touches: Vec<TouchPoint>,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Touch contacts moved
    TouchMove {
        /// Element under the contacts
        target: Target,
        /// Contacts that moved
        touches: Vec<TouchPoint>,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Touch contacts lifted
    TouchEnd {
        /// Element under the contacts
        target: Target,
        /// Contacts that lifted
        touches: Vec<TouchPoint>,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Touch contacts cancelled (e.g. palm rejection)
    TouchCancel {
        /// Element under the contacts
        target: Target,
        /// Contacts that were cancelled
        touches: Vec<TouchPoint>,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
    /// Mouse wheel scrolled
    Wheel {
        /// Vertical delta, in pixels
        delta_y: f32,
        /// Held modifiers
        #[serde(default)]
        modifiers: Modifiers,
        /// Platform clock (ms)
        timestamp_ms: u64,
    },
}

impl PlatformEvent {
    /// Platform clock of this event.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        match self {
            Self::MouseDown { timestamp_ms, .. }
            | Self::MouseMove { timestamp_ms, .. }
            | Self::MouseUp { timestamp_ms, .. }
            | Self::TouchStart { timestamp_ms, .. }
            | Self::TouchMove { timestamp_ms, .. }
            | Self::TouchEnd { timestamp_ms, .. }
            | Self::TouchCancel { timestamp_ms, .. }
            | Self::Wheel { timestamp_ms, .. } => *timestamp_ms,
        }
    }

    /// Check if this is a mouse button or movement event.
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseDown { .. } | Self::MouseMove { .. } | Self::MouseUp { .. }
        )
    }

    /// Check if this is a touch event.
    #[must_use]
    pub const fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart { .. }
                | Self::TouchMove { .. }
                | Self::TouchEnd { .. }
                | Self::TouchCancel { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_button_index_roundtrip() {
        for index in 0..=8 {
            assert_eq!(MouseButton::from_index(index).index(), index);
        }
        assert_eq!(MouseButton::from_index(2), MouseButton::Right);
    }

    #[test]
    fn test_modifiers_pinch_is_shift() {
        assert!(Modifiers::SHIFT.pinch());
        assert!(!Modifiers::NONE.pinch());
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(!ctrl.pinch());
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{
            "type": "touchStart",
            "element": 3,
            "target": {"element": 3, "role": "generic"},
            "touches": [{"id": 7, "position": {"x": 1.0, "y": 2.0}}],
            "timestampMs": 16
        }"#;
        let event: PlatformEvent = serde_json::from_str(json).unwrap();
        assert!(event.is_touch());
        assert_eq!(event.timestamp_ms(), 16);
        match event {
            PlatformEvent::TouchStart { touches, .. } => {
                assert_eq!(touches, vec![TouchPoint::new(7, Point::new(1.0, 2.0))]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_modifiers_default_when_missing() {
        let json = r#"{"type": "wheel", "deltaY": -4.0, "timestampMs": 9}"#;
        let event: PlatformEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            PlatformEvent::Wheel {
                delta_y: -4.0,
                modifiers: Modifiers::NONE,
                timestamp_ms: 9,
            }
        );
        assert!(!event.is_mouse());
    }
}
