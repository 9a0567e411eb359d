//! Normalizes platform events into engine calls.
//!
//! Each mouse button and each touch contact becomes its own pointer. While
//! any touch contact is down, mouse input is swallowed so that the emulated
//! mouse events browsers synthesize after a touch never reach the engine.

use crate::event::{Modifiers, PlatformEvent, TouchPoint};
use std::collections::BTreeSet;
use tactus_core::{
    GestureEngine, GestureEvent, MotionInput, Point, PointerId, Target, WheelInput,
};
use tracing::trace;

/// Result of handling one platform event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Gestures recognized, in emission order
    pub events: Vec<GestureEvent>,
    /// The platform default action should be suppressed
    pub prevent_default: bool,
    /// The event was ignored because a touch stream is active
    pub suppressed: bool,
}

impl Dispatch {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }

    /// Whether nothing was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Stateful bridge from platform events to a [`GestureEngine`].
#[derive(Debug, Default)]
pub struct InputAdapter {
    active_touches: BTreeSet<u32>,
    pressed_buttons: BTreeSet<u8>,
}

impl InputAdapter {
    /// Create an adapter with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one platform event to `engine`.
    ///
    /// Hold timers due at or before the event's timestamp fire first, so the
    /// returned events are in input-clock order.
    pub fn handle(&mut self, engine: &mut GestureEngine, event: &PlatformEvent) -> Dispatch {
        let mut dispatch = Dispatch {
            events: engine.advance(event.timestamp_ms()),
            ..Dispatch::default()
        };

        if event.is_mouse() && self.touch_active() {
            trace!(?event, "mouse input suppressed during touch");
            let mut suppressed = Dispatch::suppressed();
            suppressed.events = dispatch.events;
            return suppressed;
        }

        match event {
            PlatformEvent::MouseDown {
                element,
                target,
                position,
                button,
                modifiers,
                timestamp_ms,
            } => {
                let index = button.index();
                self.pressed_buttons.insert(index);
                let input = mouse_input(index, *target, *position, *modifiers, *timestamp_ms);
                dispatch.events.extend(engine.on_start(*element, &input));
            }
            PlatformEvent::MouseMove {
                target,
                position,
                modifiers,
                timestamp_ms,
            } => {
                for &index in &self.pressed_buttons {
                    let input = mouse_input(index, *target, *position, *modifiers, *timestamp_ms);
                    dispatch.events.extend(engine.on_move(&input));
                }
            }
            PlatformEvent::MouseUp {
                target,
                position,
                button,
                modifiers,
                timestamp_ms,
            } => {
                let index = button.index();
                self.pressed_buttons.remove(&index);
                let input = mouse_input(index, *target, *position, *modifiers, *timestamp_ms);
                dispatch.events.extend(engine.on_end(&input));
            }
            PlatformEvent::TouchStart {
                element,
                target,
                touches,
                timestamp_ms,
            } => {
                for touch in touches {
                    self.active_touches.insert(touch.id);
                    let input = touch_input(touch, *target, *timestamp_ms);
                    dispatch.events.extend(engine.on_start(*element, &input));
                }
            }
            PlatformEvent::TouchMove {
                target,
                touches,
                timestamp_ms,
            } => {
                dispatch.prevent_default = true;
                for touch in touches {
                    let input = touch_input(touch, *target, *timestamp_ms);
                    dispatch.events.extend(engine.on_move(&input));
                }
            }
            PlatformEvent::TouchEnd {
                target,
                touches,
                timestamp_ms,
            }
            | PlatformEvent::TouchCancel {
                target,
                touches,
                timestamp_ms,
            } => {
                for touch in touches {
                    self.active_touches.remove(&touch.id);
                    let input = touch_input(touch, *target, *timestamp_ms);
                    dispatch.events.extend(engine.on_end(&input));
                }
            }
            PlatformEvent::Wheel {
                delta_y,
                modifiers,
                timestamp_ms,
            } => {
                let input = WheelInput {
                    delta_y: *delta_y,
                    timestamp_ms: *timestamp_ms,
                    modifier: modifiers.pinch(),
                };
                dispatch.events.extend(engine.on_wheel(&input));
            }
        }
        dispatch
    }

    /// Whether any touch contact is down.
    #[must_use]
    pub fn touch_active(&self) -> bool {
        !self.active_touches.is_empty()
    }

    /// Platform indices of the pressed mouse buttons.
    pub fn pressed_buttons(&self) -> impl Iterator<Item = u8> + '_ {
        self.pressed_buttons.iter().copied()
    }

    /// Forget every pressed button and touch contact.
    pub fn reset(&mut self) {
        self.active_touches.clear();
        self.pressed_buttons.clear();
    }
}

fn mouse_input(
    index: u8,
    target: Target,
    position: Point,
    modifiers: Modifiers,
    timestamp_ms: u64,
) -> MotionInput {
    MotionInput::new(PointerId::Mouse(index), target, position, timestamp_ms)
        .with_modifier(modifiers.pinch())
}

const fn touch_input(touch: &TouchPoint, target: Target, timestamp_ms: u64) -> MotionInput {
    MotionInput::new(PointerId::Touch(touch.id), target, touch.position, timestamp_ms)
}
