//! Test harness for gesture recognition.
//!
//! Drives a [`GestureEngine`] through an [`InputAdapter`] with a simulated
//! input clock and records everything it emits.

use tactus_core::{
    ElementId, GestureConfig, GestureEngine, GestureEvent, GestureType, Point, Target, TargetRole,
};
use tactus_input::{Dispatch, InputAdapter, Modifiers, MouseButton, PlatformEvent, TouchPoint};

/// Element the harness binds unless told otherwise.
pub const DEFAULT_ELEMENT: ElementId = ElementId(1);

/// Test harness for a single bound element.
#[derive(Debug)]
pub struct GestureHarness {
    engine: GestureEngine,
    adapter: InputAdapter,
    element: ElementId,
    role: TargetRole,
    modifiers: Modifiers,
    now_ms: u64,
    emitted: Vec<GestureEvent>,
    last_dispatch: Dispatch,
}

impl Default for GestureHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureHarness {
    /// Create a harness for [`DEFAULT_ELEMENT`].
    pub fn new() -> Self {
        Self::for_element(DEFAULT_ELEMENT)
    }

    /// Create a harness for `element`.
    pub fn for_element(element: ElementId) -> Self {
        Self {
            engine: GestureEngine::new(),
            adapter: InputAdapter::new(),
            element,
            role: TargetRole::Generic,
            modifiers: Modifiers::NONE,
            now_ms: 0,
            emitted: Vec::new(),
            last_dispatch: Dispatch::default(),
        }
    }

    // === Setup ===

    /// Bind the element with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn bind(&mut self, config: GestureConfig) -> &mut Self {
        if let Err(err) = self.engine.bind(self.element, config) {
            panic!("invalid gesture config: {err}");
        }
        self
    }

    /// Subscribe the element to a gesture in the default namespace.
    pub fn subscribe(&mut self, gesture: GestureType) -> &mut Self {
        self.engine.subscribe(self.element, gesture, "");
        self
    }

    /// Subscribe the element to several gestures.
    pub fn subscribe_all(&mut self, gestures: &[GestureType]) -> &mut Self {
        for gesture in gestures {
            self.subscribe(*gesture);
        }
        self
    }

    /// Role of the hit target for subsequent inputs.
    pub fn target_role(&mut self, role: TargetRole) -> &mut Self {
        self.role = role;
        self
    }

    /// Hold or release Shift for subsequent mouse and wheel inputs.
    pub fn shift(&mut self, held: bool) -> &mut Self {
        self.modifiers.shift = held;
        self
    }

    /// Move the input clock without firing timers.
    pub fn at(&mut self, now_ms: u64) -> &mut Self {
        self.now_ms = now_ms;
        self
    }

    // === Input Simulation ===

    /// A touch contact goes down.
    pub fn touch_start(&mut self, id: u32, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::TouchStart {
            element: self.element,
            target: self.target(),
            touches: vec![TouchPoint::new(id, Point::new(x, y))],
            timestamp_ms: self.now_ms,
        })
    }

    /// A touch contact moves.
    pub fn touch_move(&mut self, id: u32, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::TouchMove {
            target: self.target(),
            touches: vec![TouchPoint::new(id, Point::new(x, y))],
            timestamp_ms: self.now_ms,
        })
    }

    /// A touch contact lifts.
    pub fn touch_end(&mut self, id: u32, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::TouchEnd {
            target: self.target(),
            touches: vec![TouchPoint::new(id, Point::new(x, y))],
            timestamp_ms: self.now_ms,
        })
    }

    /// A touch contact is cancelled.
    pub fn touch_cancel(&mut self, id: u32, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::TouchCancel {
            target: self.target(),
            touches: vec![TouchPoint::new(id, Point::new(x, y))],
            timestamp_ms: self.now_ms,
        })
    }

    /// A mouse button goes down.
    pub fn mouse_down(&mut self, button: MouseButton, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::MouseDown {
            element: self.element,
            target: self.target(),
            position: Point::new(x, y),
            button,
            modifiers: self.modifiers,
            timestamp_ms: self.now_ms,
        })
    }

    /// The mouse moves.
    pub fn mouse_move(&mut self, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::MouseMove {
            target: self.target(),
            position: Point::new(x, y),
            modifiers: self.modifiers,
            timestamp_ms: self.now_ms,
        })
    }

    /// A mouse button is released.
    pub fn mouse_up(&mut self, button: MouseButton, x: f32, y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::MouseUp {
            target: self.target(),
            position: Point::new(x, y),
            button,
            modifiers: self.modifiers,
            timestamp_ms: self.now_ms,
        })
    }

    /// The wheel scrolls vertically.
    pub fn wheel(&mut self, delta_y: f32) -> &mut Self {
        self.dispatch(PlatformEvent::Wheel {
            delta_y,
            modifiers: self.modifiers,
            timestamp_ms: self.now_ms,
        })
    }

    /// Advance the clock to `now_ms`, firing due hold timers.
    pub fn advance_to(&mut self, now_ms: u64) -> &mut Self {
        self.now_ms = self.now_ms.max(now_ms);
        let fired = self.engine.advance(self.now_ms);
        self.emitted.extend(fired);
        self
    }

    // === Queries ===

    /// Every gesture emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> &[GestureEvent] {
        &self.emitted
    }

    /// Names of every gesture emitted so far.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.emitted.iter().map(GestureEvent::name).collect()
    }

    /// Number of emitted gestures named `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.emitted.iter().filter(|e| e.name() == name).count()
    }

    /// Most recent emitted gesture named `name`.
    #[must_use]
    pub fn last(&self, name: &str) -> Option<&GestureEvent> {
        self.emitted.iter().rev().find(|e| e.name() == name)
    }

    /// Result of the most recent input.
    #[must_use]
    pub const fn last_dispatch(&self) -> &Dispatch {
        &self.last_dispatch
    }

    /// Current input clock.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// The underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Mutable access to the engine, for bindings on other elements.
    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }

    /// Forget emitted gestures. Engine state is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.emitted.clear();
        self
    }

    // === Assertions ===

    /// Assert that a gesture named `name` was emitted.
    ///
    /// # Panics
    ///
    /// Panics if no such gesture was emitted.
    pub fn assert_emitted(&self, name: &str) -> &Self {
        assert!(
            self.count(name) > 0,
            "Expected gesture '{name}' to be emitted but got {:?}",
            self.names()
        );
        self
    }

    /// Assert that no gesture named `name` was emitted.
    ///
    /// # Panics
    ///
    /// Panics if such a gesture was emitted.
    pub fn assert_not_emitted(&self, name: &str) -> &Self {
        assert!(
            self.count(name) == 0,
            "Expected gesture '{name}' to not be emitted but got {:?}",
            self.names()
        );
        self
    }

    /// Assert the exact sequence of emitted gesture names.
    ///
    /// # Panics
    ///
    /// Panics if the sequence differs.
    pub fn assert_sequence(&self, expected: &[&str]) -> &Self {
        let actual = self.names();
        assert_eq!(
            actual, expected,
            "Expected gestures {expected:?} but got {actual:?}"
        );
        self
    }

    // === Internal ===

    const fn target(&self) -> Target {
        Target::new(self.element, self.role)
    }

    fn dispatch(&mut self, event: PlatformEvent) -> &mut Self {
        let dispatch = self.adapter.handle(&mut self.engine, &event);
        self.emitted.extend(dispatch.events.iter().cloned());
        self.last_dispatch = dispatch;
        self
    }
}
