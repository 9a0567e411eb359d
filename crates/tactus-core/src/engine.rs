//! The gesture recognition engine.
//!
//! [`GestureEngine`] owns every piece of mutable recognition state: element
//! bindings, one [`MotionSession`] per active pointer, the pinch relation and
//! the pending hold timers. Inputs are fed synchronously through
//! [`GestureEngine::on_start`], [`GestureEngine::on_move`],
//! [`GestureEngine::on_end`] and [`GestureEngine::on_wheel`]; hold timers fire
//! from [`GestureEngine::advance`]. Every entry point returns the gestures it
//! recognized, in emission order, and treats out-of-order input as a no-op.

use crate::config::{ConfigError, GestureConfig};
use crate::element::ElementId;
use crate::event::{Direction, GestureEvent, GestureKind, PinchPhase};
use crate::geometry::Point;
use crate::input::{MotionInput, PointerId, WheelInput};
use crate::pinch::{PinchCoordinator, PinchRegistration};
use crate::session::{Candidates, MotionSession};
use crate::subscription::{GestureType, Subscription, SubscriptionRegistry};
use crate::timer::HoldTimers;
use std::collections::HashMap;
use tracing::{debug, trace};

const PINCH_START_TYPES: [GestureType; 2] = [GestureType::PinchStart, GestureType::Pinch];
const PINCH_MOVE_TYPES: [GestureType; 2] = [GestureType::PinchMove, GestureType::Pinch];
const TAP_TYPES: [GestureType; 2] = [GestureType::Tap, GestureType::Hold];

/// Result of testing a session's displacement for a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    /// Still inside the active radius
    Pending,
    /// Crossed the active radius with too much passive-axis movement
    Rejected,
    /// Crossed the active radius cleanly
    Detected {
        /// Direction of the dominant axis
        direction: Direction,
        /// Dominant-axis speed in px/ms
        speed: f32,
    },
}

/// Classify a displacement from the session start.
///
/// The dominant axis is X only when strictly larger than Y; the passive axis
/// must stay strictly inside `swipe_passive_radius`.
#[must_use]
pub fn classify_swipe(displacement: Point, elapsed_ms: u64, config: &GestureConfig) -> SwipeOutcome {
    let magnitude = displacement.abs();
    if magnitude.x + magnitude.y <= config.swipe_active_radius {
        return SwipeOutcome::Pending;
    }

    let (direction, active, passive) = if magnitude.x > magnitude.y {
        let direction = if displacement.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        (direction, magnitude.x, magnitude.y)
    } else {
        let direction = if displacement.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        (direction, magnitude.y, magnitude.x)
    };

    if passive >= config.swipe_passive_radius {
        return SwipeOutcome::Rejected;
    }

    SwipeOutcome::Detected {
        direction,
        speed: active / elapsed_ms as f32,
    }
}

/// Recognizes gestures for every bound element.
#[derive(Debug, Default)]
pub struct GestureEngine {
    registry: SubscriptionRegistry,
    sessions: HashMap<PointerId, MotionSession>,
    pinch: PinchCoordinator,
    timers: HoldTimers,
}

impl GestureEngine {
    /// Create an engine with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Bind `element` with a validated configuration.
    ///
    /// Returns `Ok(false)` if the element was already bound; its original
    /// configuration is kept.
    pub fn bind(&mut self, element: ElementId, config: GestureConfig) -> Result<bool, ConfigError> {
        config.validate()?;
        Ok(self.registry.bind(element, config))
    }

    /// Request `gesture` on `element` for a dot-delimited namespace list.
    pub fn subscribe(&mut self, element: ElementId, gesture: GestureType, namespaces: &str) {
        self.registry.subscribe(element, gesture, namespaces);
    }

    /// Withdraw `gesture` on `element` (all namespaces when `None`).
    pub fn unsubscribe(&mut self, element: ElementId, gesture: GestureType, namespaces: Option<&str>) {
        self.registry.unsubscribe(element, gesture, namespaces);
    }

    /// Whether `element` requests nothing, so its input listeners can go.
    #[must_use]
    pub fn is_empty(&self, element: ElementId) -> bool {
        self.registry.is_empty(element)
    }

    /// Tear down the binding of an element that requests nothing.
    pub fn release(&mut self, element: ElementId) -> bool {
        self.registry.release(element)
    }

    /// Element bindings.
    #[must_use]
    pub const fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// A pointer went down on `element`.
    pub fn on_start(&mut self, element: ElementId, input: &MotionInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let pointer = input.pointer;

        if self.sessions.contains_key(&pointer) {
            trace!(%pointer, "duplicate start ignored");
            return events;
        }
        let Some(binding) = self.registry.binding(element) else {
            trace!(%pointer, %element, "start on unbound element ignored");
            return events;
        };
        let subscription = &binding.subscription;
        let config = binding.config;

        let wants_pinch = subscription.requests_any(&PINCH_START_TYPES);
        if input.modifier && !wants_pinch {
            trace!(%pointer, "modifier start without pinch subscriber ignored");
            return events;
        }
        if config.ignore_selector.matches(input.target.role) {
            trace!(%pointer, role = ?input.target.role, "start on ignored target");
            return events;
        }

        let candidates = Candidates::new(
            subscription.requests_any(&TAP_TYPES),
            subscription.requests_any(&GestureType::SWIPES),
        );
        let mut session = MotionSession::new(element, input, candidates);
        debug!(%pointer, %element, ?candidates, "session armed");

        if wants_pinch {
            let registration = self.pinch.register(pointer, input.modifier, &mut self.sessions);
            session.pinch_role = registration.role();
            match registration {
                PinchRegistration::ModifierPinch | PinchRegistration::Primary => {
                    self.sessions.insert(pointer, session);
                    return events;
                }
                PinchRegistration::Secondary => {
                    session.pinch_delta = 0.0;
                    emit_pinch(&mut events, subscription, &session, PinchPhase::Start);
                    self.sessions.insert(pointer, session);
                    return events;
                }
                PinchRegistration::Unavailable => {}
            }
        }

        if subscription.requests(GestureType::Hold) {
            let deadline = input.timestamp_ms.saturating_add(config.held_tap_time_ms);
            session.pending_hold = Some(self.timers.schedule(pointer, deadline));
        }
        self.sessions.insert(pointer, session);
        events
    }

    /// A tracked pointer moved.
    pub fn on_move(&mut self, input: &MotionInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let pointer = input.pointer;

        let Some(session) = self.sessions.get_mut(&pointer) else {
            return events;
        };
        let element = session.bound_element;
        let config = self.registry.config(element);
        let subscription = self.registry.subscription(element);

        session.track(input);

        if session.candidates.allows_tap() && leaves_tap(session, &config) {
            session.candidates.revoke_tap();
            if let Some(timer) = session.pending_hold.take() {
                self.timers.cancel(timer);
            }
            trace!(%pointer, "tap disqualified");
        }

        if session.candidates.allows_swipe() {
            match classify_swipe(session.displacement(), session.elapsed_ms, &config) {
                SwipeOutcome::Pending => {}
                SwipeOutcome::Rejected => session.candidates.revoke_swipe(),
                SwipeOutcome::Detected { direction, speed } => {
                    session.candidates.revoke_swipe();
                    let fling = GestureKind::Fling { direction };
                    if speed > config.fling_speed_threshold
                        && subscription.requests(fling.gesture_type())
                    {
                        events.push(GestureEvent::new(fling, session));
                    } else {
                        emit(&mut events, subscription, GestureKind::Swipe { direction }, session);
                    }
                }
            }
        }

        let position = session.current;
        let step_y = session.delta.y;

        let pinch_delta = if let Some(partner) = self.pinch.partner(pointer) {
            self.sessions
                .get(&partner)
                .map(|other| other.current)
                .map(|other| self.pinch.measure(position, other, config.touch_pinch_multiplier))
        } else if self.pinch.is_modifier_pinch(pointer) && subscription.requests_any(&PINCH_MOVE_TYPES) {
            Some(step_y * config.mouse_pinch_multiplier)
        } else {
            None
        };

        if let Some(delta) = pinch_delta {
            if let Some(session) = self.sessions.get_mut(&pointer) {
                session.pinch_delta = delta;
                emit_pinch(&mut events, subscription, session, PinchPhase::Move);
            }
        }
        events
    }

    /// A tracked pointer lifted or was cancelled.
    pub fn on_end(&mut self, input: &MotionInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let pointer = input.pointer;

        let Some(mut session) = self.sessions.remove(&pointer) else {
            return events;
        };
        let element = session.bound_element;
        let config = self.registry.config(element);
        let subscription = self.registry.subscription(element);

        session.finish(input);
        if let Some(timer) = session.pending_hold.take() {
            self.timers.cancel(timer);
        }

        if session.candidates.allows_tap() && session.elapsed_ms <= config.tap_time_ms {
            emit(&mut events, subscription, GestureKind::Tap, &session);
        }

        if self.pinch.release(pointer, &mut self.sessions).ended {
            session.pinch_delta = 0.0;
            emit_pinch(&mut events, subscription, &session, PinchPhase::End);
        }

        debug!(%pointer, elapsed_ms = session.elapsed_ms, "session closed");
        events
    }

    /// Wheel input. Drives the live modifier-pinch session, if any.
    pub fn on_wheel(&mut self, input: &WheelInput) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if !input.modifier {
            return events;
        }
        let Some(session) = self
            .pinch
            .modifier_pointer()
            .and_then(|pointer| self.sessions.get_mut(&pointer))
        else {
            return events;
        };

        let element = session.bound_element;
        let subscription = self.registry.subscription(element);
        if !subscription.requests_any(&PINCH_MOVE_TYPES) {
            return events;
        }

        session.current_timestamp_ms = input.timestamp_ms;
        session.elapsed_ms = input.timestamp_ms.saturating_sub(session.start_timestamp_ms);
        session.pinch_delta = input.delta_y * self.registry.config(element).mouse_pinch_multiplier;
        emit_pinch(&mut events, subscription, session, PinchPhase::Move);
        events
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fire every hold timer due at `now_ms` on the input clock.
    pub fn advance(&mut self, now_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        for timer in self.timers.take_due(now_ms) {
            let armed = self.sessions.get(&timer.pointer).is_some_and(|s| {
                s.pending_hold == Some(timer.id) && s.is_armed() && s.candidates.allows_tap()
            });
            if !armed {
                trace!(pointer = %timer.pointer, "stale hold timer");
                continue;
            }
            let Some(mut session) = self.sessions.remove(&timer.pointer) else {
                continue;
            };

            session.pending_hold = None;
            session.finish_as_hold(timer.deadline_ms);
            self.pinch.release(timer.pointer, &mut self.sessions);
            debug!(pointer = %timer.pointer, "hold fired");

            let subscription = self.registry.subscription(session.bound_element);
            emit(&mut events, subscription, GestureKind::Hold, &session);
        }
        events
    }

    /// Earliest pending hold deadline, for arming a host timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Live session for `pointer`.
    #[must_use]
    pub fn session(&self, pointer: PointerId) -> Option<&MotionSession> {
        self.sessions.get(&pointer)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The pinch relation.
    #[must_use]
    pub const fn pinch(&self) -> &PinchCoordinator {
        &self.pinch
    }

    /// Drop every session, timer and pinch slot. Bindings are kept.
    pub fn reset(&mut self) {
        self.sessions.clear();
        self.timers.clear();
        self.pinch.clear();
    }
}

/// Tap eligibility is lost on a large single step or a long press. The
/// distance test compares the per-step delta, not the total displacement.
fn leaves_tap(session: &MotionSession, config: &GestureConfig) -> bool {
    session.delta.x.abs() > config.tap_radius
        || session.delta.y.abs() > config.tap_radius
        || session.elapsed_ms > config.tap_time_ms
}

fn emit(
    events: &mut Vec<GestureEvent>,
    subscription: &Subscription,
    kind: GestureKind,
    session: &MotionSession,
) {
    if subscription.requests(kind.gesture_type()) {
        events.push(GestureEvent::new(kind, session));
    }
}

fn emit_pinch(
    events: &mut Vec<GestureEvent>,
    subscription: &Subscription,
    session: &MotionSession,
    phase: PinchPhase,
) {
    let specific = match phase {
        PinchPhase::Start => GestureKind::PinchStart,
        PinchPhase::Move => GestureKind::PinchMove,
        PinchPhase::End => GestureKind::PinchEnd,
    };
    emit(events, subscription, specific, session);
    emit(events, subscription, GestureKind::Pinch { phase }, session);
}
