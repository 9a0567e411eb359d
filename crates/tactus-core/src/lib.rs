#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Pointer gesture recognition for tactus.
//!
//! This crate turns normalized pointer samples into high-level gestures:
//! - Tap and hold: [`GestureKind::Tap`], [`GestureKind::Hold`]
//! - Directional swipe and fling: [`GestureKind::Swipe`], [`GestureKind::Fling`]
//! - Two-point and modifier pinch: [`GestureKind::PinchStart`] and friends
//!
//! Elements are bound to the [`GestureEngine`] with a [`GestureConfig`] and
//! subscribe to [`GestureType`]s under namespaces. Platform events are
//! normalized into [`MotionInput`]s by an adapter (see `tactus-input`).
//!
//! ```
//! use tactus_core::{ElementId, GestureConfig, GestureEngine, GestureType, MotionInput, Point,
//!     PointerId, Target};
//!
//! let element = ElementId::new(1);
//! let mut engine = GestureEngine::new();
//! engine.bind(element, GestureConfig::default()).unwrap();
//! engine.subscribe(element, GestureType::Tap, "demo");
//!
//! let down = MotionInput::new(PointerId::Touch(0), Target::generic(element), Point::new(5.0, 5.0), 0);
//! let up = MotionInput { timestamp_ms: 120, ..down };
//! assert!(engine.on_start(element, &down).is_empty());
//! assert_eq!(engine.on_end(&up)[0].name(), "tap");
//! ```

mod config;
mod element;
mod engine;
mod event;
mod geometry;
mod input;
mod pinch;
mod session;
mod subscription;
mod timer;

pub use config::{ConfigError, GestureConfig, IgnoreSelector};
pub use element::{ElementId, Target, TargetRole};
pub use engine::{classify_swipe, GestureEngine, SwipeOutcome};
pub use event::{Direction, GestureEvent, GestureKind, PinchPhase};
pub use geometry::Point;
pub use input::{MotionInput, PointerId, WheelInput};
pub use pinch::{PinchCoordinator, PinchRegistration, PinchRelease, PinchRole};
pub use session::{Candidates, MotionSession, SessionPhase};
pub use subscription::{
    Binding, GestureType, Namespace, Subscription, SubscriptionRegistry, UnknownGestureType,
};
pub use timer::{HoldTimer, HoldTimers, TimerId};
