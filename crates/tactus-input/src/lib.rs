//! Platform input adapter for Tactus.
//!
//! Translates raw mouse, touch and wheel events into [`tactus_core`] engine
//! calls, and records or replays input streams.
//!
//! # Example
//!
//! ```
//! use tactus_core::{ElementId, GestureEngine, GestureType, Point, Target};
//! use tactus_input::{InputAdapter, PlatformEvent, TouchPoint};
//!
//! let list = ElementId::new(1);
//! let mut engine = GestureEngine::new();
//! engine.subscribe(list, GestureType::Tap, "");
//!
//! let mut adapter = InputAdapter::new();
//! let touch = vec![TouchPoint::new(0, Point::new(10.0, 10.0))];
//! adapter.handle(&mut engine, &PlatformEvent::TouchStart {
//!     element: list,
//!     target: Target::generic(list),
//!     touches: touch.clone(),
//!     timestamp_ms: 0,
//! });
//! let dispatch = adapter.handle(&mut engine, &PlatformEvent::TouchEnd {
//!     target: Target::generic(list),
//!     touches: touch,
//!     timestamp_ms: 90,
//! });
//! assert_eq!(dispatch.events[0].name(), "tap");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod adapter;
mod event;
mod recording;

pub use adapter::{Dispatch, InputAdapter};
pub use event::{Modifiers, MouseButton, PlatformEvent, TouchPoint};
pub use recording::{InputRecording, RecordingError};
