#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Testing harness for Tactus gesture recognition.
//!
//! # Harness
//!
//! ```
//! use tactus_core::GestureType;
//! use tactus_test::GestureHarness;
//!
//! let mut harness = GestureHarness::new();
//! harness
//!     .subscribe(GestureType::SwipeLeft)
//!     .touch_start(1, 200.0, 100.0)
//!     .at(150)
//!     .touch_move(1, 140.0, 104.0);
//! harness.assert_emitted("swipeLeft");
//! ```
//!
//! # Scripts
//!
//! Scenarios can also be written as TOML and run with [`GestureScript`].

pub mod harness;
pub mod script;

pub use harness::{GestureHarness, DEFAULT_ELEMENT};
pub use script::{Expectation, GestureScript, ScriptAction, ScriptError, ScriptReport, ScriptStep};
