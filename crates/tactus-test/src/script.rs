//! TOML-described gesture scenarios.
//!
//! ```toml
//! name = "quick tap"
//! subscribe = ["tap", "hold"]
//!
//! [config]
//! tapTimeMs = 250
//!
//! [[step]]
//! at = 0
//! action = "touchStart"
//! id = 1
//!
//! [[step]]
//! at = 120
//! action = "touchEnd"
//! id = 1
//!
//! [[expect]]
//! gesture = "tap"
//! count = 1
//! ```

use crate::harness::GestureHarness;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tactus_core::{
    ConfigError, ElementId, GestureConfig, GestureEvent, GestureType, TargetRole,
    UnknownGestureType,
};
use tactus_input::MouseButton;
use thiserror::Error;

/// Errors loading or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The document is not valid TOML for a script
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The script could not be serialized
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The `[config]` table is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A subscription or expectation names an unknown gesture
    #[error(transparent)]
    UnknownGesture(#[from] UnknownGestureType),
    /// Step times went backwards
    #[error("step {index} at {at}ms precedes the previous step at {previous}ms")]
    OutOfOrder {
        /// 0-based step index
        index: usize,
        /// Offending time
        at: u64,
        /// Time of the step before it
        previous: u64,
    },
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ScriptAction {
    /// Touch contact down
    TouchStart {
        /// Contact id
        id: u32,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
    },
    /// Touch contact moves
    TouchMove {
        /// Contact id
        id: u32,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
    },
    /// Touch contact lifts
    TouchEnd {
        /// Contact id
        id: u32,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
    },
    /// Touch contact cancelled
    TouchCancel {
        /// Contact id
        id: u32,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
    },
    /// Mouse button down
    MouseDown {
        /// Button index
        #[serde(default)]
        button: u8,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
        /// Shift held
        #[serde(default)]
        shift: bool,
    },
    /// Mouse moves
    MouseMove {
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
        /// Shift held
        #[serde(default)]
        shift: bool,
    },
    /// Mouse button up
    MouseUp {
        /// Button index
        #[serde(default)]
        button: u8,
        /// X coordinate
        #[serde(default)]
        x: f32,
        /// Y coordinate
        #[serde(default)]
        y: f32,
    },
    /// Wheel scroll
    Wheel {
        /// Vertical delta
        delta: f32,
        /// Shift held
        #[serde(default)]
        shift: bool,
    },
    /// Only fire due hold timers
    Advance,
}

/// A timed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Input clock (ms)
    pub at: u64,
    /// Role of the hit target
    #[serde(default)]
    pub role: TargetRole,
    /// What happens
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// An expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    /// Gesture name
    pub gesture: String,
    /// Exact count; at least one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Pinch delta carried by the last such gesture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch_delta: Option<f32>,
}

/// A complete scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    /// Scenario name
    #[serde(default)]
    pub name: String,
    /// Bound element
    #[serde(default = "default_element")]
    pub element: ElementId,
    /// Thresholds applied at bind time
    #[serde(default)]
    pub config: GestureConfig,
    /// Gesture names to subscribe
    #[serde(default)]
    pub subscribe: Vec<String>,
    /// Ordered inputs
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
    /// Expected outcomes
    #[serde(default)]
    pub expect: Vec<Expectation>,
}

const fn default_element() -> ElementId {
    crate::harness::DEFAULT_ELEMENT
}

/// Outcome of running a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptReport {
    /// Every gesture emitted, in order
    pub events: Vec<GestureEvent>,
    /// Unmet expectations
    pub failures: Vec<String>,
}

impl ScriptReport {
    /// Whether every expectation held.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl GestureScript {
    /// Parse a script from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, the config fails validation,
    /// a gesture name is unknown or step times go backwards.
    pub fn from_toml(toml_str: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(toml_str)?;
        script.validate()?;
        Ok(script)
    }

    /// Serialize the script to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ScriptError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the config, gesture names and step order.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ScriptError> {
        self.config.validate()?;
        self.subscriptions()?;
        for expectation in &self.expect {
            GestureType::from_str(&expectation.gesture)?;
        }
        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ScriptError::OutOfOrder {
                    index: index + 1,
                    at: pair[1].at,
                    previous: pair[0].at,
                });
            }
        }
        Ok(())
    }

    /// Run the scenario in a fresh harness and check the expectations.
    ///
    /// # Errors
    ///
    /// Returns an error if the script fails validation.
    pub fn run(&self) -> Result<ScriptReport, ScriptError> {
        self.validate()?;

        let mut harness = GestureHarness::for_element(self.element);
        harness.bind(self.config);
        for gesture in self.subscriptions()? {
            harness.subscribe(gesture);
        }

        for step in &self.steps {
            harness.at(step.at).target_role(step.role);
            apply(&mut harness, &step.action);
        }
        if let Some(last) = self.steps.last() {
            harness.advance_to(last.at);
        }

        let failures = self
            .expect
            .iter()
            .filter_map(|expectation| check(&harness, expectation))
            .collect();
        Ok(ScriptReport {
            events: harness.events().to_vec(),
            failures,
        })
    }

    fn subscriptions(&self) -> Result<Vec<GestureType>, ScriptError> {
        self.subscribe
            .iter()
            .map(|name| GestureType::from_str(name).map_err(ScriptError::from))
            .collect()
    }
}

fn apply(harness: &mut GestureHarness, action: &ScriptAction) {
    match *action {
        ScriptAction::TouchStart { id, x, y } => {
            harness.touch_start(id, x, y);
        }
        ScriptAction::TouchMove { id, x, y } => {
            harness.touch_move(id, x, y);
        }
        ScriptAction::TouchEnd { id, x, y } => {
            harness.touch_end(id, x, y);
        }
        ScriptAction::TouchCancel { id, x, y } => {
            harness.touch_cancel(id, x, y);
        }
        ScriptAction::MouseDown { button, x, y, shift } => {
            harness
                .shift(shift)
                .mouse_down(MouseButton::from_index(button), x, y);
        }
        ScriptAction::MouseMove { x, y, shift } => {
            harness.shift(shift).mouse_move(x, y);
        }
        ScriptAction::MouseUp { button, x, y } => {
            harness.mouse_up(MouseButton::from_index(button), x, y);
        }
        ScriptAction::Wheel { delta, shift } => {
            harness.shift(shift).wheel(delta);
        }
        ScriptAction::Advance => {
            let now = harness.now_ms();
            harness.advance_to(now);
        }
    }
}

fn check(harness: &GestureHarness, expectation: &Expectation) -> Option<String> {
    let name = expectation.gesture.as_str();
    let actual = harness.count(name);
    match expectation.count {
        Some(expected) if actual != expected => {
            return Some(format!("expected {expected} '{name}' but got {actual}"));
        }
        None if actual == 0 => {
            return Some(format!("expected '{name}' but got {:?}", harness.names()));
        }
        _ => {}
    }

    let expected = expectation.pinch_delta?;
    let delta = harness.last(name).map(GestureEvent::pinch_delta);
    match delta {
        Some(actual) if (actual - expected).abs() <= f32::EPSILON => None,
        _ => Some(format!("expected '{name}' pinch delta {expected} but got {delta:?}")),
    }
}
