//! Recorded platform input, stored as newline-delimited JSON.
//!
//! One [`PlatformEvent`] per line. Blank lines and lines starting with `#`
//! are skipped so recordings can be annotated by hand.

use crate::adapter::InputAdapter;
use crate::event::PlatformEvent;
use tactus_core::{GestureEngine, GestureEvent};
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing a recording.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// A line is not a valid event
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
    /// An event could not be serialized
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Timestamps went backwards
    #[error("event {index} at {timestamp_ms}ms precedes the previous event at {previous_ms}ms")]
    OutOfOrder {
        /// 0-based event index
        index: usize,
        /// Offending timestamp
        timestamp_ms: u64,
        /// Timestamp of the event before it
        previous_ms: u64,
    },
}

/// An ordered stream of platform events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecording {
    events: Vec<PlatformEvent>,
}

impl InputRecording {
    /// Create an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-delimited JSON.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first malformed line, or the first event
    /// whose timestamp is earlier than its predecessor's.
    pub fn from_ndjson(text: &str) -> Result<Self, RecordingError> {
        let mut recording = Self::new();
        for (index, line) in text.lines().enumerate() {
            let line_text = line.trim();
            if line_text.is_empty() || line_text.starts_with('#') {
                continue;
            }
            let event = serde_json::from_str(line_text).map_err(|source| RecordingError::Parse {
                line: index + 1,
                source,
            })?;
            recording.events.push(event);
        }
        recording.validate()?;
        debug!(events = recording.events.len(), "recording loaded");
        Ok(recording)
    }

    /// Serialize as newline-delimited JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an event fails to serialize.
    pub fn to_ndjson(&self) -> Result<String, RecordingError> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Check that timestamps never decrease.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingError::OutOfOrder`] for the first regression.
    pub fn validate(&self) -> Result<(), RecordingError> {
        for (index, pair) in self.events.windows(2).enumerate() {
            let previous_ms = pair[0].timestamp_ms();
            let timestamp_ms = pair[1].timestamp_ms();
            if timestamp_ms < previous_ms {
                return Err(RecordingError::OutOfOrder {
                    index: index + 1,
                    timestamp_ms,
                    previous_ms,
                });
            }
        }
        Ok(())
    }

    /// Append an event.
    pub fn push(&mut self, event: PlatformEvent) {
        self.events.push(event);
    }

    /// Recorded events, in order.
    #[must_use]
    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the recording is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the last event.
    #[must_use]
    pub fn end_ms(&self) -> Option<u64> {
        self.events.last().map(PlatformEvent::timestamp_ms)
    }

    /// Feed every event through a fresh adapter into `engine`, then fire any
    /// hold timers due at the last timestamp. Returns all recognized
    /// gestures in order.
    pub fn replay(&self, engine: &mut GestureEngine) -> Vec<GestureEvent> {
        let mut adapter = InputAdapter::new();
        let mut gestures = Vec::new();
        for event in &self.events {
            gestures.extend(adapter.handle(engine, event).events);
        }
        if let Some(end_ms) = self.end_ms() {
            gestures.extend(engine.advance(end_ms));
        }
        gestures
    }
}

impl FromIterator<PlatformEvent> for InputRecording {
    fn from_iter<I: IntoIterator<Item = PlatformEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
