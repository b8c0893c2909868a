//! Frame clock driving every periodic behavior.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// What a clock tick counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    /// One tick per rendered frame.
    #[default]
    Frames,
    /// Milliseconds since the clock started.
    Millis,
}

/// Monotonic tick counter, advanced once per rendered frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: ClockSource,
    frames: u64,
    started: Instant,
}

impl FrameClock {
    pub fn new(source: ClockSource) -> Self {
        Self {
            source,
            frames: 0,
            started: Instant::now(),
        }
    }

    /// Current tick.
    pub fn tick(&self) -> u64 {
        match self.source {
            ClockSource::Frames => self.frames,
            ClockSource::Millis => self.started.elapsed().as_millis() as u64,
        }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mark the end of a frame.
    pub fn advance(&mut self) {
        self.frames += 1;
    }
}
