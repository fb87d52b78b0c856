//! Configuration for octave-blended value noise.

use log::warn;
use serde::{Deserialize, Serialize};

/// Upper bound on the octave count; each octave doubles the sampling period.
pub const MAX_OCTAVES: u32 = 24;

/// Parameters for [`super::ValueNoiseGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueNoiseConfig {
    /// Number of smooth octaves blended together (at least 1).
    pub octaves: u32,
    /// Amplitude multiplier applied per octave, in (0, 1].
    pub persistence: f32,
}

impl Default for ValueNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 8,
            persistence: 0.75,
        }
    }
}

impl ValueNoiseConfig {
    /// Broad, smooth features: few octaves, fast amplitude decay.
    pub fn smooth() -> Self {
        Self {
            octaves: 6,
            persistence: 0.5,
        }
    }

    /// Busy, high-frequency detail.
    pub fn rough() -> Self {
        Self {
            octaves: 8,
            persistence: 0.9,
        }
    }

    /// Returns a copy with out-of-range values replaced.
    ///
    /// An octave count of 0 becomes 1 and counts above [`MAX_OCTAVES`] are
    /// capped. Persistence at or below 0 becomes 0.5; above 1 it becomes 1.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;

        if out.octaves == 0 {
            warn!("value noise octave count 0 replaced by 1");
            out.octaves = 1;
        } else if out.octaves > MAX_OCTAVES {
            warn!("value noise octave count {} capped at {}", out.octaves, MAX_OCTAVES);
            out.octaves = MAX_OCTAVES;
        }

        if !(out.persistence > 0.0) {
            warn!("value noise persistence {} replaced by 0.5", out.persistence);
            out.persistence = 0.5;
        } else if out.persistence > 1.0 {
            warn!("value noise persistence {} clamped to 1.0", out.persistence);
            out.persistence = 1.0;
        }

        out
    }
}
