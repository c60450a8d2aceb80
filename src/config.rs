//! Construction-time configuration.

use crate::mode::VadMode;
use crate::sample_rate::SampleRate;

/// Configuration for [`crate::Vad::with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VadConfig {
    /// Input sample rate.
    pub sample_rate: SampleRate,
    /// Aggressiveness mode.
    pub mode: VadMode,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz8000,
            mode: VadMode::Quality,
        }
    }
}
