//! Supported input sample rates.
//!
//! C source: `fvad_set_sample_rate`/`valid_frame_length` in `fvad.c`.

use crate::error::VadError;

/// A sample rate accepted by [`crate::Vad::set_sample_rate`].
///
/// Only these four rates are legal (`spec.md` §3); any other `u32` is
/// rejected by [`SampleRate::try_from`] with [`VadError::InvalidSampleRate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRate {
    /// 8 kHz — processed directly, no downsampling.
    #[default]
    Hz8000,
    /// 16 kHz — downsampled by 2.
    Hz16000,
    /// 32 kHz — downsampled by 4 (two cascaded 2:1 steps).
    Hz32000,
    /// 48 kHz — downsampled by 6 (dedicated block decimator).
    Hz48000,
}

impl SampleRate {
    /// The rate in Hz.
    pub fn as_hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }

    /// The three legal frame lengths (10/20/30 ms) at this rate, in
    /// samples.
    pub(crate) fn legal_frame_lengths(self) -> [usize; 3] {
        let hz = self.as_hz() as usize;
        [hz / 100, hz / 50, 3 * hz / 100]
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = VadError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        match hz {
            8000 => Ok(Self::Hz8000),
            16000 => Ok(Self::Hz16000),
            32000 => Ok(Self::Hz32000),
            48000 => Ok(Self::Hz48000),
            other => Err(VadError::InvalidSampleRate(other)),
        }
    }
}
