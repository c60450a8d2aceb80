//! Aggressiveness modes.
//!
//! C source: `WebRtcVad_set_mode_core` in `vad_core.c`.

use crate::error::VadError;

/// Aggressiveness mode: trades false negatives against false positives.
///
/// `Quality` (0) favors recall (fewest missed speech frames); each
/// subsequent mode raises the global decision threshold and shortens the
/// hangover, favoring precision. `VeryAggressive` (3) favors precision
/// (fewest spurious speech frames).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VadMode {
    /// Mode 0 — fewest false negatives.
    #[default]
    Quality,
    /// Mode 1.
    LowBitrate,
    /// Mode 2.
    Aggressive,
    /// Mode 3 — fewest false positives.
    VeryAggressive,
}

impl VadMode {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Quality => 0,
            Self::LowBitrate => 1,
            Self::Aggressive => 2,
            Self::VeryAggressive => 3,
        }
    }
}

impl TryFrom<u8> for VadMode {
    type Error = VadError;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(Self::Quality),
            1 => Ok(Self::LowBitrate),
            2 => Ok(Self::Aggressive),
            3 => Ok(Self::VeryAggressive),
            other => Err(VadError::InvalidMode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_zero_through_three() {
        for mode in 0..=3u8 {
            assert!(VadMode::try_from(mode).is_ok(), "{mode} should be legal");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for mode in [4, 5, 255] {
            assert_eq!(VadMode::try_from(mode), Err(VadError::InvalidMode(mode)));
        }
    }

    #[test]
    fn round_trips_through_as_u8() {
        for mode in 0..=3u8 {
            assert_eq!(VadMode::try_from(mode).unwrap().as_u8(), mode);
        }
    }
}
