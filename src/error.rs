//! Error taxonomy for the detector's configuration and frame-processing
//! surface.
//!
//! All variants are caller-input errors: every one is recoverable by the
//! caller without tearing down the detector, and none leave the detector's
//! decision state mutated (see `spec.md` §7).

/// Errors returned by [`crate::Vad`]'s configuration and processing
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VadError {
    /// `set_sample_rate` was called with a rate other than 8000, 16000,
    /// 32000, or 48000 Hz.
    #[error("sample rate {0} Hz is not one of 8000, 16000, 32000, 48000")]
    InvalidSampleRate(u32),
    /// `set_mode` was called with a mode other than 0, 1, 2, or 3.
    #[error("mode {0} is not one of 0, 1, 2, 3")]
    InvalidMode(u8),
    /// `process` was called with a frame length that is not one of
    /// `rate/100`, `rate/50`, or `3 * rate/100` samples.
    #[error("frame length {got} is not a legal 10/20/30 ms length at {rate} Hz")]
    InvalidFrameLength {
        /// The length of the frame that was rejected.
        got: usize,
        /// The detector's currently configured sample rate.
        rate: u32,
    },
    /// `process` was called on a detector that has not been initialized.
    ///
    /// Unreachable through the safe API: [`crate::Vad::new`] and
    /// [`crate::Vad::reset`] always stamp the initialization sentinel
    /// before returning.
    #[error("process() called before the detector was initialized")]
    NotInitialized,
}
