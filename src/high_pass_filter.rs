//! First-order high-pass pre-filter.
//!
//! C source: `WebRtcVad_HighPassFilter` in `vad_filterbank.c`.

use crate::fixed_point::saturate_i32_to_i16;

/// Q15 pole location of the filter.
const HP_POLE_Q15: i32 = 31000;

/// Single-pole DC-blocking filter applied to the 8 kHz signal before
/// sub-band analysis, in place.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HighPassFilter {
    last_input: i16,
    last_output: i16,
}

impl HighPassFilter {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Filters `samples` in place.
    pub(crate) fn process(&mut self, samples: &mut [i16]) {
        for sample in samples.iter_mut() {
            let mut acc = i32::from(*sample) - i32::from(self.last_input);
            acc += (i32::from(self.last_output) * HP_POLE_Q15) >> 15;
            let out = saturate_i32_to_i16(acc);

            self.last_input = *sample;
            self.last_output = out;
            *sample = out;
        }
    }
}
