//! Downsampling to the 8 kHz analysis rate.
//!
//! C source: `WebRtcVad_Downsampling` and `WebRtcSpl_Resample48khzTo8khz`
//! in `vad_sp.c` / `resample_48khz.c`.

use crate::fixed_point::saturate_i32_to_i16;
use crate::sample_rate::SampleRate;

/// Q15 pole of the single-pole low-pass applied before each 2:1 decimation
/// step.
const HALVE_POLE_Q15: i32 = 16384;

/// 48 kHz / 8 kHz.
const DECIMATION_FACTOR_48KHZ: usize = 6;

/// Largest half-length buffer a 32 kHz frame's first decimation stage can
/// produce (30 ms at 32 kHz is 960 samples; halved is 480).
const MAX_STAGE_LEN: usize = 480;

/// Low-passes `input` with a single-pole IIR and keeps every other
/// output sample, halving the sample rate. `out` must hold at least
/// `input.len() / 2` samples; returns the number written.
fn halve(input: &[i16], state: &mut i32, out: &mut [i16]) -> usize {
    let mut acc = *state;
    let mut produced = 0;
    for (i, &sample) in input.iter().enumerate() {
        acc += ((i32::from(sample) - acc) * HALVE_POLE_Q15) >> 15;
        if i % 2 == 1 {
            out[produced] = saturate_i32_to_i16(acc);
            produced += 1;
        }
    }
    *state = acc;
    produced
}

/// Block-averaging 6:1 decimator for 48 kHz input.
///
/// The reference implementation hardcodes a 480-sample (10 ms) block;
/// this generalizes to any frame length that is a multiple of the
/// decimation factor, which covers every legal 48 kHz frame (10/20/30 ms).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Resample48To8State {
    last_state: i32,
}

impl Resample48To8State {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn process(&mut self, input: &[i16], out: &mut [i16]) -> usize {
        let mut produced = 0;
        for chunk in input.chunks_exact(DECIMATION_FACTOR_48KHZ) {
            let sum: i32 = chunk.iter().map(|&s| i32::from(s)).sum();
            let block_avg = sum / DECIMATION_FACTOR_48KHZ as i32;
            let mut acc = self.last_state;
            acc += ((block_avg - acc) * HALVE_POLE_Q15) >> 15;
            out[produced] = saturate_i32_to_i16(acc);
            self.last_state = acc;
            produced += 1;
        }
        produced
    }
}

/// Converts an input frame at any legal rate down to 8 kHz.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Downsampler {
    stage_state: [i32; 4],
    resample_48khz: Resample48To8State,
}

impl Downsampler {
    pub(crate) fn reset(&mut self) {
        self.stage_state = [0; 4];
        self.resample_48khz.reset();
    }

    /// Writes the downsampled 8 kHz frame into `out`, returning the
    /// number of samples written.
    pub(crate) fn process(&mut self, rate: SampleRate, input: &[i16], out: &mut [i16]) -> usize {
        match rate {
            SampleRate::Hz8000 => {
                out[..input.len()].copy_from_slice(input);
                input.len()
            }
            SampleRate::Hz16000 => halve(input, &mut self.stage_state[0], out),
            SampleRate::Hz32000 => {
                let mut mid = [0i16; MAX_STAGE_LEN];
                let n = halve(input, &mut self.stage_state[0], &mut mid);
                halve(&mid[..n], &mut self.stage_state[1], out)
            }
            SampleRate::Hz48000 => self.resample_48khz.process(input, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hz8000_is_a_passthrough() {
        let mut ds = Downsampler::default();
        let input = [1, 2, 3, 4, 5];
        let mut out = [0i16; 5];
        let n = ds.process(SampleRate::Hz8000, &input, &mut out);
        assert_eq!(n, 5);
        assert_eq!(out, input);
    }

    #[test]
    fn hz16000_halves_the_length() {
        let mut ds = Downsampler::default();
        let input = [0i16; 160];
        let mut out = [0i16; 80];
        let n = ds.process(SampleRate::Hz16000, &input, &mut out);
        assert_eq!(n, 80);
    }

    #[test]
    fn hz32000_quarters_the_length() {
        let mut ds = Downsampler::default();
        let input = [0i16; 320];
        let mut out = [0i16; 80];
        let n = ds.process(SampleRate::Hz32000, &input, &mut out);
        assert_eq!(n, 80);
    }

    #[test]
    fn hz48000_divides_by_six() {
        let mut ds = Downsampler::default();
        let input = [0i16; 480];
        let mut out = [0i16; 80];
        let n = ds.process(SampleRate::Hz48000, &input, &mut out);
        assert_eq!(n, 80);
    }

    #[test]
    fn reset_clears_filter_memory() {
        let mut ds = Downsampler::default();
        let input = [i16::MAX; 160];
        let mut out = [0i16; 80];
        ds.process(SampleRate::Hz16000, &input, &mut out);
        ds.reset();
        assert_eq!(ds.stage_state, [0; 4]);
    }
}
