//! Online noise-model adaptation via minimum statistics.
//!
//! C source: `WebRtcVad_FindMinimum` in `vad_sp.c`.

use crate::fixed_point::saturate_i32_to_i16;
use crate::gaussian_model::{
    NOISE_DATA_MEANS, NOISE_DATA_STDS, NOISE_UPDATE_CONST, NUM_CHANNELS, TABLE_SIZE,
};

const WINDOW: usize = 16;

/// Per-band sliding window of recent features, plus the noise Gaussians
/// that adapt from it.
///
/// The noise means/stds here are the detector's *mutable* copy (`spec.md`
/// §3); the speech means/stds never change and live as constants in
/// [`crate::gaussian_model`].
#[derive(Debug, Clone)]
pub(crate) struct NoiseModel {
    pub(crate) means: [i16; TABLE_SIZE],
    pub(crate) stds: [i16; TABLE_SIZE],
    low_value_vector: [[i16; WINDOW]; NUM_CHANNELS],
    index_vector: [[i16; WINDOW]; NUM_CHANNELS],
    mean_value: [i16; NUM_CHANNELS],
}

impl NoiseModel {
    pub(crate) fn reset() -> Self {
        Self {
            means: NOISE_DATA_MEANS,
            stds: NOISE_DATA_STDS,
            low_value_vector: [[10_000; WINDOW]; NUM_CHANNELS],
            index_vector: [[0; WINDOW]; NUM_CHANNELS],
            mean_value: [1600; NUM_CHANNELS],
        }
    }

    /// Per-band noise-floor estimate (`mean_value` in `vad_sp.c`), exposed
    /// for diagnostics.
    #[cfg_attr(not(test), expect(dead_code, reason = "diagnostic accessor"))]
    pub(crate) fn noise_floor(&self) -> &[i16; NUM_CHANNELS] {
        &self.mean_value
    }

    /// Updates the minimum-statistics window and nudges the noise
    /// Gaussians toward the current feature vector. Skipped entirely by
    /// the caller when the frame is below the minimum-energy gate.
    pub(crate) fn update(&mut self, features: &[i16; NUM_CHANNELS]) {
        for i in 0..NUM_CHANNELS {
            let window = &mut self.low_value_vector[i];
            let ages = &mut self.index_vector[i];

            let mut min_val = features[i];
            for &v in window.iter() {
                if v < min_val {
                    min_val = v;
                }
            }

            for j in (1..WINDOW).rev() {
                window[j] = window[j - 1];
                ages[j] = ages[j - 1].saturating_add(1);
            }
            window[0] = features[i];
            ages[0] = 0;

            if min_val < self.mean_value[i] {
                self.mean_value[i] =
                    ((i32::from(self.mean_value[i]) * 31 + i32::from(min_val)) >> 5) as i16;
            } else {
                self.mean_value[i] =
                    ((i32::from(self.mean_value[i]) * 63 + i32::from(min_val)) >> 6) as i16;
            }

            let delta = ((i32::from(features[i]) - i32::from(self.means[i * 2]))
                * i32::from(NOISE_UPDATE_CONST))
                >> 15;
            self.means[i * 2] = saturate_i32_to_i16(i32::from(self.means[i * 2]) + delta);
            self.means[i * 2 + 1] =
                saturate_i32_to_i16(i32::from(self.means[i * 2 + 1]) + (delta >> 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_seeds_priors() {
        let model = NoiseModel::reset();
        assert_eq!(model.means, NOISE_DATA_MEANS);
        assert_eq!(model.stds, NOISE_DATA_STDS);
        assert_eq!(*model.noise_floor(), [1600; NUM_CHANNELS]);
    }

    #[test]
    fn update_nudges_noise_means_toward_the_feature() {
        let mut model = NoiseModel::reset();
        let before = model.means;
        // Feed a feature far above every prior mean, repeatedly.
        let high = [20_000i16; NUM_CHANNELS];
        for _ in 0..50 {
            model.update(&high);
        }
        for i in 0..NUM_CHANNELS {
            assert!(
                model.means[i * 2] > before[i * 2],
                "band {i} first-Gaussian mean should have risen toward 20000"
            );
        }
    }

    #[test]
    fn window_tracks_the_running_minimum() {
        let mut model = NoiseModel::reset();
        // Drive the floor down with a low, steady feature.
        let low = [0i16; NUM_CHANNELS];
        for _ in 0..20 {
            model.update(&low);
        }
        for &floor in model.noise_floor().iter() {
            assert!(floor < 1600, "noise floor should have decayed toward 0");
        }
    }
}
