//! Two-Gaussian-per-band noise/speech mixture model.
//!
//! C source: the model tables and `WebRtcVad_GaussianProbability` in
//! `vad_core.c` / `vad_gmm.c`.

/// Number of frequency sub-bands.
pub(crate) const NUM_CHANNELS: usize = 6;
/// Number of Gaussian components per band.
pub(crate) const NUM_GAUSSIANS: usize = 2;
/// `NUM_CHANNELS * NUM_GAUSSIANS`.
pub(crate) const TABLE_SIZE: usize = NUM_CHANNELS * NUM_GAUSSIANS;

/// Immutable per-Gaussian weights for the noise mixture.
pub(crate) const NOISE_DATA_WEIGHTS: [i16; TABLE_SIZE] =
    [34, 62, 72, 66, 53, 25, 94, 66, 56, 62, 75, 103];
/// Immutable per-Gaussian weights for the speech mixture.
pub(crate) const SPEECH_DATA_WEIGHTS: [i16; TABLE_SIZE] =
    [48, 82, 45, 87, 50, 47, 80, 46, 83, 41, 78, 81];

/// Prior noise-Gaussian means; the detector's working copy starts here and
/// adapts online (see `noise_model`).
pub(crate) const NOISE_DATA_MEANS: [i16; TABLE_SIZE] =
    [6738, 4892, 7065, 6715, 6771, 3369, 7646, 3863, 7820, 7266, 5020, 4362];
/// Immutable speech-Gaussian means (the speech model never adapts).
pub(crate) const SPEECH_DATA_MEANS: [i16; TABLE_SIZE] = [
    8306, 10085, 10078, 11823, 11843, 6309, 9473, 9571, 10879, 7581, 8180, 7483,
];

/// Prior noise-Gaussian standard deviations; adapts online.
pub(crate) const NOISE_DATA_STDS: [i16; TABLE_SIZE] =
    [378, 1064, 493, 582, 688, 593, 474, 697, 475, 277, 1198, 1106];
/// Immutable speech-Gaussian standard deviations.
pub(crate) const SPEECH_DATA_STDS: [i16; TABLE_SIZE] =
    [555, 505, 567, 524, 585, 1231, 509, 828, 492, 1540, 1079, 850];

/// Q15 noise-mean adaptation rate (`≈ 0.02`) applied in `noise_model`.
pub(crate) const NOISE_UPDATE_CONST: i16 = 655;

/// Weighted Gaussian-shaped score of `input` under `N(mean, std)`, scaled
/// by `weight`.
///
/// Pure and platform-independent: identical inputs always produce
/// identical outputs, since every step is integer arithmetic (no
/// floating point, no table lookups that could vary by libm).
pub(crate) fn gaussian_probability(input: i16, mean: i16, std: i16, weight: i16) -> i32 {
    let diff = i32::from(input) - i32::from(mean);
    let std = std.max(1);

    // Q12 reciprocal of the standard deviation.
    let inv_std = (4096 * 128) / i32::from(std);
    let normalized = (diff * inv_std) >> 12;
    let squared = (normalized * normalized) >> 8;

    // Piecewise-linear approximation of exp(-z^2/2).
    let prob = if squared > 1024 {
        0
    } else if squared > 512 {
        (1024 - squared) >> 2
    } else if squared > 256 {
        128 + ((512 - squared) >> 1)
    } else {
        256 - (squared >> 1)
    };

    (prob * i32::from(weight)) >> 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn peak_at_the_mean_is_the_full_weighted_probability() {
        let prob = gaussian_probability(100, 100, 50, 100);
        assert_eq!(prob, (256 * 100) >> 7);
    }

    #[test]
    fn far_from_the_mean_is_zero() {
        assert_eq!(gaussian_probability(30000, 100, 10, 100), 0);
    }

    #[test]
    fn std_below_one_is_clamped_to_one() {
        // Must not divide by zero or panic.
        let a = gaussian_probability(0, 0, 0, 100);
        let b = gaussian_probability(0, 0, 1, 100);
        assert_eq!(a, b);
    }

    #[proptest]
    fn never_negative_and_bounded_by_weight(
        input: i16,
        mean: i16,
        std: i16,
        #[strategy(0i16..=128)] weight: i16,
    ) {
        let prob = gaussian_probability(input, mean, std, weight);
        assert!(prob >= 0);
        assert!(prob <= i32::from(weight) * 2);
    }

    #[proptest]
    fn deterministic(input: i16, mean: i16, std: i16, weight: i16) {
        let a = gaussian_probability(input, mean, std, weight);
        let b = gaussian_probability(input, mean, std, weight);
        assert_eq!(a, b);
    }
}
