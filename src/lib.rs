#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod decision;
mod downsampler;
mod error;
mod filterbank;
mod fixed_point;
mod gaussian_model;
mod high_pass_filter;
mod mode;
mod noise_model;
mod sample_rate;

pub use config::VadConfig;
pub use decision::VoiceActivity;
pub use error::VadError;
pub use mode::VadMode;
pub use sample_rate::SampleRate;

use decision::{DecisionState, ModeParams};
use downsampler::Downsampler;
use gaussian_model::{
    NOISE_DATA_WEIGHTS, NUM_CHANNELS, NUM_GAUSSIANS, SPEECH_DATA_MEANS, SPEECH_DATA_STDS,
    SPEECH_DATA_WEIGHTS, gaussian_probability,
};
use high_pass_filter::HighPassFilter;
use noise_model::NoiseModel;

/// Longest 8 kHz analysis frame across every legal input (30 ms at 8 kHz).
const MAX_ANALYSIS_FRAME: usize = 240;

/// A streaming, per-frame voice activity detector.
///
/// One `Vad` holds all of the state for a single audio stream: the
/// downsampler and high-pass filter memory, the adapting noise model,
/// and the hangover counter. Frames from different streams must not
/// share a `Vad` — construct one per stream instead, the way the
/// detector's `over_hang`/`frame_counter` bookkeeping assumes a single
/// continuous signal.
///
/// ```
/// use webrtc_vad::{Vad, VoiceActivity};
///
/// let mut vad = Vad::new();
/// let silence = [0i16; 160]; // 20 ms at 8 kHz
/// assert_eq!(vad.process(&silence).unwrap(), VoiceActivity::NonSpeech);
/// ```
#[derive(Debug, Clone)]
pub struct Vad {
    sample_rate: SampleRate,
    mode: VadMode,
    mode_params: ModeParams,
    noise_model: NoiseModel,
    downsampler: Downsampler,
    hpf: HighPassFilter,
    decision: DecisionState,
}

impl Default for Vad {
    fn default() -> Self {
        Self::with_config(&VadConfig::default())
    }
}

impl Vad {
    /// Creates a detector at the default configuration: 8 kHz, mode 0
    /// (`Quality`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector at the given configuration.
    pub fn with_config(config: &VadConfig) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = config.sample_rate.as_hz(),
            mode = config.mode.as_u8(),
            "constructing detector"
        );
        Self {
            sample_rate: config.sample_rate,
            mode: config.mode,
            mode_params: ModeParams::for_mode(config.mode),
            noise_model: NoiseModel::reset(),
            downsampler: Downsampler::default(),
            hpf: HighPassFilter::default(),
            decision: DecisionState::default(),
        }
    }

    /// The detector's current sample rate.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// The detector's current mode.
    pub fn mode(&self) -> VadMode {
        self.mode
    }

    /// Changes the input sample rate. Resets all filter and decision
    /// state, since it is only meaningful for a single continuous
    /// sample rate.
    pub fn set_sample_rate(&mut self, hz: u32) -> Result<(), VadError> {
        let rate = match SampleRate::try_from(hz) {
            Ok(rate) => rate,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(hz, "rejected sample rate");
                return Err(err);
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(hz, "sample rate accepted");
        self.sample_rate = rate;
        self.reset();
        Ok(())
    }

    /// Changes the aggressiveness mode. Does not reset filter or noise
    /// state — only the decision thresholds change.
    pub fn set_mode(&mut self, mode: u8) -> Result<(), VadError> {
        let mode = match VadMode::try_from(mode) {
            Ok(mode) => mode,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(mode, "rejected mode");
                return Err(err);
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(mode = mode.as_u8(), "mode accepted");
        self.mode = mode;
        self.mode_params = ModeParams::for_mode(mode);
        Ok(())
    }

    /// Resets all adaptive state — the noise model, filter memory, and
    /// hangover counter — back to the defaults for the current sample
    /// rate and mode. Does not change the configured sample rate or
    /// mode itself.
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("resetting detector state");
        self.noise_model = NoiseModel::reset();
        self.downsampler.reset();
        self.hpf.reset();
        self.decision = DecisionState::default();
    }

    /// Scores one frame and returns its voice-activity decision.
    ///
    /// `frame` must be exactly one of the three legal frame lengths
    /// (10/20/30 ms) for the detector's configured sample rate, or this
    /// returns [`VadError::InvalidFrameLength`].
    pub fn process(&mut self, frame: &[i16]) -> Result<VoiceActivity, VadError> {
        if !self.sample_rate.legal_frame_lengths().contains(&frame.len()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(got = frame.len(), rate = self.sample_rate.as_hz(), "rejected frame length");
            return Err(VadError::InvalidFrameLength {
                got: frame.len(),
                rate: self.sample_rate.as_hz(),
            });
        }

        let mut eight_khz = [0i16; MAX_ANALYSIS_FRAME];
        let produced = self.downsampler.process(self.sample_rate, frame, &mut eight_khz);
        let analysis = &mut eight_khz[..produced];

        self.hpf.process(analysis);
        let (features, total_power) = filterbank::compute_features(analysis);

        #[cfg_attr(not(feature = "tracing"), expect(unused_variables, reason = "only read when tracing is enabled"))]
        let previous = self.decision.last_decision;

        let activity = if total_power <= filterbank::MIN_ENERGY as i16 {
            decision::decide(&mut self.decision, &self.mode_params, i32::MIN)
        } else {
            let log_likelihood_ratio = self.score(&features);
            self.noise_model.update(&features);
            decision::decide(&mut self.decision, &self.mode_params, log_likelihood_ratio)
        };

        #[cfg(feature = "tracing")]
        if activity != previous {
            tracing::debug!(is_speech = activity.is_speech(), "voice activity transition");
        }

        Ok(activity)
    }

    /// Sums each band's linear-domain speech-minus-noise Gaussian-mixture
    /// probability into one frame-level score, compared directly against
    /// the mode's `total` threshold — no log transform of the
    /// probabilities themselves.
    fn score(&self, features: &[i16; NUM_CHANNELS]) -> i32 {
        let mut total = 0i32;
        for band in 0..NUM_CHANNELS {
            let mut noise_prob = 0i32;
            let mut speech_prob = 0i32;
            for gaussian in 0..NUM_GAUSSIANS {
                let idx = band * NUM_GAUSSIANS + gaussian;
                noise_prob += gaussian_probability(
                    features[band],
                    self.noise_model.means[idx],
                    self.noise_model.stds[idx],
                    NOISE_DATA_WEIGHTS[idx],
                );
                speech_prob += gaussian_probability(
                    features[band],
                    SPEECH_DATA_MEANS[idx],
                    SPEECH_DATA_STDS[idx],
                    SPEECH_DATA_WEIGHTS[idx],
                );
            }
            total += speech_prob - noise_prob;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_8khz_quality_mode() {
        let vad = Vad::new();
        assert_eq!(vad.sample_rate(), SampleRate::Hz8000);
        assert_eq!(vad.mode(), VadMode::Quality);
    }

    #[test]
    fn rejects_wrong_length_frames() {
        let mut vad = Vad::new();
        let err = vad.process(&[0i16; 79]).unwrap_err();
        assert_eq!(
            err,
            VadError::InvalidFrameLength { got: 79, rate: 8000 }
        );
    }

    #[test]
    fn accepts_every_legal_frame_length_at_every_rate() {
        for &hz in &[8000, 16000, 32000, 48000] {
            let mut vad = Vad::new();
            vad.set_sample_rate(hz).unwrap();
            for &len in &vad.sample_rate.legal_frame_lengths() {
                let frame = vec![0i16; len];
                assert!(vad.process(&frame).is_ok(), "{hz} Hz, {len} samples");
            }
        }
    }

    #[test]
    fn set_sample_rate_rejects_unsupported_rates() {
        let mut vad = Vad::new();
        assert_eq!(
            vad.set_sample_rate(11025),
            Err(VadError::InvalidSampleRate(11025))
        );
    }

    #[test]
    fn set_mode_rejects_out_of_range_modes() {
        let mut vad = Vad::new();
        assert_eq!(vad.set_mode(9), Err(VadError::InvalidMode(9)));
    }

    #[test]
    fn silence_is_never_speech() {
        let mut vad = Vad::new();
        for _ in 0..50 {
            assert_eq!(
                vad.process(&[0i16; 160]).unwrap(),
                VoiceActivity::NonSpeech
            );
        }
    }

    #[test]
    fn loud_tone_is_eventually_detected_as_speech() {
        let mut vad = Vad::new();
        let mut frame = [0i16; 160];
        for (i, sample) in frame.iter_mut().enumerate() {
            let phase = (i as f64) * 0.2;
            *sample = (phase.sin() * 12000.0) as i16;
        }
        let mut saw_speech = false;
        for _ in 0..20 {
            if vad.process(&frame).unwrap().is_speech() {
                saw_speech = true;
            }
        }
        assert!(saw_speech, "a loud tone should trigger speech within 20 frames");
    }

    #[test]
    fn reset_clears_the_hangover_counter() {
        let mut vad = Vad::new();
        let mut frame = [0i16; 160];
        for (i, sample) in frame.iter_mut().enumerate() {
            let phase = (i as f64) * 0.2;
            *sample = (phase.sin() * 12000.0) as i16;
        }
        for _ in 0..20 {
            let _ = vad.process(&frame);
        }
        vad.reset();
        assert_eq!(vad.decision, DecisionState::default());
    }
}
