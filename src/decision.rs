//! Hangover-hysteresis decision rule.
//!
//! C source: `WebRtcVad_GmmProbability`'s tail and the mode tables in
//! `vad_core.c`.

use crate::mode::VadMode;

/// Per-mode thresholds and hangover limits (`spec.md` §4.7).
///
/// `over_hang_max_2`, `individual`, and `total` come from the reference
/// tables for data-model fidelity, but only `over_hang_max_1` and
/// `total` are read by [`decide`] — the reference's own decision rule
/// never consults `over_hang_max_2` or the per-band `individual`
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModeParams {
    pub(crate) over_hang_max_1: i16,
    pub(crate) over_hang_max_2: i16,
    pub(crate) individual: i16,
    pub(crate) total: i16,
}

const OVER_HANG_MAX_1: [i16; 3] = [8, 6, 4];
const OVER_HANG_MAX_2: [i16; 3] = [14, 9, 5];
const LOCAL_THRESHOLD: [i16; 3] = [24, 21, 24];
const GLOBAL_THRESHOLD: [i16; 3] = [57, 48, 57];

impl ModeParams {
    pub(crate) fn for_mode(mode: VadMode) -> Self {
        let index = match mode {
            VadMode::Quality => 0,
            VadMode::LowBitrate => 1,
            VadMode::Aggressive => 2,
            VadMode::VeryAggressive => {
                return Self {
                    over_hang_max_1: 2,
                    over_hang_max_2: 2,
                    individual: 28,
                    total: 66,
                };
            }
        };
        Self {
            over_hang_max_1: OVER_HANG_MAX_1[index],
            over_hang_max_2: OVER_HANG_MAX_2[index],
            individual: LOCAL_THRESHOLD[index],
            total: GLOBAL_THRESHOLD[index],
        }
    }
}

/// Per-instance decision state: the hangover countdown plus bookkeeping
/// the facade exposes to callers (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecisionState {
    pub(crate) over_hang: i16,
    pub(crate) num_of_speech: i16,
    pub(crate) frame_counter: i32,
    pub(crate) last_decision: VoiceActivity,
}

impl Default for DecisionState {
    fn default() -> Self {
        Self {
            over_hang: 0,
            num_of_speech: 0,
            frame_counter: 0,
            last_decision: VoiceActivity::NonSpeech,
        }
    }
}

/// Frame-level outcome of [`crate::Vad::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceActivity {
    /// No speech detected in this frame.
    #[default]
    NonSpeech,
    /// Speech detected in this frame.
    Speech,
}

impl VoiceActivity {
    /// `true` for [`VoiceActivity::Speech`].
    pub fn is_speech(self) -> bool {
        matches!(self, Self::Speech)
    }
}

impl From<VoiceActivity> for bool {
    fn from(activity: VoiceActivity) -> Self {
        activity.is_speech()
    }
}

/// Applies the global-likelihood threshold and hangover hysteresis to
/// produce this frame's decision, updating `state` in place.
pub(crate) fn decide(
    state: &mut DecisionState,
    params: &ModeParams,
    log_likelihood_ratio: i32,
) -> VoiceActivity {
    state.frame_counter += 1;

    let speech_this_frame = log_likelihood_ratio >= i32::from(params.total);

    if speech_this_frame {
        state.num_of_speech = state.num_of_speech.saturating_add(1);
        state.over_hang = params.over_hang_max_1;
        state.last_decision = VoiceActivity::Speech;
    } else if state.over_hang > 0 {
        state.over_hang -= 1;
        state.last_decision = VoiceActivity::Speech;
    } else {
        state.last_decision = VoiceActivity::NonSpeech;
    }

    state.last_decision
}
