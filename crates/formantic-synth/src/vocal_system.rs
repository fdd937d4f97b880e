//! The simulated vocal tract.
//!
//! A [`VocalSystem`] is a fixed tree of tracks:
//!
//! | branch | children |
//! |---|---|
//! | `Formants` | `F1`, `F2`, `F3` tones |
//! | `Turbulence` | noisy tones `B`, `F`, `K`, `S`, `SH`, `T`, `TH`, and `H`, a set of three aspiration formants |
//! | `ConsonantVoice` | `Humm1`..`Humm3` voicing harmonics |
//! | `Liquid` | one resonance tone |
//!
//! It starts silent and is only ever extended; phones append segments to
//! whichever branches they need and then call [`VocalSystem::even_out`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rng::derive_component_seed;
use crate::tracks::{mix_into, ToneParams, ToneTrack, Track, TrackNode, TrackSet};

/// Branch holding the three vowel formants.
pub const FORMANTS: &str = "Formants";
/// Branch holding the turbulence channels.
pub const TURBULENCE: &str = "Turbulence";
/// Branch holding the voicing hum of voiced consonants.
pub const CONSONANT_VOICE: &str = "ConsonantVoice";
/// The liquid resonance track.
pub const LIQUID: &str = "Liquid";

/// Formant track names, lowest first.
pub const FORMANT_NAMES: [&str; 3] = ["F1", "F2", "F3"];

/// Resting centre of the `K` burst channel, in Hz.
pub const VELAR_BURST_HZ: f64 = 4_250.0;

/// Spread of every plain turbulence channel, in Hz.
const TURBULENCE_SPREAD: f64 = 1_000.0;
/// Spread of the aspiration formants, in Hz.
const ASPIRATION_SPREAD: f64 = 500.0;

/// Instantaneous frequencies and volumes of the first three formants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FormantState {
    /// F1..F3 in Hz.
    pub frequencies: [f64; 3],
    /// F1..F3 amplitudes.
    pub volumes: [f64; 3],
}

impl FormantState {
    /// Creates a state from interleaved frequency/volume pairs.
    pub const fn new(f1: f64, v1: f64, f2: f64, v2: f64, f3: f64, v3: f64) -> Self {
        Self {
            frequencies: [f1, f2, f3],
            volumes: [v1, v2, v3],
        }
    }

    /// Same frequencies at zero volume.
    pub fn silent(self) -> Self {
        Self {
            frequencies: self.frequencies,
            volumes: [0.0; 3],
        }
    }
}

/// One simulated vocal tract.
#[derive(Debug, Clone, PartialEq)]
pub struct VocalSystem {
    formants: TrackSet,
    turbulence: TrackSet,
    consonant_voice: TrackSet,
    liquid: ToneTrack,
    tempo: f64,
}

impl VocalSystem {
    /// Creates a silent, zero-length vocal system.
    ///
    /// Each leaf draws its noise from a seed derived from `seed` and the
    /// leaf's path, e.g. `"Turbulence/H/F2"`.
    pub fn new(seed: u32) -> Self {
        let formants = TrackSet::new()
            .with("F1", ToneTrack::new(400.0, 0.0, 0.0))
            .with("F2", ToneTrack::new(1_000.0, 0.0, 0.0))
            .with("F3", ToneTrack::new(2_000.0, 0.0, 0.0));

        let aspiration = TrackSet::new()
            .with("F1", ToneTrack::new(1_000.0, 0.0, ASPIRATION_SPREAD))
            .with("F2", ToneTrack::new(2_250.0, 0.0, ASPIRATION_SPREAD))
            .with("F3", ToneTrack::new(2_890.0, 0.0, ASPIRATION_SPREAD));

        let turbulence = TrackSet::new()
            .with("S", ToneTrack::new(5_000.0, 0.0, TURBULENCE_SPREAD))
            .with("SH", ToneTrack::new(4_700.0, 0.0, TURBULENCE_SPREAD))
            .with("TH", ToneTrack::new(3_500.0, 0.0, TURBULENCE_SPREAD))
            .with("T", ToneTrack::new(4_500.0, 0.0, TURBULENCE_SPREAD))
            .with("B", ToneTrack::new(4_250.0, 0.0, TURBULENCE_SPREAD))
            .with("F", ToneTrack::new(4_250.0, 0.0, TURBULENCE_SPREAD))
            .with("K", ToneTrack::new(VELAR_BURST_HZ, 0.0, TURBULENCE_SPREAD))
            .with("H", aspiration);

        let consonant_voice = TrackSet::new()
            .with("Humm1", ToneTrack::new(200.0, 0.0, 0.0))
            .with("Humm2", ToneTrack::new(300.0, 0.0, 0.0))
            .with("Humm3", ToneTrack::new(400.0, 0.0, 0.0));

        let mut system = Self {
            formants,
            turbulence,
            consonant_voice,
            liquid: ToneTrack::new(500.0, 0.0, 0.0),
            tempo: 1.0,
        };
        system.seed_leaves(seed);
        system
    }

    /// Sets the duration multiplier applied by [`VocalSystem::ms`] and [`VocalSystem::scaled`].
    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.tempo = tempo;
        self
    }

    /// Current duration multiplier.
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// A nominal duration in milliseconds, scaled by the tempo.
    pub fn ms(&self, millis: f64) -> Duration {
        Duration::from_secs_f64((millis * self.tempo / 1_000.0).max(0.0))
    }

    /// A nominal duration scaled by the tempo.
    pub fn scaled(&self, duration: Duration) -> Duration {
        duration.mul_f64(self.tempo.max(0.0))
    }

    fn seed_leaves(&mut self, seed: u32) {
        for (prefix, set) in [
            (FORMANTS, &mut self.formants),
            (TURBULENCE, &mut self.turbulence),
            (CONSONANT_VOICE, &mut self.consonant_voice),
        ] {
            set.for_each_leaf_mut(&mut |path: &str, leaf: &mut TrackNode| {
                if let TrackNode::Tone(tone) = leaf {
                    let key = format!("{}/{}", prefix, path);
                    tone.set_seed(derive_component_seed(seed, &key));
                }
            });
        }
        self.liquid.set_seed(derive_component_seed(seed, LIQUID));
    }

    /// The formant branch.
    pub fn formants(&self) -> &TrackSet {
        &self.formants
    }

    /// The formant branch, mutably.
    pub fn formants_mut(&mut self) -> &mut TrackSet {
        &mut self.formants
    }

    /// The turbulence branch.
    pub fn turbulence(&self) -> &TrackSet {
        &self.turbulence
    }

    /// The turbulence branch, mutably.
    pub fn turbulence_mut(&mut self) -> &mut TrackSet {
        &mut self.turbulence
    }

    /// The voicing hum branch.
    pub fn consonant_voice(&self) -> &TrackSet {
        &self.consonant_voice
    }

    /// The voicing hum branch, mutably.
    pub fn consonant_voice_mut(&mut self) -> &mut TrackSet {
        &mut self.consonant_voice
    }

    /// The liquid resonance.
    pub fn liquid(&self) -> &ToneTrack {
        &self.liquid
    }

    /// The liquid resonance, mutably.
    pub fn liquid_mut(&mut self) -> &mut ToneTrack {
        &mut self.liquid
    }

    /// Current end values of F1..F3.
    pub fn formant_state(&self) -> FormantState {
        let mut state = FormantState::default();
        for (i, name) in FORMANT_NAMES.iter().enumerate() {
            let params = self
                .formants
                .tone(name)
                .map(ToneTrack::params)
                .unwrap_or_default();
            state.frequencies[i] = params.frequency;
            state.volumes[i] = params.volume;
        }
        state
    }

    /// Ramps F1..F3 together to `state` over `duration`, with no jitter.
    pub fn adjust_formants(&mut self, state: FormantState, duration: Duration) {
        for (i, name) in FORMANT_NAMES.iter().enumerate() {
            if let Some(tone) = self.formants.tone_mut(name) {
                tone.adjust_all(state.frequencies[i], state.volumes[i], 0.0, duration);
            }
        }
    }

    /// Current parameters of a plain turbulence channel.
    pub fn turbulence_channel(&self, name: &str) -> Option<ToneParams> {
        self.turbulence.tone(name).map(ToneTrack::params)
    }

    /// Pads every branch to the system's duration.
    pub fn even_out(&mut self) {
        let duration = self.duration();
        self.formants.pad_to(duration);
        self.turbulence.pad_to(duration);
        self.consonant_voice.pad_to(duration);
        let liquid = self.liquid.duration();
        if liquid < duration {
            self.liquid.continue_for(duration - liquid);
        }
    }

    fn branches(&self) -> [&dyn Track; 4] {
        [
            &self.formants,
            &self.turbulence,
            &self.consonant_voice,
            &self.liquid,
        ]
    }

    fn branches_mut(&mut self) -> [&mut dyn Track; 4] {
        [
            &mut self.formants,
            &mut self.turbulence,
            &mut self.consonant_voice,
            &mut self.liquid,
        ]
    }
}

impl Default for VocalSystem {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Track for VocalSystem {
    fn duration(&self) -> Duration {
        self.branches()
            .iter()
            .map(|branch| branch.duration())
            .max()
            .unwrap_or(Duration::ZERO)
    }

    fn continue_for(&mut self, duration: Duration) {
        for branch in self.branches_mut() {
            branch.continue_for(duration);
        }
    }

    fn volume(&self) -> f64 {
        let branches = self.branches();
        branches.iter().map(|branch| branch.volume()).sum::<f64>() / branches.len() as f64
    }

    fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        for branch in self.branches_mut() {
            branch.adjust_volume(volume, duration);
        }
    }

    fn render(&self, sample_rate: u32) -> Vec<f64> {
        let mut mixed = Vec::new();
        for branch in self.branches() {
            mix_into(&mut mixed, &branch.render(sample_rate));
        }
        mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_system_is_silent_and_empty() {
        let system = VocalSystem::new(0);
        assert_eq!(system.duration(), Duration::ZERO);
        assert_eq!(system.volume(), 0.0);
        assert!(system.render(44_100).is_empty());
    }

    #[test]
    fn test_topology() {
        let system = VocalSystem::new(0);
        assert_eq!(system.formants().names().collect::<Vec<_>>(), vec!["F1", "F2", "F3"]);
        assert_eq!(
            system.turbulence().names().collect::<Vec<_>>(),
            vec!["B", "F", "H", "K", "S", "SH", "T", "TH"]
        );
        assert_eq!(system.turbulence().set("H").map(TrackSet::len), Some(3));
        assert_eq!(system.consonant_voice().len(), 3);
        assert_eq!(system.liquid().frequency(), 500.0);
        assert_eq!(system.turbulence_channel("S").map(|p| p.spread), Some(1_000.0));
    }

    #[test]
    fn test_initial_formant_state() {
        let system = VocalSystem::new(0);
        assert_eq!(
            system.formant_state(),
            FormantState::new(400.0, 0.0, 1_000.0, 0.0, 2_000.0, 0.0)
        );
    }

    #[test]
    fn test_adjust_formants_moves_only_formants() {
        let mut system = VocalSystem::new(0);
        let target = FormantState::new(730.0, 0.3, 1_090.0, 0.2, 2_440.0, 0.1);
        system.adjust_formants(target, Duration::from_millis(40));

        assert_eq!(system.formant_state(), target);
        assert_eq!(system.formants().duration(), Duration::from_millis(40));
        assert_eq!(system.turbulence().duration(), Duration::ZERO);

        system.even_out();
        assert_eq!(system.turbulence().duration(), Duration::from_millis(40));
        assert_eq!(system.liquid().duration(), Duration::from_millis(40));
        assert_eq!(
            system.turbulence().set("H").and_then(|h| h.tone("F3")).map(Track::duration),
            Some(Duration::from_millis(40))
        );
    }

    #[test]
    fn test_tempo_scales_durations() {
        let system = VocalSystem::new(0).with_tempo(2.0);
        assert_eq!(system.ms(50.0), Duration::from_millis(100));
        assert_eq!(system.scaled(Duration::from_millis(30)), Duration::from_millis(60));
    }

    #[test]
    fn test_leaves_get_distinct_seeds() {
        let mut system = VocalSystem::new(1);
        for name in ["S", "SH"] {
            if let Some(tone) = system.turbulence_mut().tone_mut(name) {
                tone.adjust_volume(0.1, Duration::ZERO);
                tone.continue_for(Duration::from_millis(5));
            }
        }
        let s = system.turbulence().tone("S").unwrap().render(44_100);
        let sh = system.turbulence().tone("SH").unwrap().render(44_100);
        assert_ne!(s, sh);
    }

    #[test]
    fn test_same_seed_renders_identically() {
        let build = |seed| {
            let mut system = VocalSystem::new(seed);
            system.turbulence_mut().adjust_volume(0.1, Duration::from_millis(20));
            system.even_out();
            system.render(22_050)
        };
        assert_eq!(build(4), build(4));
        assert_ne!(build(4), build(5));
    }

    #[test]
    fn test_formant_state_helpers() {
        let state = FormantState::new(500.0, 0.3, 1_500.0, 0.2, 2_500.0, 0.1);
        assert_eq!(state.silent().volumes, [0.0; 3]);
        assert_eq!(state.silent().frequencies, state.frequencies);
    }
}
