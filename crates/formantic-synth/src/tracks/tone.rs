//! Pure tone with Gaussian frequency jitter.
//!
//! With a small spread the tone models voicing jitter; with a spread in the
//! hundreds of hertz it becomes narrow-band hiss centred on the frequency.

use std::f64::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::segment::{lerp_f64, Lerp, Timeline};
use super::Track;
use crate::rng::Gaussian;

/// Instantaneous parameters of a [`ToneTrack`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneParams {
    /// Centre frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub volume: f64,
    /// Standard deviation of per-sample frequency jitter in Hz.
    pub spread: f64,
}

impl ToneParams {
    /// Creates a parameter set.
    pub fn new(frequency: f64, volume: f64, spread: f64) -> Self {
        Self {
            frequency,
            volume,
            spread,
        }
    }
}

impl Lerp for ToneParams {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        Self {
            frequency: lerp_f64(self.frequency, end.frequency, t),
            volume: lerp_f64(self.volume, end.volume, t),
            spread: lerp_f64(self.spread, end.spread, t),
        }
    }
}

/// A sine oscillator whose frequency, volume and jitter follow a segment timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneTrack {
    timeline: Timeline<ToneParams>,
    seed: u32,
}

impl ToneTrack {
    /// Creates a zero-length track.
    ///
    /// # Arguments
    /// * `frequency` - Initial frequency in Hz
    /// * `volume` - Initial amplitude
    /// * `spread` - Initial jitter in Hz
    pub fn new(frequency: f64, volume: f64, spread: f64) -> Self {
        Self {
            timeline: Timeline::new(ToneParams::new(frequency, volume, spread)),
            seed: 0,
        }
    }

    /// Sets the jitter seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the jitter seed.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    /// Current parameters.
    pub fn params(&self) -> ToneParams {
        *self.timeline.current()
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.params().frequency
    }

    /// Current jitter in Hz.
    pub fn spread(&self) -> f64 {
        self.params().spread
    }

    /// Ramps every parameter to a new target.
    pub fn adjust_all(&mut self, frequency: f64, volume: f64, spread: f64, duration: Duration) {
        self.timeline
            .adjust(ToneParams::new(frequency, volume, spread), duration);
    }

    /// Ramps the frequency, keeping volume and spread.
    pub fn adjust_frequency(&mut self, frequency: f64, duration: Duration) {
        let current = self.params();
        self.adjust_all(frequency, current.volume, current.spread, duration);
    }

    #[cfg(test)]
    pub(crate) fn timeline(&self) -> &Timeline<ToneParams> {
        &self.timeline
    }
}

impl Track for ToneTrack {
    fn duration(&self) -> Duration {
        self.timeline.duration()
    }

    fn continue_for(&mut self, duration: Duration) {
        self.timeline.continue_for(duration);
    }

    fn volume(&self) -> f64 {
        self.params().volume
    }

    fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        let current = self.params();
        self.adjust_all(current.frequency, volume, current.spread, duration);
    }

    fn render(&self, sample_rate: u32) -> Vec<f64> {
        let rate = sample_rate as f64;
        let mut noise = Gaussian::new(self.seed);
        let mut phase = 0.0f64;
        let mut samples = Vec::with_capacity(self.timeline.sample_count(sample_rate));

        self.timeline.for_each_sample(sample_rate, |segment, t| {
            let params = segment.at(t);
            samples.push(phase.sin() * params.volume);

            let mut frequency = params.frequency;
            if params.spread != 0.0 {
                frequency += noise.next_normal() * params.spread;
            }
            phase = (phase + TAU * frequency / rate).rem_euclid(TAU);
        });

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_current_values_follow_last_adjust() {
        let mut track = ToneTrack::new(400.0, 0.0, 0.0);
        track.adjust_all(700.0, 0.3, 5.0, Duration::from_millis(20));
        assert_eq!(track.params(), ToneParams::new(700.0, 0.3, 5.0));

        track.adjust_frequency(800.0, Duration::from_millis(5));
        assert_eq!(track.frequency(), 800.0);
        assert_eq!(track.volume(), 0.3);

        assert_eq!(track.spread(), 5.0);
        assert_eq!(track.duration(), Duration::from_millis(25));
    }

    #[test]
    fn test_render_starts_at_zero_phase() {
        let mut track = ToneTrack::new(440.0, 0.5, 0.0);
        track.continue_for(Duration::from_millis(10));
        let samples = track.render(44_100);
        assert_eq!(samples.len(), 441);
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_render_clean_sine_matches_formula() {
        let mut track = ToneTrack::new(1_000.0, 1.0, 0.0);
        track.continue_for(Duration::from_millis(5));
        let samples = track.render(8_000);
        for (i, sample) in samples.iter().enumerate() {
            let expected = (TAU * 1_000.0 * i as f64 / 8_000.0).sin();
            assert!((sample - expected).abs() < 1e-9, "sample {}", i);
        }
    }

    #[test]
    fn test_render_stays_within_volume() {
        let mut track = ToneTrack::new(5_000.0, 0.2, 1_000.0).with_seed(9);
        track.continue_for(Duration::from_millis(50));
        assert!(track.render(44_100).iter().all(|s| s.abs() <= 0.2 + 1e-12));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut track = ToneTrack::new(4_250.0, 0.1, 1_000.0).with_seed(1);
        track.adjust_volume(0.3, Duration::from_millis(30));
        assert_eq!(track.render(22_050), track.render(22_050));
    }

    #[test]
    fn test_seed_changes_noise() {
        let mut a = ToneTrack::new(4_250.0, 0.1, 1_000.0).with_seed(1);
        a.continue_for(Duration::from_millis(10));
        let mut b = a.clone();
        b.set_seed(2);
        assert_ne!(a.render(22_050), b.render(22_050));
    }
}
