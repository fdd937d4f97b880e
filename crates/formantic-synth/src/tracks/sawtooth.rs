//! Band-limited sawtooth with a formant-shaped spectral envelope.

use std::f64::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::segment::{lerp_f64, Lerp, Timeline};
use super::Track;

/// Number of harmonics summed per sample.
pub const HARMONIC_COUNT: usize = 50;

/// Instantaneous parameters of a [`SawtoothTrack`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SawtoothParams {
    /// Overall amplitude.
    pub volume: f64,
    /// Formant centre frequencies in Hz.
    pub formants: Vec<f64>,
    /// Per-formant amplitudes. Interpolated with the rest but not applied.
    pub amplitudes: Vec<f64>,
    /// How sharply harmonics fall off away from the nearest formant.
    pub strength: f64,
}

impl SawtoothParams {
    /// Zeroed parameters with room for `formant_count` formants.
    pub fn zeroed(formant_count: usize) -> Self {
        Self {
            volume: 0.0,
            formants: vec![0.0; formant_count],
            amplitudes: vec![0.0; formant_count],
            strength: 0.0,
        }
    }

    /// Weight in `(0, 1]` for a harmonic at `frequency`.
    ///
    /// `(1 + strength * d)^-4` where `d` is the distance to the nearest
    /// formant. Without formants every harmonic passes at full weight.
    pub fn power_for_frequency(&self, frequency: f64) -> f64 {
        let nearest = self
            .formants
            .iter()
            .map(|formant| (frequency - formant).abs())
            .fold(f64::INFINITY, f64::min);
        if !nearest.is_finite() {
            return 1.0;
        }
        (1.0 + nearest * self.strength).powi(-4)
    }
}

fn lerp_vec(start: &[f64], end: &[f64], t: f64) -> Vec<f64> {
    end.iter()
        .enumerate()
        .map(|(i, &to)| lerp_f64(start.get(i).copied().unwrap_or(to), to, t))
        .collect()
}

impl Lerp for SawtoothParams {
    fn lerp(&self, end: &Self, t: f64) -> Self {
        Self {
            volume: lerp_f64(self.volume, end.volume, t),
            formants: lerp_vec(&self.formants, &end.formants, t),
            amplitudes: lerp_vec(&self.amplitudes, &end.amplitudes, t),
            strength: lerp_f64(self.strength, end.strength, t),
        }
    }
}

/// A buzz source built from [`HARMONIC_COUNT`] harmonics of a fixed fundamental.
#[derive(Debug, Clone, PartialEq)]
pub struct SawtoothTrack {
    fundamental: f64,
    amplitude_scale: f64,
    timeline: Timeline<SawtoothParams>,
}

impl SawtoothTrack {
    /// Creates a silent zero-length track.
    ///
    /// # Arguments
    /// * `fundamental` - Fundamental frequency in Hz
    /// * `formant_count` - Number of formants the parameters carry
    pub fn new(fundamental: f64, formant_count: usize) -> Self {
        let total: f64 = (1..=HARMONIC_COUNT)
            .map(|i| 1.0 / (i as f64 * fundamental))
            .sum();
        Self {
            fundamental,
            amplitude_scale: 1.0 / total,
            timeline: Timeline::new(SawtoothParams::zeroed(formant_count)),
        }
    }

    /// Fundamental frequency in Hz.
    pub fn fundamental(&self) -> f64 {
        self.fundamental
    }

    /// Normalisation applied so a full-weight sum peaks near `volume`.
    pub fn amplitude_scale(&self) -> f64 {
        self.amplitude_scale
    }

    /// Current parameters.
    pub fn parameters(&self) -> &SawtoothParams {
        self.timeline.current()
    }

    /// Ramps to new parameters over `duration`.
    pub fn adjust_parameters(&mut self, params: SawtoothParams, duration: Duration) {
        self.timeline.adjust(params, duration);
    }

    fn sample(&self, params: &SawtoothParams, time: f64) -> f64 {
        let sum: f64 = (1..=HARMONIC_COUNT)
            .map(|i| {
                let frequency = i as f64 * self.fundamental;
                let weight = params.volume * params.power_for_frequency(frequency);
                weight * (TAU * frequency * time).sin() / frequency
            })
            .sum();
        sum * self.amplitude_scale
    }
}

impl Track for SawtoothTrack {
    fn duration(&self) -> Duration {
        self.timeline.duration()
    }

    fn continue_for(&mut self, duration: Duration) {
        self.timeline.continue_for(duration);
    }

    fn volume(&self) -> f64 {
        self.parameters().volume
    }

    fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        let mut params = self.parameters().clone();
        params.volume = volume;
        self.adjust_parameters(params, duration);
    }

    fn render(&self, sample_rate: u32) -> Vec<f64> {
        let rate = sample_rate as f64;
        let mut samples = Vec::with_capacity(self.timeline.sample_count(sample_rate));
        self.timeline.for_each_sample(sample_rate, |segment, t| {
            let params = segment.at(t);
            let time = samples.len() as f64 / rate;
            samples.push(self.sample(&params, time));
        });
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voiced(formants: Vec<f64>, strength: f64) -> SawtoothParams {
        let count = formants.len();
        SawtoothParams {
            volume: 0.5,
            formants,
            amplitudes: vec![1.0; count],
            strength,
        }
    }

    #[test]
    fn test_amplitude_scale_normalises_harmonic_sum() {
        let track = SawtoothTrack::new(100.0, 3);
        let total: f64 = (1..=HARMONIC_COUNT).map(|i| 1.0 / (i as f64 * 100.0)).sum();
        assert!((track.amplitude_scale() * total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_peaks_at_formant() {
        let params = voiced(vec![500.0, 1500.0], 0.01);
        assert_eq!(params.power_for_frequency(500.0), 1.0);
        assert!(params.power_for_frequency(1000.0) < params.power_for_frequency(600.0));
        // 100 Hz away at strength 0.01 -> 2^-4
        assert!((params.power_for_frequency(1400.0) - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn test_power_without_formants_is_unity() {
        let params = voiced(Vec::new(), 1.0);
        assert_eq!(params.power_for_frequency(1234.0), 1.0);
    }

    #[test]
    fn test_silent_until_volume_rises() {
        let mut track = SawtoothTrack::new(120.0, 2);
        track.continue_for(Duration::from_millis(10));
        assert!(track.render(8_000).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_adjust_volume_keeps_formants() {
        let mut track = SawtoothTrack::new(120.0, 2);
        track.adjust_parameters(voiced(vec![700.0, 1200.0], 0.02), Duration::from_millis(10));
        track.adjust_volume(0.1, Duration::from_millis(10));
        assert_eq!(track.volume(), 0.1);
        assert_eq!(track.parameters().formants, vec![700.0, 1200.0]);
        assert_eq!(track.duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_render_is_bounded_by_volume() {
        let mut track = SawtoothTrack::new(110.0, 3);
        track.adjust_parameters(voiced(vec![700.0, 1100.0, 2500.0], 0.0), Duration::ZERO);
        track.continue_for(Duration::from_millis(40));
        let samples = track.render(22_050);
        assert_eq!(samples.len(), 882);
        // Every harmonic weight is <= 1, so the normalised sum stays under volume.
        assert!(samples.iter().all(|s| s.abs() <= 0.5 + 1e-9));
        assert!(samples.iter().any(|s| s.abs() > 0.01));
    }
}
