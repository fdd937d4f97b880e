//! Synthesis configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Output sample rate used when none is configured.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Nominal speaking rate in phones per second.
///
/// Transition-model timings are authored for this rate; other rates scale
/// them proportionally.
pub const DEFAULT_PHONE_RATE: f64 = 10.0;

/// Accepted speaking rates, in phones per second.
pub const PHONE_RATE_RANGE: std::ops::RangeInclusive<f64> = 0.5..=100.0;

/// Longest accepted word release or gap, in milliseconds.
pub const MAX_PAUSE_MS: f64 = 10_000.0;

/// Parameters for one synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Speaking rate in phones per second.
    pub phone_rate: f64,
    /// Seed for voicing jitter and turbulence noise.
    pub seed: u32,
    /// Fade-out applied to every branch at the end of a word, in milliseconds.
    pub word_release_ms: f64,
    /// Silence held between words, in milliseconds.
    pub word_gap_ms: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            phone_rate: DEFAULT_PHONE_RATE,
            seed: 0,
            word_release_ms: 80.0,
            word_gap_ms: 120.0,
        }
    }
}

impl SynthConfig {
    /// Sets the speaking rate.
    pub fn with_phone_rate(mut self, phone_rate: f64) -> Self {
        self.phone_rate = phone_rate;
        self
    }

    /// Sets the output sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> SynthResult<()> {
        if !PHONE_RATE_RANGE.contains(&self.phone_rate) {
            return Err(SynthError::InvalidPhoneRate {
                rate: self.phone_rate,
            });
        }
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        for (name, value) in [
            ("word_release_ms", self.word_release_ms),
            ("word_gap_ms", self.word_gap_ms),
        ] {
            if !(0.0..=MAX_PAUSE_MS).contains(&value) {
                return Err(SynthError::invalid_param(
                    name,
                    format!("must be between 0 and {} milliseconds, got {}", MAX_PAUSE_MS, value),
                ));
            }
        }
        Ok(())
    }

    /// Duration multiplier applied to every transition-model timing.
    pub fn tempo(&self) -> f64 {
        DEFAULT_PHONE_RATE / self.phone_rate
    }
}
