//! Formantic Speech Engine
//!
//! A deterministic formant synthesizer. Speech is built by steering a small
//! bank of sine tones and noise bands (the [`VocalSystem`]) through a phone
//! sequence, then summing everything into a mono buffer.
//!
//! # Pipeline
//!
//! 1. IPA text is split into words and each symbol is looked up in a [`Voice`].
//! 2. Every [`Phone`] appends parameter ramps to one shared [`VocalSystem`],
//!    pulled toward its neighbours for coarticulation.
//! 3. The accumulated track tree is rendered at the configured sample rate.
//!
//! # Example
//!
//! ```
//! use formantic_synth::{SynthConfig, Voice};
//!
//! let voice = Voice::default_english();
//! let utterance = voice.synthesize_with("haɪ", &SynthConfig::default()).unwrap();
//! assert_eq!(utterance.phone_count, 3);
//! assert!(!utterance.samples.is_empty());
//! ```
//!
//! # Determinism
//!
//! Voicing jitter and turbulence noise come from PCG32 generators seeded per
//! track via BLAKE3, so the same text, configuration and seed always render
//! the same samples.
//!
//! A second, independent path ([`diphone`]) speaks by concatenating recorded
//! clips.

pub mod config;
pub mod diphone;
pub mod error;
pub mod phone;
pub mod rng;
pub mod tracks;
pub mod vocal_system;
pub mod voice;
pub mod wav;

pub use config::{SynthConfig, DEFAULT_PHONE_RATE, DEFAULT_SAMPLE_RATE};
pub use diphone::{ClipCut, ClipLibrary, DiphoneVoice};
pub use error::{SynthError, SynthResult};
pub use phone::{Channel, Phone, Place};
pub use tracks::{SawtoothParams, SawtoothTrack, ToneParams, ToneTrack, Track, TrackNode, TrackSet};
pub use vocal_system::{FormantState, VocalSystem};
pub use voice::{Utterance, Voice};
pub use wav::WavResult;
