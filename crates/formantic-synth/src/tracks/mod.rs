//! Time-varying signal generators.
//!
//! Every track keeps an append-only history: it can be extended with its
//! current sound ([`Track::continue_for`]) or ramped toward new parameters,
//! and rendered any number of times at any sample rate.
//!
//! - [`ToneTrack`]: sine tone with Gaussian frequency jitter
//! - [`SawtoothTrack`]: harmonic buzz shaped by formant targets
//! - [`TrackSet`]: named children rendered concurrently and summed

mod sawtooth;
mod segment;
mod set;
mod tone;


use std::time::Duration;

pub use sawtooth::{SawtoothParams, SawtoothTrack, HARMONIC_COUNT};
pub use segment::{Lerp, Segment, Timeline};
pub use set::{ExcludedTracks, TrackSet};
pub use tone::{ToneParams, ToneTrack};

/// The operations every track supports.
pub trait Track {
    /// Total length of the track's history.
    fn duration(&self) -> Duration;

    /// Extends the track with its current sound.
    fn continue_for(&mut self, duration: Duration);

    /// Current volume. Composite tracks report the mean over their children.
    fn volume(&self) -> f64;

    /// Extends the track while ramping its volume to `volume`.
    fn adjust_volume(&mut self, volume: f64, duration: Duration);

    /// Renders `floor(duration * sample_rate)` samples.
    fn render(&self, sample_rate: u32) -> Vec<f64>;
}

/// A node in a track tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackNode {
    /// Sine tone leaf.
    Tone(ToneTrack),
    /// Sawtooth leaf.
    Sawtooth(SawtoothTrack),
    /// Nested set of named tracks.
    Set(TrackSet),
}

impl TrackNode {
    /// Returns the tone leaf, if this is one.
    pub fn as_tone(&self) -> Option<&ToneTrack> {
        match self {
            TrackNode::Tone(tone) => Some(tone),
            _ => None,
        }
    }

    /// Returns the tone leaf mutably, if this is one.
    pub fn as_tone_mut(&mut self) -> Option<&mut ToneTrack> {
        match self {
            TrackNode::Tone(tone) => Some(tone),
            _ => None,
        }
    }

    /// Returns the nested set, if this is one.
    pub fn as_set(&self) -> Option<&TrackSet> {
        match self {
            TrackNode::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the nested set mutably, if this is one.
    pub fn as_set_mut(&mut self) -> Option<&mut TrackSet> {
        match self {
            TrackNode::Set(set) => Some(set),
            _ => None,
        }
    }

    fn as_track(&self) -> &dyn Track {
        match self {
            TrackNode::Tone(track) => track,
            TrackNode::Sawtooth(track) => track,
            TrackNode::Set(track) => track,
        }
    }

    fn as_track_mut(&mut self) -> &mut dyn Track {
        match self {
            TrackNode::Tone(track) => track,
            TrackNode::Sawtooth(track) => track,
            TrackNode::Set(track) => track,
        }
    }
}

impl Track for TrackNode {
    fn duration(&self) -> Duration {
        self.as_track().duration()
    }

    fn continue_for(&mut self, duration: Duration) {
        self.as_track_mut().continue_for(duration);
    }

    fn volume(&self) -> f64 {
        self.as_track().volume()
    }

    fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        self.as_track_mut().adjust_volume(volume, duration);
    }

    fn render(&self, sample_rate: u32) -> Vec<f64> {
        self.as_track().render(sample_rate)
    }
}

impl From<ToneTrack> for TrackNode {
    fn from(track: ToneTrack) -> Self {
        TrackNode::Tone(track)
    }
}

impl From<SawtoothTrack> for TrackNode {
    fn from(track: SawtoothTrack) -> Self {
        TrackNode::Sawtooth(track)
    }
}

impl From<TrackSet> for TrackNode {
    fn from(set: TrackSet) -> Self {
        TrackNode::Set(set)
    }
}

/// Adds `source` into `target`, growing `target` with zeros as needed.
pub(crate) fn mix_into(target: &mut Vec<f64>, source: &[f64]) {
    if source.len() > target.len() {
        target.resize(source.len(), 0.0);
    }
    for (out, sample) in target.iter_mut().zip(source) {
        *out += sample;
    }
}
