//! Diphone concatenation from recorded clips.
//!
//! A clip library holds three kinds of recording, keyed by name:
//!
//! - `"-P"`: the approach from silence into phone `P`
//! - `"P-"`: the release from `P` into silence
//! - `"P-Q"`: a direct transition from `P` to `Q` (optional)
//!
//! Every phone in a voice's inventory must have both edge clips; direct
//! transitions fall back to splicing the two edges.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use formantic_phonetics::{Arpabet, Phoneme};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};

/// Named recordings.
pub trait ClipLibrary {
    /// Returns the samples of the clip called `name`.
    fn clip(&self, name: &str) -> Option<&[f64]>;
}

impl ClipLibrary for HashMap<String, Vec<f64>> {
    fn clip(&self, name: &str) -> Option<&[f64]> {
        self.get(name).map(Vec::as_slice)
    }
}

impl ClipLibrary for BTreeMap<String, Vec<f64>> {
    fn clip(&self, name: &str) -> Option<&[f64]> {
        self.get(name).map(Vec::as_slice)
    }
}

/// Approach clip name for `phone`.
pub fn approach_name(phone: &str) -> String {
    format!("-{}", phone)
}

/// Release clip name for `phone`.
pub fn release_name(phone: &str) -> String {
    format!("{}-", phone)
}

/// Direct transition clip name.
pub fn diphone_name(first: &str, second: &str) -> String {
    format!("{}-{}", first, second)
}

/// A crop window in seconds, as stored in a voice's `cuts.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipCut {
    /// Start of the kept region.
    pub start: f64,
    /// End of the kept region.
    pub end: f64,
}

impl ClipCut {
    /// Returns the part of `samples` inside the window.
    ///
    /// The window is clamped to the clip; an inverted window keeps nothing.
    pub fn apply(&self, samples: &[f64], sample_rate: u32) -> Vec<f64> {
        let to_index = |seconds: f64| -> usize {
            let index = (seconds.max(0.0) * sample_rate as f64).floor() as usize;
            index.min(samples.len())
        };
        let start = to_index(self.start);
        let end = to_index(self.end);
        if end <= start {
            return Vec::new();
        }
        samples[start..end].to_vec()
    }
}

/// A voice that speaks by stitching recorded clips together.
#[derive(Debug, Clone)]
pub struct DiphoneVoice<L> {
    clips: L,
    sample_rate: u32,
    inventory: BTreeSet<String>,
}

impl<L: ClipLibrary> DiphoneVoice<L> {
    /// Creates a voice covering every ARPAbet phone.
    ///
    /// # Errors
    /// [`SynthError::MissingRecording`] if any phone lacks an edge clip.
    pub fn new(clips: L, sample_rate: u32) -> SynthResult<Self> {
        Self::with_inventory(clips, sample_rate, Arpabet::ALL.iter().map(Arpabet::name))
    }

    /// Creates a voice covering the given phone names.
    pub fn with_inventory<I, S>(clips: L, sample_rate: u32, phones: I) -> SynthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate { rate: sample_rate });
        }

        let mut inventory = BTreeSet::new();
        for phone in phones {
            let phone = phone.as_ref();
            for name in [approach_name(phone), release_name(phone)] {
                if clips.clip(&name).is_none() {
                    return Err(SynthError::missing_recording(name));
                }
            }
            inventory.insert(phone.to_string());
        }

        Ok(Self {
            clips,
            sample_rate,
            inventory,
        })
    }

    /// Sample rate of every clip.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Phone names this voice can speak.
    pub fn inventory(&self) -> impl Iterator<Item = &str> {
        self.inventory.iter().map(String::as_str)
    }

    /// The underlying clip library.
    pub fn clips(&self) -> &L {
        &self.clips
    }

    fn edge(&self, name: String) -> SynthResult<&[f64]> {
        self.clips
            .clip(&name)
            .ok_or(SynthError::MissingRecording { name })
    }

    fn check_phone(&self, phone: &str) -> SynthResult<()> {
        if self.inventory.contains(phone) {
            Ok(())
        } else {
            Err(SynthError::UnknownPhone {
                name: phone.to_string(),
            })
        }
    }

    /// The transition from `first` to `second`.
    ///
    /// Uses the `"first-second"` recording when there is one, otherwise the
    /// release of `first` followed by the approach of `second`.
    pub fn get_diphone(&self, first: &str, second: &str) -> SynthResult<Vec<f64>> {
        self.check_phone(first)?;
        self.check_phone(second)?;

        if let Some(direct) = self.clips.clip(&diphone_name(first, second)) {
            return Ok(direct.to_vec());
        }

        debug!(first, second, "splicing diphone from edge clips");
        let release = self.edge(release_name(first))?;
        let approach = self.edge(approach_name(second))?;
        let mut spliced = Vec::with_capacity(release.len() + approach.len());
        spliced.extend_from_slice(release);
        spliced.extend_from_slice(approach);
        Ok(spliced)
    }

    /// Concatenates clips for a sequence of phone names.
    pub fn synthesize_names<S: AsRef<str>>(&self, phones: &[S]) -> SynthResult<Vec<f64>> {
        let (Some(first), Some(last)) = (phones.first(), phones.last()) else {
            return Ok(Vec::new());
        };
        for phone in phones {
            self.check_phone(phone.as_ref())?;
        }

        let mut out = self.edge(approach_name(first.as_ref()))?.to_vec();
        for pair in phones.windows(2) {
            out.extend(self.get_diphone(pair[0].as_ref(), pair[1].as_ref())?);
        }
        out.extend_from_slice(self.edge(release_name(last.as_ref()))?);
        Ok(out)
    }

    /// Concatenates clips for a phoneme sequence; stress digits are ignored.
    pub fn synthesize(&self, phonemes: &[Phoneme]) -> SynthResult<Vec<f64>> {
        let names: Vec<&str> = phonemes.iter().map(Phoneme::name).collect();
        self.synthesize_names(&names)
    }
}
