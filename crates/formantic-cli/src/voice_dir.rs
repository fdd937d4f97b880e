//! Diphone voice directories.
//!
//! A voice directory holds one mono WAV file per clip, named after the clip
//! (`-AA.wav`, `AA-.wav`, `AA-B.wav`, ...), and an optional `cuts.json`
//! mapping clip names to `{ "start": s, "end": s }` crop windows.

use anyhow::{bail, Context, Result};
use formantic_synth::{ClipCut, DiphoneVoice};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Clips keyed by name.
pub type ClipMap = BTreeMap<String, Vec<f64>>;

/// Name of the optional crop file inside a voice directory.
pub const CUTS_FILE: &str = "cuts.json";

/// Decodes a mono WAV file to samples in `[-1, 1]`.
pub fn read_clip(path: &Path) -> Result<(Vec<f64>, u32)> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels != 1 {
        bail!(
            "{} has {} channels; voice clips must be mono",
            path.display(),
            spec.channels
        );
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<Vec<_>, _>>()
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>(),
    }
    .with_context(|| format!("Failed to decode WAV file: {}", path.display()))?;

    Ok((samples, spec.sample_rate))
}

/// Reads the crop windows of a voice directory, if it has any.
pub fn read_cuts(dir: &Path) -> Result<BTreeMap<String, ClipCut>> {
    let path = dir.join(CUTS_FILE);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads every clip in `dir`, applying crops from `cuts.json`.
///
/// All clips must share one sample rate, which is returned alongside them.
pub fn load_clips(dir: &Path) -> Result<(ClipMap, u32)> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read voice directory: {}", dir.display()))?;

    let mut clips = ClipMap::new();
    let mut sample_rate = None;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("wav") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let (samples, rate) = read_clip(&path)?;
        match sample_rate {
            None => sample_rate = Some(rate),
            Some(expected) if expected != rate => bail!(
                "{} is {} Hz but other clips are {} Hz",
                path.display(),
                rate,
                expected
            ),
            Some(_) => {}
        }
        clips.insert(name.to_string(), samples);
    }

    let Some(sample_rate) = sample_rate else {
        bail!("voice directory {} contains no WAV clips", dir.display());
    };

    for (name, cut) in read_cuts(dir)? {
        match clips.get_mut(&name) {
            Some(samples) => {
                *samples = cut.apply(samples.as_slice(), sample_rate);
                debug!(clip = %name, samples = samples.len(), "applied crop");
            }
            None => warn!(clip = %name, "crop names a clip that is not in the voice"),
        }
    }

    info!(clips = clips.len(), sample_rate, dir = %dir.display(), "loaded voice clips");
    Ok((clips, sample_rate))
}

/// Loads a diphone voice covering the full ARPAbet inventory.
pub fn load_voice(dir: &Path) -> Result<DiphoneVoice<ClipMap>> {
    let (clips, sample_rate) = load_clips(dir)?;
    DiphoneVoice::new(clips, sample_rate)
        .with_context(|| format!("Incomplete diphone voice: {}", dir.display()))
}
