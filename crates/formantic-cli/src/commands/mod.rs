//! Command implementations for the formantic CLI.

pub mod inventory;
pub mod say;
pub mod say_phones;
pub mod speak;

use anyhow::{Context, Result};
use colored::Colorize;
use formantic_synth::WavResult;
use std::fs;
use std::path::Path;

/// Encodes samples as 16-bit mono WAV and writes them to `output`.
pub(crate) fn write_output(output: &str, samples: &[f64], sample_rate: u32) -> Result<WavResult> {
    let wav = WavResult::from_samples(samples, sample_rate);
    let path = Path::new(output);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, &wav.wav_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;
    Ok(wav)
}

/// Prints the one-line summary shared by the synthesis commands.
pub(crate) fn print_written(output: &str, wav: &WavResult) {
    println!(
        "{} {} ({:.2}s, {} samples @ {} Hz)",
        "Wrote:".green().bold(),
        output,
        wav.duration_seconds(),
        wav.num_samples,
        wav.sample_rate
    );
    println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
}
