//! Say-phones command implementation
//!
//! Speaks an ARPAbet phone list with a recorded diphone voice.

use anyhow::{Context, Result};
use colored::Colorize;
use formantic_phonetics::Phoneme;
use std::path::Path;
use std::process::ExitCode;

use super::{print_written, write_output};
use crate::voice_dir;

/// Run the say-phones command
///
/// # Arguments
/// * `voice_dir` - Directory of diphone clips
/// * `phones` - ARPAbet phones, stress digits allowed
/// * `output` - Output WAV path
pub fn run(voice_dir: &str, phones: &[String], output: &str) -> Result<ExitCode> {
    let phonemes = phones
        .iter()
        .map(|p| {
            p.parse::<Phoneme>()
                .with_context(|| format!("Invalid phone: {}", p))
        })
        .collect::<Result<Vec<_>>>()?;

    let voice = voice_dir::load_voice(Path::new(voice_dir))?;
    println!(
        "{} {} ({} Hz)",
        "Voice:".dimmed(),
        voice_dir,
        voice.sample_rate()
    );

    let samples = voice
        .synthesize(&phonemes)
        .context("Diphone synthesis failed")?;
    let wav = write_output(output, &samples, voice.sample_rate())?;
    print_written(output, &wav);

    Ok(ExitCode::SUCCESS)
}
