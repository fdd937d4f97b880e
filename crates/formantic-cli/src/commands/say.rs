//! Say command implementation
//!
//! Synthesizes IPA text with the default formant voice.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use formantic_synth::Voice;
use std::io::Read;
use std::process::ExitCode;

use super::{print_written, write_output};
use crate::settings::{self, Overrides};

/// Where the IPA text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Inline(String),
    Stdin,
}

/// Run the say command
///
/// # Arguments
/// * `source` - IPA text, inline or from stdin
/// * `output` - Output WAV path
/// * `config_path` - Optional JSON synthesis config
/// * `overrides` - Per-flag config overrides
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    source: TextSource,
    output: &str,
    config_path: Option<&str>,
    overrides: Overrides,
) -> Result<ExitCode> {
    let text = match source {
        TextSource::Inline(text) => text,
        TextSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read IPA text from stdin")?;
            text
        }
    };
    say_text(&text, output, config_path, overrides)
}

/// Synthesizes `text` and writes the WAV file.
pub fn say_text(
    text: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: Overrides,
) -> Result<ExitCode> {
    let config = settings::resolve(config_path, overrides)?;

    println!("{} {}", "Synthesizing:".cyan().bold(), text.trim());

    let utterance = Voice::default_english()
        .synthesize_with(text, &config)
        .context("Synthesis failed")?;

    if !utterance.skipped.is_empty() {
        let symbols: String = utterance.skipped.iter().collect();
        println!(
            "{} skipped unknown symbols: {}",
            "warning:".yellow().bold(),
            symbols
        );
    }
    if utterance.samples.is_empty() {
        bail!("nothing to say: no recognised IPA symbols in input");
    }

    let wav = write_output(output, &utterance.samples, utterance.sample_rate)?;
    println!(
        "{} {} phones, {} words",
        "Spoke:".dimmed(),
        utterance.phone_count,
        utterance.word_count
    );
    print_written(output, &wav);

    Ok(ExitCode::SUCCESS)
}
