//! Speak command implementation
//!
//! Looks English text up in a pronunciation dictionary and speaks the IPA
//! with the default formant voice.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use formantic_phonetics::{translate_to_ipa, Dictionary};
use std::process::ExitCode;

use super::say::say_text;
use crate::settings::Overrides;

/// Run the speak command
///
/// # Arguments
/// * `dict_path` - CMU-format pronunciation dictionary
/// * `text` - English text
/// * `output` - Output WAV path
/// * `config_path` - Optional JSON synthesis config
/// * `overrides` - Per-flag config overrides
pub fn run(
    dict_path: &str,
    text: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: Overrides,
) -> Result<ExitCode> {
    let dictionary = Dictionary::load(dict_path)
        .with_context(|| format!("Failed to load dictionary: {}", dict_path))?;
    println!(
        "{} {} ({} words)",
        "Dictionary:".dimmed(),
        dict_path,
        dictionary.len()
    );

    let translation = translate_to_ipa(&dictionary, text);
    for word in &translation.missing {
        println!("{} not in dictionary: {}", "warning:".yellow().bold(), word);
    }
    if translation.ipa.is_empty() {
        bail!("none of the words were found in the dictionary");
    }

    println!("{} {}", "IPA:".cyan(), translation.ipa);
    say_text(&translation.ipa, output, config_path, overrides)
}
