//! Inventory command implementation
//!
//! Lists the default voice's symbols and their classes.

use anyhow::Result;
use colored::Colorize;
use formantic_phonetics::PhoneClass;
use formantic_synth::Voice;
use serde::Serialize;
use std::process::ExitCode;

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryEntry {
    pub symbol: String,
    pub class: PhoneClass,
    pub voiced: bool,
}

/// Collects the default voice's inventory, ordered by symbol.
pub fn entries() -> Vec<InventoryEntry> {
    Voice::default_english()
        .phones()
        .map(|(symbol, phone)| InventoryEntry {
            symbol: symbol.to_string(),
            class: phone.class(),
            voiced: phone.is_voiced(),
        })
        .collect()
}

/// Run the inventory command
pub fn run(json: bool) -> Result<ExitCode> {
    let entries = entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} symbols", "Inventory:".cyan().bold(), entries.len());
    for entry in &entries {
        let voicing = if entry.voiced { "voiced" } else { "voiceless" };
        println!(
            "  {:<3} {:<12} {}",
            entry.symbol.bold(),
            entry.class.to_string(),
            voicing.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}
