//! Formantic CLI - Command-line interface for formant speech synthesis
//!
//! This binary speaks IPA text, dictionary text, or ARPAbet phone lists into
//! WAV files.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use formantic_cli::commands::say::TextSource;
use formantic_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Say {
            ipa,
            stdin: _,
            output,
            synth,
        } => {
            let source = match ipa {
                Some(text) => TextSource::Inline(text),
                None => TextSource::Stdin,
            };
            commands::say::run(source, &output, synth.config.as_deref(), synth.overrides())
        }
        Commands::Speak {
            dict,
            text,
            output,
            synth,
        } => commands::speak::run(
            &dict,
            &text,
            &output,
            synth.config.as_deref(),
            synth.overrides(),
        ),
        Commands::SayPhones {
            voice,
            output,
            phones,
        } => commands::say_phones::run(&voice, &phones, &output),
        Commands::Inventory { json } => commands::inventory::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::FAILURE
        }
    }
}
