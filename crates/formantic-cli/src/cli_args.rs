//! CLI argument definitions for the formantic command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Args, Parser, Subcommand};
use formantic_cli::settings::Overrides;

/// Formantic - Formant Speech Synthesizer
#[derive(Parser)]
#[command(name = "formantic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by the formant-voice commands.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub(crate) struct SynthArgs {
    /// Speaking rate in phones per second (default 10)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Seed for voicing jitter and turbulence noise
    #[arg(long)]
    pub seed: Option<u32>,

    /// Output sample rate in Hz (default 44100)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// JSON synthesis config; flags override its values
    #[arg(long)]
    pub config: Option<String>,
}

impl SynthArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            phone_rate: self.rate,
            seed: self.seed,
            sample_rate: self.sample_rate,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize IPA text with the default formant voice
    Say {
        /// IPA text to speak
        #[arg(long, conflicts_with = "stdin", required_unless_present = "stdin")]
        ipa: Option<String>,

        /// Read IPA text from stdin
        #[arg(long)]
        stdin: bool,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        synth: SynthArgs,
    },

    /// Speak English text through a pronunciation dictionary
    Speak {
        /// CMU-format pronunciation dictionary
        #[arg(short, long)]
        dict: String,

        /// English text to speak
        #[arg(short, long)]
        text: String,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        synth: SynthArgs,
    },

    /// Speak ARPAbet phones with a recorded diphone voice
    SayPhones {
        /// Directory of diphone clips (NAME.wav plus optional cuts.json)
        #[arg(long)]
        voice: String,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        /// ARPAbet phones, e.g. HH AY1
        #[arg(required = true)]
        phones: Vec<String>,
    },

    /// List the default voice's symbols and their classes
    Inventory {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}
