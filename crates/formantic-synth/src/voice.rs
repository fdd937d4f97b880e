//! Voices: symbol inventories and the synthesis driver.

use std::collections::BTreeMap;
use std::time::Duration;

use formantic_phonetics::ipa::{is_vowel, split_ipa, LENGTH_MARK};
use formantic_phonetics::Phoneme;
use tracing::{debug, info};

use crate::config::SynthConfig;
use crate::error::SynthResult;
use crate::phone::{Channel, Phone, Place};
use crate::tracks::Track;
use crate::vocal_system::{FormantState, VocalSystem};

/// Characters that separate words besides whitespace.
const WORD_SEPARATORS: [char; 4] = ['|', ',', '.', '‖'];

/// Stress and length marks, skipped without being reported.
const SILENT_MARKS: [char; 3] = ['ˈ', 'ˌ', 'ː'];

const VOWEL_VOLUMES: [f64; 3] = [0.3, 0.2, 0.1];

/// Hold multiplier for a vowel marked long (`ɑː`).
pub const LONG_VOWEL_FACTOR: f64 = 1.5;

const TENSE_MS: f64 = 150.0;
const LAX_MS: f64 = 90.0;
const OPEN_MS: f64 = 120.0;

/// Vowel formant table: symbol, F1, F2, F3, nominal duration.
const VOWELS: [(char, f64, f64, f64, f64); 18] = [
    ('i', 280.0, 2_250.0, 2_890.0, TENSE_MS),
    ('ɪ', 400.0, 1_920.0, 2_560.0, LAX_MS),
    ('e', 400.0, 2_100.0, 2_700.0, TENSE_MS),
    ('ɛ', 550.0, 1_770.0, 2_490.0, LAX_MS),
    ('æ', 660.0, 1_720.0, 2_410.0, TENSE_MS),
    ('ɑ', 730.0, 1_090.0, 2_440.0, TENSE_MS),
    ('a', 800.0, 1_200.0, 2_800.0, OPEN_MS),
    ('ɒ', 600.0, 900.0, 2_400.0, OPEN_MS),
    ('ɔ', 570.0, 840.0, 2_410.0, TENSE_MS),
    ('o', 450.0, 800.0, 2_620.0, TENSE_MS),
    ('ʊ', 440.0, 1_020.0, 2_240.0, LAX_MS),
    ('u', 310.0, 870.0, 2_250.0, TENSE_MS),
    ('ʌ', 640.0, 1_190.0, 2_390.0, LAX_MS),
    ('ə', 500.0, 1_500.0, 2_490.0, LAX_MS),
    ('ɜ', 490.0, 1_350.0, 1_690.0, OPEN_MS),
    ('ɝ', 490.0, 1_350.0, 1_690.0, TENSE_MS),
    ('ɚ', 490.0, 1_350.0, 1_690.0, LAX_MS),
    ('ɨ', 350.0, 1_650.0, 2_500.0, LAX_MS),
];

fn vowel_target(f1: f64, f2: f64, f3: f64) -> FormantState {
    let [v1, v2, v3] = VOWEL_VOLUMES;
    FormantState::new(f1, v1, f2, v2, f3, v3)
}

/// A mapping from IPA symbol to phone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Voice {
    phones: BTreeMap<char, Phone>,
}

/// Rendered speech plus bookkeeping about what was spoken.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Mono samples, nominally in `[-1, 1]`.
    pub samples: Vec<f64>,
    /// Sample rate of `samples`.
    pub sample_rate: u32,
    /// Phones encoded.
    pub phone_count: usize,
    /// Words with at least one recognised phone.
    pub word_count: usize,
    /// Symbols with no phone in the voice, in input order.
    pub skipped: Vec<char>,
}

impl Utterance {
    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

impl Voice {
    /// Creates a voice with no phones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a phone, builder style.
    pub fn with_phone(mut self, symbol: char, phone: Phone) -> Self {
        self.insert(symbol, phone);
        self
    }

    /// Adds or replaces a phone.
    pub fn insert(&mut self, symbol: char, phone: Phone) {
        self.phones.insert(symbol, phone);
    }

    /// Returns the phone for `symbol`.
    pub fn phone(&self, symbol: char) -> Option<&Phone> {
        self.phones.get(&symbol)
    }

    /// Iterates over the inventory in symbol order.
    pub fn phones(&self) -> impl Iterator<Item = (char, &Phone)> {
        self.phones.iter().map(|(symbol, phone)| (*symbol, phone))
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.phones.len()
    }

    /// Returns true if the voice has no phones.
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    /// The built-in General American inventory.
    pub fn default_english() -> Self {
        let mut voice = Voice::new();

        for (symbol, f1, f2, f3, duration_ms) in VOWELS {
            voice.insert(
                symbol,
                Phone::Vowel {
                    target: vowel_target(f1, f2, f3),
                    duration_ms,
                },
            );
        }

        voice.insert('w', Phone::Glide {
            target: FormantState::new(300.0, 0.25, 610.0, 0.15, 2_200.0, 0.05),
            duration_ms: 60.0,
        });
        voice.insert('j', Phone::Glide {
            target: FormantState::new(260.0, 0.25, 2_070.0, 0.15, 3_000.0, 0.05),
            duration_ms: 60.0,
        });

        for (symbol, voiced) in [('p', false), ('b', true)] {
            voice.insert(symbol, Phone::BilabialPlosive { voiced });
        }
        for (symbol, voiced) in [('t', false), ('d', true)] {
            voice.insert(symbol, Phone::AlveolarPlosive { voiced });
        }
        for (symbol, voiced) in [('k', false), ('g', true), ('ɡ', true)] {
            voice.insert(symbol, Phone::VelarPlosive { voiced });
        }

        voice.insert('m', Phone::Nasal {
            place: Place::Bilabial,
            resonance: FormantState::new(250.0, 0.3, 1_100.0, 0.05, 2_400.0, 0.05),
        });
        voice.insert('n', Phone::Nasal {
            place: Place::Alveolar,
            resonance: FormantState::new(250.0, 0.3, 1_700.0, 0.08, 2_600.0, 0.08),
        });
        voice.insert('ŋ', Phone::Nasal {
            place: Place::Velar,
            resonance: FormantState::new(250.0, 0.3, 2_300.0, 0.1, 2_750.0, 0.1),
        });

        for (symbol, channel, voiced) in [
            ('s', Channel::S, false),
            ('z', Channel::S, true),
            ('ʃ', Channel::SH, false),
            ('ʒ', Channel::SH, true),
            ('θ', Channel::TH, false),
            ('ð', Channel::TH, true),
            ('f', Channel::F, false),
            ('v', Channel::F, true),
            ('h', Channel::H, false),
        ] {
            voice.insert(symbol, Phone::Fricative { channel, voiced });
        }

        voice.insert('ʧ', Phone::Affricate { voiced: false });
        voice.insert('ʤ', Phone::Affricate { voiced: true });

        let rhotic = FormantState::new(420.0, 0.25, 1_300.0, 0.15, 1_600.0, 0.1);
        voice.insert('ɹ', Phone::RetroflexLiquid { resonance: rhotic });
        voice.insert('r', Phone::RetroflexLiquid { resonance: rhotic });
        voice.insert('l', Phone::LateralLiquid {
            resonance: FormantState::new(360.0, 0.25, 1_300.0, 0.1, 2_700.0, 0.05),
        });

        voice.insert('ʔ', Phone::GlottalStop);

        voice
    }

    /// Synthesizes IPA text at the default sample rate.
    ///
    /// # Arguments
    /// * `text` - IPA symbols; words are separated by whitespace or `| , . ‖`
    /// * `phone_rate` - Speaking rate in phones per second
    ///
    /// # Returns
    /// Mono samples at 44.1 kHz
    pub fn synthesize(&self, text: &str, phone_rate: f64) -> SynthResult<Vec<f64>> {
        let config = SynthConfig::default().with_phone_rate(phone_rate);
        Ok(self.synthesize_with(text, &config)?.samples)
    }

    /// Synthesizes IPA text with full configuration.
    ///
    /// Symbols missing from the voice are dropped and listed in
    /// [`Utterance::skipped`]. Text with no recognised symbols renders to an
    /// empty buffer.
    pub fn synthesize_with(&self, text: &str, config: &SynthConfig) -> SynthResult<Utterance> {
        config.validate()?;

        let mut system = VocalSystem::new(config.seed).with_tempo(config.tempo());
        let release = Duration::from_secs_f64(config.word_release_ms / 1_000.0);
        let gap = Duration::from_secs_f64(config.word_gap_ms / 1_000.0);

        let mut skipped = Vec::new();
        let mut phone_count = 0;
        let mut word_count = 0;

        for word in split_words(text) {
            let phones = self.word_phones(word, &mut skipped);
            if phones.is_empty() {
                continue;
            }
            debug!(word, phones = phones.len(), "encoding word");

            for (i, phone) in phones.iter().enumerate() {
                let previous = i.checked_sub(1).and_then(|j| phones.get(j));
                let next = phones.get(i + 1);
                phone.encode_beginning(&mut system, previous, next);
            }
            system.adjust_volume(0.0, release);
            system.continue_for(gap);

            phone_count += phones.len();
            word_count += 1;
        }

        let samples = system.render(config.sample_rate);
        info!(
            phones = phone_count,
            words = word_count,
            skipped = skipped.len(),
            samples = samples.len(),
            seconds = samples.len() as f64 / config.sample_rate as f64,
            "synthesized utterance"
        );

        Ok(Utterance {
            samples,
            sample_rate: config.sample_rate,
            phone_count,
            word_count,
            skipped,
        })
    }

    /// Synthesizes an ARPAbet phoneme sequence as a single word.
    pub fn synthesize_phonemes(
        &self,
        phonemes: &[Phoneme],
        config: &SynthConfig,
    ) -> SynthResult<Utterance> {
        let text: String = phonemes.iter().map(Phoneme::ipa).collect();
        self.synthesize_with(&text, config)
    }

    fn word_phones(&self, word: &str, skipped: &mut Vec<char>) -> Vec<Phone> {
        let mut phones: Vec<Phone> = Vec::new();
        for token in split_ipa(word) {
            for symbol in token.chars() {
                match self.phones.get(&symbol) {
                    Some(phone) => phones.push(*phone),
                    None if SILENT_MARKS.contains(&symbol) => {}
                    None => {
                        debug!(symbol = %symbol, word, "dropping unknown symbol");
                        skipped.push(symbol);
                    }
                }
            }

            // A bare mark lengthens whatever vowel came just before it.
            let long = token.ends_with(LENGTH_MARK)
                && (token.chars().count() == 1 || is_vowel(&token));
            if long {
                if let Some(last) = phones.last_mut() {
                    *last = last.lengthened(LONG_VOWEL_FACTOR);
                }
            }
        }
        phones
    }
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
        .filter(|word| !word.is_empty())
}
