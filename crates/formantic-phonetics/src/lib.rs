//! Formantic Phonetics Library
//!
//! This crate holds the vocabulary the synthesizer speaks in: the closed
//! catalog of phones, their articulatory classes, and the ways text reaches
//! them.
//!
//! # Overview
//!
//! - **ARPAbet**: the 39-phone CMU alphabet, with optional stress digits
//!   (`AH0`, `AH1`, `AH2`), parsed into [`Phoneme`] values.
//! - **IPA**: a per-symbol class catalog for the default formant voice plus a
//!   diphthong-aware splitter.
//! - **Dictionary**: CMU-format pronunciation dictionaries and the
//!   [`Lexicon`] lookup interface the synthesizer consumes.
//!
//! # Example
//!
//! ```
//! use formantic_phonetics::{parse_phonemes, Arpabet, PhoneClass};
//!
//! let phones = parse_phonemes("HH AH0 L OW1").unwrap();
//! assert_eq!(phones[0].phone, Arpabet::HH);
//! assert_eq!(phones[3].phone.class(), PhoneClass::Vowel);
//!
//! let ipa: String = phones.iter().map(|p| p.phone.ipa()).collect();
//! assert_eq!(ipa, "hʌloʊ");
//! ```
//!
//! # Modules
//!
//! - [`phoneme`]: ARPAbet phones, stress, and articulatory classes
//! - [`ipa`]: IPA symbol classes and splitting
//! - [`dictionary`]: pronunciation dictionaries and text-to-IPA translation
//! - [`error`]: error types

pub mod dictionary;
pub mod error;
pub mod ipa;
pub mod phoneme;

// Re-export commonly used types at the crate root
pub use dictionary::{translate_to_ipa, Dictionary, Lexicon, Translation};
pub use error::{PhoneticsError, PhoneticsResult};
pub use phoneme::{parse_phonemes, Arpabet, PhoneClass, Phoneme, Stress};
