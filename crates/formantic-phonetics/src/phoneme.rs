//! ARPAbet phones, stress markers, and articulatory classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PhoneticsError, PhoneticsResult};

/// Articulatory class of a phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneClass {
    /// Steady-state vowel or diphthong.
    Vowel,
    /// Plosive (oral stop).
    Stop,
    /// Stop released into a fricative (`CH`, `JH`).
    Affricate,
    /// Turbulent airflow through a narrow constriction.
    Fricative,
    /// Voiceless glottal frication (`HH`).
    Aspirate,
    /// Oral closure with an open nasal passage.
    Nasal,
    /// Lateral or retroflex approximant (`L`, `R`).
    Liquid,
    /// Semivowel (`W`, `Y`).
    Glide,
    /// Momentary closure of the glottis.
    GlottalStop,
}

impl PhoneClass {
    /// Returns true for classes produced with a continuous voiced formant structure.
    pub fn is_sonorant(&self) -> bool {
        matches!(
            self,
            PhoneClass::Vowel | PhoneClass::Nasal | PhoneClass::Liquid | PhoneClass::Glide
        )
    }
}

impl fmt::Display for PhoneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhoneClass::Vowel => "vowel",
            PhoneClass::Stop => "stop",
            PhoneClass::Affricate => "affricate",
            PhoneClass::Fricative => "fricative",
            PhoneClass::Aspirate => "aspirate",
            PhoneClass::Nasal => "nasal",
            PhoneClass::Liquid => "liquid",
            PhoneClass::Glide => "glide",
            PhoneClass::GlottalStop => "glottal stop",
        };
        f.write_str(name)
    }
}

/// The 39 phones of the CMU pronouncing dictionary.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arpabet {
    AA,
    AE,
    AH,
    AO,
    AW,
    AY,
    EH,
    ER,
    EY,
    IH,
    IY,
    OW,
    OY,
    UH,
    UW,
    B,
    D,
    G,
    K,
    P,
    T,
    CH,
    JH,
    DH,
    F,
    S,
    SH,
    TH,
    V,
    Z,
    ZH,
    HH,
    L,
    R,
    W,
    Y,
    M,
    N,
    NG,
}

impl Arpabet {
    /// Every phone in the inventory, vowels first.
    pub const ALL: [Arpabet; 39] = [
        Arpabet::AA,
        Arpabet::AE,
        Arpabet::AH,
        Arpabet::AO,
        Arpabet::AW,
        Arpabet::AY,
        Arpabet::EH,
        Arpabet::ER,
        Arpabet::EY,
        Arpabet::IH,
        Arpabet::IY,
        Arpabet::OW,
        Arpabet::OY,
        Arpabet::UH,
        Arpabet::UW,
        Arpabet::B,
        Arpabet::D,
        Arpabet::G,
        Arpabet::K,
        Arpabet::P,
        Arpabet::T,
        Arpabet::CH,
        Arpabet::JH,
        Arpabet::DH,
        Arpabet::F,
        Arpabet::S,
        Arpabet::SH,
        Arpabet::TH,
        Arpabet::V,
        Arpabet::Z,
        Arpabet::ZH,
        Arpabet::HH,
        Arpabet::L,
        Arpabet::R,
        Arpabet::W,
        Arpabet::Y,
        Arpabet::M,
        Arpabet::N,
        Arpabet::NG,
    ];

    /// Returns the textual ARPAbet name (e.g. `"NG"`).
    pub fn name(&self) -> &'static str {
        match self {
            Arpabet::AA => "AA",
            Arpabet::AE => "AE",
            Arpabet::AH => "AH",
            Arpabet::AO => "AO",
            Arpabet::AW => "AW",
            Arpabet::AY => "AY",
            Arpabet::EH => "EH",
            Arpabet::ER => "ER",
            Arpabet::EY => "EY",
            Arpabet::IH => "IH",
            Arpabet::IY => "IY",
            Arpabet::OW => "OW",
            Arpabet::OY => "OY",
            Arpabet::UH => "UH",
            Arpabet::UW => "UW",
            Arpabet::B => "B",
            Arpabet::D => "D",
            Arpabet::G => "G",
            Arpabet::K => "K",
            Arpabet::P => "P",
            Arpabet::T => "T",
            Arpabet::CH => "CH",
            Arpabet::JH => "JH",
            Arpabet::DH => "DH",
            Arpabet::F => "F",
            Arpabet::S => "S",
            Arpabet::SH => "SH",
            Arpabet::TH => "TH",
            Arpabet::V => "V",
            Arpabet::Z => "Z",
            Arpabet::ZH => "ZH",
            Arpabet::HH => "HH",
            Arpabet::L => "L",
            Arpabet::R => "R",
            Arpabet::W => "W",
            Arpabet::Y => "Y",
            Arpabet::M => "M",
            Arpabet::N => "N",
            Arpabet::NG => "NG",
        }
    }

    /// Returns the articulatory class of this phone.
    pub fn class(&self) -> PhoneClass {
        match self {
            Arpabet::AA
            | Arpabet::AE
            | Arpabet::AH
            | Arpabet::AO
            | Arpabet::AW
            | Arpabet::AY
            | Arpabet::EH
            | Arpabet::ER
            | Arpabet::EY
            | Arpabet::IH
            | Arpabet::IY
            | Arpabet::OW
            | Arpabet::OY
            | Arpabet::UH
            | Arpabet::UW => PhoneClass::Vowel,
            Arpabet::B | Arpabet::D | Arpabet::G | Arpabet::K | Arpabet::P | Arpabet::T => {
                PhoneClass::Stop
            }
            Arpabet::CH | Arpabet::JH => PhoneClass::Affricate,
            Arpabet::DH
            | Arpabet::F
            | Arpabet::S
            | Arpabet::SH
            | Arpabet::TH
            | Arpabet::V
            | Arpabet::Z
            | Arpabet::ZH => PhoneClass::Fricative,
            Arpabet::HH => PhoneClass::Aspirate,
            Arpabet::L | Arpabet::R => PhoneClass::Liquid,
            Arpabet::W | Arpabet::Y => PhoneClass::Glide,
            Arpabet::M | Arpabet::N | Arpabet::NG => PhoneClass::Nasal,
        }
    }

    /// Returns the IPA rendering of this phone as spoken in General American.
    pub fn ipa(&self) -> &'static str {
        match self {
            Arpabet::AA => "ɑ",
            Arpabet::AE => "æ",
            Arpabet::AH => "ʌ",
            Arpabet::AO => "ɔ",
            Arpabet::AW => "aʊ",
            Arpabet::AY => "aɪ",
            Arpabet::EH => "ɛ",
            Arpabet::ER => "ɝ",
            Arpabet::EY => "eɪ",
            Arpabet::IH => "ɪ",
            Arpabet::IY => "i",
            Arpabet::OW => "oʊ",
            Arpabet::OY => "ɔɪ",
            Arpabet::UH => "ʊ",
            Arpabet::UW => "u",
            Arpabet::B => "b",
            Arpabet::D => "d",
            Arpabet::G => "g",
            Arpabet::K => "k",
            Arpabet::P => "p",
            Arpabet::T => "t",
            Arpabet::CH => "ʧ",
            Arpabet::JH => "ʤ",
            Arpabet::DH => "ð",
            Arpabet::F => "f",
            Arpabet::S => "s",
            Arpabet::SH => "ʃ",
            Arpabet::TH => "θ",
            Arpabet::V => "v",
            Arpabet::Z => "z",
            Arpabet::ZH => "ʒ",
            Arpabet::HH => "h",
            Arpabet::L => "l",
            Arpabet::R => "ɹ",
            Arpabet::W => "w",
            Arpabet::Y => "j",
            Arpabet::M => "m",
            Arpabet::N => "n",
            Arpabet::NG => "ŋ",
        }
    }
}

impl fmt::Display for Arpabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Arpabet {
    type Err = PhoneticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arpabet::ALL
            .iter()
            .copied()
            .find(|phone| phone.name() == s)
            .ok_or_else(|| PhoneticsError::unknown_phoneme(s))
    }
}

/// Lexical stress carried by a vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stress {
    /// Marked `0`.
    Unstressed,
    /// Marked `1`.
    Primary,
    /// Marked `2`.
    Secondary,
}

impl Stress {
    /// Parses a CMU stress digit.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    /// Returns the CMU stress digit.
    pub fn digit(&self) -> char {
        match self {
            Stress::Unstressed => '0',
            Stress::Primary => '1',
            Stress::Secondary => '2',
        }
    }
}

/// A phone together with its (optional) stress marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phoneme {
    /// The phone.
    pub phone: Arpabet,
    /// Stress marker, only ever present on vowels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<Stress>,
}

impl Phoneme {
    /// Creates an unstressed-unmarked phoneme.
    pub fn new(phone: Arpabet) -> Self {
        Self {
            phone,
            stress: None,
        }
    }

    /// Creates a phoneme with an explicit stress marker.
    pub fn stressed(phone: Arpabet, stress: Stress) -> Self {
        Self {
            phone,
            stress: Some(stress),
        }
    }

    /// Returns the phone name without any stress digit.
    ///
    /// Recorded clip names are keyed by this form.
    pub fn name(&self) -> &'static str {
        self.phone.name()
    }

    /// Returns the IPA rendering, reducing unstressed `AH`/`ER` to their schwa forms.
    pub fn ipa(&self) -> &'static str {
        match (self.phone, self.stress) {
            (Arpabet::AH, Some(Stress::Unstressed)) => "ə",
            (Arpabet::ER, Some(Stress::Unstressed)) => "ɚ",
            (phone, _) => phone.ipa(),
        }
    }
}

impl From<Arpabet> for Phoneme {
    fn from(phone: Arpabet) -> Self {
        Phoneme::new(phone)
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stress {
            Some(stress) => write!(f, "{}{}", self.phone, stress.digit()),
            None => write!(f, "{}", self.phone),
        }
    }
}

impl FromStr for Phoneme {
    type Err = PhoneticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, stress) = match s.chars().last().and_then(Stress::from_digit) {
            Some(stress) => (&s[..s.len() - 1], Some(stress)),
            None => (s, None),
        };
        let phone: Arpabet = base.parse().map_err(|_| PhoneticsError::unknown_phoneme(s))?;
        if stress.is_some() && phone.class() != PhoneClass::Vowel {
            return Err(PhoneticsError::InvalidStress {
                symbol: s.to_string(),
            });
        }
        Ok(Phoneme { phone, stress })
    }
}

/// Parses a whitespace-separated ARPAbet transcription such as `"HH AH0 L OW1"`.
pub fn parse_phonemes(text: &str) -> PhoneticsResult<Vec<Phoneme>> {
    text.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inventory_is_complete_and_unique() {
        let mut names: Vec<&str> = Arpabet::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 39);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for phone in Arpabet::ALL {
            assert_eq!(phone.name().parse::<Arpabet>().unwrap(), phone);
        }
    }

    #[test]
    fn test_class_counts() {
        let count = |class: PhoneClass| Arpabet::ALL.iter().filter(|p| p.class() == class).count();
        assert_eq!(count(PhoneClass::Vowel), 15);
        assert_eq!(count(PhoneClass::Stop), 6);
        assert_eq!(count(PhoneClass::Affricate), 2);
        assert_eq!(count(PhoneClass::Fricative), 8);
        assert_eq!(count(PhoneClass::Aspirate), 1);
        assert_eq!(count(PhoneClass::Liquid), 2);
        assert_eq!(count(PhoneClass::Glide), 2);
        assert_eq!(count(PhoneClass::Nasal), 3);
    }

    #[test]
    fn test_parse_stressed_vowel() {
        let phoneme: Phoneme = "AH0".parse().unwrap();
        assert_eq!(phoneme, Phoneme::stressed(Arpabet::AH, Stress::Unstressed));
        assert_eq!(phoneme.to_string(), "AH0");
        assert_eq!(phoneme.name(), "AH");
    }

    #[test]
    fn test_parse_plain_consonant() {
        let phoneme: Phoneme = "NG".parse().unwrap();
        assert_eq!(phoneme, Phoneme::new(Arpabet::NG));
        assert_eq!(phoneme.to_string(), "NG");
    }

    #[test]
    fn test_stress_on_consonant_is_rejected() {
        let err = "K1".parse::<Phoneme>().unwrap_err();
        assert!(matches!(err, PhoneticsError::InvalidStress { .. }));
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = "QQ".parse::<Phoneme>().unwrap_err();
        assert!(matches!(err, PhoneticsError::UnknownPhoneme { ref symbol } if symbol == "QQ"));
        assert!("".parse::<Phoneme>().is_err());
        assert!("3".parse::<Phoneme>().is_err());
    }

    #[test]
    fn test_parse_phonemes() {
        let phones = parse_phonemes("  HH AH0   L OW1 ").unwrap();
        let text: Vec<String> = phones.iter().map(ToString::to_string).collect();
        assert_eq!(text, vec!["HH", "AH0", "L", "OW1"]);
        assert!(parse_phonemes("HH XX").is_err());
        assert!(parse_phonemes("").unwrap().is_empty());
    }

    #[test]
    fn test_unstressed_reduction_to_schwa() {
        assert_eq!("AH0".parse::<Phoneme>().unwrap().ipa(), "ə");
        assert_eq!("AH1".parse::<Phoneme>().unwrap().ipa(), "ʌ");
        assert_eq!("ER0".parse::<Phoneme>().unwrap().ipa(), "ɚ");
        assert_eq!("ER1".parse::<Phoneme>().unwrap().ipa(), "ɝ");
    }

    #[test]
    fn test_sonorant_classes() {
        assert!(PhoneClass::Nasal.is_sonorant());
        assert!(PhoneClass::Glide.is_sonorant());
        assert!(!PhoneClass::Stop.is_sonorant());
        assert!(!PhoneClass::GlottalStop.is_sonorant());
    }

    #[test]
    fn test_serde_uses_snake_case_classes() {
        let json = serde_json::to_string(&PhoneClass::GlottalStop).unwrap();
        assert_eq!(json, "\"glottal_stop\"");
    }
}
