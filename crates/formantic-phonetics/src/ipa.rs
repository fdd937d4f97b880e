//! IPA symbol catalog.
//!
//! The formant voice consumes IPA one code point at a time, so the catalog is
//! keyed by `char`. Length marks (`ː`) and stress marks carry no class of their
//! own and are left to the caller to skip.

use crate::phoneme::PhoneClass;

/// Multi-character vowels recognised by [`split_ipa`], longest first.
pub const DIPHTHONGS: [&str; 10] = ["juː", "ɑː", "aɪ", "aʊ", "eɪ", "iː", "ɔː", "ɔɪ", "oʊ", "uː"];

/// IPA length mark.
pub const LENGTH_MARK: char = 'ː';

/// Returns the articulatory class of a single IPA symbol.
///
/// Covers every symbol of the default formant voice. Returns `None` for
/// anything else, including modifiers such as `ː` and `ˈ`.
pub fn class_of(symbol: char) -> Option<PhoneClass> {
    let class = match symbol {
        'i' | 'ɪ' | 'e' | 'ɛ' | 'æ' | 'ɑ' | 'a' | 'ɒ' | 'ɔ' | 'o' | 'ʊ' | 'u' | 'ʌ' | 'ə' | 'ɜ'
        | 'ɝ' | 'ɚ' | 'ɨ' => PhoneClass::Vowel,
        'p' | 'b' | 't' | 'd' | 'k' | 'g' | 'ɡ' => PhoneClass::Stop,
        'ʧ' | 'ʤ' => PhoneClass::Affricate,
        'f' | 'v' | 'θ' | 'ð' | 's' | 'z' | 'ʃ' | 'ʒ' => PhoneClass::Fricative,
        'h' => PhoneClass::Aspirate,
        'm' | 'n' | 'ŋ' => PhoneClass::Nasal,
        'l' | 'ɹ' | 'r' => PhoneClass::Liquid,
        'w' | 'j' => PhoneClass::Glide,
        'ʔ' => PhoneClass::GlottalStop,
        _ => return None,
    };
    Some(class)
}

/// Splits an IPA string into phone strings.
///
/// Diphthongs and long vowels from [`DIPHTHONGS`] are kept together; every
/// other code point becomes its own phone. Whitespace is dropped.
///
/// # Example
///
/// ```
/// use formantic_phonetics::ipa::split_ipa;
///
/// assert_eq!(split_ipa("haɪ juː"), vec!["h", "aɪ", "juː"]);
/// ```
pub fn split_ipa(text: &str) -> Vec<String> {
    let mut phones = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        match DIPHTHONGS.iter().find(|d| rest.starts_with(*d)) {
            Some(diphthong) => {
                phones.push((*diphthong).to_string());
                rest = &rest[diphthong.len()..];
            }
            None => {
                phones.push(c.to_string());
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    phones
}

/// Returns true if `phone` is a vowel, long vowel, or diphthong.
pub fn is_vowel(phone: &str) -> bool {
    if DIPHTHONGS.contains(&phone) {
        return true;
    }
    let core = phone.trim_end_matches(LENGTH_MARK);
    !core.is_empty() && core.chars().all(|c| class_of(c) == Some(PhoneClass::Vowel))
}
