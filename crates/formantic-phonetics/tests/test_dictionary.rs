//! Integration tests for dictionary loading and text translation.

use std::io::Write;

use formantic_phonetics::{translate_to_ipa, Arpabet, Dictionary, Lexicon, Phoneme, Stress};
use pretty_assertions::assert_eq;

const CMU_EXCERPT: &str = ";;; # CMUdict  --  Major Version: 0.07
;;; excerpt used by the integration tests
CAT  K AE1 T
CHURCH  CH ER1 CH
JUDGE  JH AH1 JH
SING  S IH1 NG
THE  DH AH0
WATER  W AO1 T ER0
YES  Y EH1 S
";

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CMU_EXCERPT.as_bytes()).unwrap();

    let dict = Dictionary::load(file.path()).unwrap();
    assert_eq!(dict.len(), 7);
    assert!(!dict.is_empty());
    assert_eq!(dict.lookup_raw("water").as_deref(), Some("W AO1 T ER0"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dictionary::load(dir.path().join("absent.dict")).unwrap_err();
    assert_eq!(err.code(), "PHON_003");
}

#[test]
fn test_lexicon_trait_returns_owned_phonemes() {
    let dict = Dictionary::parse(CMU_EXCERPT);
    let lexicon: &dyn Lexicon = &dict;

    let cat = lexicon.lookup("Cat").unwrap();
    assert_eq!(
        cat,
        vec![
            Phoneme::new(Arpabet::K),
            Phoneme::stressed(Arpabet::AE, Stress::Primary),
            Phoneme::new(Arpabet::T),
        ]
    );
    assert!(lexicon.lookup("dog").is_none());
}

#[test]
fn test_translate_sentence() {
    let dict = Dictionary::parse(CMU_EXCERPT);
    let translation = translate_to_ipa(&dict, "The cat, the CHURCH; yes.");
    assert_eq!(translation.ipa, "ðə kæt ðə ʧɝʧ jɛs");
    assert!(translation.is_complete());
}

#[test]
fn test_translate_reports_every_missing_word() {
    let dict = Dictionary::parse(CMU_EXCERPT);
    let translation = translate_to_ipa(&dict, "sing, judge and dance");
    assert_eq!(translation.ipa, "sɪŋ ʤʌʤ");
    assert_eq!(translation.missing, vec!["and", "dance"]);
}

#[test]
fn test_insert_overrides_entry() {
    let mut dict = Dictionary::parse(CMU_EXCERPT);
    dict.insert("the", vec![Phoneme::new(Arpabet::DH), Phoneme::stressed(Arpabet::IY, Stress::Primary)]);
    assert_eq!(dict.lookup_raw("THE").as_deref(), Some("DH IY1"));
    assert_eq!(dict.len(), 7);
}
