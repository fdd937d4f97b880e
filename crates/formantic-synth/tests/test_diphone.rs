//! Integration tests for the diphone clip path.

use std::collections::HashMap;

use formantic_phonetics::{parse_phonemes, Arpabet};
use formantic_synth::diphone::{approach_name, diphone_name, release_name};
use formantic_synth::{ClipLibrary, DiphoneVoice, SynthError};
use proptest::prelude::*;

/// A library with edge clips for every phone; clip length encodes the phone.
fn full_library() -> HashMap<String, Vec<f64>> {
    let mut clips = HashMap::new();
    for (i, phone) in Arpabet::ALL.iter().enumerate() {
        clips.insert(approach_name(phone.name()), vec![0.1; i + 1]);
        clips.insert(release_name(phone.name()), vec![-0.1; 2 * i + 3]);
    }
    clips
}

#[test]
fn test_full_inventory_loads() {
    let voice = DiphoneVoice::new(full_library(), 44_100).unwrap();
    assert_eq!(voice.inventory().count(), 39);
    assert_eq!(voice.sample_rate(), 44_100);
}

#[test]
fn test_missing_edge_is_fatal() {
    let mut clips = full_library();
    clips.remove("-NG");
    match DiphoneVoice::new(clips, 44_100) {
        Err(SynthError::MissingRecording { name }) => assert_eq!(name, "-NG"),
        other => panic!("expected missing recording, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_recorded_diphone_is_used() {
    let mut clips = full_library();
    clips.insert(diphone_name("HH", "AY"), vec![0.5; 7]);
    let voice = DiphoneVoice::new(clips, 44_100).unwrap();
    assert_eq!(voice.get_diphone("HH", "AY").unwrap(), vec![0.5; 7]);
}

#[test]
fn test_sentence_length() {
    let voice = DiphoneVoice::new(full_library(), 44_100).unwrap();
    let phonemes = parse_phonemes("HH AY1").unwrap();
    let expected = voice.clips().clip("-HH").unwrap().len()
        + voice.clips().clip("HH-").unwrap().len()
        + voice.clips().clip("-AY").unwrap().len()
        + voice.clips().clip("AY-").unwrap().len();
    assert_eq!(voice.synthesize(&phonemes).unwrap().len(), expected);
}

proptest! {
    /// Without a direct recording, a diphone is the release plus the approach.
    #[test]
    fn fallback_length_is_sum_of_edges(a in 0usize..39, b in 0usize..39) {
        let voice = DiphoneVoice::new(full_library(), 44_100).unwrap();
        let p = Arpabet::ALL[a].name();
        let q = Arpabet::ALL[b].name();
        let diphone = voice.get_diphone(p, q).unwrap();
        let release = voice.clips().clip(&release_name(p)).unwrap().len();
        let approach = voice.clips().clip(&approach_name(q)).unwrap().len();
        prop_assert_eq!(diphone.len(), release + approach);
    }
}
