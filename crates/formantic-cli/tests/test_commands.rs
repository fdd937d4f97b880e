//! Integration tests for the CLI commands, driven through the library.

use formantic_cli::commands::{say, say_phones, speak};
use formantic_cli::settings::Overrides;
use formantic_cli::voice_dir;
use formantic_phonetics::Arpabet;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tempfile::tempdir;

const CLIP_RATE: u32 = 8_000;
const CLIP_LEN: usize = 100;

fn read_wav(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(Result::unwrap).collect();
    (spec, samples)
}

fn write_clip(dir: &Path, name: &str, len: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: CLIP_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(dir.join(format!("{}.wav", name)), spec).unwrap();
    for i in 0..len {
        writer.write_sample(((i % 50) as i16 - 25) * 100).unwrap();
    }
    writer.finalize().unwrap();
}

/// A voice directory with edge clips for every ARPAbet phone.
fn write_voice(dir: &Path) {
    for phone in Arpabet::ALL {
        write_clip(dir, &format!("-{}", phone.name()), CLIP_LEN);
        write_clip(dir, &format!("{}-", phone.name()), CLIP_LEN);
    }
}

// ============================================================================
// say / speak
// ============================================================================

#[test]
fn test_say_writes_mono_pcm16() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out").join("hi.wav");
    let output = output.to_str().unwrap();

    let code = say::say_text(
        "haɪ",
        output,
        None,
        Overrides {
            sample_rate: Some(16_000),
            ..Overrides::default()
        },
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = read_wav(Path::new(output));
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 16_000);
    assert!(samples.len() > 1_600);
    assert!(samples.iter().any(|s| *s != 0));
}

#[test]
fn test_say_is_deterministic() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    let overrides = Overrides {
        seed: Some(5),
        ..Overrides::default()
    };

    say::say_text("sæt", a.to_str().unwrap(), None, overrides).unwrap();
    say::say_text("sæt", b.to_str().unwrap(), None, overrides).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn test_say_rejects_text_without_symbols() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("x.wav");
    assert!(say::say_text("123", output.to_str().unwrap(), None, Overrides::default()).is_err());
    assert!(!output.exists());
}

#[test]
fn test_speak_uses_dictionary() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("dict.txt");
    fs::write(&dict, ";;; test\nHELLO  HH AH0 L OW1\nWORLD  W ER1 L D\n").unwrap();
    let output = dir.path().join("hello.wav");

    let code = speak::run(
        dict.to_str().unwrap(),
        "Hello, world! Zebra",
        output.to_str().unwrap(),
        None,
        Overrides::default(),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = read_wav(&output);
    assert_eq!(spec.sample_rate, 44_100);
    assert!(!samples.is_empty());
}

#[test]
fn test_speak_fails_when_no_word_is_known() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("dict.txt");
    fs::write(&dict, "HELLO  HH AH0 L OW1\n").unwrap();
    let output = dir.path().join("x.wav");

    let result = speak::run(
        dict.to_str().unwrap(),
        "zebra",
        output.to_str().unwrap(),
        None,
        Overrides::default(),
    );
    assert!(result.is_err());
}

// ============================================================================
// say-phones / voice directories
// ============================================================================

#[test]
fn test_voice_dir_applies_cuts() {
    let dir = tempdir().unwrap();
    write_voice(dir.path());
    fs::write(
        dir.path().join(voice_dir::CUTS_FILE),
        r#"{ "-HH": { "start": 0.0, "end": 0.0078125 } }"#,
    )
    .unwrap();

    let (clips, rate) = voice_dir::load_clips(dir.path()).unwrap();
    assert_eq!(rate, CLIP_RATE);
    assert_eq!(clips.len(), 78);
    assert_eq!(clips["-HH"].len(), 62);
    assert_eq!(clips["HH-"].len(), CLIP_LEN);
}

#[test]
fn test_say_phones_concatenates_clips() {
    let dir = tempdir().unwrap();
    let voice = dir.path().join("voice");
    fs::create_dir(&voice).unwrap();
    write_voice(&voice);
    let output = dir.path().join("hi.wav");

    let phones = vec!["HH".to_string(), "AY1".to_string()];
    let code = say_phones::run(voice.to_str().unwrap(), &phones, output.to_str().unwrap()).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = read_wav(&output);
    assert_eq!(spec.sample_rate, CLIP_RATE);
    // -HH, HH- + -AY, AY-
    assert_eq!(samples.len(), 4 * CLIP_LEN);
}

#[test]
fn test_say_phones_rejects_invalid_phone() {
    let dir = tempdir().unwrap();
    write_voice(dir.path());
    let output = dir.path().join("x.wav");

    let phones = vec!["HH".to_string(), "QQ".to_string()];
    let err = say_phones::run(dir.path().to_str().unwrap(), &phones, output.to_str().unwrap())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("QQ"));
}

#[test]
fn test_incomplete_voice_is_an_error() {
    let dir = tempdir().unwrap();
    write_voice(dir.path());
    fs::remove_file(dir.path().join("-NG.wav")).unwrap();

    let err = voice_dir::load_voice(dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("-NG"));
}

#[test]
fn test_empty_voice_dir_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(voice_dir::load_clips(dir.path()).is_err());
}
