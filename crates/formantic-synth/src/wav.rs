//! Deterministic 16-bit mono WAV encoding.
//!
//! Files carry only the RIFF header, a PCM `fmt ` chunk and the `data`
//! chunk, so identical samples always produce identical bytes. The BLAKE3
//! hash of the PCM payload identifies a rendering independent of the header.

use std::io::{self, Write};

const BITS_PER_SAMPLE: u16 = 16;
const CHANNELS: u16 = 1;
const HEADER_LEN: usize = 44;

/// Converts samples to little-endian signed 16-bit PCM.
///
/// Samples outside `[-1, 1]` are clipped.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|sample| {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
            value.to_le_bytes()
        })
        .collect()
}

/// Writes a mono PCM16 WAV file.
///
/// # Arguments
/// * `writer` - Output sink
/// * `sample_rate` - Sample rate in Hz
/// * `pcm` - Little-endian PCM16 payload
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, pcm: &[u8]) -> io::Result<()> {
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_len = pcm.len() as u32;

    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_len).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_len.to_le_bytes())?;
    writer.write_all(pcm)
}

/// Returns the `data` chunk payload of a WAV file, if it has one.
pub fn extract_pcm_data(wav: &[u8]) -> Option<&[u8]> {
    if wav.len() < 12 || &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav.len() {
        let id = &wav[pos..pos + 4];
        let size = u32::from_le_bytes([wav[pos + 4], wav[pos + 5], wav[pos + 6], wav[pos + 7]]) as usize;
        let start = pos + 8;
        if id == b"data" {
            return wav.get(start..start.checked_add(size)?);
        }
        // Chunks are word aligned
        pos = start + size + (size & 1);
    }
    None
}

/// BLAKE3 hex digest of a PCM payload.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// An encoded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavResult {
    /// Complete file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples.
    pub fn from_samples(samples: &[f64], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let mut wav_data = Vec::with_capacity(HEADER_LEN + pcm.len());
        write_wav(&mut wav_data, sample_rate, &pcm).expect("writing to a Vec cannot fail");

        Self {
            pcm_hash: pcm_hash(&pcm),
            wav_data,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
