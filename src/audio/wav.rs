//! Audio payload adapters and WAV probing
//!
//! The capture widget hands the portal audio in whatever shape its transport
//! produces: a finished WAV file on disk, already-encoded bytes, or raw PCM
//! samples with a sample rate. Each shape gets one adapter behind the
//! `AudioSource` trait; downstream code only ever sees WAV bytes.

use std::io::Cursor;
use std::path::PathBuf;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::PortalError;

/// A captured recording that can be materialized as encoded WAV bytes.
pub trait AudioSource {
    fn wav_bytes(&self) -> Result<Vec<u8>, PortalError>;
}

/// A WAV file the capture widget already wrote to disk.
pub struct WavFileSource {
    path: PathBuf,
}

impl WavFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AudioSource for WavFileSource {
    fn wav_bytes(&self) -> Result<Vec<u8>, PortalError> {
        std::fs::read(&self.path)
            .map_err(|e| PortalError::AudioDecode(format!("read {:?}: {}", self.path, e)))
    }
}

/// Already-encoded WAV bytes, e.g. from an upload body.
pub struct WavBytesSource {
    bytes: Vec<u8>,
}

impl WavBytesSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl AudioSource for WavBytesSource {
    fn wav_bytes(&self) -> Result<Vec<u8>, PortalError> {
        Ok(self.bytes.clone())
    }
}

/// Raw mono PCM samples plus a sample rate, encoded on demand.
pub struct PcmSource {
    sample_rate: u32,
    samples: Vec<i16>,
}

impl PcmSource {
    pub fn new(sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Build from float samples in the -1.0..1.0 range.
    pub fn from_f32(sample_rate: u32, samples: &[f32]) -> Self {
        Self {
            sample_rate,
            samples: samples.iter().map(|&s| sample_to_i16(s)).collect(),
        }
    }
}

impl AudioSource for PcmSource {
    fn wav_bytes(&self) -> Result<Vec<u8>, PortalError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| PortalError::AudioDecode(format!("encode WAV: {}", e)))?;
            for &sample in &self.samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| PortalError::AudioDecode(format!("encode WAV: {}", e)))?;
            }
            writer
                .finalize()
                .map_err(|e| PortalError::AudioDecode(format!("finalize WAV: {}", e)))?;
        }

        Ok(cursor.into_inner())
    }
}

/// Duration in seconds of an encoded WAV payload, read from its header.
pub fn duration_seconds(wav_bytes: &[u8]) -> Result<f64, PortalError> {
    let reader = hound::WavReader::new(Cursor::new(wav_bytes))
        .map_err(|e| PortalError::AudioDecode(format!("not a valid WAV payload: {}", e)))?;
    let spec = reader.spec();
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}

/// Clamp and convert a float sample to i16 for WAV writing.
fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * i16::MAX as f32) as i16
}
