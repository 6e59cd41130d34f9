// src/core/audio.rs
//
// Audio loading. Uses Symphonia for format-agnostic decoding and rubato
// for explicit resampling. Multi-channel input is downmixed to mono by
// channel average; the native sample rate is preserved unless a target
// rate is requested.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{PipelineError, Result};

/// Decoded mono audio with its provenance.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source before downmix
    pub source_channels: usize,
    /// Codec name as reported by the decoder
    pub codec_name: String,
    /// Path the buffer was decoded from
    pub path: PathBuf,
}

impl AudioBuffer {
    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode an audio file to a mono floating-point buffer at its native
/// sample rate.
pub fn load_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(PipelineError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| PipelineError::decode(path, format!("format probe failed: {}", e)))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PipelineError::decode(path, "no supported audio track"))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| PipelineError::decode(path, "file does not specify a sample rate"))?;

    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);
    if channels == 0 {
        return Err(PipelineError::decode(path, "file reports 0 audio channels"));
    }

    let codec_name = format!("{:?}", track.codec_params.codec);

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(|e| PipelineError::decode(path, format!("no decoder for codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(PipelineError::decode(path, e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            // Skip over damaged packets, as the stream may still recover.
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(PipelineError::decode(path, e)),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(capacity, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            downmix_into(&mut samples, buf.samples(), channels);
        }
    }

    if samples.is_empty() {
        return Err(PipelineError::decode(path, "no audio samples decoded"));
    }

    let audio = AudioBuffer {
        samples,
        sample_rate,
        source_channels: channels,
        codec_name,
        path: path.to_path_buf(),
    };
    info!(
        "Loaded {}: {:.2}s at {} Hz ({} channel(s), {})",
        path.display(),
        audio.duration_secs(),
        audio.sample_rate,
        audio.source_channels,
        audio.codec_name
    );
    Ok(audio)
}

/// Decode and resample to `target_rate`.
pub fn load_audio_resampled(path: &Path, target_rate: u32) -> Result<AudioBuffer> {
    let audio = load_audio(path)?;
    if audio.sample_rate == target_rate {
        return Ok(audio);
    }
    debug!(
        "Resampling {} from {} Hz to {} Hz",
        path.display(),
        audio.sample_rate,
        target_rate
    );
    let samples = resample(&audio.samples, audio.sample_rate, target_rate)?;
    Ok(AudioBuffer {
        samples,
        sample_rate: target_rate,
        ..audio
    })
}

/// Average interleaved frames down to mono, appending to `mono`.
fn downmix_into(mono: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels == 1 {
        mono.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks_exact(channels) {
        mono.push(frame.iter().sum::<f32>() / channels as f32);
    }
}

/// FFT-based mono resampling.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    const CHUNK: usize = 1024;

    let mut resampler = FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, CHUNK, 2, 1)
        .map_err(|e| PipelineError::Analysis(format!("resampler setup failed: {}", e)))?;

    let mut out =
        Vec::with_capacity((samples.len() as f64 * to_rate as f64 / from_rate as f64) as usize + CHUNK);
    let mut chunks = samples.chunks_exact(CHUNK);

    for chunk in &mut chunks {
        let produced = resampler
            .process(&[chunk], None)
            .map_err(|e| PipelineError::Analysis(format!("resampling failed: {}", e)))?;
        out.extend_from_slice(&produced[0]);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let produced = resampler
            .process_partial(Some(&[tail]), None)
            .map_err(|e| PipelineError::Analysis(format!("resampling failed: {}", e)))?;
        out.extend_from_slice(&produced[0]);
    }
    // Drain whatever is left inside the resampler.
    let produced = resampler
        .process_partial(None::<&[&[f32]]>, None)
        .map_err(|e| PipelineError::Analysis(format!("resampling failed: {}", e)))?;
    out.extend_from_slice(&produced[0]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_stereo() {
        let mut mono = Vec::new();
        downmix_into(&mut mono, &[0.5, -0.5, 0.3, -0.3], 2);
        assert_eq!(mono.len(), 2);
        assert!(mono[0].abs() < 0.001);
        assert!(mono[1].abs() < 0.001);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let mut mono = Vec::new();
        downmix_into(&mut mono, &[0.1, 0.2, 0.3], 1);
        assert_eq!(mono, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_audio(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_resample_halves_length() {
        let samples: Vec<f32> = (0..8192)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
            .collect();
        let out = resample(&samples, 44100, 22050).unwrap();
        let expected = samples.len() / 2;
        let tolerance = 1200; // resampler latency padding
        assert!(
            (out.len() as i64 - expected as i64).abs() < tolerance,
            "got {} samples, expected about {}",
            out.len(),
            expected
        );
    }
}
