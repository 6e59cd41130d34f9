// tests/test_utils/mod.rs
//
// Shared fixtures: synthesized WAV files and a ready-to-use path layout
// inside a temp directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use waveplot::config::PathConfig;

/// Write a 16-bit mono PCM WAV containing a steady sine wave.
pub fn write_sine_wav(path: &Path, freq: f32, amplitude: f32, seconds: f32, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    let num_samples = (seconds * sample_rate as f32) as usize;
    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;
        let value = amplitude * (2.0 * std::f32::consts::PI * freq * t).sin();
        writer
            .write_sample((value * i16::MAX as f32) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Temp workspace with the standard layout and one registered sine WAV
/// under the key `tone_a4`.
pub struct Workspace {
    // Held so the directory outlives the config using it.
    #[allow(dead_code)]
    pub dir: TempDir,
    pub config: PathConfig,
    pub wav_path: PathBuf,
}

pub fn workspace_with_tone() -> Workspace {
    let dir = TempDir::new().expect("temp dir");
    let mut config = PathConfig::new(dir.path());
    std::fs::create_dir_all(&config.audio_dir).expect("audio dir");

    let wav_path = config.audio_dir.join("tone_a4.wav");
    write_sine_wav(&wav_path, 440.0, 0.5, 1.0, 44100);
    config.register_audio_file("tone_a4", "tone_a4.wav");

    Workspace {
        dir,
        config,
        wav_path,
    }
}
