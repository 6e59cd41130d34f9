// src/core/features/envelope.rs
//
// Amplitude envelope: maximum absolute sample per frame.

use super::{frames, FeatureSeries};

/// Compute the amplitude envelope over overlapping frames.
///
/// Output length is `(len - frame_size) / hop_length + 1` when the
/// signal holds at least one full frame, otherwise 0.
pub fn amplitude_envelope(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_length: usize,
) -> FeatureSeries {
    let values: Vec<f32> = frames(samples, frame_size, hop_length)
        .map(|frame| frame.iter().fold(0.0f32, |acc, &s| acc.max(s.abs())))
        .collect();
    FeatureSeries::new(values, hop_length, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_formula() {
        let samples = vec![0.0f32; 10_000];
        let env = amplitude_envelope(&samples, 44100, 2056, 128);
        assert_eq!(env.len(), (10_000 - 2056) / 128 + 1);
        assert_eq!(env.times.len(), env.values.len());
    }

    #[test]
    fn test_too_short_yields_empty() {
        let samples = vec![0.5f32; 100];
        let env = amplitude_envelope(&samples, 44100, 2056, 128);
        assert!(env.is_empty());
    }

    #[test]
    fn test_bounds() {
        let samples: Vec<f32> = (0..8000)
            .map(|i| 0.8 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
            .collect();
        let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let env = amplitude_envelope(&samples, 44100, 1024, 256);
        assert!(!env.is_empty());
        for &v in &env.values {
            assert!(v >= 0.0);
            assert!(v <= peak + f32::EPSILON);
        }
    }

    #[test]
    fn test_tracks_peak_of_constant_block() {
        let mut samples = vec![0.1f32; 512];
        samples[300] = -0.9;
        let env = amplitude_envelope(&samples, 8000, 512, 512);
        assert_eq!(env.len(), 1);
        assert!((env.values[0] - 0.9).abs() < 1e-6);
    }
}
