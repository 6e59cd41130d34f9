// src/core/features/rms.rs
//
// RMS energy per frame.

use super::{frames, FeatureSeries};

/// Root-mean-square energy over overlapping frames.
pub fn rms_energy(
    samples: &[f32],
    sample_rate: u32,
    frame_length: usize,
    hop_length: usize,
) -> FeatureSeries {
    let values: Vec<f32> = frames(samples, frame_length, hop_length)
        .map(|frame| {
            let mean_square =
                frame.iter().map(|&s| s * s).sum::<f32>() / frame.len() as f32;
            mean_square.sqrt()
        })
        .collect();
    FeatureSeries::new(values, hop_length, sample_rate)
}
