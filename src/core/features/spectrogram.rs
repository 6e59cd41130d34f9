// src/core/features/spectrogram.rs
//
// Magnitude spectrogram with decibel conversion for display.

use crate::core::dsp::{Stft, WindowType};

use super::FeatureGrid;

/// Floor applied when converting magnitudes to decibels.
pub const DB_FLOOR: f32 = -80.0;

/// Hann-windowed magnitude spectrogram: `n_fft / 2 + 1` frequency rows
/// by one column per frame.
pub fn magnitude_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    n_fft: usize,
    hop_length: usize,
) -> FeatureGrid {
    let stft = Stft::new(n_fft, hop_length, WindowType::Hann);
    FeatureGrid::new(stft.magnitude(samples), hop_length, sample_rate)
}

/// Convert a magnitude grid to decibels relative to its peak:
/// `20 * log10(mag / max)`, floored at [`DB_FLOOR`] so silence never
/// produces negative infinity.
pub fn amplitude_to_db(grid: &FeatureGrid) -> FeatureGrid {
    let peak = grid
        .value_range()
        .map(|(_, hi)| hi)
        .unwrap_or(0.0)
        .max(f32::MIN_POSITIVE);

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|&mag| {
                    let db = 20.0 * (mag / peak).max(1e-10).log10();
                    db.max(DB_FLOOR)
                })
                .collect()
        })
        .collect();

    FeatureGrid {
        rows,
        times: grid.times.clone(),
        sample_rate: grid.sample_rate,
    }
}
