// src/core/features/mfcc.rs
//
// Mel-frequency cepstral coefficients: power spectrogram -> mel
// filterbank -> log -> DCT-II.

use crate::core::dsp::mel::{apply_filterbank, dct_ii, mel_filterbank};
use crate::core::dsp::{Stft, WindowType};

use super::FeatureGrid;

/// Compute `n_mfcc` cepstral coefficients per frame.
///
/// The grid has `n_mfcc` rows and one column per STFT frame.
pub fn mfcc(
    samples: &[f32],
    sample_rate: u32,
    n_mfcc: usize,
    n_fft: usize,
    hop_length: usize,
    n_mels: usize,
) -> FeatureGrid {
    let stft = Stft::new(n_fft, hop_length, WindowType::Hann);
    let power = stft.power(samples);

    let bank = mel_filterbank(n_mels, n_fft, sample_rate);
    let mut mel_energies = apply_filterbank(&bank, &power);

    // Log compression with a floor to keep silent bands finite.
    for row in &mut mel_energies {
        for value in row.iter_mut() {
            *value = 10.0 * value.max(1e-10).log10();
        }
    }

    let rows = dct_ii(&mel_energies, n_mfcc);
    FeatureGrid::new(rows, hop_length, sample_rate)
}
