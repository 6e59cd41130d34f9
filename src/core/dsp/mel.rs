// src/core/dsp/mel.rs
//
// Mel-scale filterbank and the DCT-II used for cepstral coefficients.
// Mel conversion uses the HTK formula.

/// Convert frequency in Hz to mel.
pub fn freq_to_mel(freq: f32) -> f32 {
    2595.0 * (1.0 + freq / 700.0).log10()
}

/// Convert mel back to frequency in Hz.
pub fn mel_to_freq(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank: `n_mels` rows of `n_fft / 2 + 1` weights.
///
/// Filters span 0 Hz to Nyquist with centers equally spaced on the mel
/// scale. Each row applies to a magnitude/power spectrum of the same
/// bin layout as `Stft::magnitude`.
pub fn mel_filterbank(n_mels: usize, n_fft: usize, sample_rate: u32) -> Vec<Vec<f32>> {
    let num_bins = n_fft / 2 + 1;
    let nyquist = sample_rate as f32 / 2.0;
    let mel_max = freq_to_mel(nyquist);

    // n_mels + 2 edge points: each filter rises from edge i to i+1 and
    // falls back to zero at i+2.
    let edges: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_freq(mel_max * i as f32 / (n_mels + 1) as f32))
        .collect();

    let bin_freq = |bin: usize| bin as f32 * sample_rate as f32 / n_fft as f32;

    let mut bank = vec![vec![0.0f32; num_bins]; n_mels];
    for (m, row) in bank.iter_mut().enumerate() {
        let (lower, center, upper) = (edges[m], edges[m + 1], edges[m + 2]);
        for (bin, weight) in row.iter_mut().enumerate() {
            let f = bin_freq(bin);
            if f > lower && f < center {
                *weight = (f - lower) / (center - lower);
            } else if f >= center && f < upper {
                *weight = (upper - f) / (upper - center);
            }
        }
    }
    bank
}

/// Apply a filterbank to a row-major spectrogram: `bank (M x B)` times
/// `spec (B x T)` giving `M x T` band energies.
pub fn apply_filterbank(bank: &[Vec<f32>], spec: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let num_frames = spec.first().map_or(0, Vec::len);
    bank.iter()
        .map(|weights| {
            (0..num_frames)
                .map(|t| {
                    weights
                        .iter()
                        .zip(spec.iter())
                        .map(|(w, row)| w * row[t])
                        .sum()
                })
                .collect()
        })
        .collect()
}

/// Orthonormal DCT-II along the band axis, keeping the first `n_out`
/// coefficients. Input is `M x T` (band, frame); output `n_out x T`.
pub fn dct_ii(rows: &[Vec<f32>], n_out: usize) -> Vec<Vec<f32>> {
    let n = rows.len();
    let num_frames = rows.first().map_or(0, Vec::len);
    if n == 0 {
        return vec![Vec::new(); n_out];
    }

    let scale0 = (1.0 / n as f32).sqrt();
    let scale = (2.0 / n as f32).sqrt();

    (0..n_out)
        .map(|k| {
            (0..num_frames)
                .map(|t| {
                    let sum: f32 = rows
                        .iter()
                        .enumerate()
                        .map(|(i, row)| {
                            row[t]
                                * (std::f32::consts::PI * (i as f32 + 0.5) * k as f32 / n as f32)
                                    .cos()
                        })
                        .sum();
                    if k == 0 {
                        sum * scale0
                    } else {
                        sum * scale
                    }
                })
                .collect()
        })
        .collect()
}
