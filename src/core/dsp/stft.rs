// src/core/dsp/stft.rs
//
// Short-time Fourier transform over a real input signal. Frames are
// uncentered: the first frame starts at sample 0 and trailing samples
// that do not fill a full window are dropped.

use num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use super::windows::{create_window, WindowType};

/// STFT processor with a fixed FFT length, hop and analysis window.
pub struct Stft {
    fft: Arc<dyn RealToComplex<f32>>,
    window: Vec<f32>,
    n_fft: usize,
    hop_length: usize,
}

impl Stft {
    pub fn new(n_fft: usize, hop_length: usize, window_type: WindowType) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n_fft);
        Self {
            fft,
            window: create_window(n_fft, window_type),
            n_fft,
            hop_length,
        }
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Number of frequency rows produced per frame: `n_fft / 2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of full frames available in `samples`.
    pub fn num_frames(&self, len: usize) -> usize {
        if len < self.n_fft {
            0
        } else {
            (len - self.n_fft) / self.hop_length + 1
        }
    }

    /// Magnitude spectrogram, row-major: `rows[bin][frame]` with
    /// `num_bins()` rows and `num_frames(samples.len())` columns.
    pub fn magnitude(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let num_frames = self.num_frames(samples.len());
        let num_bins = self.num_bins();
        let mut rows = vec![vec![0.0f32; num_frames]; num_bins];

        let mut input = self.fft.make_input_vec();
        let mut spectrum: Vec<Complex32> = self.fft.make_output_vec();

        for frame in 0..num_frames {
            let start = frame * self.hop_length;
            for (i, slot) in input.iter_mut().enumerate() {
                *slot = samples[start + i] * self.window[i];
            }
            // realfft only fails on mismatched buffer lengths, which the
            // planner-provided buffers rule out.
            if self.fft.process(&mut input, &mut spectrum).is_err() {
                continue;
            }
            for (bin, value) in spectrum.iter().enumerate() {
                rows[bin][frame] = value.norm();
            }
        }

        rows
    }

    /// Power spectrogram (`magnitude^2`), same layout as `magnitude`.
    pub fn power(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let mut rows = self.magnitude(samples);
        for row in &mut rows {
            for value in row.iter_mut() {
                *value *= *value;
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_bin_count() {
        let stft = Stft::new(2048, 512, WindowType::Hann);
        assert_eq!(stft.num_bins(), 1025);
        let stft = Stft::new(512, 128, WindowType::Hann);
        assert_eq!(stft.num_bins(), 257);
    }

    #[test]
    fn test_frame_count() {
        let stft = Stft::new(1024, 256, WindowType::Hann);
        assert_eq!(stft.num_frames(1023), 0);
        assert_eq!(stft.num_frames(1024), 1);
        assert_eq!(stft.num_frames(1024 + 256), 2);
    }

    #[test]
    fn test_peak_bin_tracks_frequency() {
        // 1 kHz tone at 16 kHz with a 512-point FFT lands in bin 32.
        let samples = sine(1000.0, 16000, 4096);
        let stft = Stft::new(512, 256, WindowType::Hann);
        let rows = stft.magnitude(&samples);

        let frame = 2;
        let peak_bin = (0..rows.len())
            .max_by(|&a, &b| rows[a][frame].partial_cmp(&rows[b][frame]).unwrap())
            .unwrap();
        assert!((peak_bin as i64 - 32).abs() <= 1, "peak at bin {}", peak_bin);
    }

    #[test]
    fn test_deterministic() {
        let samples = sine(440.0, 8000, 2048);
        let stft = Stft::new(512, 128, WindowType::Hann);
        assert_eq!(stft.magnitude(&samples), stft.magnitude(&samples));
    }
}
