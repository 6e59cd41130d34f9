// src/config/parameters.rs
//
// Numeric analysis defaults and chart styling constants.

/// Frame/FFT parameters for the feature extractors.
///
/// Defaults follow the common analysis settings: 2048-point FFT with a
/// 512-sample hop, a 2048-sample RMS frame, and a 2056-sample envelope
/// frame with a 128-sample hop. The envelope frame size is deliberately
/// kept at 2056 rather than rounded to a power of two.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    /// Hop length in samples for RMS, spectrogram and MFCC frames.
    pub hop_length: usize,
    /// FFT window length for spectrogram and MFCC.
    pub n_fft: usize,
    /// Frame length in samples for RMS energy.
    pub frame_length: usize,
    /// Frame length in samples for the amplitude envelope.
    pub envelope_frame_size: usize,
    /// Hop length in samples for the amplitude envelope.
    pub envelope_hop_length: usize,
    /// Number of cepstral coefficients to keep.
    pub n_mfcc: usize,
    /// Number of mel filterbank bands.
    pub n_mels: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            hop_length: 512,
            n_fft: 2048,
            frame_length: 2048,
            envelope_frame_size: 2056,
            envelope_hop_length: 128,
            n_mfcc: 13,
            n_mels: 128,
        }
    }
}

/// Chart canvas size in pixels.
pub const FIGURE_WIDTH: u32 = 1400;
pub const FIGURE_HEIGHT: u32 = 500;

/// Font sizes in pixels.
pub const FONTSIZE_TITLE: u32 = 24;
pub const FONTSIZE_SUBTITLE: u32 = 18;
pub const FONTSIZE_LABEL: u32 = 15;

/// Dark color scheme shared by the static and interactive renderers.
pub const BACKGROUND_COLOR: (u8, u8, u8) = (0x2E, 0x34, 0x40);
pub const ORIGINAL_SIGNAL_COLOR: (u8, u8, u8) = (0x81, 0xA1, 0xC1);
pub const AMPLITUDE_ENVELOPE_COLOR: (u8, u8, u8) = (0xBF, 0x61, 0x6A);
pub const RMS_ENERGY_COLOR: (u8, u8, u8) = (0xA3, 0xBE, 0x8C);
pub const SPINE_COLOR: (u8, u8, u8) = (0xD8, 0xDE, 0xE9);

/// Hex form used by the HTML renderer.
pub fn hex(color: (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", color.0, color.1, color.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = AnalysisParams::default();
        assert_eq!(p.n_fft, 2048);
        assert_eq!(p.hop_length, 512);
        assert_eq!(p.envelope_frame_size, 2056);
        assert_eq!(p.n_mfcc, 13);
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(BACKGROUND_COLOR), "#2E3440");
        assert_eq!(hex(SPINE_COLOR), "#D8DEE9");
    }
}
