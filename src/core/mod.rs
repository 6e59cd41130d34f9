//! Audio loading, DSP primitives and feature extraction

pub mod audio;
pub mod dsp;
pub mod features;

pub use audio::{load_audio, load_audio_resampled, AudioBuffer};
pub use features::{FeatureGrid, FeatureSeries};
