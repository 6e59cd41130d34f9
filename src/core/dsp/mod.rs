//! DSP primitives: windowing, STFT, mel filterbank

pub mod mel;
pub mod stft;
pub mod windows;

pub use stft::Stft;
pub use windows::{create_window, WindowType};
