//! waveplot - Audio feature extraction and visualisation
//!
//! Loads audio files, computes elementary signal representations and
//! renders them as charts on disk:
//!
//! - **Amplitude envelope** - max |sample| over sliding frames
//! - **RMS energy** - root-mean-square per frame
//! - **Magnitude spectrogram** - STFT magnitudes in dB
//! - **MFCC** - mel-frequency cepstral coefficients
//!
//! Charts come in two flavors with a shared color scheme: static PNG
//! (plotters) and interactive HTML (plotly.js document with embedded
//! data).
//!
//! ## Module Structure
//!
//! - `config` - path layout, symbolic audio keys, analysis parameters
//! - `core` - decoding, DSP primitives and the feature extractors
//! - `render` - chart description and the two renderers
//! - `pipeline` - logging and the linear run harness
//! - `cli` - command-line front end
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waveplot::config::{AnalysisParams, PathConfig};
//! use waveplot::pipeline::{Analysis, Pipeline};
//!
//! let config = PathConfig::from_env();
//! let pipeline = Pipeline::new(config, AnalysisParams::default());
//! let summary = pipeline.run("sax_a3", Analysis::RmsEnergy)?;
//! ```
//!
//! Each run is independent: resolve paths, load audio, extract the
//! feature, render, save. Failure handling is governed by a single
//! `FailurePolicy` (abort or degrade to no result).

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::{AnalysisParams, PathConfig};
pub use core::{AudioBuffer, FeatureGrid, FeatureSeries};
pub use error::PipelineError;
pub use pipeline::{Analysis, FailurePolicy, Pipeline, RunSummary};
pub use render::{PlotSpec, RendererMode};
