// src/cli/args.rs
//
// Command-line interface. One invocation runs the pipeline for one audio
// key and one or more analyses; path settings can also come from the
// WAVEPLOT_* environment variables.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::pipeline::{Analysis, FailurePolicy};
use crate::render::RendererMode;

#[derive(Parser, Debug)]
#[command(name = "waveplot")]
#[command(about = "Render time- and frequency-domain representations of audio files")]
pub struct Args {
    /// Symbolic key of the audio file to analyse (see --list)
    #[arg(short, long, default_value = "sax_a3")]
    pub audio: String,

    /// Analyses to run; defaults to all four
    #[arg(short = 'n', long = "analysis", value_enum)]
    pub analyses: Vec<AnalysisArg>,

    /// Chart flavor to produce
    #[arg(short, long, value_enum, default_value_t = RendererArg::Static)]
    pub renderer: RendererArg,

    /// What to do when loading or analysis fails
    #[arg(long = "on-error", value_enum, default_value_t = PolicyArg::Abort)]
    pub on_error: PolicyArg,

    /// Open each saved chart with the system viewer
    #[arg(long)]
    pub show: bool,

    /// Print run summaries as JSON
    #[arg(long)]
    pub json: bool,

    /// List the configured audio keys and exit
    #[arg(long)]
    pub list: bool,

    /// Base directory of the data layout
    #[arg(long, env = "WAVEPLOT_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Directory holding the raw audio files
    #[arg(long, env = "WAVEPLOT_AUDIO_DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Directory the charts are written under
    #[arg(long, env = "WAVEPLOT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Hop length in samples for RMS, spectrogram and MFCC
    #[arg(long)]
    pub hop_length: Option<usize>,

    /// FFT window length for spectrogram and MFCC
    #[arg(long)]
    pub n_fft: Option<usize>,

    /// Frame size in samples for the amplitude envelope
    #[arg(long)]
    pub frame_size: Option<usize>,

    /// Number of MFCC coefficients
    #[arg(long)]
    pub n_mfcc: Option<usize>,

    /// Resample the audio to this rate before analysis
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Requested analyses, defaulting to all of them.
    pub fn analyses(&self) -> Vec<Analysis> {
        if self.analyses.is_empty() {
            Analysis::all().to_vec()
        } else {
            self.analyses.iter().map(|a| a.into()).collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisArg {
    AmplitudeEnvelope,
    RmsEnergy,
    Spectrogram,
    Mfcc,
}

impl From<&AnalysisArg> for Analysis {
    fn from(arg: &AnalysisArg) -> Self {
        match arg {
            AnalysisArg::AmplitudeEnvelope => Analysis::AmplitudeEnvelope,
            AnalysisArg::RmsEnergy => Analysis::RmsEnergy,
            AnalysisArg::Spectrogram => Analysis::Spectrogram,
            AnalysisArg::Mfcc => Analysis::Mfcc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererArg {
    Static,
    Interactive,
}

impl From<RendererArg> for RendererMode {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Static => RendererMode::Static,
            RendererArg::Interactive => RendererMode::Interactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Log the failure and exit non-zero
    Abort,
    /// Log the failure and continue with no result
    Skip,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Abort => FailurePolicy::Propagate,
            PolicyArg::Skip => FailurePolicy::ReturnEmpty,
        }
    }
}
