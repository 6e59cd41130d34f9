//! Run harness: orchestrates resolve -> load -> extract -> render -> save
//!
//! One run analyses one audio key with one extractor and writes one
//! artifact. Stages execute strictly in order; there are no retries and
//! no cross-run coordination. Failure handling is governed by a single
//! [`FailurePolicy`] instead of the per-call-site choices the individual
//! analysis scripts used to make.

pub mod logging;

use std::path::PathBuf;

use log::{error, info, warn};
use serde::Serialize;

use crate::config::parameters::{
    AMPLITUDE_ENVELOPE_COLOR, ORIGINAL_SIGNAL_COLOR, RMS_ENERGY_COLOR,
};
use crate::config::{AnalysisDomain, AnalysisParams, PathConfig};
use crate::core::features::spectrogram::amplitude_to_db;
use crate::core::features::{amplitude_envelope, magnitude_spectrogram, mfcc, rms_energy};
use crate::core::{audio, AudioBuffer, FeatureSeries};
use crate::error::{PipelineError, Result};
use crate::render::{render, LineTrace, PlotData, PlotSpec, RendererMode};

pub use logging::init_logging;

/// The four audio representations the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    AmplitudeEnvelope,
    RmsEnergy,
    Spectrogram,
    Mfcc,
}

impl Analysis {
    pub fn all() -> [Self; 4] {
        [
            Analysis::AmplitudeEnvelope,
            Analysis::RmsEnergy,
            Analysis::Spectrogram,
            Analysis::Mfcc,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analysis::AmplitudeEnvelope => "amplitude_envelope",
            Analysis::RmsEnergy => "rms_energy",
            Analysis::Spectrogram => "spectrogram",
            Analysis::Mfcc => "mfcc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Analysis::AmplitudeEnvelope => "Amplitude Envelope",
            Analysis::RmsEnergy => "RMS Energy",
            Analysis::Spectrogram => "Spectrogram",
            Analysis::Mfcc => "MFCCs",
        }
    }

    /// Output partition the artifact lands in.
    pub fn domain(&self) -> AnalysisDomain {
        match self {
            Analysis::AmplitudeEnvelope | Analysis::RmsEnergy => AnalysisDomain::TimeDomain,
            Analysis::Spectrogram | Analysis::Mfcc => AnalysisDomain::FrequencyDomain,
        }
    }

    /// File-name prefix for the artifact.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Analysis::AmplitudeEnvelope => "AE",
            Analysis::RmsEnergy => "RMS",
            Analysis::Spectrogram => "Spectrogram",
            Analysis::Mfcc => "MFCC",
        }
    }
}

/// What to do when a load or analysis stage fails.
///
/// Configuration lookup failures (unknown key or analysis type) are
/// caller errors and always propagate, regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and return it: the run aborts.
    Propagate,
    /// Log the error and yield no result; the caller must check.
    ReturnEmpty,
}

/// Description of one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub audio_key: String,
    pub analysis: String,
    pub renderer: String,
    pub output_path: PathBuf,
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub frames: usize,
}

/// The linear five-stage pipeline, configured once and run per analysis.
pub struct Pipeline {
    config: PathConfig,
    params: AnalysisParams,
    mode: RendererMode,
    policy: FailurePolicy,
    show: bool,
    target_sample_rate: Option<u32>,
}

impl Pipeline {
    pub fn new(config: PathConfig, params: AnalysisParams) -> Self {
        Self {
            config,
            params,
            mode: RendererMode::Static,
            policy: FailurePolicy::Propagate,
            show: false,
            target_sample_rate: None,
        }
    }

    pub fn with_mode(mut self, mode: RendererMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Resample the input to `rate` before analysis. The native rate is
    /// kept when unset.
    pub fn with_target_sample_rate(mut self, rate: Option<u32>) -> Self {
        self.target_sample_rate = rate;
        self
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Warn about configured audio files that are missing on disk.
    pub fn validate_config(&self) {
        for (key, path) in self.config.validate() {
            warn!("Audio key '{}' points to missing file {}", key, path.display());
        }
    }

    /// Run one analysis for one audio key.
    ///
    /// `Ok(None)` is only produced under [`FailurePolicy::ReturnEmpty`]
    /// after a failed stage; the error has already been logged.
    pub fn run(&self, audio_key: &str, analysis: Analysis) -> Result<Option<RunSummary>> {
        match self.run_stages(audio_key, analysis) {
            Ok(summary) => Ok(Some(summary)),
            Err(e) => {
                error!(
                    "{} run for '{}' failed: {}",
                    analysis.display_name(),
                    audio_key,
                    e
                );
                match (self.policy, &e) {
                    // Bad lookups are caller errors, not degradable input
                    // conditions.
                    (_, PipelineError::UnknownKey(_))
                    | (_, PipelineError::UnknownAnalysisType(_)) => Err(e),
                    (FailurePolicy::Propagate, _) => Err(e),
                    (FailurePolicy::ReturnEmpty, _) => Ok(None),
                }
            }
        }
    }

    fn run_stages(&self, audio_key: &str, analysis: Analysis) -> Result<RunSummary> {
        let path = self.config.audio_path(audio_key)?.to_path_buf();
        info!(
            "Starting {} analysis for '{}' ({})",
            analysis.display_name(),
            audio_key,
            path.display()
        );

        let audio = match self.target_sample_rate {
            Some(rate) => audio::load_audio_resampled(&path, rate)?,
            None => audio::load_audio(&path)?,
        };

        let (spec, frames) = self.build_plot(&audio, analysis)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(audio_key);
        let output_path = self.config.output_path(
            analysis.domain().key(),
            &format!("{}_{}", analysis.file_prefix(), stem),
            self.mode.extension(),
        )?;

        render(&spec, self.mode, &output_path, self.show)?;
        info!(
            "Completed {} analysis for '{}'",
            analysis.display_name(),
            audio_key
        );

        Ok(RunSummary {
            audio_key: audio_key.to_string(),
            analysis: analysis.name().to_string(),
            renderer: self.mode.name().to_string(),
            output_path,
            sample_rate: audio.sample_rate,
            duration_secs: audio.duration_secs(),
            frames,
        })
    }

    /// Extract the requested feature and describe its chart. Returns the
    /// spec and the number of frames produced.
    fn build_plot(&self, audio: &AudioBuffer, analysis: Analysis) -> Result<(PlotSpec, usize)> {
        let title = audio
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("audio")
            .to_string();
        let p = &self.params;

        match analysis {
            Analysis::AmplitudeEnvelope => {
                let env = amplitude_envelope(
                    &audio.samples,
                    audio.sample_rate,
                    p.envelope_frame_size,
                    p.envelope_hop_length,
                );
                info!("Computed amplitude envelope: {} frames", env.len());
                let frames = env.len();
                let spec = line_plot(
                    title,
                    "Original Signal and Amplitude Envelope",
                    audio,
                    "Amplitude Envelope",
                    AMPLITUDE_ENVELOPE_COLOR,
                    env,
                );
                Ok((spec, frames))
            }
            Analysis::RmsEnergy => {
                let rms = rms_energy(&audio.samples, audio.sample_rate, p.frame_length, p.hop_length);
                info!("Computed RMS energy: {} frames", rms.len());
                let frames = rms.len();
                let spec = line_plot(
                    title,
                    "Original Signal and RMS Energy",
                    audio,
                    "RMS Energy",
                    RMS_ENERGY_COLOR,
                    rms,
                );
                Ok((spec, frames))
            }
            Analysis::Spectrogram => {
                let grid =
                    magnitude_spectrogram(&audio.samples, audio.sample_rate, p.n_fft, p.hop_length);
                if grid.is_empty() {
                    return Err(PipelineError::Analysis(
                        "audio too short for spectrogram".to_string(),
                    ));
                }
                info!(
                    "Computed spectrogram: {} bins x {} frames",
                    grid.num_rows(),
                    grid.num_frames()
                );
                let db = amplitude_to_db(&grid);
                let frames = db.num_frames();
                let nyquist = audio.sample_rate as f32 / 2.0;
                let spec = PlotSpec {
                    title,
                    subtitle: "Magnitude Spectrogram".to_string(),
                    x_label: "Time [s]".to_string(),
                    y_label: "Frequency [Hz]".to_string(),
                    data: PlotData::Heatmap {
                        grid: db,
                        y_max: nyquist,
                        value_label: "dB".to_string(),
                    },
                };
                Ok((spec, frames))
            }
            Analysis::Mfcc => {
                let grid = mfcc(
                    &audio.samples,
                    audio.sample_rate,
                    p.n_mfcc,
                    p.n_fft,
                    p.hop_length,
                    p.n_mels,
                );
                if grid.is_empty() {
                    return Err(PipelineError::Analysis(
                        "audio too short for MFCC extraction".to_string(),
                    ));
                }
                info!(
                    "Computed MFCCs: {} coefficients x {} frames",
                    grid.num_rows(),
                    grid.num_frames()
                );
                let frames = grid.num_frames();
                let n_mfcc = grid.num_rows() as f32;
                let spec = PlotSpec {
                    title,
                    subtitle: "MFCCs".to_string(),
                    x_label: "Time [s]".to_string(),
                    y_label: "Coefficient".to_string(),
                    data: PlotData::Heatmap {
                        grid,
                        y_max: n_mfcc,
                        value_label: String::new(),
                    },
                };
                Ok((spec, frames))
            }
        }
    }
}

/// A line chart overlaying the raw signal with one feature series.
fn line_plot(
    title: String,
    subtitle: &str,
    audio: &AudioBuffer,
    feature_name: &str,
    feature_color: (u8, u8, u8),
    feature: FeatureSeries,
) -> PlotSpec {
    let signal_times: Vec<f32> = (0..audio.samples.len())
        .map(|i| i as f32 / audio.sample_rate as f32)
        .collect();

    PlotSpec {
        title,
        subtitle: subtitle.to_string(),
        x_label: "Time [s]".to_string(),
        y_label: "Amplitude".to_string(),
        data: PlotData::Lines(vec![
            LineTrace {
                name: "Original Signal".to_string(),
                color: ORIGINAL_SIGNAL_COLOR,
                times: signal_times,
                values: audio.samples.clone(),
            },
            LineTrace {
                name: feature_name.to_string(),
                color: feature_color,
                times: feature.times,
                values: feature.values,
            },
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_domains() {
        assert_eq!(Analysis::AmplitudeEnvelope.domain(), AnalysisDomain::TimeDomain);
        assert_eq!(Analysis::RmsEnergy.domain(), AnalysisDomain::TimeDomain);
        assert_eq!(Analysis::Spectrogram.domain(), AnalysisDomain::FrequencyDomain);
        assert_eq!(Analysis::Mfcc.domain(), AnalysisDomain::FrequencyDomain);
    }

    #[test]
    fn test_unknown_key_propagates_under_return_empty() {
        let pipeline = Pipeline::new(PathConfig::new("/tmp/waveplot-none"), AnalysisParams::default())
            .with_policy(FailurePolicy::ReturnEmpty);
        let result = pipeline.run("no_such_key", Analysis::RmsEnergy);
        assert!(matches!(result, Err(PipelineError::UnknownKey(_))));
    }

    #[test]
    fn test_missing_file_degrades_under_return_empty() {
        let pipeline = Pipeline::new(PathConfig::new("/tmp/waveplot-none"), AnalysisParams::default())
            .with_policy(FailurePolicy::ReturnEmpty);
        // Built-in key whose file does not exist under this base dir.
        let result = pipeline.run("sax_a3", Analysis::RmsEnergy);
        assert!(matches!(result, Ok(None)));
    }
}
