// tests/pipeline_test.rs
//
// End-to-end runs of the pipeline against synthesized fixtures, plus
// both failure policies.

mod test_utils;

use waveplot::config::AnalysisParams;
use waveplot::error::PipelineError;
use waveplot::pipeline::{Analysis, FailurePolicy, Pipeline};
use waveplot::render::RendererMode;

use test_utils::workspace_with_tone;

fn pipeline(ws: &test_utils::Workspace) -> Pipeline {
    Pipeline::new(ws.config.clone(), AnalysisParams::default())
}

#[test]
fn static_rms_run_writes_png() {
    let ws = workspace_with_tone();
    let summary = pipeline(&ws)
        .run("tone_a4", Analysis::RmsEnergy)
        .unwrap()
        .expect("run should produce a summary");

    assert!(summary.output_path.ends_with(
        "time_domain_audio_representations/RMS_tone_a4.png"
    ));
    let meta = std::fs::metadata(&summary.output_path).unwrap();
    assert!(meta.len() > 0);
    assert_eq!(summary.sample_rate, 44100);
    assert!((summary.duration_secs - 1.0).abs() < 0.01);
}

#[test]
fn repeated_save_is_last_writer_wins() {
    let ws = workspace_with_tone();
    let p = pipeline(&ws);

    let first = p.run("tone_a4", Analysis::AmplitudeEnvelope).unwrap().unwrap();
    let second = p.run("tone_a4", Analysis::AmplitudeEnvelope).unwrap().unwrap();

    assert_eq!(first.output_path, second.output_path);
    let meta = std::fs::metadata(&second.output_path).unwrap();
    assert!(meta.len() > 0, "file must stay present and non-empty");
}

#[test]
fn interactive_run_writes_plotly_document() {
    let ws = workspace_with_tone();
    let summary = pipeline(&ws)
        .with_mode(RendererMode::Interactive)
        .run("tone_a4", Analysis::AmplitudeEnvelope)
        .unwrap()
        .unwrap();

    assert!(summary.output_path.ends_with(
        "time_domain_audio_representations/AE_tone_a4.html"
    ));
    let html = std::fs::read_to_string(&summary.output_path).unwrap();
    assert!(html.contains("Plotly.newPlot"));
    assert!(html.contains("Amplitude Envelope"));
    assert!(html.contains("#2E3440"));
}

#[test]
fn frequency_domain_runs_land_in_their_partition() {
    let ws = workspace_with_tone();
    let p = pipeline(&ws).with_mode(RendererMode::Interactive);

    let spectrogram = p.run("tone_a4", Analysis::Spectrogram).unwrap().unwrap();
    assert!(spectrogram.output_path.ends_with(
        "frequency_domain_audio_representations/Spectrogram_tone_a4.html"
    ));

    let mfcc = p.run("tone_a4", Analysis::Mfcc).unwrap().unwrap();
    assert!(mfcc.output_path.ends_with(
        "frequency_domain_audio_representations/MFCC_tone_a4.html"
    ));
}

#[test]
fn missing_file_aborts_under_propagate() {
    let mut ws = workspace_with_tone();
    ws.config.register_audio_file("ghost", "not_there.wav");

    let result = Pipeline::new(ws.config.clone(), AnalysisParams::default())
        .with_policy(FailurePolicy::Propagate)
        .run("ghost", Analysis::RmsEnergy);
    assert!(matches!(result, Err(PipelineError::FileNotFound(_))));
}

#[test]
fn missing_file_degrades_under_return_empty() {
    let mut ws = workspace_with_tone();
    ws.config.register_audio_file("ghost", "not_there.wav");

    let result = Pipeline::new(ws.config.clone(), AnalysisParams::default())
        .with_policy(FailurePolicy::ReturnEmpty)
        .run("ghost", Analysis::RmsEnergy);
    assert!(matches!(result, Ok(None)));
}

#[test]
fn unknown_key_always_errors() {
    let ws = workspace_with_tone();
    for policy in [FailurePolicy::Propagate, FailurePolicy::ReturnEmpty] {
        let result = pipeline(&ws)
            .with_policy(policy)
            .run("never_registered", Analysis::Spectrogram);
        assert!(matches!(result, Err(PipelineError::UnknownKey(_))));
    }
}

#[test]
fn short_audio_fails_spectrogram_analysis() {
    let ws = workspace_with_tone();
    let short_path = ws.config.audio_dir.join("blip.wav");
    test_utils::write_sine_wav(&short_path, 440.0, 0.5, 0.01, 44100);
    let mut config = ws.config.clone();
    config.register_audio_file("blip", "blip.wav");

    // 441 samples cannot fill a 2048-point FFT window.
    let result = Pipeline::new(config, AnalysisParams::default())
        .run("blip", Analysis::Spectrogram);
    assert!(matches!(result, Err(PipelineError::Analysis(_))));
}
