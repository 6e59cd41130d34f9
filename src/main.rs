// src/main.rs

use anyhow::Result;
use clap::Parser;

use waveplot::cli::{args::Args, output};
use waveplot::config::{AnalysisParams, PathConfig};
use waveplot::pipeline::{init_logging, FailurePolicy, Pipeline};
use waveplot::render::RendererMode;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.base_dir {
        Some(base) => PathConfig::new(base),
        None => PathConfig::from_env(),
    };
    if let Some(dir) = &args.audio_dir {
        config.set_audio_dir(dir.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    config.discover_audio_files();

    if args.list {
        output::print_audio_keys(config.audio_keys());
        return Ok(());
    }

    let mut params = AnalysisParams::default();
    if let Some(hop) = args.hop_length {
        params.hop_length = hop;
    }
    if let Some(n_fft) = args.n_fft {
        params.n_fft = n_fft;
    }
    if let Some(frame) = args.frame_size {
        params.envelope_frame_size = frame;
    }
    if let Some(n_mfcc) = args.n_mfcc {
        params.n_mfcc = n_mfcc;
    }

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    let mode = RendererMode::from(args.renderer);
    let policy = FailurePolicy::from(args.on_error);
    let analyses = args.analyses();

    let run_id = format!("{}_{}", args.audio, mode.name());
    init_logging(&run_id, &config.log_dir())?;

    config.ensure_output_dirs()?;

    let pipeline = Pipeline::new(config, params)
        .with_mode(mode)
        .with_policy(policy)
        .with_show(args.show)
        .with_target_sample_rate(args.sample_rate);
    pipeline.validate_config();

    let mut summaries = Vec::new();
    for analysis in analyses {
        match pipeline.run(&args.audio, analysis)? {
            Some(summary) => {
                if !args.json {
                    output::print_summary(&summary);
                    println!();
                }
                summaries.push(summary);
            }
            None => {
                if !args.json {
                    output::print_skipped(&args.audio, analysis.display_name());
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    Ok(())
}
