// src/cli/output.rs
//
// Console summaries for completed runs.

use colorful::Colorful;

use crate::pipeline::RunSummary;

/// Print a one-run summary block.
pub fn print_summary(summary: &RunSummary) {
    println!("{}", summary.analysis.clone().cyan());
    println!("  Audio key: {}", summary.audio_key);
    println!(
        "  Input: {:.2}s at {} Hz",
        summary.duration_secs, summary.sample_rate
    );
    println!("  Frames: {}", summary.frames);
    println!(
        "  Saved {} chart to: {}",
        summary.renderer,
        summary.output_path.display().to_string().green()
    );
}

/// Print the skip notice for a degraded run.
pub fn print_skipped(audio_key: &str, analysis: &str) {
    println!(
        "{} {} for '{}' produced no result (see log)",
        "skipped:".yellow(),
        analysis,
        audio_key
    );
}

/// Print the configured audio keys.
pub fn print_audio_keys<'a>(keys: impl Iterator<Item = &'a str>) {
    println!("Configured audio keys:\n");
    let mut any = false;
    for key in keys {
        println!("  {}", key);
        any = true;
    }
    if !any {
        println!("  {}", "(none found)".yellow());
    }
}
