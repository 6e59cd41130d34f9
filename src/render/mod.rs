//! Chart construction and persistence
//!
//! A [`PlotSpec`] is a pure description of one chart: title, subtitle,
//! axis labels and the data series to draw. The static renderer writes a
//! PNG through plotters; the interactive renderer writes a standalone
//! HTML document. Both share the same color scheme and apply the same
//! display-side decimation to oversized raw-signal traces.

pub mod interactive;
pub mod static_png;
pub mod style;

use std::path::Path;

use log::{info, warn};

use crate::config::ensure_directory;
use crate::core::FeatureGrid;
use crate::error::{PipelineError, Result};

/// Output flavor for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMode {
    Static,
    Interactive,
}

impl RendererMode {
    pub fn extension(&self) -> &'static str {
        match self {
            RendererMode::Static => "png",
            RendererMode::Interactive => "html",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RendererMode::Static => "static",
            RendererMode::Interactive => "interactive",
        }
    }
}

/// One named line series with a fixed color.
#[derive(Debug, Clone)]
pub struct LineTrace {
    pub name: String,
    pub color: (u8, u8, u8),
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}

/// Chart payload: overlaid line series or a color-mapped grid.
#[derive(Debug, Clone)]
pub enum PlotData {
    Lines(Vec<LineTrace>),
    Heatmap {
        grid: FeatureGrid,
        /// Top of the vertical axis; rows span `0..y_max` linearly.
        y_max: f32,
        /// Legend for the mapped values, e.g. "dB".
        value_label: String,
    },
}

/// Pure description of a chart; carries no behavior.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub data: PlotData,
}

/// Display budget for a single line trace.
const MAX_TRACE_POINTS: usize = 100_000;
/// Display budget for heatmap cells (columns x rows).
const MAX_GRID_COLS: usize = 1200;
const MAX_GRID_ROWS: usize = 400;

/// Render `spec` to `path` in the requested mode, creating parent
/// directories first. Optionally opens the artifact with the system
/// viewer afterwards; a viewer failure never fails the run.
pub fn render(spec: &PlotSpec, mode: RendererMode, path: &Path, show: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    match mode {
        RendererMode::Static => static_png::render(spec, path)?,
        RendererMode::Interactive => interactive::render(spec, path)?,
    }
    info!("Saved {} chart to {}", mode.name(), path.display());

    if show {
        if let Err(e) = open::that(path) {
            warn!("Could not open {} in viewer: {}", path.display(), e);
        }
    }
    Ok(())
}

/// Stride-decimate a trace down to the display budget. Feature series
/// are far below the budget; this only ever reduces raw-signal overlays.
pub(crate) fn decimate(times: &[f32], values: &[f32], max_points: usize) -> (Vec<f32>, Vec<f32>) {
    let len = times.len().min(values.len());
    if len <= max_points {
        return (times[..len].to_vec(), values[..len].to_vec());
    }
    let stride = len.div_ceil(max_points);
    let pick = |data: &[f32]| data.iter().step_by(stride).copied().collect::<Vec<f32>>();
    (pick(&times[..len]), pick(&values[..len]))
}

/// Downsampled view of a grid for drawing: cell values, column times
/// and row centers on the `0..y_max` axis.
pub(crate) struct GridView {
    pub cells: Vec<Vec<f32>>,
    pub times: Vec<f32>,
    pub row_centers: Vec<f32>,
    pub time_step: f32,
    pub row_step: f32,
}

pub(crate) fn downsample_grid(grid: &FeatureGrid, y_max: f32) -> Result<GridView> {
    let num_rows = grid.num_rows();
    let num_frames = grid.num_frames();
    if num_rows == 0 || num_frames == 0 {
        return Err(PipelineError::Render("empty feature grid".to_string()));
    }

    let out_rows = num_rows.min(MAX_GRID_ROWS);
    let out_cols = num_frames.min(MAX_GRID_COLS);
    let frame_dt = if grid.times.len() > 1 {
        grid.times[1] - grid.times[0]
    } else {
        1.0
    };
    let total_time = grid.times.last().copied().unwrap_or(0.0) + frame_dt;
    let time_step = total_time / out_cols as f32;
    let row_step = y_max / out_rows as f32;

    let mut cells = vec![vec![0.0f32; out_cols]; out_rows];
    for (r, row_out) in cells.iter_mut().enumerate() {
        let src_row = r * num_rows / out_rows;
        for (c, cell) in row_out.iter_mut().enumerate() {
            let src_col = c * num_frames / out_cols;
            *cell = grid.rows[src_row][src_col];
        }
    }

    let times = (0..out_cols).map(|c| c as f32 * time_step).collect();
    let row_centers = (0..out_rows).map(|r| (r as f32 + 0.5) * row_step).collect();

    Ok(GridView {
        cells,
        times,
        row_centers,
        time_step,
        row_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimate_below_budget_is_identity() {
        let t = vec![0.0, 1.0, 2.0];
        let v = vec![5.0, 6.0, 7.0];
        let (dt, dv) = decimate(&t, &v, 10);
        assert_eq!(dt, t);
        assert_eq!(dv, v);
    }

    #[test]
    fn test_decimate_applies_stride() {
        let t: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let v = t.clone();
        let (dt, dv) = decimate(&t, &v, 100);
        assert!(dt.len() <= 100);
        assert_eq!(dt.len(), dv.len());
        assert_eq!(dt[0], 0.0);
        assert_eq!(dt[1], 10.0);
    }

    #[test]
    fn test_downsample_empty_grid_errors() {
        let grid = FeatureGrid::new(Vec::new(), 512, 44100);
        assert!(downsample_grid(&grid, 100.0).is_err());
    }

    #[test]
    fn test_downsample_small_grid_keeps_cells() {
        let grid = FeatureGrid::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 512, 44100);
        let view = downsample_grid(&grid, 2.0).unwrap();
        assert_eq!(view.cells.len(), 2);
        assert_eq!(view.cells[0].len(), 2);
        assert_eq!(view.cells[1][1], 4.0);
        assert_eq!(view.row_centers.len(), 2);
    }

    #[test]
    fn test_mode_extensions() {
        assert_eq!(RendererMode::Static.extension(), "png");
        assert_eq!(RendererMode::Interactive.extension(), "html");
    }
}
