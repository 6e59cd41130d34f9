// src/render/static_png.rs
//
// Static chart rendering to PNG via plotters. Line specs draw the
// signal and feature overlays on one time axis; grid specs draw a
// color-mapped heatmap with a colorbar.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::parameters::{
    FIGURE_HEIGHT, FIGURE_WIDTH, FONTSIZE_LABEL, FONTSIZE_SUBTITLE, FONTSIZE_TITLE,
};
use crate::core::FeatureGrid;
use crate::error::{PipelineError, Result};

use super::style::{self, colormap};
use super::{decimate, downsample_grid, LineTrace, PlotData, PlotSpec, MAX_TRACE_POINTS};

/// Width in pixels reserved for the heatmap colorbar.
const COLORBAR_WIDTH: u32 = 110;

pub fn render(spec: &PlotSpec, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
    root.fill(&style::BACKGROUND).map_err(render_err)?;

    let root = root
        .titled(
            &spec.title,
            ("sans-serif", FONTSIZE_TITLE)
                .into_font()
                .color(&style::SPINE),
        )
        .map_err(render_err)?;

    match &spec.data {
        PlotData::Lines(traces) => draw_lines(&root, spec, traces)?,
        PlotData::Heatmap {
            grid,
            y_max,
            value_label,
        } => draw_heatmap(&root, spec, grid, *y_max, value_label)?,
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_lines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &PlotSpec,
    traces: &[LineTrace],
) -> Result<()> {
    let display: Vec<(RGBColor, String, Vec<f32>, Vec<f32>)> = traces
        .iter()
        .map(|t| {
            let (times, values) = decimate(&t.times, &t.values, MAX_TRACE_POINTS);
            (
                RGBColor(t.color.0, t.color.1, t.color.2),
                t.name.clone(),
                times,
                values,
            )
        })
        .filter(|(_, _, times, _)| !times.is_empty())
        .collect();

    if display.is_empty() {
        return Err(PipelineError::Render("no data points to draw".to_string()));
    }

    let x_max = display
        .iter()
        .flat_map(|(_, _, times, _)| times.last().copied())
        .fold(0.0f32, f32::max);
    let (mut y_min, mut y_max) = (f32::INFINITY, f32::NEG_INFINITY);
    for (_, _, _, values) in &display {
        for &v in values {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    let pad = ((y_max - y_min) * 0.05).max(1e-3);

    let mut chart = ChartBuilder::on(root)
        .caption(
            spec.subtitle.as_str(),
            ("sans-serif", FONTSIZE_SUBTITLE)
                .into_font()
                .color(&style::SPINE),
        )
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..x_max.max(1e-3), (y_min - pad)..(y_max + pad))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(&style::SPINE)
        .label_style(
            ("sans-serif", FONTSIZE_LABEL)
                .into_font()
                .color(&style::SPINE),
        )
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    for (color, name, times, values) in &display {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                times.iter().copied().zip(values.iter().copied()),
                color,
            ))
            .map_err(render_err)?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(style::BACKGROUND.mix(0.8))
        .border_style(&style::SPINE)
        .label_font(
            ("sans-serif", FONTSIZE_LABEL)
                .into_font()
                .color(&style::SPINE),
        )
        .draw()
        .map_err(render_err)?;

    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &PlotSpec,
    grid: &FeatureGrid,
    y_max: f32,
    value_label: &str,
) -> Result<()> {
    let view = downsample_grid(grid, y_max)?;
    let (mut lo, mut hi) = grid
        .value_range()
        .ok_or_else(|| PipelineError::Render("empty feature grid".to_string()))?;
    if hi - lo < 1e-6 {
        hi = lo + 1.0;
        lo -= 1.0;
    }

    let (w, _) = root.dim_in_pixel();
    let (chart_area, bar_area) = root.clone().split_horizontally(w.saturating_sub(COLORBAR_WIDTH) as i32);

    let x_max = view
        .times
        .last()
        .copied()
        .unwrap_or(0.0)
        + view.time_step;

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(
            spec.subtitle.as_str(),
            ("sans-serif", FONTSIZE_SUBTITLE)
                .into_font()
                .color(&style::SPINE),
        )
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..x_max, 0f32..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(&style::SPINE)
        .label_style(
            ("sans-serif", FONTSIZE_LABEL)
                .into_font()
                .color(&style::SPINE),
        )
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    let span = hi - lo;
    let mut cells = Vec::with_capacity(view.cells.len() * view.cells[0].len());
    for (r, row) in view.cells.iter().enumerate() {
        let y0 = r as f32 * view.row_step;
        for (c, &value) in row.iter().enumerate() {
            let x0 = view.times[c];
            let color = colormap((value - lo) / span);
            cells.push(Rectangle::new(
                [(x0, y0), (x0 + view.time_step, y0 + view.row_step)],
                color.filled(),
            ));
        }
    }
    chart.draw_series(cells).map_err(render_err)?;

    draw_colorbar(&bar_area, lo, hi, value_label)?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lo: f32,
    hi: f32,
    value_label: &str,
) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin(12)
        .margin_left(4)
        .x_label_area_size(42)
        .y_label_area_size(58)
        .build_cartesian_2d(0f32..1f32, lo..hi)
        .map_err(render_err)?;

    bar.configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .axis_style(&style::SPINE)
        .label_style(
            ("sans-serif", FONTSIZE_LABEL)
                .into_font()
                .color(&style::SPINE),
        )
        .y_label_formatter(&|v| format!("{:+.0} {}", v, value_label).trim_end().to_string())
        .draw()
        .map_err(render_err)?;

    let steps = 64;
    let dv = (hi - lo) / steps as f32;
    bar.draw_series((0..steps).map(|i| {
        let v0 = lo + i as f32 * dv;
        Rectangle::new(
            [(0.0, v0), (1.0, v0 + dv)],
            colormap(i as f32 / (steps - 1) as f32).filled(),
        )
    }))
    .map_err(render_err)?;

    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Render(e.to_string())
}
