// src/render/interactive.rs
//
// Interactive chart rendering: a standalone HTML document that embeds
// the data series as JSON and draws them with plotly.js. Pan and zoom
// come from the library; colors and labels match the static renderer.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::parameters::{
    hex, BACKGROUND_COLOR, FONTSIZE_SUBTITLE, FONTSIZE_TITLE, SPINE_COLOR,
};
use crate::error::Result;

use super::style::PLOTLY_COLORSCALE;
use super::{decimate, downsample_grid, PlotData, PlotSpec, MAX_TRACE_POINTS};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

pub fn render(spec: &PlotSpec, path: &Path) -> Result<()> {
    let data = build_traces(spec)?;
    let layout = build_layout(spec);
    let document = build_document(&spec.title, &data, &layout);
    std::fs::write(path, document)?;
    Ok(())
}

fn build_traces(spec: &PlotSpec) -> Result<Value> {
    let traces: Vec<Value> = match &spec.data {
        PlotData::Lines(lines) => lines
            .iter()
            .map(|trace| {
                let (times, values) = decimate(&trace.times, &trace.values, MAX_TRACE_POINTS);
                json!({
                    "type": "scatter",
                    "mode": "lines",
                    "name": trace.name,
                    "x": times,
                    "y": values,
                    "line": { "color": hex(trace.color), "width": 1 },
                })
            })
            .collect(),
        PlotData::Heatmap {
            grid,
            y_max,
            value_label,
        } => {
            let view = downsample_grid(grid, *y_max)?;
            vec![json!({
                "type": "heatmap",
                "x": view.times,
                "y": view.row_centers,
                "z": view.cells,
                "colorscale": PLOTLY_COLORSCALE,
                "colorbar": {
                    "title": { "text": value_label, "font": { "color": hex(SPINE_COLOR) } },
                    "tickfont": { "color": hex(SPINE_COLOR) },
                },
            })]
        }
    };
    Ok(Value::Array(traces))
}

fn build_layout(spec: &PlotSpec) -> Value {
    let spine = hex(SPINE_COLOR);
    let background = hex(BACKGROUND_COLOR);
    json!({
        "title": {
            "text": format!("{}<br><sub>{}</sub>", spec.title, spec.subtitle),
            "x": 0.5,
            "xanchor": "center",
            "font": { "size": FONTSIZE_TITLE, "color": spine, "family": "Arial" },
        },
        "xaxis": {
            "title": { "text": spec.x_label, "font": { "size": FONTSIZE_SUBTITLE } },
            "color": spine,
            "tickfont": { "color": spine },
        },
        "yaxis": {
            "title": { "text": spec.y_label, "font": { "size": FONTSIZE_SUBTITLE } },
            "color": spine,
            "tickfont": { "color": spine },
        },
        "plot_bgcolor": background,
        "paper_bgcolor": background,
        "font": { "color": spine },
        "legend": {
            "bgcolor": background,
            "bordercolor": spine,
            "font": { "color": spine },
        },
    })
}

fn build_document(title: &str, data: &Value, layout: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body style="background-color:{background};margin:0">
<div id="chart" style="width:100%;height:96vh"></div>
<script>
const data = {data};
const layout = {layout};
Plotly.newPlot("chart", data, layout, {{"responsive": true}});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        background = hex(BACKGROUND_COLOR),
        data = data,
        layout = layout,
    )
}
