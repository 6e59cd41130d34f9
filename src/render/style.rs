// src/render/style.rs
//
// Shared chart styling: the dark color scheme as plotters colors, and
// the colormap used for heatmap cells.

use plotters::style::RGBColor;

use crate::config::parameters;

pub const BACKGROUND: RGBColor = rgb(parameters::BACKGROUND_COLOR);
pub const SPINE: RGBColor = rgb(parameters::SPINE_COLOR);

const fn rgb(c: (u8, u8, u8)) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Viridis-like colormap over a normalized value in [0, 1].
pub fn colormap(value: f32) -> RGBColor {
    let v = value.clamp(0.0, 1.0);
    let r = (68.0 + v * (235.0 - 68.0)) as u8;
    let g = (1.0 + v * (237.0 - 1.0)) as u8;
    let b = (84.0 + v * (32.0 - 84.0 + (1.0 - v) * 150.0)) as u8;
    RGBColor(r, g, b)
}

/// Plotly colorscale name matching [`colormap`] closely enough for the
/// interactive renderer.
pub const PLOTLY_COLORSCALE: &str = "Viridis";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        let low = colormap(0.0);
        let high = colormap(1.0);
        assert_eq!(low.0, 68);
        assert_eq!(high.1, 237);
        // Out-of-range values clamp instead of wrapping.
        let clamped_low = colormap(-1.0);
        let clamped_high = colormap(2.0);
        assert_eq!((clamped_low.0, clamped_low.1, clamped_low.2), (low.0, low.1, low.2));
        assert_eq!((clamped_high.0, clamped_high.1, clamped_high.2), (high.0, high.1, high.2));
    }
}
