//! Moving-highlight overlay shared by the two spotlight generators.
//!
//! Arrows are drawn twice: a dimmed layer, and a full-strength layer masked
//! by `spotMask`. The mask holds one or more rects filled with `spotGrad`,
//! a band that is opaque in the middle and fades out at both ends. Animating
//! those rects moves the highlight across the arrows.

use crate::error::ConfigurationError;
use crate::generators::glyphs::stroke_rule;
use crate::options::{finite, Axis};
use crate::svg::{fmt_num, points};

/// Spotlight appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    /// Fraction of the sweep band at full brightness, clamped to `0.1..=1`.
    pub size: f64,
    /// Opacity of the arrows outside the highlight, clamped to `0..=1`.
    pub dim_opacity: f64,
    /// Lengthens the sweep band relative to the canvas; at least 0.
    pub path_extension: f64,
}

impl Default for Spotlight {
    fn default() -> Self {
        Self {
            size: 0.3,
            dim_opacity: 0.2,
            path_extension: 0.5,
        }
    }
}

impl Spotlight {
    pub(crate) fn normalized(self) -> Result<Self, ConfigurationError> {
        Ok(Self {
            size: finite("spotlight size", self.size)?.clamp(0.1, 1.0),
            dim_opacity: finite("dim opacity", self.dim_opacity)?.clamp(0.0, 1.0),
            path_extension: finite("spotlight path extension", self.path_extension)?.max(0.0),
        })
    }

    /// Length of the sweep band along an axis of length `extent`.
    pub(crate) fn band_length(&self, extent: f64) -> f64 {
        extent * (0.6 + 0.4 * self.path_extension)
    }

    /// Gradient running along `axis` plus the mask wrapping `rects`.
    pub(crate) fn definitions(
        &self,
        axis: Axis,
        width: f64,
        height: f64,
        rects: &[String],
    ) -> Vec<String> {
        let edge = ((100.0 - self.size * 100.0) / 2.0).clamp(0.0, 50.0);
        let (x2, y2) = match axis {
            Axis::X => (1, 0),
            Axis::Y => (0, 1),
        };
        let gradient = format!(
            r#"<linearGradient id="spotGrad" x1="0" y1="0" x2="{x2}" y2="{y2}">
  <stop offset="0%" stop-color="black" stop-opacity="0"/>
  <stop offset="{a}%" stop-color="white" stop-opacity="1"/>
  <stop offset="{b}%" stop-color="white" stop-opacity="1"/>
  <stop offset="100%" stop-color="black" stop-opacity="0"/>
</linearGradient>"#,
            a = fmt_num(edge),
            b = fmt_num(100.0 - edge),
        );
        let mask = format!(
            r#"<mask id="spotMask" maskUnits="userSpaceOnUse" x="0" y="0" width="{}" height="{}">
{}
</mask>"#,
            fmt_num(width),
            fmt_num(height),
            rects
                .iter()
                .map(|r| format!("  {r}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        vec![gradient, mask]
    }

    /// Stroke rules for the dim and highlighted layers.
    pub(crate) fn layer_rules(&self, color: &str, stroke_width: f64) -> Vec<String> {
        vec![
            stroke_rule(
                ".arrow-dim polyline",
                color,
                stroke_width,
                &[format!("stroke-opacity: {};", fmt_num(self.dim_opacity))],
            ),
            stroke_rule(".arrow-hi polyline", color, stroke_width, &[]),
        ]
    }
}

/// A band rect along `axis`, centered on the canvas, spanning twice the cross
/// extent so it covers the arrows whatever their width.
pub(crate) fn band_rect(class: &str, axis: Axis, width: f64, height: f64, length: f64) -> String {
    let (x, y, w, h) = match axis {
        Axis::X => ((width - length) / 2.0, -height / 2.0, length, height * 2.0),
        Axis::Y => (-width / 2.0, (height - length) / 2.0, width * 2.0, length),
    };
    format!(
        r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}" fill="url(#spotGrad)"/>"#,
        fmt_num(x),
        fmt_num(y),
        fmt_num(w),
        fmt_num(h)
    )
}

/// Animation binding for a band rect.
pub(crate) fn band_rule(class: &str, keyframes: &str, duration: &str, easing: &str) -> String {
    format!(
        ".{class} {{\n  animation: {keyframes} {duration} {easing} infinite;\n  transform-box: fill-box;\n  transform-origin: center;\n}}"
    )
}

/// Dim and highlighted copies of the same polylines.
pub(crate) fn layers(glyphs: &[Vec<(f64, f64)>]) -> Vec<String> {
    let polylines = glyphs
        .iter()
        .map(|g| format!(r#"  <polyline points="{}"/>"#, points(g)))
        .collect::<Vec<_>>()
        .join("\n");
    vec![
        format!("<g class=\"arrow-dim\">\n{polylines}\n</g>"),
        format!("<g class=\"arrow-hi\" mask=\"url(#spotMask)\">\n{polylines}\n</g>"),
    ]
}
