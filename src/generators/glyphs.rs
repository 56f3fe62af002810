//! Chevron geometry and layout shared by the arrow generators.

use crate::options::Axis;
use crate::svg::fmt_num;

/// Three-point chevron centered on the origin.
///
/// `sign` picks which way the tip points along `axis`; `along` is the half
/// depth of the chevron on that axis and `across` its half width.
pub fn chevron(axis: Axis, sign: f64, along: f64, across: f64) -> Vec<(f64, f64)> {
    let tail = -sign * along;
    let tip = sign * along;
    let local = [(tail, -across), (tip, 0.0), (tail, across)];
    local
        .iter()
        .map(|&(a, c)| match axis {
            Axis::X => (a, c),
            Axis::Y => (c, a),
        })
        .collect()
}

/// Move every point by `(dx, dy)`.
pub fn translated(points: &[(f64, f64)], dx: f64, dy: f64) -> Vec<(f64, f64)> {
    points.iter().map(|(x, y)| (x + dx, y + dy)).collect()
}

/// Canvas point `along` the axis, centered on the cross axis.
pub fn on_axis(axis: Axis, along: f64, width: f64, height: f64) -> (f64, f64) {
    match axis {
        Axis::X => (along, height / 2.0),
        Axis::Y => (width / 2.0, along),
    }
}

/// Evenly spaced positions between 20% margins of `extent`.
pub fn tiled_positions(extent: f64, count: usize) -> Vec<f64> {
    let margin = extent / 5.0;
    let spacing = (extent - 2.0 * margin) / (count + 1) as f64;
    (0..count)
        .map(|i| margin + (i + 1) as f64 * spacing)
        .collect()
}

/// Positions of a symmetric spread: one run of arrows on each side of a
/// central gap, inside 1/8 margins.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadLayout {
    /// Positions on the side towards the origin (left or top).
    pub near: Vec<f64>,
    /// Positions on the side away from the origin (right or bottom).
    pub far: Vec<f64>,
    /// Span left after removing the outer margins.
    pub available: f64,
}

impl SpreadLayout {
    pub fn new(extent: f64, per_side: usize, center_gap_ratio: f64) -> Self {
        let margin = extent / 8.0;
        let available = extent - 2.0 * margin;
        let gap = available * center_gap_ratio;
        let side = (available - gap) / 2.0;
        let spacing = if per_side > 1 {
            side / (per_side + 1) as f64
        } else {
            side / 2.0
        };

        let near_start = margin;
        let far_start = extent / 2.0 + gap / 2.0;
        let run = |start: f64| -> Vec<f64> {
            (0..per_side)
                .map(|i| start + (i + 1) as f64 * spacing)
                .collect()
        };

        Self {
            near: run(near_start),
            far: run(far_start),
            available,
        }
    }
}

/// Stroke styling rule for a selector, with optional extra declarations.
pub fn stroke_rule(selector: &str, color: &str, stroke_width: f64, extra: &[String]) -> String {
    let mut lines = vec![
        format!("{selector} {{"),
        format!("  stroke: {color};"),
        format!("  stroke-width: {};", fmt_num(stroke_width)),
        "  stroke-linecap: round;".to_string(),
        "  stroke-linejoin: round;".to_string(),
        "  fill: none;".to_string(),
    ];
    lines.extend(extra.iter().map(|decl| format!("  {decl}")));
    lines.push("}".to_string());
    lines.join("\n")
}
