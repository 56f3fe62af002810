//! Bouncing spread generator.
//!
//! Two groups of chevrons point away from the center along one axis and
//! bounce outward and back, mirroring each other.

use crate::error::ConfigurationError;
use crate::generators::glyphs::{chevron, on_axis, stroke_rule, translated, SpreadLayout};
use crate::generators::ArrowGenerator;
use crate::options::{finite, ArrowOptions, Axis, Easing, SpeedInput, SpreadDirection, Timing};
use crate::svg::{fmt_num, fmt_secs, points, ClipRect};

const DEFAULT_ARROWS: usize = 6;
const DEFAULT_STROKE_WIDTH: f64 = 2.0;
const DEFAULT_CENTER_GAP_RATIO: f64 = 0.2;
/// Bounce amplitude as a fraction of the span inside the margins.
const BOUNCE_FRACTION: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct BouncingSpreadArrowGenerator {
    options: ArrowOptions,
    direction: SpreadDirection,
    center_gap_ratio: f64,
    timing: Timing,
}

/// Class and keyframe names for one side of a spread.
pub(crate) struct Side {
    pub class: &'static str,
    pub keyframes: &'static str,
}

/// Near side (left or top) first, then far side.
pub(crate) fn sides(direction: SpreadDirection) -> [Side; 2] {
    match direction {
        SpreadDirection::Horizontal => [
            Side {
                class: "group-left",
                keyframes: "spreadLeft",
            },
            Side {
                class: "group-right",
                keyframes: "spreadRight",
            },
        ],
        SpreadDirection::Vertical => [
            Side {
                class: "group-top",
                keyframes: "spreadTop",
            },
            Side {
                class: "group-bottom",
                keyframes: "spreadBottom",
            },
        ],
    }
}

/// Clip with a 10% margin at both ends of the spread axis.
pub(crate) fn spread_clip(axis: Axis, width: f64, height: f64) -> ClipRect {
    match axis {
        Axis::X => ClipRect {
            x: width / 10.0,
            y: 0.0,
            width: width - 2.0 * (width / 10.0),
            height,
        },
        Axis::Y => ClipRect {
            x: 0.0,
            y: height / 10.0,
            width,
            height: height - 2.0 * (height / 10.0),
        },
    }
}

/// Chevrons of both sides, each pointing away from the center.
pub(crate) fn spread_glyphs(
    options: &ArrowOptions,
    direction: SpreadDirection,
    layout: &SpreadLayout,
) -> [Vec<Vec<(f64, f64)>>; 2] {
    let (w, h) = (options.width, options.height);
    let axis = direction.axis();
    let along = axis.extent(w, h) / 20.0;
    let across = axis.extent(h, w) / 20.0;
    let place = |positions: &[f64], sign: f64| -> Vec<Vec<(f64, f64)>> {
        let base = chevron(axis, sign, along, across);
        positions
            .iter()
            .map(|&p| {
                let (x, y) = on_axis(axis, p, w, h);
                translated(&base, x, y)
            })
            .collect()
    };
    [place(&layout.near, -1.0), place(&layout.far, 1.0)]
}

pub(crate) fn gap_ratio(ratio: f64) -> Result<f64, ConfigurationError> {
    Ok(finite("center gap ratio", ratio)?.clamp(0.1, 0.4))
}

impl BouncingSpreadArrowGenerator {
    pub fn new(options: &ArrowOptions, direction: SpreadDirection) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let distance = direction.axis().extent(options.width, options.height) / 2.0;
        let timing = Timing::resolve(SpeedInput::from_options(options)?, distance)?;
        Ok(Self {
            options: options.clone(),
            direction,
            center_gap_ratio: DEFAULT_CENTER_GAP_RATIO,
            timing,
        })
    }

    /// Set the empty gap at the center, as a fraction of the usable span.
    /// Clamped to `0.1..=0.4`.
    pub fn with_center_gap_ratio(mut self, ratio: f64) -> Result<Self, ConfigurationError> {
        self.center_gap_ratio = gap_ratio(ratio)?;
        Ok(self)
    }

    pub fn direction(&self) -> SpreadDirection {
        self.direction
    }

    fn layout(&self) -> SpreadLayout {
        let per_side = self.options.arrow_count(DEFAULT_ARROWS, 2) / 2;
        SpreadLayout::new(
            self.direction
                .axis()
                .extent(self.options.width, self.options.height),
            per_side,
            self.center_gap_ratio,
        )
    }

    fn amplitude(&self) -> f64 {
        self.layout().available * BOUNCE_FRACTION
    }
}

impl ArrowGenerator for BouncingSpreadArrowGenerator {
    fn name(&self) -> &'static str {
        "bouncing_spread"
    }

    fn options(&self) -> &ArrowOptions {
        &self.options
    }

    fn timing(&self) -> Timing {
        self.timing
    }

    fn travel_distance(&self) -> f64 {
        self.direction
            .axis()
            .extent(self.options.width, self.options.height)
            / 2.0
    }

    fn clip_bounds(&self) -> ClipRect {
        spread_clip(
            self.direction.axis(),
            self.options.width,
            self.options.height,
        )
    }

    fn shape_elements(&self) -> Vec<String> {
        let glyphs = spread_glyphs(&self.options, self.direction, &self.layout());
        sides(self.direction)
            .iter()
            .zip(glyphs.iter())
            .map(|(side, group)| {
                let polylines = group
                    .iter()
                    .map(|g| format!(r#"  <polyline points="{}"/>"#, points(g)))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("<g class=\"arrow {}\">\n{polylines}\n</g>", side.class)
            })
            .collect()
    }

    fn animation_rules(&self) -> Vec<String> {
        let easing = self.options.easing_or(Easing::Overshoot);
        let duration = fmt_secs(self.timing.duration_seconds);
        let translate = self.direction.axis().translate();
        let amplitude = self.amplitude();

        let mut rules = vec![stroke_rule(
            ".arrow",
            &self.options.color,
            self.options.stroke_width_or(DEFAULT_STROKE_WIDTH),
            &[],
        )];
        for (side, sign) in sides(self.direction).iter().zip([-1.0, 1.0]) {
            rules.push(format!(
                ".{} {{\n  animation: {} {duration} {} infinite alternate;\n}}",
                side.class,
                side.keyframes,
                easing.css()
            ));
            rules.push(format!(
                "@keyframes {} {{\n  0% {{ transform: {translate}(0px); }}\n  100% {{ transform: {translate}({}px); }}\n}}",
                side.keyframes,
                fmt_num(sign * amplitude)
            ));
        }
        rules
    }

    fn identifier_keys(&self) -> Vec<&'static str> {
        let [near, far] = sides(self.direction);
        vec![
            "arrowClip",
            "arrow",
            near.class,
            far.class,
            near.keyframes,
            far.keyframes,
        ]
    }
}
