//! Moving flow generator.
//!
//! A stream of chevrons that slide across the canvas in one direction,
//! fading in as they enter and out as they leave. Every chevron shares one
//! keyframe; negative animation delays stagger them along the axis.

use crate::error::ConfigurationError;
use crate::generators::glyphs::{chevron, stroke_rule, translated};
use crate::generators::ArrowGenerator;
use crate::options::{ArrowOptions, Easing, FlowDirection, SpeedInput, Timing};
use crate::svg::{fmt_num, fmt_secs, points};

const DEFAULT_ARROWS: usize = 4;
const DEFAULT_STROKE_WIDTH: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct MovingFlowArrowGenerator {
    options: ArrowOptions,
    direction: FlowDirection,
    timing: Timing,
}

impl MovingFlowArrowGenerator {
    pub fn new(options: &ArrowOptions, direction: FlowDirection) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let distance = direction.axis().extent(options.width, options.height);
        let timing = Timing::resolve(SpeedInput::from_options(options)?, distance)?;
        Ok(Self {
            options: options.clone(),
            direction,
            timing,
        })
    }

    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    fn arrow_count(&self) -> usize {
        self.options.arrow_count(DEFAULT_ARROWS, 1)
    }

    /// Chevron at the canvas center, pointing in the flow direction.
    fn glyph(&self) -> Vec<(f64, f64)> {
        let (w, h) = (self.options.width, self.options.height);
        let axis = self.direction.axis();
        let along = axis.extent(w, h) / 8.0;
        let across = axis.extent(h, w) / 4.0;
        translated(
            &chevron(axis, self.direction.sign(), along, across),
            w / 2.0,
            h / 2.0,
        )
    }
}

impl ArrowGenerator for MovingFlowArrowGenerator {
    fn name(&self) -> &'static str {
        "moving_flow"
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
    }

    fn shape_elements(&self) -> Vec<String> {
        let glyph = points(&self.glyph());
        let count = self.arrow_count();
        let step = self.timing.duration_seconds / count as f64;

        (0..count)
            .map(|i| {
                if i == 0 {
                    format!(r#"<polyline class="arrow" points="{glyph}"/>"#)
                } else {
                    format!(
                        r#"<polyline class="arrow" points="{glyph}" style="animation-delay: -{};"/>"#,
                        fmt_secs(i as f64 * step)
                    )
                }
            })
            .collect()
    }

    fn animation_rules(&self) -> Vec<String> {
        let easing = self.options.easing_or(Easing::EaseInOut);
        let translate = self.direction.axis().translate();
        let half = self.travel_distance() / 2.0 * self.direction.sign();

        let arrow = stroke_rule(
            ".arrow",
            &self.options.color,
            self.options.stroke_width_or(DEFAULT_STROKE_WIDTH),
            &[format!(
                "animation: flow {} {} infinite;",
                fmt_secs(self.timing.duration_seconds),
                easing.css()
            )],
        );

        let keyframes = format!(
            r#"@keyframes flow {{
  0% {{ transform: {translate}({start}px); opacity: 0; }}
  20% {{ opacity: 1; }}
  80% {{ opacity: 1; }}
  100% {{ transform: {translate}({end}px); opacity: 0; }}
}}"#,
            start = fmt_num(-half),
            end = fmt_num(half),
        );

        vec![arrow, keyframes]
    }

    fn identifier_keys(&self) -> Vec<&'static str> {
        vec!["arrowClip", "arrow", "flow"]
    }
}
