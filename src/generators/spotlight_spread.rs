//! Spotlight spread generator.
//!
//! The symmetric layout of the bouncing spread, held still, with two
//! highlight bands that start together at the center and sweep out to
//! opposite edges.

use crate::error::ConfigurationError;
use crate::generators::bouncing_spread::{gap_ratio, spread_clip, spread_glyphs};
use crate::generators::glyphs::SpreadLayout;
use crate::generators::spotlight::{band_rect, band_rule, layers, Spotlight};
use crate::generators::ArrowGenerator;
use crate::options::{ArrowOptions, Easing, SpeedInput, SpreadDirection, Timing};
use crate::svg::{fmt_num, fmt_secs, ClipRect};

const DEFAULT_ARROWS: usize = 4;
const DEFAULT_STROKE_WIDTH: f64 = 10.0;
const DEFAULT_CENTER_GAP_RATIO: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct SpotlightSpreadArrowGenerator {
    options: ArrowOptions,
    direction: SpreadDirection,
    spotlight: Spotlight,
    center_gap_ratio: f64,
    timing: Timing,
}

impl SpotlightSpreadArrowGenerator {
    pub fn new(options: &ArrowOptions, direction: SpreadDirection) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let distance = direction.axis().extent(options.width, options.height) / 2.0;
        let timing = Timing::resolve(SpeedInput::from_options(options)?, distance)?;
        Ok(Self {
            options: options.clone(),
            direction,
            spotlight: Spotlight::default(),
            center_gap_ratio: DEFAULT_CENTER_GAP_RATIO,
            timing,
        })
    }

    /// Replace the spotlight settings. The sweep always runs from the center
    /// to the edges, so timing is unaffected.
    pub fn with_spotlight(mut self, spotlight: Spotlight) -> Result<Self, ConfigurationError> {
        self.spotlight = spotlight.normalized()?;
        Ok(self)
    }

    /// Clamped to `0.1..=0.4`.
    pub fn with_center_gap_ratio(mut self, ratio: f64) -> Result<Self, ConfigurationError> {
        self.center_gap_ratio = gap_ratio(ratio)?;
        Ok(self)
    }

    pub fn direction(&self) -> SpreadDirection {
        self.direction
    }

    pub fn spotlight(&self) -> Spotlight {
        self.spotlight
    }

    fn extent(&self) -> f64 {
        self.direction
            .axis()
            .extent(self.options.width, self.options.height)
    }

    fn layout(&self) -> SpreadLayout {
        SpreadLayout::new(
            self.extent(),
            self.options.arrow_count(DEFAULT_ARROWS, 2) / 2,
            self.center_gap_ratio,
        )
    }
}

impl ArrowGenerator for SpotlightSpreadArrowGenerator {
    fn name(&self) -> &'static str {
        "spotlight_spread"
    }

    fn options(&self) -> &ArrowOptions {
        &self.options
    }

    fn timing(&self) -> Timing {
        self.timing
    }

    fn travel_distance(&self) -> f64 {
        self.extent() / 2.0
    }

    fn clip_bounds(&self) -> ClipRect {
        spread_clip(
            self.direction.axis(),
            self.options.width,
            self.options.height,
        )
    }

    fn definitions(&self) -> Vec<String> {
        let (w, h) = (self.options.width, self.options.height);
        let axis = self.direction.axis();
        let length = self.spotlight.band_length(self.extent() / 2.0);
        let rects = [
            band_rect("spot-near", axis, w, h, length),
            band_rect("spot-far", axis, w, h, length),
        ];
        self.spotlight.definitions(axis, w, h, &rects)
    }

    fn shape_elements(&self) -> Vec<String> {
        let [near, far] = spread_glyphs(&self.options, self.direction, &self.layout());
        let glyphs: Vec<_> = near.into_iter().chain(far).collect();
        layers(&glyphs)
    }

    fn animation_rules(&self) -> Vec<String> {
        let translate = self.direction.axis().translate();
        let distance = self.travel_distance();
        let duration = fmt_secs(self.timing.duration_seconds);
        let easing = self.options.easing_or(Easing::Linear);

        let mut rules = self.spotlight.layer_rules(
            &self.options.color,
            self.options.stroke_width_or(DEFAULT_STROKE_WIDTH),
        );
        for (class, keyframes, sign) in [("spot-near", "spotNear", -1.0), ("spot-far", "spotFar", 1.0)] {
            rules.push(format!(
                "@keyframes {keyframes} {{\n  0% {{ transform: {translate}(0px); }}\n  100% {{ transform: {translate}({}px); }}\n}}",
                fmt_num(sign * distance)
            ));
            rules.push(band_rule(class, keyframes, &duration, easing.css()));
        }
        rules
    }

    fn identifier_keys(&self) -> Vec<&'static str> {
        vec![
            "arrowClip",
            "arrow-dim",
            "arrow-hi",
            "spotGrad",
            "spotMask",
            "spot-near",
            "spot-far",
            "spotNear",
            "spotFar",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> SpotlightSpreadArrowGenerator {
        let options = ArrowOptions::new(200.0, 80.0).with_speed(80.0);
        SpotlightSpreadArrowGenerator::new(&options, SpreadDirection::Horizontal).unwrap()
    }

    #[test]
    fn duration_covers_half_the_width() {
        let g = horizontal();
        assert_eq!(g.travel_distance(), 100.0);
        assert_eq!(g.timing().duration_seconds, 1.25);
    }

    #[test]
    fn bands_sweep_to_opposite_edges() {
        let rules = horizontal().animation_rules().join("\n");
        assert!(rules.contains("@keyframes spotNear {\n  0% { transform: translateX(0px); }\n  100% { transform: translateX(-100px); }"));
        assert!(rules.contains("@keyframes spotFar {\n  0% { transform: translateX(0px); }\n  100% { transform: translateX(100px); }"));
        assert!(rules.contains(".spot-far {\n  animation: spotFar 1.25s linear infinite;"));
    }

    #[test]
    fn both_bands_live_in_the_mask() {
        let defs = horizontal().definitions();
        let mask = &defs[1];
        assert!(mask.contains(r#"class="spot-near""#));
        assert!(mask.contains(r#"class="spot-far""#));
        // band = 100 * 0.8 = 80, centered on x = 100
        assert!(mask.contains(r#"x="60" y="-40" width="80" height="160""#));
    }

    #[test]
    fn arrows_are_drawn_on_both_layers() {
        let shapes = horizontal().shape_elements();
        assert_eq!(shapes[0].matches("<polyline").count(), 4);
        assert_eq!(shapes[1].matches("<polyline").count(), 4);
    }

    #[test]
    fn spotlight_is_validated() {
        let err = horizontal()
            .with_spotlight(Spotlight {
                dim_opacity: f64::NAN,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::NotFinite { .. }));
    }
}
