//! Spotlight flow generator.
//!
//! Static chevrons tiled along the flow axis, with a highlight band that
//! sweeps over them in the flow direction. The band enters fully before the
//! canvas and leaves fully past it, so each cycle covers the canvas extent
//! plus the band length.

use crate::error::ConfigurationError;
use crate::generators::glyphs::{chevron, on_axis, tiled_positions, translated};
use crate::generators::spotlight::{band_rect, band_rule, layers, Spotlight};
use crate::generators::ArrowGenerator;
use crate::options::{ArrowOptions, Easing, FlowDirection, SpeedInput, Timing};
use crate::svg::{fmt_num, fmt_secs};

const DEFAULT_ARROWS: usize = 3;
const DEFAULT_STROKE_WIDTH: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct SpotlightFlowArrowGenerator {
    options: ArrowOptions,
    direction: FlowDirection,
    spotlight: Spotlight,
    speed: SpeedInput,
    timing: Timing,
}

impl SpotlightFlowArrowGenerator {
    pub fn new(options: &ArrowOptions, direction: FlowDirection) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let speed = SpeedInput::from_options(options)?;
        let spotlight = Spotlight::default();
        let timing = Timing::resolve(speed, sweep_distance(options, direction, &spotlight))?;
        Ok(Self {
            options: options.clone(),
            direction,
            spotlight,
            speed,
            timing,
        })
    }

    /// Replace the spotlight settings. The band length changes the sweep
    /// distance, so timing is resolved again.
    pub fn with_spotlight(mut self, spotlight: Spotlight) -> Result<Self, ConfigurationError> {
        let spotlight = spotlight.normalized()?;
        self.timing = Timing::resolve(
            self.speed,
            sweep_distance(&self.options, self.direction, &spotlight),
        )?;
        self.spotlight = spotlight;
        Ok(self)
    }

    pub fn direction(&self) -> FlowDirection {
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

    fn band_length(&self) -> f64 {
        self.spotlight.band_length(self.extent())
    }

    fn glyphs(&self) -> Vec<Vec<(f64, f64)>> {
        let (w, h) = (self.options.width, self.options.height);
        let axis = self.direction.axis();
        let base = chevron(
            axis,
            self.direction.sign(),
            axis.extent(w, h) / 8.0,
            axis.extent(h, w) / 4.0,
        );
        tiled_positions(
            self.extent(),
            self.options.arrow_count(DEFAULT_ARROWS, 1),
        )
        .into_iter()
        .map(|along| {
            let (x, y) = on_axis(axis, along, w, h);
            translated(&base, x, y)
        })
        .collect()
    }
}

fn sweep_distance(options: &ArrowOptions, direction: FlowDirection, spotlight: &Spotlight) -> f64 {
    let extent = direction.axis().extent(options.width, options.height);
    extent + spotlight.band_length(extent)
}

impl ArrowGenerator for SpotlightFlowArrowGenerator {
    fn name(&self) -> &'static str {
        "spotlight_flow"
    }

    fn options(&self) -> &ArrowOptions {
        &self.options
    }

    fn timing(&self) -> Timing {
        self.timing
    }

    fn travel_distance(&self) -> f64 {
        sweep_distance(&self.options, self.direction, &self.spotlight)
    }

    fn definitions(&self) -> Vec<String> {
        let (w, h) = (self.options.width, self.options.height);
        let axis = self.direction.axis();
        let rect = band_rect("spot-rect", axis, w, h, self.band_length());
        self.spotlight.definitions(axis, w, h, &[rect])
    }

    fn shape_elements(&self) -> Vec<String> {
        layers(&self.glyphs())
    }

    fn animation_rules(&self) -> Vec<String> {
        let translate = self.direction.axis().translate();
        let half = self.travel_distance() / 2.0 * self.direction.sign();
        let easing = self.options.easing_or(Easing::Linear);

        let mut rules = self.spotlight.layer_rules(
            &self.options.color,
            self.options.stroke_width_or(DEFAULT_STROKE_WIDTH),
        );
        rules.push(format!(
            "@keyframes spotSweep {{\n  0% {{ transform: {translate}({}px); }}\n  100% {{ transform: {translate}({}px); }}\n}}",
            fmt_num(-half),
            fmt_num(half)
        ));
        rules.push(band_rule(
            "spot-rect",
            "spotSweep",
            &fmt_secs(self.timing.duration_seconds),
            easing.css(),
        ));
        rules
    }

    fn identifier_keys(&self) -> Vec<&'static str> {
        vec![
            "arrowClip",
            "arrow-dim",
            "arrow-hi",
            "spotGrad",
            "spotMask",
            "spot-rect",
            "spotSweep",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ArrowOptions {
        ArrowOptions::new(200.0, 80.0).with_duration(4.0)
    }

    #[test]
    fn sweep_covers_canvas_and_band() {
        let g = SpotlightFlowArrowGenerator::new(&options(), FlowDirection::Right).unwrap();
        // band = 200 * (0.6 + 0.4 * 0.5) = 160
        assert_eq!(g.travel_distance(), 360.0);
        assert_eq!(g.timing().speed_px_per_second, 90.0);

        let rules = g.animation_rules().join("\n");
        assert!(rules.contains("translateX(-180px)"));
        assert!(rules.contains("translateX(180px)"));
        assert!(rules.contains("animation: spotSweep 4s linear infinite;"));
    }

    #[test]
    fn spotlight_change_reresolves_speed_but_keeps_duration() {
        let g = SpotlightFlowArrowGenerator::new(&options(), FlowDirection::Up)
            .unwrap()
            .with_spotlight(Spotlight {
                path_extension: 0.0,
                ..Default::default()
            })
            .unwrap();
        // extent 80, band 48
        assert_eq!(g.travel_distance(), 128.0);
        assert_eq!(g.timing().duration_seconds, 4.0);
        assert_eq!(g.timing().speed_px_per_second, 32.0);
    }

    #[test]
    fn spotlight_change_keeps_speed_when_speed_given() {
        let opts = ArrowOptions::new(100.0, 100.0).with_speed(50.0);
        let g = SpotlightFlowArrowGenerator::new(&opts, FlowDirection::Down)
            .unwrap()
            .with_spotlight(Spotlight {
                path_extension: 1.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(g.travel_distance(), 200.0);
        assert_eq!(g.timing().duration_seconds, 4.0);
    }

    #[test]
    fn arrows_tile_along_axis() {
        let g = SpotlightFlowArrowGenerator::new(&options(), FlowDirection::Right).unwrap();
        let glyphs = g.glyphs();
        assert_eq!(glyphs.len(), 3);
        let tips: Vec<f64> = glyphs.iter().map(|p| p[1].0).collect();
        assert!(tips.windows(2).all(|w| w[0] < w[1]));
        assert!(glyphs.iter().all(|p| p[1].1 == 40.0));
    }

    #[test]
    fn both_layers_are_drawn() {
        let g = SpotlightFlowArrowGenerator::new(&options(), FlowDirection::Left).unwrap();
        let shapes = g.shape_elements();
        assert!(shapes[0].starts_with(r#"<g class="arrow-dim">"#));
        assert!(shapes[1].contains(r#"mask="url(#spotMask)""#));
    }
}
