//! Arrow generators - each produces a different animated arrow style.

pub mod bouncing_spread;
pub mod glyphs;
pub mod moving_flow;
pub mod spotlight;
pub mod spotlight_flow;
pub mod spotlight_spread;

pub use bouncing_spread::BouncingSpreadArrowGenerator;
pub use moving_flow::MovingFlowArrowGenerator;
pub use spotlight::Spotlight;
pub use spotlight_flow::SpotlightFlowArrowGenerator;
pub use spotlight_spread::SpotlightSpreadArrowGenerator;

use crate::error::{ConfigurationError, IdentifierRewriteError};
use crate::options::{ArrowOptions, Timing};
use crate::rewrite::apply_unique_suffix;
use crate::svg::{ClipRect, Fragment};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::MovingFlowArrowGenerator {}
    impl Sealed for super::SpotlightFlowArrowGenerator {}
    impl Sealed for super::BouncingSpreadArrowGenerator {}
    impl Sealed for super::SpotlightSpreadArrowGenerator {}
}

/// Trait for all arrow generators.
///
/// Implementors supply geometry and animation rules; [`generate`] owns the
/// assembly order and the identifier rewrite. The set of implementors is
/// closed.
///
/// [`generate`]: ArrowGenerator::generate
pub trait ArrowGenerator: sealed::Sealed + Send + Sync {
    /// Name of this generator style.
    fn name(&self) -> &'static str;

    /// Validated construction options.
    fn options(&self) -> &ArrowOptions;

    /// Resolved speed and duration.
    fn timing(&self) -> Timing;

    /// Distance in px the animation covers per cycle.
    fn travel_distance(&self) -> f64;

    /// Area the arrows are clipped to.
    fn clip_bounds(&self) -> ClipRect {
        ClipRect::full(self.options().width, self.options().height)
    }

    /// Extra `<defs>` content such as gradients and masks.
    fn definitions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Visible arrow elements.
    fn shape_elements(&self) -> Vec<String>;

    /// CSS for the `<style>` block: stroke rules, keyframes and bindings.
    fn animation_rules(&self) -> Vec<String>;

    /// Every id, class and keyframe name the markup declares.
    fn identifier_keys(&self) -> Vec<&'static str>;

    /// Produce the complete SVG fragment.
    ///
    /// With `unique_id`, every identifier gets a `-<unique_id>` suffix so the
    /// fragment can sit next to other fragments in one document. Without it
    /// the output is identical on every call.
    fn generate(&self, unique_id: Option<&str>) -> Result<String, IdentifierRewriteError> {
        let options = self.options();
        let rules = self.animation_rules();
        let definitions = self.definitions();
        let elements = self.shape_elements();

        let markup = Fragment {
            width: options.width,
            height: options.height,
            rules: &rules,
            clip: self.clip_bounds(),
            definitions: &definitions,
            elements: &elements,
        }
        .assemble();

        debug!(
            generator = self.name(),
            duration_s = self.timing().duration_seconds,
            suffixed = unique_id.is_some(),
            "assembled arrow markup"
        );

        match unique_id {
            Some(suffix) => apply_unique_suffix(&markup, suffix, &self.identifier_keys()),
            None => Ok(markup),
        }
    }

    /// Write the generated fragment to `path`.
    fn save_to_file(&self, path: &Path, unique_id: Option<&str>) -> crate::Result<()> {
        let markup = self.generate(unique_id)?;
        std::fs::write(path, markup)?;
        Ok(())
    }

    /// File extension for this generator's output.
    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// The four arrow styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    MovingFlow,
    SpotlightFlow,
    BouncingSpread,
    SpotlightSpread,
}

impl ArrowKind {
    pub const ALL: [ArrowKind; 4] = [
        ArrowKind::MovingFlow,
        ArrowKind::SpotlightFlow,
        ArrowKind::BouncingSpread,
        ArrowKind::SpotlightSpread,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArrowKind::MovingFlow => "moving-flow",
            ArrowKind::SpotlightFlow => "spotlight-flow",
            ArrowKind::BouncingSpread => "bouncing-spread",
            ArrowKind::SpotlightSpread => "spotlight-spread",
        }
    }

    /// Directions accepted by this kind, as strings.
    pub fn directions(self) -> &'static [&'static str] {
        match self {
            ArrowKind::MovingFlow | ArrowKind::SpotlightFlow => &["right", "left", "up", "down"],
            ArrowKind::BouncingSpread | ArrowKind::SpotlightSpread => &["horizontal", "vertical"],
        }
    }

    pub fn default_direction(self) -> &'static str {
        match self {
            ArrowKind::MovingFlow | ArrowKind::SpotlightFlow => "right",
            ArrowKind::BouncingSpread => "vertical",
            ArrowKind::SpotlightSpread => "horizontal",
        }
    }
}

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrowKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ArrowKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownKind(s.to_string()))
    }
}

/// Style-specific settings; each generator reads only the ones it uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VariantOptions {
    pub spotlight: Spotlight,
    /// `None` keeps the spread generators' default gap.
    pub center_gap_ratio: Option<f64>,
}

/// Any one of the arrow generators, for callers that pick the style at runtime.
#[derive(Debug, Clone)]
pub enum Arrow {
    MovingFlow(MovingFlowArrowGenerator),
    SpotlightFlow(SpotlightFlowArrowGenerator),
    BouncingSpread(BouncingSpreadArrowGenerator),
    SpotlightSpread(SpotlightSpreadArrowGenerator),
}

impl Arrow {
    /// Build a generator from string-typed input, validating everything.
    pub fn build(
        kind: ArrowKind,
        options: &ArrowOptions,
        direction: &str,
        variant: &VariantOptions,
    ) -> Result<Self, ConfigurationError> {
        let arrow = match kind {
            ArrowKind::MovingFlow => {
                Arrow::MovingFlow(MovingFlowArrowGenerator::new(options, direction.parse()?)?)
            }
            ArrowKind::SpotlightFlow => Arrow::SpotlightFlow(
                SpotlightFlowArrowGenerator::new(options, direction.parse()?)?
                    .with_spotlight(variant.spotlight)?,
            ),
            ArrowKind::BouncingSpread => {
                let mut generator = BouncingSpreadArrowGenerator::new(options, direction.parse()?)?;
                if let Some(ratio) = variant.center_gap_ratio {
                    generator = generator.with_center_gap_ratio(ratio)?;
                }
                Arrow::BouncingSpread(generator)
            }
            ArrowKind::SpotlightSpread => {
                let mut generator = SpotlightSpreadArrowGenerator::new(options, direction.parse()?)?
                    .with_spotlight(variant.spotlight)?;
                if let Some(ratio) = variant.center_gap_ratio {
                    generator = generator.with_center_gap_ratio(ratio)?;
                }
                Arrow::SpotlightSpread(generator)
            }
        };
        Ok(arrow)
    }

    pub fn kind(&self) -> ArrowKind {
        match self {
            Arrow::MovingFlow(_) => ArrowKind::MovingFlow,
            Arrow::SpotlightFlow(_) => ArrowKind::SpotlightFlow,
            Arrow::BouncingSpread(_) => ArrowKind::BouncingSpread,
            Arrow::SpotlightSpread(_) => ArrowKind::SpotlightSpread,
        }
    }

    pub fn generator(&self) -> &dyn ArrowGenerator {
        match self {
            Arrow::MovingFlow(g) => g,
            Arrow::SpotlightFlow(g) => g,
            Arrow::BouncingSpread(g) => g,
            Arrow::SpotlightSpread(g) => g,
        }
    }

    pub fn generate(&self, unique_id: Option<&str>) -> Result<String, IdentifierRewriteError> {
        self.generator().generate(unique_id)
    }
}
