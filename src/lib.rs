//! Quiver - self-contained animated SVG arrows.
//!
//! Each generator produces one `<svg>` fragment whose CSS keyframes animate
//! a set of arrows. Fragments need no external stylesheet or script and can
//! be dropped straight into an HTML page; pass a unique id to `generate` when
//! several fragments share a page.
//!
//! ```
//! use quiver::{ArrowGenerator, ArrowOptions, FlowDirection, MovingFlowArrowGenerator};
//!
//! let options = ArrowOptions::new(100.0, 40.0).with_color("#0af").with_speed(50.0);
//! let arrow = MovingFlowArrowGenerator::new(&options, FlowDirection::Right)?;
//! assert_eq!(arrow.timing().duration_seconds, 2.0);
//!
//! let svg = arrow.generate(Some("x1"))?;
//! assert!(svg.contains("arrowClip-x1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod options;
pub mod rewrite;
pub mod svg;

pub use config::{ArrowSpec, QuiverConfig};
pub use error::{ConfigurationError, Error, IdentifierRewriteError, Result};
pub use generators::{
    Arrow, ArrowGenerator, ArrowKind, BouncingSpreadArrowGenerator, MovingFlowArrowGenerator,
    Spotlight, SpotlightFlowArrowGenerator, SpotlightSpreadArrowGenerator, VariantOptions,
};
pub use options::{ArrowOptions, Easing, FlowDirection, SpeedInput, SpreadDirection, Timing};
