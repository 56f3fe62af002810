//! Configuration loading for Quiver.
//!
//! Configuration is loaded from TOML files with environment variable overrides.
//! Besides output settings it can list arrows to render in one batch.

use crate::error::ConfigurationError;
use crate::generators::{Arrow, ArrowKind, Spotlight, VariantOptions};
use crate::options::{ArrowOptions, Easing};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "quiver.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct QuiverConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub arrows: Vec<ArrowSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

/// One arrow as written in a config file. Strings are validated by
/// [`ArrowSpec::build`].
#[derive(Debug, Clone, Deserialize)]
pub struct ArrowSpec {
    /// File stem of the rendered fragment.
    pub name: String,

    pub kind: String,

    /// Defaults to the kind's own default direction.
    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default = "default_size")]
    pub width: f64,

    #[serde(default = "default_size")]
    pub height: f64,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub stroke_width: Option<f64>,

    #[serde(default)]
    pub num_arrows: Option<usize>,

    #[serde(default)]
    pub speed_in_px_per_second: Option<f64>,

    #[serde(default)]
    pub speed_in_duration_seconds: Option<f64>,

    #[serde(default)]
    pub animation_timing_function: Option<String>,

    #[serde(default)]
    pub spotlight_size: Option<f64>,

    #[serde(default)]
    pub dim_opacity: Option<f64>,

    #[serde(default)]
    pub spotlight_path_extension: Option<f64>,

    #[serde(default)]
    pub center_gap_ratio: Option<f64>,

    /// Suffix for every identifier in the fragment.
    #[serde(default)]
    pub unique_id: Option<String>,
}

fn default_size() -> f64 {
    100.0
}

fn default_color() -> String {
    ArrowOptions::default().color
}

impl ArrowSpec {
    pub fn options(&self) -> Result<ArrowOptions, ConfigurationError> {
        let animation_timing_function: Option<Easing> = self
            .animation_timing_function
            .as_deref()
            .map(|s| s.parse::<Easing>())
            .transpose()?;
        Ok(ArrowOptions {
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            stroke_width: self.stroke_width,
            num_arrows: self.num_arrows,
            speed_in_px_per_second: self.speed_in_px_per_second,
            speed_in_duration_seconds: self.speed_in_duration_seconds,
            animation_timing_function,
        })
    }

    pub fn variant(&self) -> VariantOptions {
        let defaults = Spotlight::default();
        VariantOptions {
            spotlight: Spotlight {
                size: self.spotlight_size.unwrap_or(defaults.size),
                dim_opacity: self.dim_opacity.unwrap_or(defaults.dim_opacity),
                path_extension: self
                    .spotlight_path_extension
                    .unwrap_or(defaults.path_extension),
            },
            center_gap_ratio: self.center_gap_ratio,
        }
    }

    /// Validate every field and construct the generator. `name` becomes a
    /// file stem, so it may not contain path separators or `..`.
    pub fn build(&self) -> Result<Arrow, ConfigurationError> {
        if !is_valid_name(&self.name) {
            return Err(ConfigurationError::InvalidName(self.name.clone()));
        }
        let kind: ArrowKind = self.kind.parse()?;
        let direction = self
            .direction
            .as_deref()
            .unwrap_or_else(|| kind.default_direction());
        Arrow::build(kind, &self.options()?, direction, &self.variant())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl QuiverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("QUIVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let quiver_config: QuiverConfig = config
            .try_deserialize()
            .context("invalid configuration")?;
        Ok(quiver_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = QuiverConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.output.directory, "output");
        assert!(config.arrows.is_empty());
    }

    #[test]
    fn loads_arrow_batch() {
        let file = write_config(
            r##"
[output]
directory = "site/arrows"

[[arrows]]
name = "checkout"
kind = "moving-flow"
direction = "right"
width = 100
height = 40
color = "#0af"
speed_in_px_per_second = 50
unique_id = "checkout"

[[arrows]]
name = "fanout"
kind = "bouncing-spread"
speed_in_duration_seconds = 1.5
animation_timing_function = "ease-out"
center_gap_ratio = 0.3
"##,
        );

        let config = QuiverConfig::load(file.path()).unwrap();
        assert_eq!(config.output.directory, "site/arrows");
        assert_eq!(config.arrows.len(), 2);

        let checkout = config.arrows[0].build().unwrap();
        assert_eq!(checkout.kind(), ArrowKind::MovingFlow);
        assert_eq!(checkout.generator().timing().duration_seconds, 2.0);

        let fanout = config.arrows[1].build().unwrap();
        assert_eq!(fanout.kind(), ArrowKind::BouncingSpread);
        assert!(fanout.generate(None).unwrap().contains("ease-out"));
    }

    #[test]
    fn spec_strings_are_validated() {
        let spec = ArrowSpec {
            name: "bad".to_string(),
            kind: "spotlight-flow".to_string(),
            direction: Some("vertical".to_string()),
            width: 100.0,
            height: 100.0,
            color: "red".to_string(),
            stroke_width: None,
            num_arrows: None,
            speed_in_px_per_second: Some(10.0),
            speed_in_duration_seconds: None,
            animation_timing_function: None,
            spotlight_size: None,
            dim_opacity: None,
            spotlight_path_extension: None,
            center_gap_ratio: None,
            unique_id: None,
        };
        assert!(matches!(
            spec.build(),
            Err(ConfigurationError::InvalidDirection { .. })
        ));

        let spec = ArrowSpec {
            direction: None,
            animation_timing_function: Some("wobble".to_string()),
            ..spec
        };
        assert!(matches!(
            spec.build(),
            Err(ConfigurationError::InvalidEasing(_))
        ));
    }

    #[test]
    fn names_cannot_escape_the_output_directory() {
        let spec = ArrowSpec {
            name: "../x".to_string(),
            kind: "moving-flow".to_string(),
            direction: None,
            width: 100.0,
            height: 40.0,
            color: "red".to_string(),
            stroke_width: None,
            num_arrows: None,
            speed_in_px_per_second: Some(50.0),
            speed_in_duration_seconds: None,
            animation_timing_function: None,
            spotlight_size: None,
            dim_opacity: None,
            spotlight_path_extension: None,
            center_gap_ratio: None,
            unique_id: None,
        };
        assert_eq!(
            spec.build().unwrap_err(),
            ConfigurationError::InvalidName("../x".to_string())
        );

        for bad in ["", "a/b", "a\\b", "..", "/abs"] {
            let spec = ArrowSpec {
                name: bad.to_string(),
                ..spec.clone()
            };
            assert!(spec.build().is_err(), "accepted {bad:?}");
        }

        let spec = ArrowSpec {
            name: "checkout-flow.v2".to_string(),
            ..spec
        };
        assert!(spec.build().is_ok());
    }
}
