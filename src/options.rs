//! Caller-facing generator options and their validation.
//!
//! Every generator is built from an [`ArrowOptions`] plus a direction. The
//! options are checked eagerly and the missing half of the speed/duration
//! pair is derived here, so nothing invalid ever reaches markup assembly.

use crate::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;

/// CSS animation timing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Overshoots the target and settles back.
    Overshoot,
}

impl Easing {
    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Overshoot,
    ];

    /// Value used in the `animation` shorthand.
    pub fn css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::Overshoot => "cubic-bezier(0.34, 1.56, 0.64, 1)",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Easing::Overshoot => "overshoot",
            other => other.css(),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| ConfigurationError::InvalidEasing(s.to_string()))
    }
}

/// Axis an animation travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Canvas length along this axis.
    pub fn extent(self, width: f64, height: f64) -> f64 {
        match self {
            Axis::X => width,
            Axis::Y => height,
        }
    }

    /// CSS translate function for this axis.
    pub fn translate(self) -> &'static str {
        match self {
            Axis::X => "translateX",
            Axis::Y => "translateY",
        }
    }
}

/// Direction of a flow arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    Right,
    Left,
    Up,
    Down,
}

impl FlowDirection {
    pub const ALL: [FlowDirection; 4] = [
        FlowDirection::Right,
        FlowDirection::Left,
        FlowDirection::Up,
        FlowDirection::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            FlowDirection::Right | FlowDirection::Left => Axis::X,
            FlowDirection::Up | FlowDirection::Down => Axis::Y,
        }
    }

    /// +1 when travelling towards increasing coordinates, -1 otherwise.
    pub fn sign(self) -> f64 {
        match self {
            FlowDirection::Right | FlowDirection::Down => 1.0,
            FlowDirection::Left | FlowDirection::Up => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowDirection::Right => "right",
            FlowDirection::Left => "left",
            FlowDirection::Up => "up",
            FlowDirection::Down => "down",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FlowDirection::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| ConfigurationError::InvalidDirection {
                category: "flow",
                value: s.to_string(),
                expected: "right, left, up, down",
            })
    }
}

/// Axis along which a spread arrow emanates from the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadDirection {
    Horizontal,
    Vertical,
}

impl SpreadDirection {
    pub const ALL: [SpreadDirection; 2] = [SpreadDirection::Horizontal, SpreadDirection::Vertical];

    pub fn axis(self) -> Axis {
        match self {
            SpreadDirection::Horizontal => Axis::X,
            SpreadDirection::Vertical => Axis::Y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpreadDirection::Horizontal => "horizontal",
            SpreadDirection::Vertical => "vertical",
        }
    }
}

impl fmt::Display for SpreadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpreadDirection {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SpreadDirection::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| ConfigurationError::InvalidDirection {
                category: "spread",
                value: s.to_string(),
                expected: "horizontal, vertical",
            })
    }
}

/// Upper bound on `num_arrows`.
pub const MAX_ARROWS: usize = 256;

/// Shortest duration that still renders, since CSS seconds are written with
/// millisecond precision.
pub const MIN_DURATION_SECONDS: f64 = 0.001;

/// Options shared by every arrow generator.
///
/// Exactly one of `speed_in_px_per_second` and `speed_in_duration_seconds`
/// must be set; the default value sets neither, so callers always pick one.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowOptions {
    pub width: f64,
    pub height: f64,
    pub color: String,
    /// `None` uses the generator's own default.
    pub stroke_width: Option<f64>,
    /// Number of arrow glyphs. `None` uses the generator's own default.
    pub num_arrows: Option<usize>,
    pub speed_in_px_per_second: Option<f64>,
    pub speed_in_duration_seconds: Option<f64>,
    /// `None` uses the generator's own default.
    pub animation_timing_function: Option<Easing>,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            color: "#2563eb".to_string(),
            stroke_width: None,
            num_arrows: None,
            speed_in_px_per_second: None,
            speed_in_duration_seconds: None,
            animation_timing_function: None,
        }
    }
}

impl ArrowOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    pub fn with_num_arrows(mut self, num_arrows: usize) -> Self {
        self.num_arrows = Some(num_arrows);
        self
    }

    pub fn with_speed(mut self, px_per_second: f64) -> Self {
        self.speed_in_px_per_second = Some(px_per_second);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.speed_in_duration_seconds = Some(seconds);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.animation_timing_function = Some(easing);
        self
    }

    /// Check everything that does not depend on the generator variant.
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        if let Some(stroke_width) = self.stroke_width {
            positive("stroke_width", stroke_width)?;
        }
        if let Some(count) = self.num_arrows {
            if count > MAX_ARROWS {
                return Err(ConfigurationError::TooManyArrows {
                    count,
                    max: MAX_ARROWS,
                });
            }
        }
        crate::svg::validate_color(&self.color)?;
        SpeedInput::from_options(self)?;
        Ok(())
    }

    /// Stroke width as drawn; thinner strokes disappear at small sizes.
    pub(crate) fn stroke_width_or(&self, default: f64) -> f64 {
        self.stroke_width.unwrap_or(default).max(2.0)
    }

    pub(crate) fn arrow_count(&self, default: usize, minimum: usize) -> usize {
        self.num_arrows.unwrap_or(default).max(minimum)
    }

    pub(crate) fn easing_or(&self, default: Easing) -> Easing {
        self.animation_timing_function.unwrap_or(default)
    }
}

/// The one timing value the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedInput {
    PxPerSecond(f64),
    DurationSeconds(f64),
}

impl SpeedInput {
    pub fn new(
        px_per_second: Option<f64>,
        duration_seconds: Option<f64>,
    ) -> Result<Self, ConfigurationError> {
        match (px_per_second, duration_seconds) {
            (Some(_), Some(_)) => Err(ConfigurationError::ConflictingSpeed),
            (None, None) => Err(ConfigurationError::MissingSpeed),
            (Some(speed), None) => {
                positive("speed_in_px_per_second", speed)?;
                Ok(SpeedInput::PxPerSecond(speed))
            }
            (None, Some(duration)) => {
                positive("speed_in_duration_seconds", duration)?;
                Ok(SpeedInput::DurationSeconds(duration))
            }
        }
    }

    pub(crate) fn from_options(options: &ArrowOptions) -> Result<Self, ConfigurationError> {
        Self::new(
            options.speed_in_px_per_second,
            options.speed_in_duration_seconds,
        )
    }
}

/// Fully resolved animation timing: `duration = distance / speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration_seconds: f64,
    pub speed_px_per_second: f64,
}

impl Timing {
    /// Derive the missing value from the supplied one and a travel distance.
    pub fn resolve(input: SpeedInput, distance: f64) -> Result<Self, ConfigurationError> {
        positive("travel distance", distance)?;
        let timing = match input {
            SpeedInput::PxPerSecond(speed) => Timing {
                duration_seconds: distance / speed,
                speed_px_per_second: speed,
            },
            SpeedInput::DurationSeconds(duration) => Timing {
                duration_seconds: duration,
                speed_px_per_second: distance / duration,
            },
        };
        // Extreme ratios can still overflow or underflow.
        positive("resolved duration", timing.duration_seconds)?;
        positive("resolved speed", timing.speed_px_per_second)?;
        if timing.duration_seconds < MIN_DURATION_SECONDS {
            return Err(ConfigurationError::DurationTooShort {
                value: timing.duration_seconds,
                min: MIN_DURATION_SECONDS,
            });
        }
        Ok(timing)
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigurationError::NonPositive { field, value });
    }
    Ok(value)
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::NotFinite { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_and_duration_are_mutually_exclusive() {
        assert_eq!(
            SpeedInput::new(Some(10.0), Some(2.0)),
            Err(ConfigurationError::ConflictingSpeed)
        );
        assert_eq!(
            SpeedInput::new(None, None),
            Err(ConfigurationError::MissingSpeed)
        );
    }

    #[test]
    fn rejects_non_positive_timing() {
        assert!(matches!(
            SpeedInput::new(Some(0.0), None),
            Err(ConfigurationError::NonPositive { .. })
        ));
        assert!(matches!(
            SpeedInput::new(None, Some(-1.0)),
            Err(ConfigurationError::NonPositive { .. })
        ));
        assert!(matches!(
            SpeedInput::new(Some(f64::NAN), None),
            Err(ConfigurationError::NotFinite { .. })
        ));
    }

    #[test]
    fn resolves_duration_from_speed() {
        let timing = Timing::resolve(SpeedInput::PxPerSecond(50.0), 100.0).unwrap();
        assert_eq!(timing.duration_seconds, 2.0);
        assert_eq!(timing.speed_px_per_second, 50.0);
    }

    #[test]
    fn resolves_speed_from_duration() {
        let timing = Timing::resolve(SpeedInput::DurationSeconds(1.5), 30.0).unwrap();
        assert!((timing.speed_px_per_second - 20.0).abs() < 1e-9);
    }

    #[test]
    fn durations_below_a_millisecond_are_rejected() {
        let err = Timing::resolve(SpeedInput::PxPerSecond(5000.0), 1.0).unwrap_err();
        assert!(matches!(err, ConfigurationError::DurationTooShort { .. }));
        assert!(Timing::resolve(SpeedInput::DurationSeconds(0.0009), 10.0).is_err());

        let timing = Timing::resolve(SpeedInput::DurationSeconds(0.001), 10.0).unwrap();
        assert_eq!(crate::svg::fmt_secs(timing.duration_seconds), "0.001s");
    }

    #[test]
    fn arrow_count_is_bounded() {
        let options = ArrowOptions::new(100.0, 40.0)
            .with_speed(50.0)
            .with_num_arrows(MAX_ARROWS);
        assert!(options.validate().is_ok());

        let err = options.with_num_arrows(usize::MAX).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::TooManyArrows {
                count: usize::MAX,
                max: MAX_ARROWS
            }
        );
    }

    #[test]
    fn parses_directions_per_category() {
        assert_eq!("Right".parse::<FlowDirection>(), Ok(FlowDirection::Right));
        assert_eq!(
            " vertical ".parse::<SpreadDirection>(),
            Ok(SpreadDirection::Vertical)
        );

        let err = "horizontal".parse::<FlowDirection>().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidDirection { category: "flow", .. }
        ));
        assert!("up".parse::<SpreadDirection>().is_err());
    }

    #[test]
    fn parses_easing_names() {
        assert_eq!("ease-in-out".parse::<Easing>(), Ok(Easing::EaseInOut));
        assert_eq!("OVERSHOOT".parse::<Easing>(), Ok(Easing::Overshoot));
        assert_eq!(
            "bouncy".parse::<Easing>(),
            Err(ConfigurationError::InvalidEasing("bouncy".to_string()))
        );
        for easing in Easing::ALL {
            assert_eq!(easing.to_string().parse::<Easing>(), Ok(easing));
        }
    }

    #[test]
    fn validate_checks_size_and_color() {
        let ok = ArrowOptions::new(100.0, 40.0).with_speed(50.0);
        assert!(ok.validate().is_ok());

        let zero_width = ArrowOptions::new(0.0, 40.0).with_speed(50.0);
        assert!(matches!(
            zero_width.validate(),
            Err(ConfigurationError::NonPositive { field: "width", .. })
        ));

        let bad_color = ArrowOptions::new(10.0, 10.0)
            .with_speed(1.0)
            .with_color("red\"/><script>");
        assert!(matches!(
            bad_color.validate(),
            Err(ConfigurationError::InvalidColor(_))
        ));
    }
}
