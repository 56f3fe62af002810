//! Error types for arrow generation.

use thiserror::Error;

/// Construction parameters that violate an invariant.
///
/// Raised synchronously by every generator constructor; no partially built
/// generator is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("both speed_in_px_per_second and speed_in_duration_seconds were given; supply exactly one")]
    ConflictingSpeed,

    #[error("neither speed_in_px_per_second nor speed_in_duration_seconds was given; supply exactly one")]
    MissingSpeed,

    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("invalid {category} direction '{value}', expected one of: {expected}")]
    InvalidDirection {
        category: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid animation timing function '{0}', expected one of: linear, ease, ease-in, ease-out, ease-in-out, overshoot")]
    InvalidEasing(String),

    #[error("invalid color '{0}': must be non-empty and free of markup characters")]
    InvalidColor(String),

    #[error("color '{color}' collides with the generated identifier '{identifier}'")]
    ReservedColor { color: String, identifier: &'static str },

    #[error("num_arrows must be at most {max}, got {count}")]
    TooManyArrows { count: usize, max: usize },

    #[error("resolved duration {value}s is below the {min}s rendering precision")]
    DurationTooShort { value: f64, min: f64 },

    #[error("invalid arrow name '{0}': use one or more of [A-Za-z0-9_.-] and no '..'")]
    InvalidName(String),

    #[error("unknown arrow kind '{0}', expected one of: moving-flow, spotlight-flow, bouncing-spread, spotlight-spread")]
    UnknownKind(String),
}

/// The identifier rewrite step could not be applied.
///
/// `MissingIdentifier` means a generator declared an identifier its own markup
/// never uses, which is a bug in that generator rather than a caller mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierRewriteError {
    #[error("declared identifier '{identifier}' does not occur in the generated markup")]
    MissingIdentifier { identifier: String },

    #[error("invalid unique id '{0}': use one or more of [A-Za-z0-9_-]")]
    InvalidSuffix(String),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    IdentifierRewrite(#[from] IdentifierRewriteError),

    #[error("failed to write arrow markup: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_error_names_category_and_value() {
        let err = ConfigurationError::InvalidDirection {
            category: "flow",
            value: "horizontal".to_string(),
            expected: "right, left, up, down",
        };
        let msg = err.to_string();
        assert!(msg.contains("flow"));
        assert!(msg.contains("'horizontal'"));
    }

    #[test]
    fn crate_error_wraps_both_kinds() {
        let err: Error = ConfigurationError::MissingSpeed.into();
        assert!(matches!(err, Error::Configuration(_)));

        let err: Error = IdentifierRewriteError::InvalidSuffix(" ".to_string()).into();
        assert!(err.to_string().contains("invalid unique id"));
    }
}
