//! Configuration error types

use thiserror::Error;

/// Errors raised while building a sheet controller
///
/// All of these are programmer or deployment errors caught at construction
/// time; nothing in the gesture path returns an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Detent ratios out of order or out of range
    #[error("detent ratios must satisfy 0 < medium ({medium}) < large ({large}) <= 1")]
    InvalidRatios { medium: f32, large: f32 },

    /// Container height is zero, negative or not finite
    #[error("container height must be finite and positive, got {0}")]
    InvalidContainerHeight(f32),

    /// A tunable outside its valid range
    #[error("{field} must be {expected}, got {value}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    /// Failed to read a config file
    #[error("failed to read sheet config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a config file
    #[error("failed to parse sheet config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for sheet construction
pub type Result<T> = std::result::Result<T, ConfigError>;
