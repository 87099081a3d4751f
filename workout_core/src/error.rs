//! Error types for the workout_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for workout_core operations
///
/// Every compile-time variant describes a validation failure over untrusted
/// input. The first one raised aborts the whole compile call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Workout `type` is not in the sport table
    #[error("Unsupported sport type: {0}")]
    UnsupportedSportType(String),

    /// Leaf step without a `stepType`
    #[error("Missing stepType for step: {0}")]
    MissingStepType(String),

    /// `target.type` is not in the target table
    #[error("Unsupported target type: {0}")]
    UnsupportedTargetType(String),

    /// `distanceUnit` is not in the distance-unit table
    #[error("Unsupported distance unit: {0}")]
    UnsupportedDistanceUnit(String),

    /// Explicit `endConditionType` other than time or distance
    #[error("Unsupported end condition type: {0}")]
    UnsupportedEndConditionType(String),

    /// Time step with a missing or non-positive `stepDuration`
    #[error("Invalid or missing stepDuration for step: {0}")]
    InvalidDuration(String),

    /// Distance step with a missing or non-positive `stepDistance`, or no unit
    #[error("Invalid or missing stepDistance/distanceUnit for step: {0}")]
    InvalidDistance(String),

    /// Repeat step whose `numberOfIterations` is not a positive integer
    #[error("Invalid or missing numberOfIterations for repeat step: {0}")]
    InvalidIterationCount(String),

    /// Target value that cannot be converted into a finite wire value
    #[error("Invalid target value: {0}")]
    InvalidTargetValue(String),

    /// Generation-service output that is not parsable JSON
    #[error("Invalid JSON response from generation service: {0}")]
    InvalidJson(String),

    /// JSON that parses but does not describe a workout we can compile
    #[error("Malformed workout input: {0}")]
    MalformedInput(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error on trusted data
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
