//! Addresses on the workout platform.

/// Endpoint that accepts a compiled payload as its POST body
pub const WORKOUT_SERVICE_ENDPOINT: &str = "https://connect.garmin.com/workout-service/workout";
