#![forbid(unsafe_code)]

//! Core domain model and compiler for workout descriptions.
//!
//! This crate provides:
//! - Input and wire types (workout specs, compiled steps, payloads)
//! - Lookup tables and unit conversion
//! - The step compiler and duration estimator
//! - The generation-service boundary and built-in example workouts
//! - Config, logging and the payload outbox

pub mod types;
pub mod error;
pub mod tables;
pub mod units;
pub mod target;
pub mod end_condition;
pub mod compiler;
pub mod estimate;
pub mod payload;
pub mod generation;
pub mod library;
pub mod platform;
pub mod config;
pub mod logging;
pub mod outbox;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use compiler::CompileOptions;
pub use payload::{compile, compile_with};
pub use generation::{build_prompt, compile_generated, generation_request, parse_generated_workout};
pub use library::{example_names, get_example};
pub use config::{Config, GenerationSettings};
pub use outbox::{read_outbox, JsonlOutbox, OutboxEntry, PayloadSink};
