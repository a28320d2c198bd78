//! Core configuration and error types for the Hearth heat-diffusion engine.
//!
//! Everything downstream (grid, solver, engine) consumes [`SimulationConfig`]
//! by value and reports setup failures through [`ConfigError`]. Neither type
//! carries any runtime state; both are immutable for the duration of a run.

pub mod config;
pub mod error;

pub use config::{SimulationConfig, DEFAULT_DT};
pub use error::ConfigError;
