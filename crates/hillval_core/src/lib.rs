//! Hill of Value scenario evaluation engine
//!
//! This crate evaluates the net present value of a mineral deposit across a
//! grid of two decision variables — ore cut-off grade and annual production
//! rate — under uncertainty in metal price and metallurgical recovery. It
//! provides:
//! - Grade-tonnage and CAPEX models, analytic or curve-driven
//! - Per-trial discounted-cash-flow evaluation
//! - Monte Carlo aggregation per grid cell
//! - A parallel grid sweep with progress tracking and cooperative
//!   cancellation
//!
//! The sole artifact is a flat `ScenarioTable`, one row per grid cell, from
//! which consumers derive valid-only views and the rectangular NPV surface.
//!
//! ```ignore
//! use hillval_core::config::EngineConfig;
//! use hillval_core::sweep::sweep_evaluate;
//!
//! let config = EngineConfig {
//!     trials_per_cell: 200,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let table = sweep_evaluate(&config, None)?;
//! let surface = table.to_surface()?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod error;
pub mod evaluate;
pub mod simulation;
pub mod sweep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{EngineConfig, GridAxis};
pub use error::{ConfigError, EngineError, MarketError, SurfaceError};
pub use model::{NpvSurface, SamplingProfile, ScenarioCell, ScenarioTable};
pub use sweep::{SweepProgress, sweep_evaluate};
