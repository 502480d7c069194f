//! Value types shared across the engine: stochastic input profiles,
//! deposit/capital models, and sweep output types.

pub mod curves;
pub mod market;
pub mod results;

pub use curves::{CapexModel, CapexPoint, GradeTonnageModel, GradeTonnagePoint};
pub use market::SamplingProfile;
pub use results::{NpvSurface, ScenarioCell, ScenarioTable, TrialResult};
