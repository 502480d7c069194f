use std::fmt;

/// Errors found while validating an `EngineConfig` before a sweep runs.
///
/// These are fatal: a sweep never starts on an invalid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A grid axis produced no values
    EmptyAxis { axis: &'static str },
    /// A grid axis was configured with a non-positive step
    NonPositiveStep { axis: &'static str, step: f64 },
    /// A grid axis contains a value that must be strictly positive
    NonPositiveValue { axis: &'static str, value: f64 },
    /// A scalar input is not a finite number
    NonFinite { field: &'static str, value: f64 },
    /// A scalar input must be non-negative
    Negative { field: &'static str, value: f64 },
    /// Fewer than one Monte Carlo trial per grid cell
    TooFewTrials(usize),
    /// A supplied curve has no rows
    EmptyCurve { curve: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyAxis { axis } => write!(f, "{axis} axis produced no grid values"),
            ConfigError::NonPositiveStep { axis, step } => {
                write!(f, "{axis} axis step must be positive, got {step}")
            }
            ConfigError::NonPositiveValue { axis, value } => {
                write!(f, "{axis} axis values must be positive, got {value}")
            }
            ConfigError::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            ConfigError::TooFewTrials(n) => {
                write!(f, "trials_per_cell must be at least 1, got {n}")
            }
            ConfigError::EmptyCurve { curve } => write!(f, "{curve} curve has no rows"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors related to sampling the price/recovery distributions
#[derive(Debug, Clone, PartialEq)]
pub enum MarketError {
    InvalidDistributionParameters {
        profile_type: &'static str,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::InvalidDistributionParameters {
                profile_type,
                mean,
                std_dev,
                reason,
            } => {
                write!(
                    f,
                    "invalid {profile_type} parameters (mean={mean}, std_dev={std_dev}): {reason}"
                )
            }
        }
    }
}

impl std::error::Error for MarketError {}

/// Top-level engine failure for a grid sweep.
///
/// Per-trial numeric anomalies (negative price draws, huge NPVs) are never
/// errors; only malformed configuration, impossible distribution parameters,
/// or cooperative cancellation abort a sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Config(ConfigError),
    Market(MarketError),
    /// Sweep was cancelled by caller request between grid cells
    Cancelled,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "{e}"),
            EngineError::Market(e) => write!(f, "{e}"),
            EngineError::Cancelled => write!(f, "sweep cancelled"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(e) => Some(e),
            EngineError::Market(e) => Some(e),
            EngineError::Cancelled => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<MarketError> for EngineError {
    fn from(e: MarketError) -> Self {
        EngineError::Market(e)
    }
}

/// Errors pivoting a scenario table into a rectangular NPV surface.
///
/// Non-fatal by design: the flat table is the canonical output and remains
/// valid even when a filtered view cannot form a full grid.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The table has no cells to pivot
    Empty,
    /// The cutoff x production grid has holes (e.g. after valid-only filtering)
    MissingCells { expected: usize, found: usize },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Empty => write!(f, "scenario table is empty"),
            SurfaceError::MissingCells { expected, found } => {
                write!(
                    f,
                    "surface grid is incomplete: {found} of {expected} cells present"
                )
            }
        }
    }
}

impl std::error::Error for SurfaceError {}
