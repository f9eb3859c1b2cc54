//! Vineyard environment simulator
//!
//! Generates correlated synthetic daily weather, estimates vineyard yield from
//! the trailing year of it and finds streaks in any weather column. Every
//! random draw comes from a caller-supplied generator.

pub mod config;
pub mod error;
pub mod random;
pub mod services;

pub use config::Config;
pub use error::{ErrorDetail, SimResult, SimulationError};
pub use random::{seeded_rng, SimRng};
pub use services::{
    rescale, EnvironmentalSimulator, ReportSettings, ReportingService, SimulationReport,
    StreakAnalyzer, YieldEstimator,
};
