//! Simulation services for the vineyard environment simulator

pub mod environment;
pub mod reporting;
pub mod scaler;
pub mod streak;
pub mod yield_estimator;

pub use environment::EnvironmentalSimulator;
pub use reporting::{ReportSettings, ReportingService, SimulationReport};
pub use scaler::rescale;
pub use streak::StreakAnalyzer;
pub use yield_estimator::YieldEstimator;
