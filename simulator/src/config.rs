//! Configuration management for the vineyard environment simulator
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with VINEYARD_ prefix

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DateRange, GeneratorOptions, WeatherColumn};
use validator::Validate;

use crate::error::{SimResult, SimulationError};
use crate::services::ReportSettings;

/// Main simulator configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather generation configuration
    pub simulation: SimulationConfig,

    /// Vineyard production configuration
    pub production: ProductionConfig,

    /// Report configuration
    pub report: ReportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// First simulated day (YYYY-MM-DD)
    pub start_date: String,

    /// Last simulated day, inclusive (YYYY-MM-DD)
    pub end_date: String,

    /// Round columns to display precision
    pub round_outputs: bool,

    /// Attach growing conditions to each day
    pub include_growing_condition: bool,

    /// Seed for reproducible runs; drawn at random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ProductionConfig {
    /// Vineyard area in hectares
    #[validate(range(min = 1))]
    pub field_size_hectares: u32,

    /// Bottles produced per kilogram of grapes
    #[validate(range(min = 0.01, max = 10.0))]
    pub bottles_per_kg: f64,

    /// Selling price of one bottle in EUR
    #[validate(range(min = 0.0))]
    pub bottle_price_eur: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Column scanned for streaks
    pub streak_column: String,

    /// Values whose longest runs are reported
    pub streak_targets: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit log lines as JSON objects instead of text
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("VINEYARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("simulation.start_date", "2024-01-01")?
            .set_default("simulation.end_date", "2028-12-31")?
            .set_default("simulation.round_outputs", true)?
            .set_default("simulation.include_growing_condition", false)?
            .set_default("production.field_size_hectares", 100)?
            .set_default("production.bottles_per_kg", 0.93)?
            .set_default("production.bottle_price_eur", 5.0)?
            .set_default("report.streak_column", "cloud_coverage")?
            .set_default("report.streak_targets", vec![100.0, 0.0])?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (VINEYARD_ prefix)
            .add_source(
                Environment::with_prefix("VINEYARD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("report.streak_targets")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Parsed and validated simulation bounds
    pub fn date_range(&self) -> SimResult<DateRange> {
        let start = parse_date("simulation.start_date", &self.simulation.start_date)?;
        let end = parse_date("simulation.end_date", &self.simulation.end_date)?;
        if end < start {
            return Err(SimulationError::InvalidRange { start, end });
        }
        Ok(DateRange::new(start, end))
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            round_outputs: self.simulation.round_outputs,
            include_growing_condition: self.simulation.include_growing_condition,
        }
    }

    /// Report parameters, validated
    pub fn report_settings(&self) -> SimResult<ReportSettings> {
        self.production.validate()?;
        let streak_column = self.report.streak_column.parse::<WeatherColumn>()?;

        Ok(ReportSettings {
            field_size_hectares: self.production.field_size_hectares,
            bottles_per_kg: self.production.bottles_per_kg,
            bottle_price_eur: self.production.bottle_price_eur,
            streak_column,
            streak_targets: self.report.streak_targets.clone(),
        })
    }
}

fn parse_date(key: &str, value: &str) -> SimResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        SimulationError::Configuration(format!("{} must be a YYYY-MM-DD date: {}", key, e))
    })
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: "2024-01-01".to_string(),
            end_date: "2028-12-31".to_string(),
            round_outputs: true,
            include_growing_condition: false,
            seed: None,
        }
    }
}
