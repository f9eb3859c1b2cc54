//! WebAssembly module for the vineyard environment simulator
//!
//! Provides client-side computation for the dashboard:
//! - Weather series generation
//! - Yield estimation and production forecasts
//! - Streak analysis
//! - Growing condition classification
//!
//! Series and results cross the boundary as JSON strings. Each exported
//! function wraps a plain Rust function that reports failures as an
//! [`ErrorDetail`].

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use vineyard_simulator::{
    seeded_rng, EnvironmentalSimulator, ErrorDetail, ReportingService, SimulationError,
    StreakAnalyzer, YieldEstimator,
};

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ErrorDetail> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        SimulationError::invalid_parameter(field, "expected a YYYY-MM-DD date").detail()
    })
}

fn parse_series(series_json: &str) -> Result<EnvironmentalSeries, ErrorDetail> {
    serde_json::from_str(series_json).map_err(|e| SimulationError::from(e).detail())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ErrorDetail> {
    serde_json::to_string(value).map_err(|e| SimulationError::from(e).detail())
}

fn to_js_error(detail: ErrorDetail) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&detail.message));
    let json = serde_json::to_string(&detail).unwrap_or_else(|_| detail.message.clone());
    JsValue::from_str(&json)
}

/// Generate a daily series as a JSON array of records
pub fn generate_series_json(
    start_date: &str,
    end_date: &str,
    seed: u64,
    round_outputs: bool,
    include_growing_condition: bool,
) -> Result<String, ErrorDetail> {
    let start = parse_date("start_date", start_date)?;
    let end = parse_date("end_date", end_date)?;
    let simulator = EnvironmentalSimulator::new(GeneratorOptions {
        round_outputs,
        include_growing_condition,
    });

    let series = simulator
        .generate(start, end, &mut seeded_rng(seed))
        .map_err(|e| e.detail())?;
    to_json(&series)
}

/// Estimate yield from the trailing year of a JSON series
pub fn simulate_yield_json(
    series_json: &str,
    field_size_hectares: u32,
    seed: u64,
) -> Result<String, ErrorDetail> {
    let series = parse_series(series_json)?;
    let estimator = YieldEstimator::new(field_size_hectares).map_err(|e| e.detail())?;
    let result = estimator
        .simulate(&series, &mut seeded_rng(seed))
        .map_err(|e| e.detail())?;
    to_json(&result)
}

/// Longest run of `target` in the named column of a JSON series
pub fn longest_streak_json(
    series_json: &str,
    column: &str,
    target: f64,
) -> Result<String, ErrorDetail> {
    let series = parse_series(series_json)?;
    let column = column
        .parse::<WeatherColumn>()
        .map_err(|e| SimulationError::from(e).detail())?;
    to_json(&StreakAnalyzer::longest_streak(&series, column, target))
}

/// Bottles and revenue from a JSON yield result
pub fn forecast_production_json(
    yield_json: &str,
    bottles_per_kg: f64,
    bottle_price_eur: f64,
) -> Result<String, ErrorDetail> {
    let result: YieldResult =
        serde_json::from_str(yield_json).map_err(|e| SimulationError::from(e).detail())?;
    let forecast = ReportingService::forecast_production(&result, bottles_per_kg, bottle_price_eur)
        .map_err(|e| e.detail())?;
    to_json(&forecast)
}

/// Generate a daily weather series
#[wasm_bindgen]
pub fn generate_series(
    start_date: &str,
    end_date: &str,
    seed: u64,
    round_outputs: bool,
    include_growing_condition: bool,
) -> Result<String, JsValue> {
    generate_series_json(
        start_date,
        end_date,
        seed,
        round_outputs,
        include_growing_condition,
    )
    .map_err(to_js_error)
}

/// Estimate vineyard yield
#[wasm_bindgen]
pub fn simulate_yield(series_json: &str, field_size_hectares: u32, seed: u64) -> Result<String, JsValue> {
    simulate_yield_json(series_json, field_size_hectares, seed).map_err(to_js_error)
}

/// Find the longest streak of a value in a column
#[wasm_bindgen]
pub fn longest_streak(series_json: &str, column: &str, target: f64) -> Result<String, JsValue> {
    longest_streak_json(series_json, column, target).map_err(to_js_error)
}

/// Forecast bottles and gross revenue
#[wasm_bindgen]
pub fn forecast_production(
    yield_json: &str,
    bottles_per_kg: f64,
    bottle_price_eur: f64,
) -> Result<String, JsValue> {
    forecast_production_json(yield_json, bottles_per_kg, bottle_price_eur).map_err(to_js_error)
}

/// Classify a temperature into its growing condition label
#[wasm_bindgen]
pub fn classify_growing_condition(temperature: f64) -> String {
    GrowingCondition::from_temperature(temperature).to_string()
}
