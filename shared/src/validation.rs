//! Validation utilities for simulator inputs and generated records

use crate::models::DailyRecord;
use crate::types::DateRange;

// ============================================================================
// Physical bounds of generated weather
// ============================================================================

pub const TEMPERATURE_RANGE: (f64, f64) = (6.0, 28.0);
pub const SUN_HOURS_RANGE: (f64, f64) = (0.0, 14.0);
pub const CLOUD_COVERAGE_RANGE: (f64, f64) = (0.0, 100.0);
pub const HUMIDITY_RANGE: (f64, f64) = (40.0, 95.0);

/// Smallest rain amount recorded as rain; anything less is a dry day
pub const MIN_RAIN_MM: f64 = 1.0;

fn within((low, high): (f64, f64), value: f64) -> bool {
    value >= low && value <= high
}

/// Validate that a record respects the generator's physical ranges
pub fn validate_record(record: &DailyRecord) -> Result<(), &'static str> {
    if !within(TEMPERATURE_RANGE, record.temperature) {
        return Err("Temperature must be between 6 and 28 °C");
    }
    if !within(SUN_HOURS_RANGE, record.sun_hours) {
        return Err("Sun hours must be between 0 and 14");
    }
    if record.rain_mm != 0.0 && !(record.rain_mm >= MIN_RAIN_MM) {
        return Err("Rain must be 0 or at least 1 mm");
    }
    if !within(CLOUD_COVERAGE_RANGE, record.cloud_coverage) {
        return Err("Cloud coverage must be between 0 and 100%");
    }
    if record.is_rain_day() && record.cloud_coverage != 100.0 {
        return Err("Rain days must be fully overcast");
    }
    if !within(HUMIDITY_RANGE, record.humidity) {
        return Err("Humidity must be between 40 and 95%");
    }
    Ok(())
}

// ============================================================================
// Input validations
// ============================================================================

/// Validate that a date range is not reversed
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.end < range.start {
        return Err("End date must not precede start date");
    }
    Ok(())
}

/// Validate field size in hectares
pub fn validate_field_size(hectares: u32) -> Result<(), &'static str> {
    if hectares == 0 {
        return Err("Field size must be a positive number of hectares");
    }
    Ok(())
}

/// Validate bottle selling price
pub fn validate_bottle_price(price_eur: f64) -> Result<(), &'static str> {
    if !price_eur.is_finite() || price_eur < 0.0 {
        return Err("Bottle price must be a non-negative amount");
    }
    Ok(())
}
