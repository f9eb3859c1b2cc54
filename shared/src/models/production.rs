//! Yield and production forecast models

use serde::{Deserialize, Serialize};

/// Yield estimate for one year of weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub baseline_yield_kg: f64,
    pub adjusted_yield_kg: f64,
    pub adjustment_factor: f64,
    pub avg_temperature: f64,
    /// Total rainfall over the window, not a daily mean
    pub avg_rainfall_mm: f64,
    pub avg_sun_hours: f64,
    pub avg_humidity: f64,
}

/// Per-variable multiplicative yield factors.
///
/// Factors are not clamped: extreme averages can push a factor, and therefore
/// the combined factor, below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    pub temperature: f64,
    pub rainfall: f64,
    pub sun: f64,
    pub humidity: f64,
}

impl AdjustmentFactors {
    /// Optimal average temperature band in °C
    pub const TEMPERATURE_BAND: (f64, f64) = (18.0, 28.0);
    /// Optimal annual rainfall band in mm
    pub const RAINFALL_BAND: (f64, f64) = (600.0, 800.0);
    /// Daily sun hours at which the sun factor saturates
    pub const SUN_SATURATION_HOURS: f64 = 12.0;
    /// Humidity (%) above which yield is penalized
    pub const HUMIDITY_LIMIT: f64 = 80.0;

    /// Derive the factors from yearly averages (rainfall as an annual total)
    pub fn from_averages(
        avg_temperature: f64,
        total_rainfall_mm: f64,
        avg_sun_hours: f64,
        avg_humidity: f64,
    ) -> Self {
        let (temp_low, temp_high) = Self::TEMPERATURE_BAND;
        let temperature = if avg_temperature < temp_low {
            1.0 - (temp_low - avg_temperature) * 0.05
        } else if avg_temperature > temp_high {
            1.0 - (avg_temperature - temp_high) * 0.05
        } else {
            1.0
        };

        let (rain_low, rain_high) = Self::RAINFALL_BAND;
        let rainfall = if total_rainfall_mm < rain_low {
            1.0 - (rain_low - total_rainfall_mm) * 0.001
        } else if total_rainfall_mm > rain_high {
            1.0 - (total_rainfall_mm - rain_high) * 0.001
        } else {
            1.0
        };

        let sun = (avg_sun_hours / Self::SUN_SATURATION_HOURS).min(1.0);

        let humidity = if avg_humidity > Self::HUMIDITY_LIMIT {
            1.0 - (avg_humidity - Self::HUMIDITY_LIMIT) * 0.01
        } else {
            1.0
        };

        Self {
            temperature,
            rainfall,
            sun,
            humidity,
        }
    }

    pub fn combined(&self) -> f64 {
        self.temperature * self.rainfall * self.sun * self.humidity
    }
}

/// Bottling and revenue forecast derived from a yield estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionForecast {
    pub adjusted_yield_kg: f64,
    pub bottles: f64,
    pub bottle_price_eur: f64,
    pub gross_revenue_eur: f64,
}

impl ProductionForecast {
    /// Bottles obtained per kilogram of grapes
    pub const DEFAULT_BOTTLES_PER_KG: f64 = 0.93;
    /// Default selling price of one bottle in EUR
    pub const DEFAULT_BOTTLE_PRICE_EUR: f64 = 5.0;

    pub fn from_yield(result: &YieldResult, bottles_per_kg: f64, bottle_price_eur: f64) -> Self {
        let bottles = result.adjusted_yield_kg * bottles_per_kg;
        Self {
            adjusted_yield_kg: result.adjusted_yield_kg,
            bottles,
            bottle_price_eur,
            gross_revenue_eur: bottles * bottle_price_eur,
        }
    }
}
