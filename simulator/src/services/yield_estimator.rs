//! Yield estimation from one year of weather

use rand::Rng;
use shared::{
    validate_field_size, AdjustmentFactors, DailyRecord, EnvironmentalSeries, YieldResult,
};

use crate::error::{SimResult, SimulationError};

/// Length of the trailing window aggregated into one yield estimate
pub const YIELD_WINDOW_DAYS: usize = 365;

/// Baseline yield per hectare is drawn from this half-open range (kg)
pub const BASELINE_YIELD_PER_HECTARE_KG: std::ops::Range<u32> = 8_000..12_000;

pub const DEFAULT_FIELD_SIZE_HECTARES: u32 = 100;

/// Converts a year of weather into a yield forecast
#[derive(Debug, Clone)]
pub struct YieldEstimator {
    field_size_hectares: u32,
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self {
            field_size_hectares: DEFAULT_FIELD_SIZE_HECTARES,
        }
    }
}

impl YieldEstimator {
    pub fn new(field_size_hectares: u32) -> SimResult<Self> {
        validate_field_size(field_size_hectares)
            .map_err(|msg| SimulationError::invalid_parameter("field_size_hectares", msg))?;
        Ok(Self {
            field_size_hectares,
        })
    }

    /// Estimate yield from the trailing 365 days of `series`.
    ///
    /// The baseline per hectare is drawn from `rng`; the weather only scales it.
    pub fn simulate<R: Rng>(
        &self,
        series: &EnvironmentalSeries,
        rng: &mut R,
    ) -> SimResult<YieldResult> {
        if series.len() < YIELD_WINDOW_DAYS {
            return Err(SimulationError::InsufficientData {
                required: YIELD_WINDOW_DAYS,
                available: series.len(),
            });
        }
        let window = series.trailing(YIELD_WINDOW_DAYS);

        let baseline_per_hectare = rng.random_range(BASELINE_YIELD_PER_HECTARE_KG);
        let baseline_yield_kg = f64::from(baseline_per_hectare) * f64::from(self.field_size_hectares);

        let avg_temperature = mean(window, |r| r.temperature);
        let avg_rainfall_mm: f64 = window.iter().map(|r| r.rain_mm).sum();
        let avg_sun_hours = mean(window, |r| r.sun_hours);
        let avg_humidity = mean(window, |r| r.humidity);

        let factors = AdjustmentFactors::from_averages(
            avg_temperature,
            avg_rainfall_mm,
            avg_sun_hours,
            avg_humidity,
        );
        let adjustment_factor = factors.combined();

        tracing::debug!(
            "Yield window {:?}..{:?}: baseline {} kg, factors {:?}",
            window.first().map(|r| r.date),
            window.last().map(|r| r.date),
            baseline_yield_kg,
            factors
        );

        Ok(YieldResult {
            baseline_yield_kg,
            adjusted_yield_kg: baseline_yield_kg * adjustment_factor,
            adjustment_factor,
            avg_temperature,
            avg_rainfall_mm,
            avg_sun_hours,
            avg_humidity,
        })
    }
}

fn mean(records: &[DailyRecord], value: impl Fn(&DailyRecord) -> f64) -> f64 {
    records.iter().map(value).sum::<f64>() / records.len() as f64
}
