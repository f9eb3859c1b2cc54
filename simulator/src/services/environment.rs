//! Synthetic daily weather generator
//!
//! Each column follows a yearly sinusoid over the day of year plus noise.
//! Temperature and sun hours share one phase, rain another, cloud coverage a
//! third. Columns are correlated afterwards: rain days lose most of their sun,
//! are fully overcast and raise humidity.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand_distr::{Exp1, StandardNormal};
use shared::{
    validate_date_range, DailyRecord, DateRange, EnvironmentalSeries, GeneratorOptions,
    GrowingCondition, CLOUD_COVERAGE_RANGE, HUMIDITY_RANGE, MIN_RAIN_MM, SUN_HOURS_RANGE,
    TEMPERATURE_RANGE,
};

use crate::error::{SimResult, SimulationError};
use crate::services::scaler::rescale;

const DAYS_PER_YEAR: f64 = 365.0;

/// Phase shift in days of the temperature and sun hour sinusoids
const WARM_PHASE: f64 = -171.0;

const TEMPERATURE_MEAN: f64 = 20.0;
const TEMPERATURE_AMPLITUDE: f64 = 8.0;
const TEMPERATURE_NOISE_SD: f64 = 2.0;

const SUN_HOURS_MAX: f64 = 14.0;
const SUN_HOURS_MIN: f64 = 9.0;
/// Fraction of sun left on a rain day
const RAIN_DAY_SUN_FACTOR: f64 = 0.3;

const RAIN_PHASE: f64 = 45.0;
const RAIN_PROBABILITY_MEAN: f64 = 0.22;
const RAIN_PROBABILITY_AMPLITUDE: f64 = 0.16;
const MONTHLY_RAIN_MEAN_MM: f64 = 61.5;
const MONTHLY_RAIN_AMPLITUDE_MM: f64 = 46.5;
const DAYS_PER_MONTH: f64 = 30.0;

const CLOUD_PHASE: f64 = 80.0;
const CLOUD_MEAN: f64 = 29.0;
const CLOUD_AMPLITUDE: f64 = 17.0;
const CLOUD_NOISE_SD: f64 = 10.0;
const OVERCAST: f64 = 100.0;

const HUMIDITY_BASE: f64 = 70.0;
const HUMIDITY_PER_DEGREE: f64 = 0.3;
const HUMIDITY_RAIN_BOOST: f64 = 15.0;
const HUMIDITY_RAIN_RATE: f64 = 0.1;
const HUMIDITY_NOISE_SD: f64 = 3.0;

/// Seasonal sinusoid `mean + amplitude * sin(2π (day + shift) / 365)`
fn seasonal(day_of_year: f64, mean: f64, amplitude: f64, shift: f64) -> f64 {
    mean + amplitude * (2.0 * PI * (day_of_year + shift) / DAYS_PER_YEAR).sin()
}

/// Round half to even at the given number of decimals
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Builds daily weather series from date bounds
#[derive(Debug, Clone, Default)]
pub struct EnvironmentalSimulator {
    options: GeneratorOptions,
}

impl EnvironmentalSimulator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generate one record per day in `[start, end]`.
    ///
    /// All noise is drawn from `rng`, one column at a time, so a generator
    /// seeded identically reproduces the series exactly.
    pub fn generate<R: Rng>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        rng: &mut R,
    ) -> SimResult<EnvironmentalSeries> {
        let range = DateRange::new(start, end);
        if validate_date_range(&range).is_err() {
            return Err(SimulationError::InvalidRange { start, end });
        }

        let round = self.options.round_outputs;
        let dates: Vec<NaiveDate> = start.iter_days().take(range.days()).collect();
        let days: Vec<f64> = dates.iter().map(|d| f64::from(d.ordinal())).collect();

        // Temperature
        let raw_temperature: Vec<f64> = days
            .iter()
            .map(|&day| {
                let noise: f64 = rng.sample(StandardNormal);
                seasonal(day, TEMPERATURE_MEAN, TEMPERATURE_AMPLITUDE, WARM_PHASE)
                    + TEMPERATURE_NOISE_SD * noise
            })
            .collect();
        let (temp_min, temp_max) = TEMPERATURE_RANGE;
        let mut temperature = rescale(&raw_temperature, temp_min, temp_max)?;
        for t in temperature.iter_mut() {
            *t = t.clamp(temp_min, temp_max);
            if round {
                *t = round_to(*t, 1);
            }
        }

        // Sun hours
        let sun_mean = (SUN_HOURS_MAX + SUN_HOURS_MIN) / 2.0;
        let sun_amplitude = (SUN_HOURS_MAX - SUN_HOURS_MIN) / 2.0;
        let mut sun_hours: Vec<f64> = days
            .iter()
            .map(|&day| seasonal(day, sun_mean, sun_amplitude, WARM_PHASE))
            .collect();

        // Rain
        let rain_probability: Vec<f64> = days
            .iter()
            .map(|&day| {
                seasonal(day, RAIN_PROBABILITY_MEAN, RAIN_PROBABILITY_AMPLITUDE, RAIN_PHASE)
            })
            .collect();
        let rain_events: Vec<bool> = rain_probability
            .iter()
            .map(|&p| rng.random::<f64>() < p)
            .collect();
        let mut rain_mm: Vec<f64> = days
            .iter()
            .zip(&rain_probability)
            .zip(&rain_events)
            .map(|((&day, &p), &rains)| {
                let base_rain =
                    seasonal(day, MONTHLY_RAIN_MEAN_MM, MONTHLY_RAIN_AMPLITUDE_MM, RAIN_PHASE);
                let daily_intensity = base_rain / (p * DAYS_PER_MONTH);
                let draw: f64 = rng.sample(Exp1);
                if rains {
                    daily_intensity * draw
                } else {
                    0.0
                }
            })
            .collect();

        let (sun_low, sun_high) = SUN_HOURS_RANGE;
        for (rain, sun) in rain_mm.iter_mut().zip(sun_hours.iter_mut()) {
            if *rain < MIN_RAIN_MM {
                *rain = 0.0;
            }
            if *rain > 0.0 {
                *sun *= RAIN_DAY_SUN_FACTOR;
            }
            if round {
                *rain = round_to(*rain, 0);
            }
            *sun = sun.clamp(sun_low, sun_high);
            if round {
                *sun = round_to(*sun, 2);
            }
        }

        // Cloud coverage
        let (cloud_low, cloud_high) = CLOUD_COVERAGE_RANGE;
        let cloud_coverage: Vec<f64> = days
            .iter()
            .zip(&rain_mm)
            .map(|(&day, &rain)| {
                let noise: f64 = rng.sample(StandardNormal);
                let cloud = if rain > 0.0 {
                    OVERCAST
                } else {
                    seasonal(day, CLOUD_MEAN, CLOUD_AMPLITUDE, CLOUD_PHASE) + CLOUD_NOISE_SD * noise
                };
                let cloud = cloud.clamp(cloud_low, cloud_high);
                if round {
                    round_to(cloud, 0)
                } else {
                    cloud
                }
            })
            .collect();

        // Humidity
        let (humidity_low, humidity_high) = HUMIDITY_RANGE;
        let humidity: Vec<f64> = temperature
            .iter()
            .zip(&rain_mm)
            .map(|(&temp, &rain)| {
                let base = HUMIDITY_BASE - HUMIDITY_PER_DEGREE * (temp - TEMPERATURE_MEAN);
                let rain_effect = if rain > 0.0 {
                    HUMIDITY_RAIN_BOOST * (1.0 - (-HUMIDITY_RAIN_RATE * rain).exp())
                } else {
                    0.0
                };
                let noise: f64 = rng.sample(StandardNormal);
                let value = (base + rain_effect + HUMIDITY_NOISE_SD * noise)
                    .clamp(humidity_low, humidity_high);
                if round {
                    round_to(value, 0)
                } else {
                    value
                }
            })
            .collect();

        let include_condition = self.options.include_growing_condition;
        let records: Vec<DailyRecord> = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| DailyRecord {
                date,
                temperature: temperature[i],
                sun_hours: sun_hours[i],
                rain_mm: rain_mm[i],
                cloud_coverage: cloud_coverage[i],
                humidity: humidity[i],
                growing_condition: include_condition
                    .then(|| GrowingCondition::from_temperature(temperature[i])),
            })
            .collect();

        let rain_days = records.iter().filter(|r| r.is_rain_day()).count();
        tracing::debug!(
            "Generated {} days from {} to {} ({} rain days)",
            records.len(),
            start,
            end,
            rain_days
        );

        Ok(EnvironmentalSeries::new(records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seasonal_peaks_at_shifted_quarter() {
        // sin peaks where (day + shift) = 365 / 4
        let peak = 365.0 / 4.0 - WARM_PHASE;
        let value = seasonal(peak, TEMPERATURE_MEAN, TEMPERATURE_AMPLITUDE, WARM_PHASE);
        assert!((value - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_half_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(12.36, 1), 12.4);
        assert_eq!(round_to(-0.4, 0), -0.0);
    }

    #[test]
    fn test_generate_counts_days() {
        let simulator = EnvironmentalSimulator::default();
        let mut rng = seeded_rng(7);
        let leap = simulator
            .generate(day(2024, 1, 1), day(2024, 12, 31), &mut rng)
            .unwrap();
        assert_eq!(leap.len(), 366);

        let common = simulator
            .generate(day(2025, 1, 1), day(2025, 12, 31), &mut rng)
            .unwrap();
        assert_eq!(common.len(), 365);
        assert_eq!(common.first_date(), Some(day(2025, 1, 1)));
        assert_eq!(common.last_date(), Some(day(2025, 12, 31)));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let simulator = EnvironmentalSimulator::default();
        let mut rng = seeded_rng(7);
        let result = simulator.generate(day(2025, 1, 2), day(2025, 1, 1), &mut rng);
        assert!(matches!(result, Err(SimulationError::InvalidRange { .. })));
    }

    #[test]
    fn test_single_day_cannot_be_rescaled() {
        let simulator = EnvironmentalSimulator::default();
        let mut rng = seeded_rng(7);
        let result = simulator.generate(day(2025, 1, 1), day(2025, 1, 1), &mut rng);
        assert!(matches!(result, Err(SimulationError::DegenerateRange { .. })));
    }

    #[test]
    fn test_growing_condition_flag() {
        let mut rng = seeded_rng(11);
        let plain = EnvironmentalSimulator::default()
            .generate(day(2025, 1, 1), day(2025, 3, 31), &mut rng)
            .unwrap();
        assert!(plain.iter().all(|r| r.growing_condition.is_none()));

        let with_condition = EnvironmentalSimulator::new(GeneratorOptions {
            round_outputs: false,
            include_growing_condition: true,
        })
        .generate(day(2025, 1, 1), day(2025, 3, 31), &mut rng)
        .unwrap();
        for record in &with_condition {
            assert_eq!(
                record.growing_condition,
                Some(GrowingCondition::from_temperature(record.temperature))
            );
        }
    }

    #[test]
    fn test_temperature_spans_full_range() {
        let mut rng = seeded_rng(3);
        let series = EnvironmentalSimulator::new(GeneratorOptions {
            round_outputs: false,
            include_growing_condition: false,
        })
        .generate(day(2025, 1, 1), day(2025, 12, 31), &mut rng)
        .unwrap();
        let temps = series.column(shared::WeatherColumn::Temperature);
        let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min - 6.0).abs() < 1e-9);
        assert!((max - 28.0).abs() < 1e-9);
    }
}
