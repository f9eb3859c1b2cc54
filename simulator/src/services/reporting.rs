//! Reporting service for yearly summaries over a generated series
//! Provides extremes, cumulative rain, monthly means, column statistics and
//! production forecasts per calendar year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;
use shared::{
    validate_bottle_price, EnvironmentalSeries, ProductionForecast, WeatherColumn, YieldResult,
};

use crate::error::{SimResult, SimulationError};
use crate::services::streak::StreakAnalyzer;
use crate::services::yield_estimator::{YieldEstimator, YIELD_WINDOW_DAYS};

/// Reporting service
pub struct ReportingService;

/// Which end of a column to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extreme {
    Max,
    Min,
}

/// Days on which a column reaches its extreme value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeDays {
    pub column: WeatherColumn,
    pub extreme: Extreme,
    pub value: f64,
    pub dates: Vec<NaiveDate>,
}

/// Running rain total within a calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeRain {
    pub date: NaiveDate,
    pub cumulative_mm: f64,
}

/// Mean of a column for one month of one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: u32,
    pub mean: f64,
}

/// Descriptive statistics of a column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: WeatherColumn,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, absent for a single value
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Longest run of a column value, located in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakSummary {
    pub column: WeatherColumn,
    pub target: f64,
    pub length: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Yield and bottling forecast for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyProduction {
    pub year: i32,
    pub yield_result: YieldResult,
    pub forecast: ProductionForecast,
}

/// Parameters of a full report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub field_size_hectares: u32,
    pub bottles_per_kg: f64,
    pub bottle_price_eur: f64,
    pub streak_column: WeatherColumn,
    pub streak_targets: Vec<f64>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            field_size_hectares: crate::services::yield_estimator::DEFAULT_FIELD_SIZE_HECTARES,
            bottles_per_kg: ProductionForecast::DEFAULT_BOTTLES_PER_KG,
            bottle_price_eur: ProductionForecast::DEFAULT_BOTTLE_PRICE_EUR,
            streak_column: WeatherColumn::CloudCoverage,
            streak_targets: vec![100.0, 0.0],
        }
    }
}

/// Everything the dashboard displays for one generated series
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: usize,
    pub years: Vec<i32>,
    /// Estimate over the trailing 365 days; absent for shorter series
    pub yield_result: Option<YieldResult>,
    pub forecast: Option<ProductionForecast>,
    pub yearly_production: Vec<YearlyProduction>,
    pub hottest_days: Option<ExtremeDays>,
    pub coldest_days: Option<ExtremeDays>,
    pub overcast_share: Option<f64>,
    pub streaks: Vec<StreakSummary>,
    pub summaries: Vec<ColumnSummary>,
}

impl ReportingService {
    /// Calendar years present in the series, ascending
    pub fn available_years(series: &EnvironmentalSeries) -> Vec<i32> {
        series.years()
    }

    /// Keep only the given year, or the whole series for `None`
    pub fn filter_by_year(series: &EnvironmentalSeries, year: Option<i32>) -> EnvironmentalSeries {
        match year {
            Some(year) => series.for_year(year),
            None => series.clone(),
        }
    }

    /// Value and dates of the maximum or minimum of a column
    pub fn extreme_days(
        series: &EnvironmentalSeries,
        column: WeatherColumn,
        extreme: Extreme,
    ) -> Option<ExtremeDays> {
        let values = series.column(column);
        let value = match extreme {
            Extreme::Max => values.iter().copied().reduce(f64::max)?,
            Extreme::Min => values.iter().copied().reduce(f64::min)?,
        };

        let dates = series
            .iter()
            .filter(|r| r.value(column) == value)
            .map(|r| r.date)
            .collect();

        Some(ExtremeDays {
            column,
            extreme,
            value,
            dates,
        })
    }

    /// Per-day running rain total, restarting every January 1st
    pub fn cumulative_rain_by_year(series: &EnvironmentalSeries) -> Vec<CumulativeRain> {
        let mut current_year = None;
        let mut total = 0.0;

        series
            .iter()
            .map(|record| {
                if current_year != Some(record.date.year()) {
                    current_year = Some(record.date.year());
                    total = 0.0;
                }
                total += record.rain_mm;
                CumulativeRain {
                    date: record.date,
                    cumulative_mm: total,
                }
            })
            .collect()
    }

    /// Column mean per (year, month), chronologically ordered
    pub fn monthly_means(series: &EnvironmentalSeries, column: WeatherColumn) -> Vec<MonthlyMean> {
        let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
        for record in series {
            let entry = buckets
                .entry((record.date.year(), record.date.month()))
                .or_insert((0.0, 0));
            entry.0 += record.value(column);
            entry.1 += 1;
        }

        buckets
            .into_iter()
            .map(|((year, month), (sum, count))| MonthlyMean {
                year,
                month,
                mean: sum / count as f64,
            })
            .collect()
    }

    /// Fraction of days that are fully overcast
    pub fn overcast_share(series: &EnvironmentalSeries) -> Option<f64> {
        if series.is_empty() {
            return None;
        }
        let overcast = series.iter().filter(|r| r.cloud_coverage == 100.0).count();
        Some(overcast as f64 / series.len() as f64)
    }

    /// Count, mean, spread and quartiles of a column
    pub fn describe(series: &EnvironmentalSeries, column: WeatherColumn) -> Option<ColumnSummary> {
        let mut values = series.column(column);
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(ColumnSummary {
            column,
            count,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            p75: quantile(&values, 0.75),
            max: values[count - 1],
        })
    }

    /// Where the longest run of `target` lies in a column
    pub fn streak_summary(
        series: &EnvironmentalSeries,
        column: WeatherColumn,
        target: f64,
    ) -> StreakSummary {
        let streak = StreakAnalyzer::longest_streak(series, column, target);
        let records = series.records();
        StreakSummary {
            column,
            target,
            length: streak.length,
            start_date: streak.indices.first().map(|&i| records[i].date),
            end_date: streak.indices.last().map(|&i| records[i].date),
        }
    }

    /// Yield and bottling forecast from a yield estimate
    pub fn forecast_production(
        result: &YieldResult,
        bottles_per_kg: f64,
        bottle_price_eur: f64,
    ) -> SimResult<ProductionForecast> {
        check_bottling(bottles_per_kg, bottle_price_eur)?;
        Ok(ProductionForecast::from_yield(
            result,
            bottles_per_kg,
            bottle_price_eur,
        ))
    }

    /// Yield estimate for each complete calendar year of the series.
    ///
    /// Years shorter than the estimation window are skipped.
    pub fn yearly_production<R: Rng>(
        series: &EnvironmentalSeries,
        estimator: &YieldEstimator,
        bottles_per_kg: f64,
        bottle_price_eur: f64,
        rng: &mut R,
    ) -> SimResult<Vec<YearlyProduction>> {
        let mut production = Vec::new();

        for year in series.years() {
            let year_series = series.for_year(year);
            if year_series.len() < YIELD_WINDOW_DAYS {
                tracing::warn!(
                    "Skipping {}: only {} days, {} required for a yield estimate",
                    year,
                    year_series.len(),
                    YIELD_WINDOW_DAYS
                );
                continue;
            }

            let yield_result = estimator.simulate(&year_series, rng)?;
            let forecast =
                Self::forecast_production(&yield_result, bottles_per_kg, bottle_price_eur)?;
            production.push(YearlyProduction {
                year,
                yield_result,
                forecast,
            });
        }

        Ok(production)
    }

    /// Build the full report for a series
    pub fn build_report<R: Rng>(
        series: &EnvironmentalSeries,
        settings: &ReportSettings,
        rng: &mut R,
    ) -> SimResult<SimulationReport> {
        let estimator = YieldEstimator::new(settings.field_size_hectares)?;
        check_bottling(settings.bottles_per_kg, settings.bottle_price_eur)?;

        let yield_result = match estimator.simulate(series, rng) {
            Ok(result) => Some(result),
            Err(SimulationError::InsufficientData {
                required,
                available,
            }) => {
                tracing::warn!(
                    "Skipping yield estimate: only {} days, {} required",
                    available,
                    required
                );
                None
            }
            Err(e) => return Err(e),
        };
        let forecast = yield_result
            .as_ref()
            .map(|result| {
                Self::forecast_production(
                    result,
                    settings.bottles_per_kg,
                    settings.bottle_price_eur,
                )
            })
            .transpose()?;
        let yearly_production = Self::yearly_production(
            series,
            &estimator,
            settings.bottles_per_kg,
            settings.bottle_price_eur,
            rng,
        )?;

        let streaks = settings
            .streak_targets
            .iter()
            .map(|&target| Self::streak_summary(series, settings.streak_column, target))
            .collect();
        let summaries = WeatherColumn::ALL
            .into_iter()
            .filter_map(|column| Self::describe(series, column))
            .collect();

        match &yield_result {
            Some(result) => tracing::info!(
                "Report built: {} days, adjusted yield {:.0} kg",
                series.len(),
                result.adjusted_yield_kg
            ),
            None => tracing::info!("Report built: {} days, no yield estimate", series.len()),
        }

        Ok(SimulationReport {
            start_date: series.first_date(),
            end_date: series.last_date(),
            days: series.len(),
            years: Self::available_years(series),
            yield_result,
            forecast,
            yearly_production,
            hottest_days: Self::extreme_days(series, WeatherColumn::Temperature, Extreme::Max),
            coldest_days: Self::extreme_days(series, WeatherColumn::Temperature, Extreme::Min),
            overcast_share: Self::overcast_share(series),
            streaks,
            summaries,
        })
    }
}

fn check_bottling(bottles_per_kg: f64, bottle_price_eur: f64) -> SimResult<()> {
    validate_bottle_price(bottle_price_eur)
        .map_err(|msg| SimulationError::invalid_parameter("bottle_price_eur", msg))?;
    if !bottles_per_kg.is_finite() || bottles_per_kg <= 0.0 {
        return Err(SimulationError::invalid_parameter(
            "bottles_per_kg",
            "Bottles per kilogram must be positive",
        ));
    }
    Ok(())
}

/// Linear-interpolated quantile of ascending `sorted` values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DailyRecord;

    fn series_from(start: NaiveDate, temps: &[f64], rains: &[f64]) -> EnvironmentalSeries {
        let records = start
            .iter_days()
            .zip(temps.iter().zip(rains))
            .map(|(date, (&temperature, &rain_mm))| DailyRecord {
                date,
                temperature,
                sun_hours: 10.0,
                rain_mm,
                cloud_coverage: if rain_mm > 0.0 { 100.0 } else { 30.0 },
                humidity: 70.0,
                growing_condition: None,
            })
            .collect();
        EnvironmentalSeries::new(records).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extreme_days_lists_all_ties() {
        let series = series_from(day(2025, 1, 1), &[10.0, 25.0, 7.0, 25.0], &[0.0; 4]);
        let hottest =
            ReportingService::extreme_days(&series, WeatherColumn::Temperature, Extreme::Max)
                .unwrap();
        assert_eq!(hottest.value, 25.0);
        assert_eq!(hottest.dates, vec![day(2025, 1, 2), day(2025, 1, 4)]);

        let coldest =
            ReportingService::extreme_days(&series, WeatherColumn::Temperature, Extreme::Min)
                .unwrap();
        assert_eq!(coldest.dates, vec![day(2025, 1, 3)]);
    }

    #[test]
    fn test_cumulative_rain_resets_each_year() {
        let series = series_from(day(2024, 12, 30), &[10.0; 4], &[2.0, 3.0, 4.0, 0.0]);
        let totals: Vec<f64> = ReportingService::cumulative_rain_by_year(&series)
            .into_iter()
            .map(|c| c.cumulative_mm)
            .collect();
        assert_eq!(totals, vec![2.0, 5.0, 4.0, 4.0]);
    }

    #[test]
    fn test_monthly_means() {
        let series = series_from(day(2025, 1, 30), &[10.0, 20.0, 6.0], &[0.0; 3]);
        let means = ReportingService::monthly_means(&series, WeatherColumn::Temperature);
        assert_eq!(
            means,
            vec![
                MonthlyMean { year: 2025, month: 1, mean: 15.0 },
                MonthlyMean { year: 2025, month: 2, mean: 6.0 },
            ]
        );
    }

    #[test]
    fn test_overcast_share() {
        let series = series_from(day(2025, 1, 1), &[10.0; 4], &[0.0, 2.0, 0.0, 5.0]);
        assert_eq!(ReportingService::overcast_share(&series), Some(0.5));
        assert_eq!(
            ReportingService::overcast_share(&EnvironmentalSeries::default()),
            None
        );
    }

    #[test]
    fn test_describe_matches_linear_quartiles() {
        let series = series_from(day(2025, 1, 1), &[4.0, 1.0, 3.0, 2.0], &[0.0; 4]);
        let summary = ReportingService::describe(&series, WeatherColumn::Temperature).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.p25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.p75, 3.25);
        assert_eq!(summary.max, 4.0);
        let std = summary.std.unwrap();
        assert!((std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_single_value_has_no_std() {
        let series = series_from(day(2025, 1, 1), &[4.0], &[0.0]);
        let summary = ReportingService::describe(&series, WeatherColumn::Temperature).unwrap();
        assert_eq!(summary.std, None);
        assert_eq!(summary.median, 4.0);
    }

    #[test]
    fn test_streak_summary_dates() {
        let series = series_from(day(2025, 5, 1), &[10.0; 5], &[0.0, 3.0, 4.0, 0.0, 1.0]);
        let summary =
            ReportingService::streak_summary(&series, WeatherColumn::CloudCoverage, 100.0);
        assert_eq!(summary.length, 2);
        assert_eq!(summary.start_date, Some(day(2025, 5, 2)));
        assert_eq!(summary.end_date, Some(day(2025, 5, 3)));
    }

    #[test]
    fn test_filter_by_year() {
        let series = series_from(day(2024, 12, 30), &[10.0; 4], &[0.0; 4]);
        assert_eq!(ReportingService::available_years(&series), vec![2024, 2025]);
        assert_eq!(ReportingService::filter_by_year(&series, Some(2025)).len(), 2);
        assert_eq!(ReportingService::filter_by_year(&series, None).len(), 4);
        assert!(ReportingService::filter_by_year(&series, Some(2030)).is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = YieldResult {
            baseline_yield_kg: 1_000.0,
            adjusted_yield_kg: 900.0,
            adjustment_factor: 0.9,
            avg_temperature: 20.0,
            avg_rainfall_mm: 650.0,
            avg_sun_hours: 11.0,
            avg_humidity: 70.0,
        };
        assert!(ReportingService::forecast_production(&result, 0.93, -1.0).is_err());
        assert!(ReportingService::forecast_production(&result, 0.0, 5.0).is_err());
        assert!(ReportingService::forecast_production(&result, 0.93, 5.0).is_ok());
    }
}
