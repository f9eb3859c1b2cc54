//! Daily weather models

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::GrowingCondition;

/// Weather observed (or simulated) for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Air temperature in °C
    pub temperature: f64,
    /// Hours of direct sunshine
    pub sun_hours: f64,
    /// Precipitation in millimeters; either 0 or at least 1
    pub rain_mm: f64,
    /// Cloud coverage in percent
    pub cloud_coverage: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growing_condition: Option<GrowingCondition>,
}

impl DailyRecord {
    /// Read one numeric column of this record
    pub fn value(&self, column: WeatherColumn) -> f64 {
        match column {
            WeatherColumn::Temperature => self.temperature,
            WeatherColumn::SunHours => self.sun_hours,
            WeatherColumn::RainMm => self.rain_mm,
            WeatherColumn::CloudCoverage => self.cloud_coverage,
            WeatherColumn::Humidity => self.humidity,
        }
    }

    pub fn is_rain_day(&self) -> bool {
        self.rain_mm > 0.0
    }
}

/// Numeric columns of a daily weather series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherColumn {
    Temperature,
    SunHours,
    RainMm,
    CloudCoverage,
    Humidity,
}

impl WeatherColumn {
    pub const ALL: [WeatherColumn; 5] = [
        WeatherColumn::Temperature,
        WeatherColumn::SunHours,
        WeatherColumn::RainMm,
        WeatherColumn::CloudCoverage,
        WeatherColumn::Humidity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeatherColumn::Temperature => "temperature",
            WeatherColumn::SunHours => "sun_hours",
            WeatherColumn::RainMm => "rain_mm",
            WeatherColumn::CloudCoverage => "cloud_coverage",
            WeatherColumn::Humidity => "humidity",
        }
    }
}

impl std::fmt::Display for WeatherColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for WeatherColumn {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherColumn::ALL
            .into_iter()
            .find(|column| column.name() == s)
            .ok_or_else(|| SeriesError::UnknownColumn(s.to_string()))
    }
}

/// Errors raised when assembling a series from loose records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Records out of order: {previous} is followed by {next}")]
    OutOfOrder { previous: NaiveDate, next: NaiveDate },

    #[error("Duplicate record for {0}")]
    DuplicateDate(NaiveDate),

    #[error("Missing days between {previous} and {next}")]
    Gap { previous: NaiveDate, next: NaiveDate },

    #[error("Unknown weather column: {0}")]
    UnknownColumn(String),
}

/// A gap-free daily weather series ordered by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DailyRecord>", into = "Vec<DailyRecord>")]
pub struct EnvironmentalSeries {
    records: Vec<DailyRecord>,
}

impl EnvironmentalSeries {
    /// Build a series, checking that dates are strictly consecutive days
    pub fn new(records: Vec<DailyRecord>) -> Result<Self, SeriesError> {
        for pair in records.windows(2) {
            let (previous, next) = (pair[0].date, pair[1].date);
            if next == previous {
                return Err(SeriesError::DuplicateDate(next));
            }
            if next < previous {
                return Err(SeriesError::OutOfOrder { previous, next });
            }
            if previous.succ_opt() != Some(next) {
                return Err(SeriesError::Gap { previous, next });
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DailyRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.records.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Values of one column, in date order
    pub fn column(&self, column: WeatherColumn) -> Vec<f64> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// The most recent `days` records (all of them if the series is shorter)
    pub fn trailing(&self, days: usize) -> &[DailyRecord] {
        let start = self.records.len().saturating_sub(days);
        &self.records[start..]
    }

    /// Distinct calendar years covered, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.date.year()).collect();
        years.dedup();
        years
    }

    /// Sub-series restricted to one calendar year
    pub fn for_year(&self, year: i32) -> EnvironmentalSeries {
        EnvironmentalSeries {
            records: self
                .records
                .iter()
                .filter(|r| r.date.year() == year)
                .cloned()
                .collect(),
        }
    }
}

impl TryFrom<Vec<DailyRecord>> for EnvironmentalSeries {
    type Error = SeriesError;

    fn try_from(records: Vec<DailyRecord>) -> Result<Self, Self::Error> {
        EnvironmentalSeries::new(records)
    }
}

impl From<EnvironmentalSeries> for Vec<DailyRecord> {
    fn from(series: EnvironmentalSeries) -> Self {
        series.records
    }
}

impl<'a> IntoIterator for &'a EnvironmentalSeries {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
