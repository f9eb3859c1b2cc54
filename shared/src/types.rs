//! Common types used across the simulator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range for a generated series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, 0 when `end` precedes `start`
    pub fn days(&self) -> usize {
        let span = (self.end - self.start).num_days() + 1;
        span.max(0) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Output variants of the weather generator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Round each column to its display precision
    pub round_outputs: bool,
    /// Attach a growing condition to every record
    pub include_growing_condition: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            round_outputs: true,
            include_growing_condition: false,
        }
    }
}
