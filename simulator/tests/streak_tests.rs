//! Streak analysis integration tests
//!
//! Tests for longest runs including:
//! - Tie breaking on the earliest run
//! - Runs touching the end of the sequence
//! - Agreement with a brute-force scan

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{DailyRecord, EnvironmentalSeries, WeatherColumn};
use vineyard_simulator::StreakAnalyzer;

fn series_with_clouds(clouds: &[f64]) -> EnvironmentalSeries {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let records = start
        .iter_days()
        .zip(clouds)
        .map(|(date, &cloud_coverage)| DailyRecord {
            date,
            temperature: 15.0,
            sun_hours: 8.0,
            rain_mm: 0.0,
            cloud_coverage,
            humidity: 60.0,
            growing_condition: None,
        })
        .collect();
    EnvironmentalSeries::new(records).unwrap()
}

/// Longest run by checking every start position
fn brute_force(values: &[u8], target: u8) -> (usize, Option<usize>) {
    let mut best = (0, None);
    for start in 0..values.len() {
        let len = values[start..].iter().take_while(|&&v| v == target).count();
        if len > best.0 {
            best = (len, Some(start));
        }
    }
    best
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test the first of two runs wins over a shorter later run
    #[test]
    fn test_longest_overcast_run() {
        let series = series_with_clouds(&[0.0, 100.0, 100.0, 100.0, 0.0, 100.0, 100.0]);
        let streak = StreakAnalyzer::longest_streak(&series, WeatherColumn::CloudCoverage, 100.0);
        assert_eq!(streak.length, 3);
        assert_eq!(streak.indices, vec![1, 2, 3]);
        assert_eq!(streak.start(), Some(1));
    }

    /// Test a run ending at the last element is counted
    #[test]
    fn test_run_at_end() {
        let streak = StreakAnalyzer::longest_run(&[1, 0, 0, 1, 1, 1], &1);
        assert_eq!(streak.indices, vec![3, 4, 5]);
    }

    /// Test the whole sequence as one run
    #[test]
    fn test_all_match() {
        let streak = StreakAnalyzer::longest_run(&[5, 5, 5], &5);
        assert_eq!(streak.length, 3);
        assert_eq!(streak.indices, vec![0, 1, 2]);
    }

    /// Test equal-length runs keep the earliest
    #[test]
    fn test_tie_keeps_first() {
        let streak = StreakAnalyzer::longest_run(&[7, 7, 0, 7, 7], &7);
        assert_eq!(streak.indices, vec![0, 1]);
    }

    /// Test absent target and empty input
    #[test]
    fn test_no_match() {
        let streak = StreakAnalyzer::longest_run(&[1, 2, 3], &9);
        assert!(streak.is_empty());
        assert_eq!(streak.length, 0);
        assert_eq!(streak.start(), None);

        let empty: [i32; 0] = [];
        assert!(StreakAnalyzer::longest_run(&empty, &1).is_empty());
    }

    /// Test strings compare by equality
    #[test]
    fn test_string_values() {
        let values = ["Growing", "Optimal", "Optimal", "Stress"];
        let streak = StreakAnalyzer::longest_run(&values, &"Optimal");
        assert_eq!(streak.indices, vec![1, 2]);
    }

    /// Test clear-sky streaks on the same column
    #[test]
    fn test_clear_sky_run() {
        let series = series_with_clouds(&[0.0, 0.0, 40.0, 0.0, 0.0, 0.0, 100.0]);
        let streak = StreakAnalyzer::longest_streak(&series, WeatherColumn::CloudCoverage, 0.0);
        assert_eq!(streak.indices, vec![3, 4, 5]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Length and start agree with a brute-force scan
        #[test]
        fn prop_matches_brute_force(
            values in prop::collection::vec(0u8..3, 0..60),
            target in 0u8..3
        ) {
            let streak = StreakAnalyzer::longest_run(&values, &target);
            let (length, start) = brute_force(&values, target);

            prop_assert_eq!(streak.length, length);
            prop_assert_eq!(streak.start(), start);
        }

        /// Indices are consecutive and all hold the target
        #[test]
        fn prop_indices_are_a_run(
            values in prop::collection::vec(0u8..2, 0..60),
            target in 0u8..2
        ) {
            let streak = StreakAnalyzer::longest_run(&values, &target);

            prop_assert_eq!(streak.length, streak.indices.len());
            for pair in streak.indices.windows(2) {
                prop_assert_eq!(pair[0] + 1, pair[1]);
            }
            for &i in &streak.indices {
                prop_assert_eq!(values[i], target);
            }
        }
    }
}
