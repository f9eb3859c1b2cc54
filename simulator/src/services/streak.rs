//! Longest-run analysis over a sequence or a weather column

use shared::{EnvironmentalSeries, StreakResult, WeatherColumn};

/// Finds the longest contiguous run of a value
pub struct StreakAnalyzer;

/// Scan state: best run so far and the run in progress
struct RunState {
    best: Vec<usize>,
    current: Vec<usize>,
}

impl RunState {
    /// Promote the run in progress if strictly longer, then reset it.
    /// Strictness keeps the earliest run on ties.
    fn flush(mut self) -> Self {
        if self.current.len() > self.best.len() {
            self.best = std::mem::take(&mut self.current);
        } else {
            self.current.clear();
        }
        self
    }
}

impl StreakAnalyzer {
    /// Longest run of `target` in `values`, first occurrence on ties.
    /// Returns an empty result when `target` never occurs.
    pub fn longest_run<T: PartialEq>(values: &[T], target: &T) -> StreakResult {
        let initial = RunState {
            best: Vec::new(),
            current: Vec::new(),
        };

        let state = values
            .iter()
            .enumerate()
            .fold(initial, |mut state, (i, value)| {
                if value == target {
                    state.current.push(i);
                    state
                } else {
                    state.flush()
                }
            })
            // a run reaching the end of the sequence is never followed by a mismatch
            .flush();

        StreakResult {
            length: state.best.len(),
            indices: state.best,
        }
    }

    /// Longest run of `target` in one column of a weather series
    pub fn longest_streak(
        series: &EnvironmentalSeries,
        column: WeatherColumn,
        target: f64,
    ) -> StreakResult {
        Self::longest_run(&series.column(column), &target)
    }
}
