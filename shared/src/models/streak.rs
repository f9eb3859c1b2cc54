//! Streak (longest run) models

use serde::{Deserialize, Serialize};

/// First-occurring longest contiguous run of a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub length: usize,
    /// Positions of the run in the scanned sequence, ascending
    pub indices: Vec<usize>,
}

impl StreakResult {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Position of the first element of the run
    pub fn start(&self) -> Option<usize> {
        self.indices.first().copied()
    }
}
