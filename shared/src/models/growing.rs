//! Vine growing condition derived from daily temperature

use serde::{Deserialize, Serialize};

/// Growth stage implied by the temperature of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowingCondition {
    #[serde(rename = "Frost Damage")]
    FrostDamage,
    Dormant,
    Growing,
    Optimal,
    Stress,
    Damage,
}

/// Lower bound (inclusive) of each temperature band in °C, ascending.
/// A band extends up to the next band's lower bound (exclusive).
pub const GROWING_CONDITION_BANDS: [(f64, GrowingCondition); 6] = [
    (f64::NEG_INFINITY, GrowingCondition::FrostDamage),
    (-1.0, GrowingCondition::Dormant),
    (10.0, GrowingCondition::Growing),
    (18.0, GrowingCondition::Optimal),
    (34.0, GrowingCondition::Stress),
    (41.0, GrowingCondition::Damage),
];

impl GrowingCondition {
    /// Classify a temperature (°C) into its growing band.
    /// NaN falls into the lowest band.
    pub fn from_temperature(temperature: f64) -> Self {
        GROWING_CONDITION_BANDS
            .iter()
            .rev()
            .find(|(lower, _)| temperature >= *lower)
            .map(|(_, condition)| *condition)
            .unwrap_or(GrowingCondition::FrostDamage)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowingCondition::FrostDamage => "Frost Damage",
            GrowingCondition::Dormant => "Dormant",
            GrowingCondition::Growing => "Growing",
            GrowingCondition::Optimal => "Optimal",
            GrowingCondition::Stress => "Stress",
            GrowingCondition::Damage => "Damage",
        }
    }
}

impl std::fmt::Display for GrowingCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
