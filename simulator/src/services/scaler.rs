//! Linear min-max rescaling

use crate::error::{SimResult, SimulationError};

/// Map `values` affinely from their observed `[min, max]` onto
/// `[desired_min, desired_max]`.
///
/// Fails when either range has zero spread. An empty slice rescales to an
/// empty vector.
pub fn rescale(values: &[f64], desired_min: f64, desired_max: f64) -> SimResult<Vec<f64>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    if desired_max == desired_min {
        return Err(SimulationError::DegenerateRange {
            min: desired_min,
            max: desired_max,
        });
    }

    let (current_min, current_max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if current_max == current_min {
        return Err(SimulationError::DegenerateRange {
            min: current_min,
            max: current_max,
        });
    }

    let target_span = desired_max - desired_min;
    let current_span = current_max - current_min;
    Ok(values
        .iter()
        .map(|v| (v - current_min) * target_span / current_span + desired_min)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_maps_extremes_to_bounds() {
        let scaled = rescale(&[2.0, 4.0, 6.0], 6.0, 28.0).unwrap();
        assert_eq!(scaled, vec![6.0, 17.0, 28.0]);
    }

    #[test]
    fn test_rescale_identity() {
        let values = [3.5, -1.25, 10.0, 7.75];
        let scaled = rescale(&values, -1.25, 10.0).unwrap();
        for (a, b) in values.iter().zip(&scaled) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rescale_constant_input_fails() {
        assert!(matches!(
            rescale(&[5.0, 5.0, 5.0], 0.0, 1.0),
            Err(SimulationError::DegenerateRange { .. })
        ));
        assert!(rescale(&[5.0], 0.0, 1.0).is_err());
    }

    #[test]
    fn test_rescale_zero_target_spread_fails() {
        assert!(matches!(
            rescale(&[1.0, 2.0], 3.0, 3.0),
            Err(SimulationError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn test_rescale_inverted_target_reverses_order() {
        let scaled = rescale(&[0.0, 1.0], 10.0, 0.0).unwrap();
        assert_eq!(scaled, vec![10.0, 0.0]);
    }

    #[test]
    fn test_rescale_empty() {
        assert!(rescale(&[], 0.0, 1.0).unwrap().is_empty());
    }
}
