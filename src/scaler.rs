//! Feature normalization with training-time scaler parameters
//!
//! Applies the min-max transform fitted when the model was trained. The
//! parameters are loaded once from the scaler artifact and held immutable.

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::features::FeatureVector;

/// Per-feature minimum and maximum fitted at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParameters {
    min: Vec<f32>,
    max: Vec<f32>,
}

impl ScalerParameters {
    /// Create scaler parameters from fitted per-feature bounds.
    pub fn new(min: Vec<f32>, max: Vec<f32>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(ClassifierError::ScalerShape {
                expected: min.len(),
                got: max.len(),
            });
        }
        Ok(Self { min, max })
    }

    /// Passthrough scaler (min 0, max 1 per feature).
    pub fn identity(features: usize) -> Self {
        Self {
            min: vec![0.0; features],
            max: vec![1.0; features],
        }
    }

    /// Number of features the scaler was fitted on.
    pub fn feature_count(&self) -> usize {
        self.min.len()
    }

    /// Fitted minimums.
    pub fn min(&self) -> &[f32] {
        &self.min
    }

    /// Fitted maximums.
    pub fn max(&self) -> &[f32] {
        &self.max
    }

    /// Normalize a feature vector: `x' = (x - min) / (max - min)` per
    /// feature. A degenerate feature (`max == min`) maps to 0.0 rather than
    /// dividing by zero. Inputs outside the fitted range come out below 0 or
    /// above 1; that is expected, not an error.
    pub fn normalize(&self, features: &FeatureVector) -> Result<FeatureVector> {
        if features.len() != self.feature_count() {
            return Err(ClassifierError::ScalerShape {
                expected: self.feature_count(),
                got: features.len(),
            });
        }

        let values = features
            .as_slice()
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .map(|(&value, (&min, &max))| {
                let range = max - min;
                if range > 0.0 {
                    (value - min) / range
                } else {
                    0.0
                }
            })
            .collect();

        Ok(FeatureVector::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_normalization() {
        let scaler = ScalerParameters::new(vec![0.0, 0.0, 10.0], vec![200.0, 100.0, 20.0]).unwrap();
        let input = FeatureVector::from_values(vec![100.0, 50.0, 15.0]);

        let out = scaler.normalize(&input).unwrap();
        assert!((out.as_slice()[0] - 0.5).abs() < 0.001);
        assert!((out.as_slice()[1] - 0.5).abs() < 0.001);
        assert!((out.as_slice()[2] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_fitted_range_maps_into_unit_interval() {
        let scaler = ScalerParameters::new(vec![0.0], vec![255.0]).unwrap();
        for value in [0.0, 64.0, 255.0] {
            let out = scaler
                .normalize(&FeatureVector::from_values(vec![value]))
                .unwrap();
            assert!(out.as_slice()[0] >= 0.0 && out.as_slice()[0] <= 1.0);
        }
    }

    #[test]
    fn test_out_of_range_input_passes_through() {
        let scaler = ScalerParameters::new(vec![0.0], vec![10.0]).unwrap();
        let out = scaler
            .normalize(&FeatureVector::from_values(vec![20.0]))
            .unwrap();
        assert!((out.as_slice()[0] - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_feature_maps_to_zero() {
        let scaler = ScalerParameters::new(vec![5.0], vec![5.0]).unwrap();
        let out = scaler
            .normalize(&FeatureVector::from_values(vec![5.0]))
            .unwrap();
        assert_eq!(out.as_slice()[0], 0.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let scaler = ScalerParameters::identity(28);
        let err = scaler
            .normalize(&FeatureVector::from_values(vec![1.0, 2.0]))
            .unwrap_err();
        match err {
            ClassifierError::ScalerShape { expected, got } => {
                assert_eq!(expected, 28);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mismatched_bounds_rejected() {
        assert!(ScalerParameters::new(vec![0.0, 0.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_identity_is_passthrough() {
        let scaler = ScalerParameters::identity(3);
        let input = FeatureVector::from_values(vec![0.25, 0.5, 0.75]);
        let out = scaler.normalize(&input).unwrap();
        assert_eq!(out.as_slice(), input.as_slice());
    }
}
