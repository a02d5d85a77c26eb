//! Per-feature contribution scoring for prediction explanations

use crate::models::artifact::ArtifactBundle;
use crate::models::inference::{Prediction, MOCK_AGE_WEIGHT, MOCK_INCOME_WEIGHT};
use crate::types::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::types::prediction::{Attribution, AttributionMethod};
use std::sync::Arc;

/// Heuristic per-feature weights used when the model exposes no
/// coefficients. Not derived from the fitted model; contributions computed
/// with these are approximations and are tagged as such.
pub const FALLBACK_WEIGHTS: [f64; FEATURE_COUNT] =
    [0.4, 0.01, 0.05, 0.02, 0.005, 0.01, 0.001, 0.001];

/// Computes named contribution scores for one prediction.
///
/// Shares the immutable artifact bundle with the inference engine. Which
/// breakdown gets produced is decided by the model variant, never by
/// probing at runtime.
pub struct AttributionEngine {
    bundle: Option<Arc<ArtifactBundle>>,
}

impl AttributionEngine {
    /// Create an engine over an injected artifact bundle, or over none for
    /// mock mode.
    pub fn new(bundle: Option<Arc<ArtifactBundle>>) -> Self {
        Self { bundle }
    }

    /// Produce the contribution breakdown for a completed prediction.
    ///
    /// With a bundle and a linear model this is the exact decomposition
    /// `coefficient[i] * scaled[i]`: the scores sum to the raw output minus
    /// the intercept. Models without coefficients get [`FALLBACK_WEIGHTS`]
    /// applied to the scaled vector instead. Without a bundle the breakdown
    /// covers only MedInc and HouseAge, weighted like the mock formula and
    /// applied to the raw (unscaled) values.
    ///
    /// All scores are rounded to 3 decimal places. Full breakdowns list all
    /// 8 features in feature-vector order.
    pub fn explain(&self, features: &FeatureVector, prediction: &Prediction) -> Attribution {
        match (&self.bundle, &prediction.scaled) {
            (Some(bundle), Some(scaled)) => match bundle.model.coefficients() {
                Some(coefficients) => Attribution::new(
                    AttributionMethod::Coefficients,
                    FEATURE_NAMES
                        .iter()
                        .zip(coefficients.iter().zip(scaled.iter()))
                        .map(|(name, (coefficient, value))| (*name, round3(coefficient * value)))
                        .collect(),
                ),
                None => Attribution::new(
                    AttributionMethod::FixedWeights,
                    FEATURE_NAMES
                        .iter()
                        .zip(FALLBACK_WEIGHTS.iter().zip(scaled.iter()))
                        .map(|(name, (weight, value))| (*name, round3(weight * value)))
                        .collect(),
                ),
            },
            _ => Attribution::new(
                AttributionMethod::Mock,
                vec![
                    ("MedInc", round3(features.med_inc * MOCK_INCOME_WEIGHT)),
                    ("HouseAge", round3(features.house_age * MOCK_AGE_WEIGHT)),
                ],
            ),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
