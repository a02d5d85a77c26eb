//! Inference engine for housing price estimation

use crate::models::artifact::{ArtifactBundle, ModelError};
use crate::types::features::FeatureVector;
use crate::types::prediction::RAW_UNIT_USD;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Weight on median income in the mock fallback formula.
pub const MOCK_INCOME_WEIGHT: f64 = 0.4;

/// Weight on house age in the mock fallback formula.
pub const MOCK_AGE_WEIGHT: f64 = 0.01;

/// Error raised when the scaler or model rejects a request.
///
/// The two variants keep transform failures distinguishable from predict
/// failures. Neither ends the session; the engine stays usable.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("feature scaling failed: {0}")]
    Scale(#[source] ModelError),

    #[error("model prediction failed: {0}")]
    Predict(#[source] ModelError),
}

/// Outcome of one prediction.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Raw model output, in units of $100,000
    pub raw: f64,
    /// Estimated price in USD
    pub price_usd: f64,
    /// True when produced by the fallback formula instead of the model
    pub mock: bool,
    /// Scaled feature vector, absent on the mock path
    pub scaled: Option<Vec<f64>>,
}

/// Applies the fitted scaler and trained model to one feature vector.
///
/// Holds the immutable artifact bundle injected at startup; without a
/// bundle the engine produces deterministic mock estimates instead.
pub struct InferenceEngine {
    bundle: Option<Arc<ArtifactBundle>>,
}

impl InferenceEngine {
    /// Create an engine over an injected artifact bundle, or over none for
    /// mock mode.
    pub fn new(bundle: Option<Arc<ArtifactBundle>>) -> Self {
        Self { bundle }
    }

    /// Whether predictions come from the fallback formula.
    pub fn is_mock(&self) -> bool {
        self.bundle.is_none()
    }

    /// Estimate the price for one block group.
    ///
    /// Values outside the advisory feature ranges are passed through
    /// unchanged; range enforcement belongs to the caller.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        match &self.bundle {
            Some(bundle) => {
                let scaled = bundle
                    .scaler
                    .transform(&features.as_array())
                    .map_err(PredictionError::Scale)?;
                let raw = bundle
                    .model
                    .predict(&scaled)
                    .map_err(PredictionError::Predict)?;
                let price_usd = raw * RAW_UNIT_USD;

                debug!(raw, price_usd, "Prediction complete");

                Ok(Prediction {
                    raw,
                    price_usd,
                    mock: false,
                    scaled: Some(scaled),
                })
            }
            None => {
                // Deterministic placeholder over two features only; must
                // stay exactly reproducible across sessions.
                let raw =
                    features.med_inc * MOCK_INCOME_WEIGHT + features.house_age * MOCK_AGE_WEIGHT;
                let price_usd = raw * RAW_UNIT_USD;

                debug!(raw, price_usd, "Mock prediction");

                Ok(Prediction {
                    raw,
                    price_usd,
                    mock: true,
                    scaled: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::artifact::{Model, Scaler};
    use crate::types::features::FEATURE_COUNT;

    fn identity_bundle(model: Model) -> Option<Arc<ArtifactBundle>> {
        Some(Arc::new(ArtifactBundle {
            scaler: Scaler {
                mean: vec![0.0; FEATURE_COUNT],
                scale: vec![1.0; FEATURE_COUNT],
            },
            model,
        }))
    }

    #[test]
    fn test_mock_prediction_reference_value() {
        let engine = InferenceEngine::new(None);
        let features = FeatureVector {
            med_inc: 3.5,
            house_age: 20.0,
            ..FeatureVector::default()
        };

        let prediction = engine.predict(&features).unwrap();

        // (3.5 * 0.4 + 20 * 0.01) * 100000
        assert_eq!(prediction.price_usd, 160_000.0);
        assert!(prediction.mock);
        assert!(prediction.scaled.is_none());
    }

    #[test]
    fn test_mock_prediction_is_deterministic() {
        let engine = InferenceEngine::new(None);
        let features = FeatureVector::default();

        let first = engine.predict(&features).unwrap();
        let second = engine.predict(&features).unwrap();

        assert_eq!(first.price_usd, second.price_usd);
        assert_eq!(first.raw, second.raw);
    }

    #[test]
    fn test_linear_prediction_with_identity_scaler() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 0.5; // MedInc only
        let engine = InferenceEngine::new(identity_bundle(Model::Linear {
            coefficients,
            intercept: 1.0,
        }));

        let features = FeatureVector {
            med_inc: 2.0,
            ..FeatureVector::default()
        };
        let prediction = engine.predict(&features).unwrap();

        // raw = 0.5 * 2.0 + 1.0 = 2.0 -> $200,000
        assert_eq!(prediction.raw, 2.0);
        assert_eq!(prediction.price_usd, 200_000.0);
        assert!(!prediction.mock);
        assert_eq!(prediction.scaled.as_ref().unwrap().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let engine = InferenceEngine::new(None);
        let features = FeatureVector {
            latitude: 90.0, // far outside the advisory range
            ..FeatureVector::default()
        };

        let prediction = engine.predict(&features).unwrap();
        assert!(prediction.price_usd.is_finite());
    }

    #[test]
    fn test_shape_mismatch_is_scale_error() {
        let bundle = Some(Arc::new(ArtifactBundle {
            scaler: Scaler {
                mean: vec![0.0; 3],
                scale: vec![1.0; 3],
            },
            model: Model::Linear {
                coefficients: vec![0.0; 3],
                intercept: 0.0,
            },
        }));
        let engine = InferenceEngine::new(bundle);

        let err = engine.predict(&FeatureVector::default()).unwrap_err();
        assert!(matches!(err, PredictionError::Scale(_)));
    }

    #[test]
    fn test_wrong_model_dimension_is_predict_error() {
        let engine = InferenceEngine::new(identity_bundle(Model::Linear {
            coefficients: vec![0.0; 3],
            intercept: 0.0,
        }));

        let err = engine.predict(&FeatureVector::default()).unwrap_err();
        assert!(matches!(err, PredictionError::Predict(_)));
    }

    #[test]
    fn test_engine_usable_after_failure() {
        let engine = InferenceEngine::new(identity_bundle(Model::Linear {
            coefficients: vec![0.0; 3],
            intercept: 0.0,
        }));
        assert!(engine.predict(&FeatureVector::default()).is_err());

        // A failed request must not poison the session; a fresh mock
        // engine over the same inputs still answers.
        let fallback = InferenceEngine::new(None);
        assert!(fallback.predict(&FeatureVector::default()).is_ok());
        assert!(engine.predict(&FeatureVector::default()).is_err());
    }
}
