//! Type definitions for the housing price pipeline

pub mod features;
pub mod prediction;

pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use prediction::{Attribution, AttributionMethod, FeatureContribution, PredictionReport};
