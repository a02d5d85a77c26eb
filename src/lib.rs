//! Housing Price Prediction Pipeline Library
//!
//! Applies a pre-fitted feature scaler and a pre-trained regression model
//! to California census block-group features, producing a price estimate
//! and a per-feature contribution breakdown.

pub mod config;
pub mod metrics;
pub mod models;
pub mod types;

pub use config::AppConfig;
pub use metrics::SessionMetrics;
pub use models::attribution::AttributionEngine;
pub use models::inference::InferenceEngine;
pub use types::{features::FeatureVector, prediction::PredictionReport};
