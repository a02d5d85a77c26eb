//! Prediction report and attribution data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The model's target variable is expressed in units of $100,000.
pub const RAW_UNIT_USD: f64 = 100_000.0;

/// How a contribution breakdown was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMethod {
    /// Exact decomposition of a linear model: weight times scaled value.
    Coefficients,
    /// Fixed heuristic weights times scaled values. An approximation for
    /// models that expose no coefficients, not a faithful explanation.
    FixedWeights,
    /// Partial two-feature breakdown produced alongside mock predictions.
    Mock,
}

/// Signed contribution of a single feature to the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    /// Canonical feature name
    pub feature: String,
    /// Contribution score, rounded to 3 decimal places
    pub contribution: f64,
}

/// Ordered per-feature contribution breakdown.
///
/// Entries follow the feature vector order. Full breakdowns carry all 8
/// features; the mock path carries only MedInc and HouseAge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Computation path that produced the scores
    pub method: AttributionMethod,
    /// Per-feature scores, in feature order
    pub contributions: Vec<FeatureContribution>,
}

impl Attribution {
    /// Create a breakdown from (name, score) pairs, preserving order.
    pub fn new(method: AttributionMethod, scores: Vec<(&str, f64)>) -> Self {
        Self {
            method,
            contributions: scores
                .into_iter()
                .map(|(feature, contribution)| FeatureContribution {
                    feature: feature.to_string(),
                    contribution,
                })
                .collect(),
        }
    }

    /// Sum of all contribution scores.
    pub fn total(&self) -> f64 {
        self.contributions.iter().map(|c| c.contribution).sum()
    }
}

/// Price estimate reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Unique report identifier
    pub prediction_id: String,

    /// Estimated price
    pub price: f64,

    /// Currency of the estimate
    pub unit: String,

    /// True when the estimate came from the fixed fallback formula rather
    /// than the trained model; callers should frame such results as mock.
    pub mock: bool,

    /// Report generation timestamp
    pub timestamp: DateTime<Utc>,

    /// Per-feature contribution breakdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
}

impl PredictionReport {
    /// Create a new report for a USD price estimate.
    pub fn new(price: f64, mock: bool) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            price,
            unit: "USD".to_string(),
            mock,
            timestamp: Utc::now(),
            attribution: None,
        }
    }

    /// Attach a contribution breakdown to the report.
    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = Some(attribution);
        self
    }
}
