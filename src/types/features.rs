//! Housing block-group feature vector

use serde::{Deserialize, Serialize};

/// Number of input features the scaler and model were fitted on.
pub const FEATURE_COUNT: usize = 8;

/// Canonical feature names, in fitted order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Advisory value ranges per feature, in fitted order.
///
/// Data-entry limits for interactive callers. They are hints only; the
/// pipeline accepts any finite value.
pub const FEATURE_RANGES: [(f64, f64); FEATURE_COUNT] = [
    (0.0, 150.0),      // MedInc
    (1.0, 1000.0),     // HouseAge
    (1.0, 100.0),      // AveRooms
    (1.0, 100.0),      // AveBedrms
    (1.0, 50_000.0),   // Population
    (0.0, 100.0),      // AveOccup
    (32.0, 42.0),      // Latitude
    (-125.0, -114.0),  // Longitude
];

/// One census block group's aggregate features, in the exact order the
/// scaler and model were fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Median income in the block group (tens of thousands of USD)
    #[serde(rename = "MedInc")]
    pub med_inc: f64,

    /// Median house age in the block group (years)
    #[serde(rename = "HouseAge")]
    pub house_age: f64,

    /// Average number of rooms per household
    #[serde(rename = "AveRooms")]
    pub ave_rooms: f64,

    /// Average number of bedrooms per household
    #[serde(rename = "AveBedrms")]
    pub ave_bedrms: f64,

    /// Block group population
    #[serde(rename = "Population")]
    pub population: f64,

    /// Average occupants per household
    #[serde(rename = "AveOccup")]
    pub ave_occup: f64,

    /// Latitude of the block group
    #[serde(rename = "Latitude")]
    pub latitude: f64,

    /// Longitude of the block group
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl FeatureVector {
    /// Return the features as an ordered array matching the fitted layout.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.med_inc,
            self.house_age,
            self.ave_rooms,
            self.ave_bedrms,
            self.population,
            self.ave_occup,
            self.latitude,
            self.longitude,
        ]
    }

    /// Names of features whose values fall outside the advisory ranges.
    ///
    /// Out-of-range values are still accepted by the pipeline; this exists
    /// so callers can warn before predicting.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        self.as_array()
            .iter()
            .zip(FEATURE_RANGES.iter())
            .zip(FEATURE_NAMES.iter())
            .filter(|((value, (min, max)), _)| **value < *min || **value > *max)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for FeatureVector {
    /// A plausible mid-range block group, used as the demo starting point.
    fn default() -> Self {
        Self {
            med_inc: 3.5,
            house_age: 20.0,
            ave_rooms: 5.0,
            ave_bedrms: 1.0,
            population: 1000.0,
            ave_occup: 3.0,
            latitude: 34.0,
            longitude: -118.0,
        }
    }
}
