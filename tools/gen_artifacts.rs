//! Demo Artifact Generator
//!
//! Writes a `scaler.json` / `model.json` pair using published fitted values
//! for the California housing dataset, so the full-bundle pipeline can be
//! exercised without any external training tooling.

use anyhow::{Context, Result};
use housing_predictor::models::artifact::{Model, Scaler};
use std::fs;
use std::path::Path;
use tracing::info;

/// Per-feature means of the standardization scaler, in feature order.
const FITTED_MEAN: [f64; 8] = [
    3.8707,    // MedInc
    28.6395,   // HouseAge
    5.4290,    // AveRooms
    1.0967,    // AveBedrms
    1425.4767, // Population
    3.0707,    // AveOccup
    35.6319,   // Latitude
    -119.5697, // Longitude
];

/// Per-feature scale divisors (standard deviations), in feature order.
const FITTED_SCALE: [f64; 8] = [
    1.8998,    // MedInc
    12.5853,   // HouseAge
    2.4742,    // AveRooms
    0.4739,    // AveBedrms
    1132.4621, // Population
    10.3860,   // AveOccup
    2.1360,    // Latitude
    2.0035,    // Longitude
];

/// Linear regression coefficients on standardized features.
const FITTED_COEFFICIENTS: [f64; 8] = [
    0.8296,  // MedInc
    0.1188,  // HouseAge
    -0.2654, // AveRooms
    0.3057,  // AveBedrms
    -0.0045, // Population
    -0.0393, // AveOccup
    -0.8999, // Latitude
    -0.8705, // Longitude
];

/// Linear regression intercept (mean target, in units of $100,000).
const FITTED_INTERCEPT: f64 = 2.0686;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let out_dir = Path::new(&out_dir);

    let scaler = Scaler {
        mean: FITTED_MEAN.to_vec(),
        scale: FITTED_SCALE.to_vec(),
    };
    let model = Model::Linear {
        coefficients: FITTED_COEFFICIENTS.to_vec(),
        intercept: FITTED_INTERCEPT,
    };

    let scaler_path = out_dir.join("scaler.json");
    let model_path = out_dir.join("model.json");

    fs::write(
        &scaler_path,
        serde_json::to_vec_pretty(&scaler).context("Failed to serialize scaler")?,
    )
    .with_context(|| format!("Failed to write {}", scaler_path.display()))?;
    fs::write(
        &model_path,
        serde_json::to_vec_pretty(&model).context("Failed to serialize model")?,
    )
    .with_context(|| format!("Failed to write {}", model_path.display()))?;

    info!(
        scaler = %scaler_path.display(),
        model = %model_path.display(),
        "Demo artifacts written"
    );

    Ok(())
}
