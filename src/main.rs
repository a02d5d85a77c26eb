//! Housing Price Predictor - Main Entry Point
//!
//! Reads one JSON feature vector per stdin line, runs the prediction
//! pipeline, and writes one JSON report per stdout line. Logs go to stderr.

use anyhow::Result;
use housing_predictor::{
    config::AppConfig,
    metrics::SessionMetrics,
    models::{attribution::AttributionEngine, inference::InferenceEngine, loader},
    types::{features::FeatureVector, prediction::PredictionReport},
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("housing_predictor=info".parse()?),
        )
        .init();

    info!("Starting California housing price predictor");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Configuration not found, using defaults");
            AppConfig::default()
        }
    };
    info!(
        model = %config.artifacts.model_path,
        scaler = %config.artifacts.scaler_path,
        "Configuration loaded"
    );

    // Artifacts are loaded once; the bundle is shared read-only for the
    // rest of the session. Absence and load failure both mean mock mode,
    // but are reported differently.
    let bundle = match loader::load(&config.artifacts.model_path, &config.artifacts.scaler_path) {
        Ok(Some(bundle)) => {
            info!("Model and scaler loaded successfully");
            Some(Arc::new(bundle))
        }
        Ok(None) => {
            warn!("Model or scaler file not found, using mock predictions");
            None
        }
        Err(e) => {
            error!(error = %e, "Failed to load artifacts, using mock predictions");
            None
        }
    };

    let engine = InferenceEngine::new(bundle.clone());
    let explainer = AttributionEngine::new(bundle);
    let metrics = SessionMetrics::new();

    if engine.is_mock() {
        info!("Running in mock mode; results use the fallback formula");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let features: FeatureVector = match serde_json::from_str(&line) {
            Ok(features) => features,
            Err(e) => {
                warn!(error = %e, "Failed to parse feature vector");
                writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({ "error": format!("invalid request: {e}") })
                )?;
                stdout.flush()?;
                continue;
            }
        };

        let out_of_range = features.out_of_range();
        if !out_of_range.is_empty() {
            warn!(features = ?out_of_range, "Feature values outside advisory ranges");
        }

        let start = Instant::now();
        match engine.predict(&features) {
            Ok(prediction) => {
                let attribution = explainer.explain(&features, &prediction);
                let report = PredictionReport::new(prediction.price_usd, prediction.mock)
                    .with_attribution(attribution);

                metrics.record_prediction(start.elapsed(), prediction.price_usd, prediction.mock);
                debug!(
                    prediction_id = %report.prediction_id,
                    price = report.price,
                    mock = report.mock,
                    "Prediction served"
                );
                writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
            }
            Err(e) => {
                // A failed request leaves the session usable; report the
                // error and keep reading.
                metrics.record_failure();
                error!(error = %e, "Prediction failed");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
            }
        }
        stdout.flush()?;
    }

    info!("Session ended");
    metrics.print_summary();

    Ok(())
}
