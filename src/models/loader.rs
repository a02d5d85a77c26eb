//! Artifact loader for the fitted scaler and trained model

use crate::models::artifact::{ArtifactBundle, Model, Scaler};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Error raised when artifact files exist but cannot be loaded.
///
/// Missing files are not an error; the loader reports them as absence so
/// callers can fall back to mock mode.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the scaler and model artifacts as one atomic bundle.
///
/// Returns `Ok(None)` when either file is missing (demo mode), the loaded
/// bundle when both parse, and a [`LoadError`] when a file exists but
/// cannot be deserialized. Meant to be called once at startup; the caller
/// owns the result for the process lifetime.
pub fn load<P: AsRef<Path>>(
    model_path: P,
    scaler_path: P,
) -> Result<Option<ArtifactBundle>, LoadError> {
    let model_path = model_path.as_ref();
    let scaler_path = scaler_path.as_ref();

    if !model_path.exists() || !scaler_path.exists() {
        info!(
            model = %model_path.display(),
            scaler = %scaler_path.display(),
            "Artifact files not found"
        );
        return Ok(None);
    }

    let model: Model = read_json(model_path)?;
    let scaler: Scaler = read_json(scaler_path)?;

    info!(
        model = %model_path.display(),
        scaler = %scaler_path.display(),
        "Artifacts loaded successfully"
    );

    Ok(Some(ArtifactBundle { scaler, model }))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name))
    }

    fn write_valid_artifacts() -> (PathBuf, PathBuf) {
        let model_path = temp_path("model.json");
        let scaler_path = temp_path("scaler.json");

        let model = Model::Linear {
            coefficients: vec![0.5; 8],
            intercept: 2.0,
        };
        let scaler = Scaler {
            mean: vec![0.0; 8],
            scale: vec![1.0; 8],
        };

        fs::write(&model_path, serde_json::to_vec(&model).unwrap()).unwrap();
        fs::write(&scaler_path, serde_json::to_vec(&scaler).unwrap()).unwrap();

        (model_path, scaler_path)
    }

    #[test]
    fn test_load_present_bundle() {
        let (model_path, scaler_path) = write_valid_artifacts();

        let bundle = load(&model_path, &scaler_path).unwrap().unwrap();
        assert!(bundle.model.coefficients().is_some());
        assert_eq!(bundle.scaler.mean.len(), 8);

        fs::remove_file(model_path).ok();
        fs::remove_file(scaler_path).ok();
    }

    #[test]
    fn test_missing_files_are_absence_not_error() {
        let model_path = temp_path("missing-model.json");
        let scaler_path = temp_path("missing-scaler.json");

        assert!(load(&model_path, &scaler_path).unwrap().is_none());
    }

    #[test]
    fn test_one_missing_file_is_absence() {
        let (model_path, scaler_path) = write_valid_artifacts();
        fs::remove_file(&scaler_path).unwrap();

        assert!(load(&model_path, &scaler_path).unwrap().is_none());

        fs::remove_file(model_path).ok();
    }

    #[test]
    fn test_corrupt_artifact_is_load_error() {
        let model_path = temp_path("model.json");
        let scaler_path = temp_path("scaler.json");
        fs::write(&model_path, b"not json at all").unwrap();
        fs::write(&scaler_path, b"{\"mean\": [0.0], \"scale\": [1.0]}").unwrap();

        let err = load(&model_path, &scaler_path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        // A load failure downgrades the session to mock mode; predictions
        // must still be served.
        let engine = crate::models::inference::InferenceEngine::new(None);
        let prediction = engine
            .predict(&crate::types::features::FeatureVector::default())
            .unwrap();
        assert!(prediction.mock);

        fs::remove_file(model_path).ok();
        fs::remove_file(scaler_path).ok();
    }
}
