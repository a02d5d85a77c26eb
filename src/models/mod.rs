//! Artifact handling and model inference components

pub mod artifact;
pub mod attribution;
pub mod inference;
pub mod loader;

pub use artifact::{ArtifactBundle, Model, Scaler};
pub use attribution::AttributionEngine;
pub use inference::InferenceEngine;
pub use loader::LoadError;
