use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::forest::TrainedModel;
use crate::parser::types::WearDatabase;

/// A trained model plus its provenance, as written to the artifact directory.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub trained_at: DateTime<Utc>,
    pub n_samples: usize,
    pub model: TrainedModel,
}

impl ModelArtifact {
    pub fn new(model: TrainedModel, n_samples: usize) -> Self {
        ModelArtifact {
            trained_at: Utc::now(),
            n_samples,
            model,
        }
    }
}

pub fn save_model(path: &Path, artifact: &ModelArtifact) -> Result<(), AppError> {
    let bytes = bincode::serde::encode_to_vec(artifact, bincode::config::standard())?;
    std::fs::write(path, bytes)?;
    Ok(())
}

pub fn load_model(path: &Path) -> Result<ModelArtifact, AppError> {
    let bytes = std::fs::read(path)?;
    let (artifact, _) = bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(artifact)
}

/// The wear lookup table is small and occasionally hand-inspected, so it is
/// written as pretty JSON rather than a binary artifact.
pub fn save_wear_database(path: &Path, database: &WearDatabase) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(database)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_wear_database(path: &Path) -> Result<WearDatabase, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
