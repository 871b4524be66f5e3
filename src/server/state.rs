use tracing::{info, warn};

use crate::config::{AppConfig, InsightThresholds};
use crate::model::artifact::{load_model, load_wear_database, ModelArtifact};
use crate::parser::types::WearDatabase;

/// Assets loaded once at startup and shared read-only across requests.
/// Missing artifacts are tolerated: the server comes up, warns, and the
/// affected prediction falls back to 0.0 until a training run supplies them.
pub struct AppState {
    pub cof: Option<ModelArtifact>,
    pub ocp: Option<ModelArtifact>,
    pub wear: WearDatabase,
    pub thresholds: InsightThresholds,
}

impl AppState {
    pub fn load(config: &AppConfig) -> AppState {
        let cof = match load_model(&config.cof_model_path()) {
            Ok(artifact) => {
                info!(n_samples = artifact.n_samples, "COF model loaded");
                Some(artifact)
            }
            Err(err) => {
                warn!(%err, "COF model not loaded, run the training pipeline first");
                None
            }
        };
        let ocp = match load_model(&config.ocp_model_path()) {
            Ok(artifact) => {
                info!(n_samples = artifact.n_samples, "OCP model loaded");
                Some(artifact)
            }
            Err(err) => {
                warn!(%err, "OCP model not loaded, run the training pipeline first");
                None
            }
        };
        let wear = match load_wear_database(&config.wear_database_path()) {
            Ok(db) => {
                info!(alloys = db.len(), "wear database loaded");
                db
            }
            Err(err) => {
                warn!(%err, "wear database not loaded");
                WearDatabase::new()
            }
        };

        AppState {
            cof,
            ocp,
            wear,
            thresholds: config.thresholds.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_empty_artifact_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            artifact_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let state = AppState::load(&config);
        assert!(state.cof.is_none());
        assert!(state.ocp.is_none());
        assert!(state.wear.is_empty());
    }
}
