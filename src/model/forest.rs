use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::alloy::Alloy;
use crate::error::AppError;
use crate::model::features::FeatureEncoder;
use crate::parser::types::Sample;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Hyperparameters fixed across retrains so model artifacts stay comparable
/// between campaigns.
const N_TREES: usize = 100;
const SEED: u64 = 42;

/// A fitted regression pipeline: the feature encoder plus the forest.
#[derive(Serialize, Deserialize)]
pub struct TrainedModel {
    encoder: FeatureEncoder,
    forest: Forest,
}

impl TrainedModel {
    /// Fit on the parsed samples. `target` names the quantity being modeled
    /// ("COF" / "OCP") and only appears in error messages.
    pub fn fit(target: &str, samples: &[Sample]) -> Result<TrainedModel, AppError> {
        if samples.is_empty() {
            return Err(AppError::NoSamples(target.to_string()));
        }

        let timestamps: Vec<f64> = samples.iter().map(|s| s.timestamp).collect();
        let encoder = FeatureEncoder::fit(&timestamps);

        let x = DenseMatrix::from_2d_vec(&encoder.encode_matrix(samples))?;
        let y: Vec<f64> = samples.iter().map(|s| s.value).collect();

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(N_TREES)
            .with_seed(SEED);
        let forest = RandomForestRegressor::fit(&x, &y, params)?;

        Ok(TrainedModel { encoder, forest })
    }

    /// Predict the target for a single (timestamp, alloy) input.
    pub fn predict(&self, timestamp: f64, alloy: Alloy) -> Result<f64, AppError> {
        let x = DenseMatrix::from_2d_vec(&vec![self.encoder.encode_row(timestamp, alloy)])?;
        let predictions = self.forest.predict(&x)?;
        Ok(predictions[0])
    }
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
