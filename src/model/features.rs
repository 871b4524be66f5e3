use serde::{Deserialize, Serialize};

use crate::alloy::Alloy;
use crate::parser::types::Sample;

/// Feature layout fed to the regressor: standard-scaled timestamp followed by
/// a one-hot over `Alloy::ALL`. The encoder is serialized with the model so
/// the exact training-time scaling is applied at prediction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    timestamp_mean: f64,
    timestamp_std: f64,
}

impl FeatureEncoder {
    pub const WIDTH: usize = 1 + Alloy::ALL.len();

    /// Fit the timestamp scaler on the training data.
    /// A constant series degrades to unit scale instead of dividing by zero.
    pub fn fit(timestamps: &[f64]) -> Self {
        let mean = mean(timestamps);
        let std = std_dev(timestamps);
        FeatureEncoder {
            timestamp_mean: mean,
            timestamp_std: if std > 0.0 { std } else { 1.0 },
        }
    }

    pub fn encode_row(&self, timestamp: f64, alloy: Alloy) -> Vec<f64> {
        let mut row = Vec::with_capacity(Self::WIDTH);
        row.push((timestamp - self.timestamp_mean) / self.timestamp_std);
        for candidate in Alloy::ALL {
            row.push(if candidate == alloy { 1.0 } else { 0.0 });
        }
        row
    }

    pub fn encode_matrix(&self, samples: &[Sample]) -> Vec<Vec<f64>> {
        samples
            .iter()
            .map(|s| self.encode_row(s.timestamp, s.alloy))
            .collect()
    }
}

/// Arithmetic mean. Returns 0.0 if the slice is empty.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Returns 0.0 if the slice is empty.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
