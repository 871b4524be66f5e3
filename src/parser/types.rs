use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alloy::Alloy;

/// One training observation: a point in time on one alloy's measurement
/// series, with the measured target value (COF or OCP).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub alloy: Alloy,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}

/// Output of the friction and OCP parsers — samples plus import metadata.
/// Consumed by the trainer to decide whether a stage has enough data.
#[derive(Debug)]
pub struct SeriesOutput {
    pub samples: Vec<Sample>,
    pub rows_processed: usize,
    /// Cells that failed numeric coercion and were dropped.
    pub skipped_values: usize,
    pub per_alloy_counts: BTreeMap<String, usize>,
    /// Alloys for which no column pair could be located.
    pub unmatched_alloys: Vec<String>,
    pub warnings: Vec<ParseWarning>,
}

impl SeriesOutput {
    pub fn count_sample(&mut self, sample: Sample) {
        *self
            .per_alloy_counts
            .entry(sample.alloy.canonical_name().to_string())
            .or_insert(0) += 1;
        self.samples.push(sample);
    }
}

impl Default for SeriesOutput {
    fn default() -> Self {
        SeriesOutput {
            samples: Vec::new(),
            rows_processed: 0,
            skipped_values: 0,
            per_alloy_counts: BTreeMap::new(),
            unmatched_alloys: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Wear metrics for one alloy, as served in the predict response.
/// `wear_area_um2` is not present in the profilometer export and stays 0.0;
/// the field is kept so the response shape matches the historical payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WearMetrics {
    pub max_depth_um: f64,
    pub wear_area_um2: f64,
}

/// Lookup table keyed by canonical alloy name.
pub type WearDatabase = BTreeMap<String, WearMetrics>;
