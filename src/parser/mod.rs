pub mod columns;
pub mod friction;
pub mod numbers;
pub mod ocp;
pub mod types;
pub mod wear;

pub use types::{ParseWarning, Sample, SeriesOutput, WearDatabase, WearMetrics};
