pub mod artifact;
pub mod features;
pub mod forest;

pub use artifact::ModelArtifact;
pub use features::FeatureEncoder;
pub use forest::TrainedModel;
