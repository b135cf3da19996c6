pub mod api;
pub mod config;
pub mod flags;
pub mod properties;
pub mod retrieval;

pub use api::errors::DeterminatorError;
pub use api::types::Determination;
pub use flags::determinator::Determinator;
pub use flags::feature_models::{BucketType, Feature, TargetGroup};
pub use retrieval::{FeatureStore, FileRetrieval, InMemoryRetrieval};
