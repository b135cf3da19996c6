use crate::{api::errors::DeterminatorError, flags::feature_models::Feature};

pub mod file_retrieval;
pub mod in_memory_retrieval;

pub use file_retrieval::FileRetrieval;
pub use in_memory_retrieval::InMemoryRetrieval;

/// Source of feature definitions.
///
/// `Ok(None)` means the feature does not exist, which excludes every actor.
/// `Err` is reserved for a store that could not answer.
pub trait FeatureStore {
    fn retrieve(&self, feature_id: &str) -> Result<Option<Feature>, DeterminatorError>;
}

impl<T: FeatureStore + ?Sized> FeatureStore for std::sync::Arc<T> {
    fn retrieve(&self, feature_id: &str) -> Result<Option<Feature>, DeterminatorError> {
        (**self).retrieve(feature_id)
    }
}
