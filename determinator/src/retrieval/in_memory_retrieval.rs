use std::collections::HashMap;

use crate::{api::errors::DeterminatorError, flags::feature_models::Feature};

use super::FeatureStore;

/// Features held in a map, keyed by feature id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRetrieval {
    features: HashMap<String, Feature>,
}

impl InMemoryRetrieval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature(mut self, feature_id: impl Into<String>, feature: Feature) -> Self {
        self.insert(feature_id, feature);
        self
    }

    pub fn insert(&mut self, feature_id: impl Into<String>, feature: Feature) -> Option<Feature> {
        self.features.insert(feature_id.into(), feature)
    }

    pub fn remove(&mut self, feature_id: &str) -> Option<Feature> {
        self.features.remove(feature_id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<(String, Feature)> for InMemoryRetrieval {
    fn from_iter<I: IntoIterator<Item = (String, Feature)>>(iter: I) -> Self {
        InMemoryRetrieval {
            features: iter.into_iter().collect(),
        }
    }
}

impl FeatureStore for InMemoryRetrieval {
    fn retrieve(&self, feature_id: &str) -> Result<Option<Feature>, DeterminatorError> {
        Ok(self.features.get(feature_id).cloned())
    }
}
