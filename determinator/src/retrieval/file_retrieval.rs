use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::instrument;

use crate::{api::errors::DeterminatorError, flags::feature_models::Feature};

use super::FeatureStore;

/// Reads one JSON document per feature from a directory.
///
/// The feature id is the file name, with no extension added.
#[derive(Debug, Clone)]
pub struct FileRetrieval {
    root: PathBuf,
}

impl FileRetrieval {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileRetrieval { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the feature's document, or `None` when the id would escape the root.
    pub fn feature_path(&self, feature_id: &str) -> Option<PathBuf> {
        let mut components = Path::new(feature_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }
}

impl FeatureStore for FileRetrieval {
    #[instrument(skip_all, fields(feature_id = %feature_id))]
    fn retrieve(&self, feature_id: &str) -> Result<Option<Feature>, DeterminatorError> {
        let Some(path) = self.feature_path(feature_id) else {
            tracing::warn!("feature id is not a plain file name, treating as not found");
            return Ok(None);
        };

        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no feature definition on disk");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to read feature definition: {}", e);
                return Err(DeterminatorError::Retrieval {
                    feature: feature_id.to_string(),
                    source: e,
                });
            }
        };

        let feature = serde_json::from_slice::<Feature>(&raw).map_err(|e| {
            tracing::error!(path = %path.display(), "failed to parse feature definition: {}", e);
            DeterminatorError::DataParsing {
                feature: feature_id.to_string(),
                source: e,
            }
        })?;

        Ok(Some(feature))
    }
}
