use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeterminatorError {
    #[error("A GUID must always be given for GUID bucketed features (feature: {feature})")]
    MissingGuid { feature: String },
    #[error("An ID or GUID must always be given for Fallback bucketed features (feature: {feature})")]
    MissingIdOrGuid { feature: String },
    #[error("failed to read feature {feature}: {source}")]
    Retrieval {
        feature: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse feature {feature}: {source}")]
    DataParsing {
        feature: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DeterminatorError {
    /// True when the caller left out context the feature's bucket type requires.
    ///
    /// These are not exclusions: the decision could not be made at all, and
    /// the caller has to fix the call site.
    pub fn is_caller_misuse(&self) -> bool {
        matches!(
            self,
            DeterminatorError::MissingGuid { .. } | DeterminatorError::MissingIdOrGuid { .. }
        )
    }
}
