//! Actor identifier resolution.
//!
//! Decides which of the caller's identifiers becomes the bucketing key for a
//! feature. Everything downstream works with the resolved string and never
//! looks at the bucket type again.
use rand::{distributions::Alphanumeric, Rng};

use crate::api::errors::DeterminatorError;
use crate::flags::feature_models::{BucketType, Feature};

const UNBUCKETED_TOKEN_LENGTH: usize = 16;

/// Where the bucketing key came from. For tracing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierSource {
    Id,
    Guid,
    /// Fresh random token, `single` bucketed features only
    Unbucketed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentifier {
    pub identifier: String,
    pub source: IdentifierSource,
}

impl ActorIdentifier {
    fn new(identifier: &str, source: IdentifierSource) -> Self {
        ActorIdentifier {
            identifier: identifier.to_string(),
            source,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn unbucketed_token() -> String {
    rand::thread_rng()
        .sample_iter(Alphanumeric)
        .take(UNBUCKETED_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Resolve the bucketing key for `feature`.
///
/// Returns `Ok(None)` when the actor simply cannot be bucketed (no `id` for an
/// `id` feature, or a bucket type we don't know), which excludes the actor.
/// Returns `Err` when the caller omitted an identifier the bucket type
/// requires.
///
/// `single` features get a new random key on every call, so each call is an
/// independent draw at the feature's rollout probability.
pub fn resolve_actor_identifier(
    feature: &Feature,
    id: Option<&str>,
    guid: Option<&str>,
) -> Result<Option<ActorIdentifier>, DeterminatorError> {
    match feature.bucket_type {
        BucketType::Id => {
            Ok(non_empty(id).map(|id| ActorIdentifier::new(id, IdentifierSource::Id)))
        }
        BucketType::Guid => match non_empty(guid) {
            Some(guid) => Ok(Some(ActorIdentifier::new(guid, IdentifierSource::Guid))),
            None => Err(DeterminatorError::MissingGuid {
                feature: feature.name.clone(),
            }),
        },
        BucketType::Fallback => {
            if let Some(id) = non_empty(id) {
                Ok(Some(ActorIdentifier::new(id, IdentifierSource::Id)))
            } else if let Some(guid) = non_empty(guid) {
                Ok(Some(ActorIdentifier::new(guid, IdentifierSource::Guid)))
            } else {
                Err(DeterminatorError::MissingIdOrGuid {
                    feature: feature.name.clone(),
                })
            }
        }
        BucketType::Single => Ok(Some(ActorIdentifier {
            identifier: unbucketed_token(),
            source: IdentifierSource::Unbucketed,
        })),
        BucketType::Unknown => {
            tracing::warn!(
                feature = %feature.name,
                "feature has an unrecognized bucket type, excluding actor"
            );
            Ok(None)
        }
    }
}
