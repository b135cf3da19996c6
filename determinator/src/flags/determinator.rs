use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::{
    api::{errors::DeterminatorError, types::Determination},
    config::Config,
    flags::{
        decision_trace::{
            DecisionEvent, DecisionEventKind, DecisionTracer, LoggingTracer, NoopTracer,
        },
        feature_models::Feature,
        identifier_resolution::{resolve_actor_identifier, IdentifierSource},
        indicators::calculate_indicators,
        rollout::choose_rollout,
        variant_allocation::choose_variant,
    },
    retrieval::{FeatureStore, FileRetrieval},
};

/// Decides whether an actor sees a feature, and which variant.
///
/// Holds no per-call state: one instance can be shared across threads as long
/// as its store is `Sync`.
pub struct Determinator<S> {
    store: S,
    tracer: Box<dyn DecisionTracer>,
}

impl<S: FeatureStore> Determinator<S> {
    pub fn new(store: S) -> Self {
        Self::with_tracer(store, NoopTracer)
    }

    pub fn with_tracer(store: S, tracer: impl DecisionTracer + 'static) -> Self {
        Determinator {
            store,
            tracer: Box::new(tracer),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Determines the feature `feature_id` for the actor.
    ///
    /// Unknown features and every other exclusion come back as
    /// `Ok(Determination::Off)`. An `Err` means the call itself was unusable:
    /// the bucket type needs an identifier the caller did not pass, or the
    /// store failed to produce the definition.
    #[instrument(skip_all, fields(feature_id = %feature_id))]
    pub fn determinate(
        &self,
        feature_id: &str,
        id: Option<&str>,
        guid: Option<&str>,
        properties: &HashMap<String, Value>,
    ) -> Result<Determination, DeterminatorError> {
        let feature = match self.store.retrieve(feature_id) {
            Ok(Some(feature)) => feature,
            Err(e) => {
                self.trace(DecisionEventKind::Fail, "Feature could not be loaded", e.to_string());
                return Err(e);
            }
            Ok(None) => {
                self.trace(
                    DecisionEventKind::Fail,
                    "Feature not found",
                    format!("No definition exists for '{feature_id}', so the actor is excluded"),
                );
                return Ok(Determination::Off);
            }
        };

        self.determinate_feature(&feature, id, guid, properties)
    }

    /// Runs the determination against a definition the caller already holds.
    pub fn determinate_feature(
        &self,
        feature: &Feature,
        id: Option<&str>,
        guid: Option<&str>,
        properties: &HashMap<String, Value>,
    ) -> Result<Determination, DeterminatorError> {
        self.trace(
            DecisionEventKind::Start,
            format!("Determining '{}'", feature.name),
            format!(
                "Bucket type {}, {} target group(s), {} variant(s)",
                feature.bucket_type,
                feature.target_groups.len(),
                feature.variants.len()
            ),
        );

        let actor = match resolve_actor_identifier(feature, id, guid) {
            Ok(Some(actor)) => actor,
            Ok(None) => {
                self.trace(
                    DecisionEventKind::Fail,
                    "No actor identifier",
                    format!(
                        "A '{}' bucketed feature cannot bucket this actor with the identifiers given",
                        feature.bucket_type
                    ),
                );
                return Ok(Determination::Off);
            }
            Err(e) => {
                self.trace(DecisionEventKind::Fail, "Missing identifier", e.to_string());
                return Err(e);
            }
        };

        if actor.source == IdentifierSource::Unbucketed {
            self.trace(
                DecisionEventKind::Random,
                "Unbucketed feature",
                "Single bucketed features draw a fresh random position on every call",
            );
        } else {
            self.trace(
                DecisionEventKind::Pass,
                "Actor identified",
                format!("Bucketing on the actor's {:?}", actor.source),
            );
        }

        if !feature.active {
            self.trace(
                DecisionEventKind::Fail,
                "Feature inactive",
                "Inactive features are off for everyone",
            );
            return Ok(Determination::Off);
        }

        let rollout = choose_rollout(feature, properties, self.tracer.as_ref());
        if rollout == 0 {
            self.trace(
                DecisionEventKind::Fail,
                "No matching target group",
                "None of the target groups match the actor's properties",
            );
            return Ok(Determination::Off);
        }

        let indicators = calculate_indicators(feature.hash_key(), &actor.identifier);
        if u32::from(indicators.rollout_indicator) >= rollout {
            self.trace(
                DecisionEventKind::Fail,
                "Outside rollout",
                format!(
                    "Rollout indicator {} is not below the rollout of {}",
                    indicators.rollout_indicator, rollout
                ),
            );
            return Ok(Determination::Off);
        }
        self.trace(
            DecisionEventKind::Pass,
            "Inside rollout",
            format!(
                "Rollout indicator {} is below the rollout of {}",
                indicators.rollout_indicator, rollout
            ),
        );

        if !feature.has_variants() {
            self.trace(
                DecisionEventKind::Success,
                "Feature on",
                "The actor is in the rollout and the feature has no variants",
            );
            return Ok(Determination::On);
        }

        match choose_variant(feature, indicators.variant_indicator) {
            Some(variant) => {
                let rationale = if feature.winning_variant().is_some() {
                    "The experiment has a winning variant".to_string()
                } else {
                    format!(
                        "Variant indicator {} falls in this variant's range",
                        indicators.variant_indicator
                    )
                };
                self.trace(
                    DecisionEventKind::Success,
                    format!("Variant '{variant}'"),
                    rationale,
                );
                Ok(Determination::Variant(variant))
            }
            None => {
                tracing::warn!(
                    feature = %feature.name,
                    "variant weights do not add up to a positive total, excluding actor"
                );
                self.trace(
                    DecisionEventKind::Fail,
                    "No usable variant weights",
                    "Variant weights must add up to a positive total",
                );
                Ok(Determination::Off)
            }
        }
    }

    fn trace(
        &self,
        kind: DecisionEventKind,
        summary: impl Into<String>,
        rationale: impl Into<String>,
    ) {
        self.tracer.trace(DecisionEvent::new(kind, summary, rationale));
    }
}

impl Determinator<FileRetrieval> {
    pub fn from_config(config: &Config) -> Self {
        let store = FileRetrieval::new(&config.features_path);
        if *config.trace_decisions {
            Determinator::with_tracer(store, LoggingTracer)
        } else {
            Determinator::new(store)
        }
    }
}
