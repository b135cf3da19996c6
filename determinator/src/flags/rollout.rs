use std::collections::HashMap;

use serde_json::Value;

use crate::flags::decision_trace::{DecisionEvent, DecisionEventKind, DecisionTracer};
use crate::flags::feature_models::{Feature, TargetGroup};
use crate::properties::constraint_matching::match_constraints;

/// The largest rollout granted to the actor by any matching target group.
///
/// Returns 0 when no target group matches. Groups are visited in listed order,
/// and a group only raises the ceiling when its rollout is strictly larger.
pub fn choose_rollout(
    feature: &Feature,
    properties: &HashMap<String, Value>,
    tracer: &dyn DecisionTracer,
) -> u32 {
    feature
        .target_groups
        .iter()
        .fold(0, |ceiling, target_group| {
            match target_group_rollout(target_group, properties, tracer) {
                Some(rollout) if rollout > ceiling => rollout,
                _ => ceiling,
            }
        })
}

fn target_group_rollout(
    target_group: &TargetGroup,
    properties: &HashMap<String, Value>,
    tracer: &dyn DecisionTracer,
) -> Option<u32> {
    if !target_group.has_valid_rollout() {
        tracer.trace(DecisionEvent::new(
            DecisionEventKind::Info,
            format!("Target group '{}' ignored", target_group.name),
            format!(
                "A rollout of {} is outside 1..=65536, so this target group never matches",
                target_group.rollout
            ),
        ));
        return None;
    }

    if !match_constraints(&target_group.constraints, properties) {
        tracer.trace(DecisionEvent::new(
            DecisionEventKind::Continue,
            format!("Target group '{}' does not match", target_group.name),
            "At least one constraint is missing from, or not satisfied by, the actor's properties",
        ));
        return None;
    }

    tracer.trace(DecisionEvent::new(
        DecisionEventKind::TargetGroup,
        format!("Target group '{}' matches", target_group.name),
        format!(
            "The actor satisfies all {} constraint(s), granting a rollout of {}/65536",
            target_group.constraints.len(),
            target_group.rollout
        ),
    ));
    u32::try_from(target_group.rollout).ok()
}
