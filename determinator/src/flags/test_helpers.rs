/* Test helpers for building features in the flags module */

use serde_json::Value;
use std::collections::BTreeMap;

use crate::flags::feature_models::{BucketType, Feature, TargetGroup};

pub fn create_target_group(rollout: i64, constraints: Value) -> TargetGroup {
    TargetGroup {
        name: format!("rollout {rollout}"),
        rollout,
        constraints: serde_json::from_value(constraints).expect("constraints must be an object"),
    }
}

pub fn create_feature(target_groups: Vec<TargetGroup>) -> Feature {
    Feature {
        identifier: None,
        name: "test_feature".to_string(),
        active: true,
        bucket_type: BucketType::Id,
        target_groups,
        variants: BTreeMap::new(),
        winning_variant: None,
    }
}

pub fn create_experiment(rollout: i64, variants: &[(&str, f64)]) -> Feature {
    Feature {
        variants: variants
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect(),
        ..create_feature(vec![create_target_group(rollout, Value::Object(Default::default()))])
    }
}
