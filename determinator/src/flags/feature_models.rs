use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Number of discrete rollout steps; a rollout of `MAX_ROLLOUT` includes everyone.
pub const MAX_ROLLOUT: i64 = 65536;

/// How the bucketing key of an actor is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketType {
    Id,
    Guid,
    Fallback,
    Single,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BucketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BucketType::Id => "id",
                BucketType::Guid => "guid",
                BucketType::Fallback => "fallback",
                BucketType::Single => "single",
                BucketType::Unknown => "unknown",
            }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TargetGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "rollout_from_number")]
    pub rollout: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: HashMap<String, Value>,
}

impl TargetGroup {
    /// Rollouts outside `1..=MAX_ROLLOUT` never match anyone.
    pub fn has_valid_rollout(&self) -> bool {
        self.rollout > 0 && self.rollout <= MAX_ROLLOUT
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket_type: BucketType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_groups: Vec<TargetGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_variant: Option<String>,
}

impl Feature {
    /// The stable string every indicator for this feature is derived from.
    pub fn hash_key(&self) -> &str {
        match self.identifier.as_deref() {
            Some(identifier) if !identifier.is_empty() => identifier,
            _ => &self.name,
        }
    }

    pub fn winning_variant(&self) -> Option<&str> {
        self.winning_variant.as_deref().filter(|v| !v.is_empty())
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Fractional rollouts compare against integer indicators, so rounding up keeps
// both the range check and the `indicator < rollout` test exact.
fn rollout_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(match value {
        None => 0,
        Some(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.as_u64().is_some() {
                i64::MAX
            } else {
                let f = n.as_f64().unwrap_or(0.0).ceil();
                if f >= i64::MAX as f64 {
                    i64::MAX
                } else if f <= i64::MIN as f64 {
                    i64::MIN
                } else {
                    f as i64
                }
            }
        }
    })
}
