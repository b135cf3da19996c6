use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Outcome of a single determination.
///
/// Serializes the way feature flag values travel on the wire: `false` for
/// `Off`, `true` for `On` and the bare variant name otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Determination {
    Off,
    On,
    Variant(String),
}

impl Determination {
    pub fn is_on(&self) -> bool {
        !matches!(self, Determination::Off)
    }

    pub fn variant(&self) -> Option<&str> {
        match self {
            Determination::Variant(name) => Some(name),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Determination::Off => Value::Bool(false),
            Determination::On => Value::Bool(true),
            Determination::Variant(name) => Value::String(name.clone()),
        }
    }
}

impl Serialize for Determination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Determination::Off => serializer.serialize_bool(false),
            Determination::On => serializer.serialize_bool(true),
            Determination::Variant(name) => serializer.serialize_str(name),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDetermination {
    Boolean(bool),
    String(String),
}

impl<'de> Deserialize<'de> for Determination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawDetermination::deserialize(deserializer)? {
            RawDetermination::Boolean(false) => Determination::Off,
            RawDetermination::Boolean(true) => Determination::On,
            RawDetermination::String(name) => Determination::Variant(name),
        })
    }
}
