/// The two pseudo-random positions of an actor for a feature.
///
/// Both are in `0..=65535` and come from disjoint parts of the digest, so the
/// rollout position tells nothing about the variant position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicators {
    pub rollout_indicator: u16,
    pub variant_indicator: u16,
}

/// Calculates the rollout and variant indicators for an actor.
///
/// This hashes `"<hash_key>,<actor_identifier>"` with MD5 and reads the first
/// two bytes (the first 4 hex characters) as the rollout indicator and the
/// next two bytes as the variant indicator, both big-endian. MD5 is used for
/// its distribution, not for security; changing it would move every actor.
///
/// ## Arguments
/// * `hash_key` - The feature's identifier, or its name when it has none
/// * `actor_identifier` - The resolved bucketing key of the actor
pub fn calculate_indicators(hash_key: &str, actor_identifier: &str) -> Indicators {
    let digest = md5::compute(format!("{hash_key},{actor_identifier}").as_bytes());
    let bytes = digest.0;
    Indicators {
        rollout_indicator: u16::from_be_bytes([bytes[0], bytes[1]]),
        variant_indicator: u16::from_be_bytes([bytes[2], bytes[3]]),
    }
}
