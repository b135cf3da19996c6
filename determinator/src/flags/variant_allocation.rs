use crate::flags::feature_models::Feature;

const INDICATOR_SPACE: f64 = 65535.0;

/// Maps a variant indicator onto the feature's weighted variants.
///
/// A winning variant, when set, is returned as is. Otherwise the weights are
/// scaled onto `0..=65535` and laid out end to end in lexicographic name order;
/// the first variant whose cumulative upper bound reaches the indicator wins.
/// The name order is part of the bucketing contract: reordering would move
/// actors between variants.
///
/// Returns `None` when the weights do not add up to a positive, finite total.
pub fn choose_variant(feature: &Feature, variant_indicator: u16) -> Option<String> {
    if let Some(winner) = feature.winning_variant() {
        return Some(winner.to_string());
    }

    let weight_total: f64 = feature.variants.values().sum();
    if !(weight_total > 0.0 && weight_total.is_finite()) {
        return None;
    }
    let scale_factor = INDICATOR_SPACE / weight_total;
    let indicator = f64::from(variant_indicator);

    // BTreeMap iterates keys in lexicographic order
    let mut ranges = feature
        .variants
        .iter()
        .scan(0.0, |upper_bound, (name, weight)| {
            *upper_bound += weight * scale_factor;
            Some((name, *upper_bound))
        });

    ranges
        .find(|(_, upper_bound)| indicator <= *upper_bound)
        .map(|(name, _)| name)
        // rounding can leave the final bound a hair under 65535
        .or_else(|| feature.variants.keys().next_back())
        .cloned()
}
