pub mod decision_trace;
pub mod determinator;
pub mod feature_models;
pub mod identifier_resolution;
pub mod indicators;
pub mod rollout;
pub mod variant_allocation;

#[cfg(test)]
mod test_helpers;
