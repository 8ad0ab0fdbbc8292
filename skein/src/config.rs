//! Engine configuration: branch counts, thresholds, and consensus weights.
//!
//! All knobs are independent with documented defaults. `validate()` fails
//! fast on out-of-range values so a bad config never reaches a Generator
//! call.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Weights for the consensus confidence blend.
///
/// The diversity-reward term is a heuristic, so the whole blend is carried
/// as configuration rather than fixed policy. Components are combined as
/// `consistency·w1 + mean_member_confidence·w2 + mean_overall_score·w3 +
/// diversity_factor·w4` (see [`ConsensusAggregator`](crate::engine::ConsensusAggregator)).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsensusWeights {
    /// Weight of the winning-cluster size ratio. Default 0.4.
    pub consistency: f64,
    /// Weight of the winning cluster's mean path confidence. Default 0.3.
    pub confidence: f64,
    /// Weight of the mean overall evaluation score across all paths. Default 0.2.
    pub quality: f64,
    /// Weight of the diversity factor `max(0.5, 1 − diversity·0.5)`. Default 0.1.
    pub diversity: f64,
}

impl Default for ConsensusWeights {
    fn default() -> Self {
        Self {
            consistency: 0.4,
            confidence: 0.3,
            quality: 0.2,
            diversity: 0.1,
        }
    }
}

/// Configuration for one solving engine.
///
/// **Interaction**: Validated in [`Engine::new`](crate::engine::Engine::new);
/// threshold fields are read by [`Pruner`](crate::engine::Pruner) and
/// [`ConsensusAggregator`](crate::engine::ConsensusAggregator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Initial reasoning branches to request. Default 3.
    pub num_initial_branches: usize,
    /// Maximum expansion rounds per session. Default 5.
    pub max_depth: usize,
    /// Paths scoring below this are pruned. Default 0.3.
    pub pruning_threshold: f64,
    /// Paths scoring at or above this are completed. Default 0.7.
    pub confidence_threshold: f64,
    /// Capacity cap on non-pruned paths. Default 5.
    pub max_viable_paths: usize,
    /// Consistency-score level reported as substantial agreement. Default 0.7.
    pub consistency_threshold: f64,
    /// Below this many paths, consensus short-circuits to full agreement. Default 2.
    pub min_paths_for_consensus: usize,
    /// Word-overlap similarity needed to join an answer cluster. Default 0.8.
    pub answer_similarity_threshold: f64,
    /// Aggregator confidence at which consensus overrides synthesis. Default 0.7.
    pub consensus_threshold: f64,
    /// Confidence blend weights.
    pub consensus_weights: ConsensusWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_initial_branches: 3,
            max_depth: 5,
            pruning_threshold: 0.3,
            confidence_threshold: 0.7,
            max_viable_paths: 5,
            consistency_threshold: 0.7,
            min_paths_for_consensus: 2,
            answer_similarity_threshold: 0.8,
            consensus_threshold: 0.7,
            consensus_weights: ConsensusWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Checks counts and thresholds; must pass before any Generator call.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.num_initial_branches == 0 {
            return Err(EngineError::InvalidConfig(
                "num_initial_branches must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_viable_paths == 0 {
            return Err(EngineError::InvalidConfig(
                "max_viable_paths must be at least 1".to_string(),
            ));
        }
        if self.min_paths_for_consensus == 0 {
            return Err(EngineError::InvalidConfig(
                "min_paths_for_consensus must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("pruning_threshold", self.pruning_threshold),
            ("confidence_threshold", self.confidence_threshold),
            ("consistency_threshold", self.consistency_threshold),
            (
                "answer_similarity_threshold",
                self.answer_similarity_threshold,
            ),
            ("consensus_threshold", self.consensus_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be within [0,1], got {}",
                    name, value
                )));
            }
        }
        let w = &self.consensus_weights;
        for (name, value) in [
            ("consensus_weights.consistency", w.consistency),
            ("consensus_weights.confidence", w.confidence),
            ("consensus_weights.quality", w.quality),
            ("consensus_weights.diversity", w.diversity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
