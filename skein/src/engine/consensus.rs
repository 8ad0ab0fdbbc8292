//! ConsensusAggregator: statistical self-consistency over the viable set.
//!
//! Each surviving path votes with the answer extracted from its last step.
//! Normalized answers are clustered by word-overlap similarity, clusters are
//! scored by size, member confidence, and member quality, and the winning
//! cluster supplies the consensus answer. A blended confidence gates the
//! engine-level override of the synthesized answer.
//!
//! **Interaction**: Runs on the same viable set as
//! [`Synthesizer`](crate::engine::Synthesizer); the engine compares this
//! module's confidence against `consensus_threshold` to pick between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConsensusWeights;
use crate::path::ReasoningPath;
use crate::text;

// Cluster scoring constants (distinct from the confidence-blend weights,
// which are configurable through ConsensusWeights).
const CLUSTER_SIZE_WEIGHT: f64 = 0.5;
const CLUSTER_CONFIDENCE_WEIGHT: f64 = 0.3;
const CLUSTER_QUALITY_WEIGHT: f64 = 0.2;
const DEFAULT_QUALITY: f64 = 0.5;

/// Result of the self-consistency analysis over one viable set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    pub consensus_answer: String,
    pub confidence: f64,
    pub consistency_score: f64,
    pub reasoning_diversity: f64,
    pub num_clusters: usize,
    pub winning_cluster_size: usize,
    pub total_paths: usize,
    pub analysis: AgreementAnalysis,
}

/// Supporting detail about how strongly the paths agreed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementAnalysis {
    /// Whether `consistency_score` reached the configured threshold.
    pub meets_consistency_threshold: bool,
    /// Sizes of every cluster, in formation order.
    pub cluster_sizes: Vec<usize>,
    /// Normalized representative answer of every cluster, in formation order.
    pub cluster_answers: Vec<String>,
}

/// One path's vote, in original path order.
struct Vote {
    raw_answer: String,
    normalized: String,
    confidence: f64,
    overall_score: Option<f64>,
}

/// An answer cluster: vote indices, in joining order.
struct Cluster {
    members: Vec<usize>,
    /// Normalized answer of the founding member; similarity is measured
    /// against this representative, not against every member.
    representative: String,
}

/// Clustering-and-voting consensus over surviving paths.
pub struct ConsensusAggregator {
    min_paths_for_consensus: usize,
    answer_similarity_threshold: f64,
    consistency_threshold: f64,
    weights: ConsensusWeights,
}

impl ConsensusAggregator {
    pub fn new(
        min_paths_for_consensus: usize,
        answer_similarity_threshold: f64,
        consistency_threshold: f64,
        weights: ConsensusWeights,
    ) -> Self {
        Self {
            min_paths_for_consensus,
            answer_similarity_threshold,
            consistency_threshold,
            weights,
        }
    }

    /// Aggregates the viable set into a consensus answer and confidence.
    ///
    /// An empty set yields an empty answer with confidence 0.0; a set
    /// smaller than `min_paths_for_consensus` short-circuits to full
    /// agreement with confidence 1.0.
    pub fn aggregate(&self, paths: &[ReasoningPath]) -> ConsensusOutcome {
        let total = paths.len();
        if total == 0 {
            return ConsensusOutcome {
                consensus_answer: String::new(),
                confidence: 0.0,
                consistency_score: 0.0,
                reasoning_diversity: 0.0,
                num_clusters: 0,
                winning_cluster_size: 0,
                total_paths: 0,
                analysis: AgreementAnalysis {
                    meets_consistency_threshold: false,
                    cluster_sizes: Vec::new(),
                    cluster_answers: Vec::new(),
                },
            };
        }

        let votes: Vec<Vote> = paths.iter().map(Self::vote).collect();

        if total < self.min_paths_for_consensus {
            // Agreement is vacuously total with nothing to disagree with.
            return ConsensusOutcome {
                consensus_answer: votes[0].raw_answer.clone(),
                confidence: 1.0,
                consistency_score: 1.0,
                reasoning_diversity: 0.0,
                num_clusters: 1,
                winning_cluster_size: total,
                total_paths: total,
                analysis: AgreementAnalysis {
                    meets_consistency_threshold: true,
                    cluster_sizes: vec![total],
                    cluster_answers: vec![votes[0].normalized.clone()],
                },
            };
        }

        let clusters = self.cluster(&votes);
        let winner_idx = self.winning_cluster(&clusters, &votes, total);
        let winner = &clusters[winner_idx];

        let consensus_answer = Self::spokesperson(winner, &votes);
        let consistency_score = winner.members.len() as f64 / total as f64;
        let reasoning_diversity = Self::reasoning_diversity(paths);
        let confidence = self.blend_confidence(
            consistency_score,
            winner,
            &votes,
            reasoning_diversity,
        );

        debug!(
            clusters = clusters.len(),
            winning_size = winner.members.len(),
            consistency = consistency_score,
            confidence,
            "consensus aggregation complete"
        );

        ConsensusOutcome {
            consensus_answer,
            confidence,
            consistency_score,
            reasoning_diversity,
            num_clusters: clusters.len(),
            winning_cluster_size: winner.members.len(),
            total_paths: total,
            analysis: AgreementAnalysis {
                meets_consistency_threshold: consistency_score >= self.consistency_threshold,
                cluster_sizes: clusters.iter().map(|c| c.members.len()).collect(),
                cluster_answers: clusters.iter().map(|c| c.representative.clone()).collect(),
            },
        }
    }

    fn vote(path: &ReasoningPath) -> Vote {
        let raw = text::extract_final_answer(path.last_step().unwrap_or(""));
        let normalized = text::normalize_answer(&raw);
        Vote {
            raw_answer: raw,
            normalized,
            confidence: path.confidence,
            overall_score: path.overall_score(),
        }
    }

    /// Single-linkage grouping in original path order: each vote joins the
    /// first cluster whose representative is similar enough, else founds a
    /// new one.
    fn cluster(&self, votes: &[Vote]) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();
        for (i, vote) in votes.iter().enumerate() {
            let home = clusters.iter_mut().find(|c| {
                text::word_overlap(&c.representative, &vote.normalized)
                    >= self.answer_similarity_threshold
            });
            match home {
                Some(cluster) => cluster.members.push(i),
                None => clusters.push(Cluster {
                    members: vec![i],
                    representative: vote.normalized.clone(),
                }),
            }
        }
        clusters
    }

    /// Index of the highest-scoring cluster; ties go to the first-formed.
    fn winning_cluster(&self, clusters: &[Cluster], votes: &[Vote], total: usize) -> usize {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, cluster) in clusters.iter().enumerate() {
            let size_ratio = cluster.members.len() as f64 / total as f64;
            let mean_confidence = Self::mean(cluster.members.iter().map(|&m| votes[m].confidence));
            let mean_quality = Self::mean(
                cluster
                    .members
                    .iter()
                    .map(|&m| votes[m].overall_score.unwrap_or(DEFAULT_QUALITY)),
            );
            let score = CLUSTER_SIZE_WEIGHT * size_ratio
                + CLUSTER_CONFIDENCE_WEIGHT * mean_confidence
                + CLUSTER_QUALITY_WEIGHT * mean_quality;
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }

    /// Raw answer of the winning cluster's highest-confidence member; ties
    /// go to the earliest path.
    fn spokesperson(winner: &Cluster, votes: &[Vote]) -> String {
        let mut best = winner.members[0];
        for &m in &winner.members[1..] {
            if votes[m].confidence > votes[best].confidence {
                best = m;
            }
        }
        votes[best].raw_answer.clone()
    }

    /// `1 − mean pairwise word overlap` over full step text; 0.0 for fewer
    /// than two paths.
    fn reasoning_diversity(paths: &[ReasoningPath]) -> f64 {
        if paths.len() < 2 {
            return 0.0;
        }
        let texts: Vec<String> = paths.iter().map(|p| p.step_text()).collect();
        let mut sum = 0.0;
        let mut count = 0usize;
        for i in 0..texts.len() {
            for j in (i + 1)..texts.len() {
                sum += text::word_overlap(&texts[i], &texts[j]);
                count += 1;
            }
        }
        1.0 - sum / count as f64
    }

    fn blend_confidence(
        &self,
        consistency_score: f64,
        winner: &Cluster,
        votes: &[Vote],
        reasoning_diversity: f64,
    ) -> f64 {
        let mean_winner_confidence =
            Self::mean(winner.members.iter().map(|&m| votes[m].confidence));
        let mean_quality = Self::mean(
            votes
                .iter()
                .map(|v| v.overall_score.unwrap_or(DEFAULT_QUALITY)),
        );
        // Moderate disagreement among paths is treated as mild evidence of a
        // well-explored search rather than penalized outright.
        let diversity_factor = (1.0 - reasoning_diversity * 0.5).max(0.5);

        let blended = self.weights.consistency * consistency_score
            + self.weights.confidence * mean_winner_confidence
            + self.weights.quality * mean_quality
            + self.weights.diversity * diversity_factor;
        blended.min(1.0)
    }

    fn mean(values: impl Iterator<Item = f64>) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in values {
            sum += v;
            count += 1;
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
