//! Session output contract: per-problem outcome and batch summary.
//!
//! Everything here is serializable history. The engine fills an outcome at
//! the end of a session and hands it to the sink; after that the snapshots
//! are read-only.

use serde::{Deserialize, Serialize};

use crate::engine::ConsensusOutcome;
use crate::path::ReasoningPath;

/// Answer used when every path was pruned before synthesis.
pub const NO_VIABLE_SOLUTION: &str = "No viable solution found";

/// Result of one solving session.
///
/// **Interaction**: Built by [`Engine::solve`](crate::engine::Engine::solve),
/// recorded through [`SessionSink`](crate::sink::SessionSink), aggregated by
/// [`BatchSummary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Id of the problem this session solved.
    pub problem_id: String,
    /// Final answer after the consensus-override rule.
    pub final_answer: String,
    /// Confidence in [0,1] matching `final_answer`'s source.
    pub confidence: f64,
    /// Final snapshots of the paths that survived pruning.
    pub reasoning_paths: Vec<ReasoningPath>,
    /// Free-text reasoning from the synthesis call (or the sentinel note).
    pub synthesis_reasoning: String,
    /// Wall-clock session duration in seconds.
    pub processing_time: f64,
    /// Total paths explored, viable or not.
    pub num_paths_explored: usize,
    /// Paths that survived pruning.
    pub num_viable_paths: usize,
    /// Consensus analysis; absent when no path survived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_analysis: Option<ConsensusOutcome>,
}

impl SessionOutcome {
    /// True when the session ended with the empty-path-set sentinel.
    pub fn is_unanswered(&self) -> bool {
        self.final_answer == NO_VIABLE_SOLUTION && self.confidence == 0.0
    }
}

/// Summary of a multi-problem batch.
///
/// One problem's failure never aborts a batch; unanswered sessions are
/// counted here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Per-problem outcomes in input order.
    pub outcomes: Vec<SessionOutcome>,
    pub total_problems: usize,
    /// Sessions that produced a real answer.
    pub num_answered: usize,
    /// Sessions that ended with the sentinel answer.
    pub num_unanswered: usize,
    /// Mean confidence over all outcomes (0.0 for an empty batch).
    pub average_confidence: f64,
    /// Sum of per-session processing times in seconds.
    pub total_processing_time: f64,
}

impl BatchSummary {
    /// Aggregates per-problem outcomes into a summary.
    pub fn from_outcomes(outcomes: Vec<SessionOutcome>) -> Self {
        let total_problems = outcomes.len();
        let num_unanswered = outcomes.iter().filter(|o| o.is_unanswered()).count();
        let average_confidence = if total_problems == 0 {
            0.0
        } else {
            outcomes.iter().map(|o| o.confidence).sum::<f64>() / total_problems as f64
        };
        let total_processing_time = outcomes.iter().map(|o| o.processing_time).sum();
        Self {
            num_answered: total_problems - num_unanswered,
            num_unanswered,
            average_confidence,
            total_processing_time,
            total_problems,
            outcomes,
        }
    }
}
