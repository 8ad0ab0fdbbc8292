//! Reasoning path: one candidate step-by-step solution attempt.
//!
//! Paths are created Active by [`BranchGenerator`](crate::engine::BranchGenerator),
//! extended snapshot-style by [`PathExpander`](crate::engine::PathExpander),
//! scored by [`PathScorer`](crate::engine::PathScorer), and moved to a
//! terminal status only by [`Pruner`](crate::engine::Pruner).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Evaluation-scores key holding the weighted overall score in [0,1].
pub const OVERALL_SCORE: &str = "overall_score";

/// Lifecycle status of a reasoning path.
///
/// Transitions are one-directional: Active → Completed or Active → Pruned.
/// Completed and Pruned are terminal. All transition logic lives in
/// [`Pruner`](crate::engine::Pruner).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    /// Still eligible for expansion.
    Active,
    /// Scored at or above the confidence threshold; kept as-is.
    Completed,
    /// Scored below the pruning threshold or cut by capacity; out of play.
    Pruned,
}

impl PathStatus {
    /// True for Completed and Pruned.
    pub fn is_terminal(self) -> bool {
        matches!(self, PathStatus::Completed | PathStatus::Pruned)
    }
}

/// One candidate solution attempt: an ordered step sequence plus scores.
///
/// Expansion never mutates an existing snapshot; it produces a new path with
/// a fresh id and the prior steps preserved (see [`ReasoningPath::expanded_with`]).
/// After the session ends, snapshots are handed to the sink and become
/// read-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningPath {
    /// Unique id (uuid v4), regenerated on every expansion snapshot.
    pub id: String,
    /// The problem text this path addresses.
    pub problem: String,
    /// Approach label from branch generation (e.g. "Approach 2").
    pub approach: String,
    /// Ordered reasoning steps; non-empty after the first expansion.
    pub steps: Vec<String>,
    /// Path self-confidence in [0,1]. Seeded at 0.5.
    pub confidence: f64,
    /// Lifecycle status; written only by the Pruner.
    pub status: PathStatus,
    /// Metric name → score. Populated by the scorer before any pruning
    /// decision reads it; includes [`OVERALL_SCORE`].
    #[serde(default)]
    pub evaluation_scores: HashMap<String, f64>,
    /// Snapshot creation time.
    pub created_at: DateTime<Utc>,
}

impl ReasoningPath {
    /// Creates an Active path with seed steps and confidence 0.5.
    pub fn new(
        problem: impl Into<String>,
        approach: impl Into<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            problem: problem.into(),
            approach: approach.into(),
            steps,
            confidence: 0.5,
            status: PathStatus::Active,
            evaluation_scores: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns a new snapshot with `new_steps` appended and a fresh id.
    ///
    /// The receiver is not consumed or mutated; its evaluation scores are not
    /// carried over (the expanded snapshot is re-scored before pruning).
    pub fn expanded_with(&self, new_steps: Vec<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(new_steps);
        Self {
            id: Uuid::new_v4().to_string(),
            problem: self.problem.clone(),
            approach: self.approach.clone(),
            steps,
            confidence: self.confidence,
            status: self.status,
            evaluation_scores: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// The weighted overall evaluation score, when the path has been scored.
    pub fn overall_score(&self) -> Option<f64> {
        self.evaluation_scores.get(OVERALL_SCORE).copied()
    }

    /// Last reasoning step, the usual carrier of the path's answer.
    pub fn last_step(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    /// Full step text joined with newlines (prompt building, diversity).
    pub fn step_text(&self) -> String {
        self.steps.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_path_is_active_with_half_confidence() {
        let p = ReasoningPath::new("2+2?", "Approach 1", vec!["add".to_string()]);
        assert_eq!(p.status, PathStatus::Active);
        assert_eq!(p.confidence, 0.5);
        assert!(p.evaluation_scores.is_empty());
        assert!(p.overall_score().is_none());
    }

    #[test]
    fn expanded_with_appends_and_keeps_original_untouched() {
        let mut original = ReasoningPath::new("q", "Approach 1", vec!["s1".to_string()]);
        original
            .evaluation_scores
            .insert(OVERALL_SCORE.to_string(), 0.5);

        let expanded = original.expanded_with(vec!["s2".to_string(), "s3".to_string()]);

        assert_eq!(original.steps, vec!["s1"]);
        assert_eq!(expanded.steps, vec!["s1", "s2", "s3"]);
        assert_ne!(expanded.id, original.id, "expansion must mint a fresh id");
        assert!(
            expanded.evaluation_scores.is_empty(),
            "stale scores must not survive expansion"
        );
        assert_eq!(expanded.last_step(), Some("s3"));
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PathStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&PathStatus::Pruned).unwrap(),
            "\"pruned\""
        );
        assert!(PathStatus::Completed.is_terminal());
        assert!(!PathStatus::Active.is_terminal());
    }
}
