//! Pruner: the only place path status ever changes.
//!
//! Two rules. Threshold transitions per scored path:
//! `overall_score ≥ confidence_threshold` → Completed,
//! `≥ pruning_threshold` → stays Active, below → Pruned. Capacity rule:
//! when non-pruned paths exceed `max_viable_paths`, a stable descending
//! sort by overall score keeps the top N (ties keep generation order) and
//! marks the remainder Pruned.

use std::cmp::Ordering;

use tracing::debug;

use crate::path::{PathStatus, ReasoningPath};

/// Centralized status state machine.
///
/// **Interaction**: Applied by [`Engine::solve`](crate::engine::Engine::solve)
/// after each scoring round; evaluation scores are always populated before
/// a transition reads them.
pub struct Pruner {
    pruning_threshold: f64,
    confidence_threshold: f64,
    max_viable_paths: usize,
}

impl Pruner {
    pub fn new(pruning_threshold: f64, confidence_threshold: f64, max_viable_paths: usize) -> Self {
        Self {
            pruning_threshold,
            confidence_threshold,
            max_viable_paths,
        }
    }

    /// Applies the threshold rule to one path. Terminal statuses are final;
    /// an unscored path counts as scoring 0.0.
    pub fn transition(&self, path: &mut ReasoningPath) {
        if path.status.is_terminal() {
            return;
        }
        let score = path.overall_score().unwrap_or(0.0);
        path.status = if score >= self.confidence_threshold {
            PathStatus::Completed
        } else if score >= self.pruning_threshold {
            PathStatus::Active
        } else {
            PathStatus::Pruned
        };
        if path.status != PathStatus::Active {
            debug!(path_id = %path.id, score, status = ?path.status, "path transitioned");
        }
    }

    /// Enforces the non-pruned capacity cap across the whole collection.
    pub fn enforce_capacity(&self, paths: &mut [ReasoningPath]) {
        let mut survivors: Vec<usize> = paths
            .iter()
            .enumerate()
            .filter(|(_, p)| p.status != PathStatus::Pruned)
            .map(|(i, _)| i)
            .collect();
        if survivors.len() <= self.max_viable_paths {
            return;
        }
        // Stable sort: equal scores keep original generation order.
        survivors.sort_by(|&a, &b| {
            let sa = paths[a].overall_score().unwrap_or(0.0);
            let sb = paths[b].overall_score().unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        });
        for &i in &survivors[self.max_viable_paths..] {
            paths[i].status = PathStatus::Pruned;
            debug!(path_id = %paths[i].id, "path pruned by capacity");
        }
    }

    /// The surviving (non-pruned) subset, in original order.
    pub fn viable(paths: &[ReasoningPath]) -> Vec<ReasoningPath> {
        paths
            .iter()
            .filter(|p| p.status != PathStatus::Pruned)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::OVERALL_SCORE;

    fn scored_path(score: f64) -> ReasoningPath {
        let mut p = ReasoningPath::new("q", "a", vec!["step one is long enough".to_string()]);
        p.evaluation_scores.insert(OVERALL_SCORE.to_string(), score);
        p
    }

    fn pruner() -> Pruner {
        Pruner::new(0.3, 0.7, 5)
    }

    #[test]
    fn boundary_scores_transition_per_spec() {
        // Exactly at the confidence threshold → completed.
        let mut p = scored_path(0.7);
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Completed);

        // Exactly at the pruning threshold → still active.
        let mut p = scored_path(0.3);
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Active);

        // Just below the pruning threshold → pruned.
        let mut p = scored_path(0.29);
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Pruned);
    }

    #[test]
    fn terminal_statuses_never_transition_again() {
        let mut p = scored_path(0.9);
        p.status = PathStatus::Pruned;
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Pruned);

        let mut p = scored_path(0.1);
        p.status = PathStatus::Completed;
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Completed);
    }

    #[test]
    fn unscored_path_is_pruned() {
        let mut p = ReasoningPath::new("q", "a", vec!["s".to_string()]);
        pruner().transition(&mut p);
        assert_eq!(p.status, PathStatus::Pruned);
    }

    #[test]
    fn capacity_keeps_top_n_and_marks_rest_pruned() {
        let pruner = Pruner::new(0.3, 0.9, 2);
        let mut paths: Vec<ReasoningPath> =
            [0.5, 0.8, 0.6, 0.4].into_iter().map(scored_path).collect();
        pruner.enforce_capacity(&mut paths);

        let statuses: Vec<PathStatus> = paths.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                PathStatus::Pruned,
                PathStatus::Active,
                PathStatus::Active,
                PathStatus::Pruned
            ]
        );
        assert!(Pruner::viable(&paths).len() <= 2);
    }

    #[test]
    fn capacity_ties_keep_generation_order() {
        let pruner = Pruner::new(0.3, 0.9, 2);
        let mut paths: Vec<ReasoningPath> =
            [0.5, 0.5, 0.5].into_iter().map(scored_path).collect();
        pruner.enforce_capacity(&mut paths);

        assert_eq!(paths[0].status, PathStatus::Active);
        assert_eq!(paths[1].status, PathStatus::Active);
        assert_eq!(paths[2].status, PathStatus::Pruned, "last tie is cut");
    }

    #[test]
    fn capacity_never_exceeds_max_viable() {
        let pruner = Pruner::new(0.3, 0.9, 3);
        for n in 0..8 {
            let mut paths: Vec<ReasoningPath> =
                (0..n).map(|i| scored_path(0.1 * i as f64)).collect();
            pruner.enforce_capacity(&mut paths);
            assert!(Pruner::viable(&paths).len() <= 3, "n = {}", n);
        }
    }
}
