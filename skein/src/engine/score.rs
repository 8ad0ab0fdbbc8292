//! PathScorer: rates one path on four weighted sub-dimensions.
//!
//! A Generator critique response is parsed with `key: number` extraction
//! per dimension on a 0-10 scale (default 5.0 when absent, capped at 10).
//! `overall_score = (0.4·correctness + 0.3·completeness + 0.2·efficiency +
//! 0.1·clarity) / 10` — deterministic given the four inputs; the inputs
//! themselves come from the non-deterministic Generator call.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::llm::Generator;
use crate::path::{ReasoningPath, OVERALL_SCORE};
use crate::prompts;

/// Score dimensions with their fixed weights.
const DIMENSIONS: [(&str, f64); 4] = [
    ("correctness", 0.4),
    ("completeness", 0.3),
    ("efficiency", 0.2),
    ("clarity", 0.1),
];

static DIMENSION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    DIMENSIONS
        .iter()
        .map(|(name, _)| {
            let pattern = format!(r"(?i){}[:\s]+(\d+(?:\.\d+)?)", name);
            (*name, Regex::new(&pattern).expect("dimension pattern compiles"))
        })
        .collect()
});

/// Scores expanded paths via one critique call each.
///
/// **Interaction**: Runs right after [`PathExpander`](crate::engine::PathExpander)
/// for each path; its `overall_score` drives the
/// [`Pruner`](crate::engine::Pruner) transitions.
pub struct PathScorer {
    generator: Arc<dyn Generator>,
}

impl PathScorer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// One critique call; returns metric name → score plus [`OVERALL_SCORE`].
    pub async fn score(
        &self,
        problem_text: &str,
        path: &ReasoningPath,
    ) -> HashMap<String, f64> {
        let prompt = prompts::critique_prompt(problem_text, &path.step_text());
        let response = self
            .generator
            .generate(&prompt, Some(prompts::SYSTEM_PROMPT))
            .await;

        let mut scores = Self::parse_scores(&response);
        let overall = DIMENSIONS
            .iter()
            .map(|(name, weight)| scores.get(*name).copied().unwrap_or(5.0) * weight)
            .sum::<f64>()
            / 10.0;
        scores.insert(OVERALL_SCORE.to_string(), overall);
        debug!(path_id = %path.id, overall, "path scored");
        scores
    }

    /// Extracts each dimension's 0-10 value; missing ones default to 5.0.
    fn parse_scores(response: &str) -> HashMap<String, f64> {
        let mut scores = HashMap::new();
        for (name, pattern) in DIMENSION_PATTERNS.iter() {
            let value = pattern
                .captures(response)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .map(|v| v.min(10.0))
                .unwrap_or(5.0);
            scores.insert((*name).to_string(), value);
        }
        scores
    }
}
