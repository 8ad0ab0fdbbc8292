//! PathExpander: extends one active path with additional reasoning steps.
//!
//! One Generator call with the path's step history; short lines and comment
//! lines are dropped as noise, at most 3 new steps are kept, and the result
//! is a fresh snapshot (new id, prior steps preserved). The input snapshot
//! is never mutated. A generation failure arrives as an `Error:` marker
//! line, which simply becomes an error-marked step on this one path.

use std::sync::Arc;

use tracing::debug;

use crate::llm::Generator;
use crate::path::ReasoningPath;
use crate::prompts;

/// Lines at or below this length are treated as noise, not steps.
const MIN_STEP_LEN: usize = 10;
/// Maximum new steps appended per expansion.
const MAX_NEW_STEPS: usize = 3;

/// Extends active paths snapshot-style.
///
/// **Interaction**: Runs concurrently across paths inside
/// [`Engine::solve`](crate::engine::Engine::solve); its output is scored by
/// [`PathScorer`](crate::engine::PathScorer) before pruning.
pub struct PathExpander {
    generator: Arc<dyn Generator>,
}

impl PathExpander {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Returns a new snapshot of `path` with up to 3 new steps appended.
    pub async fn expand(&self, problem_text: &str, path: &ReasoningPath) -> ReasoningPath {
        let prompt = prompts::expand_prompt(problem_text, &path.step_text());
        let response = self
            .generator
            .generate(&prompt, Some(prompts::SYSTEM_PROMPT))
            .await;

        let new_steps = Self::parse_steps(&response);
        debug!(path_id = %path.id, added = new_steps.len(), "path expanded");
        path.expanded_with(new_steps)
    }

    /// Keeps non-comment lines longer than the noise threshold, at most 3.
    fn parse_steps(response: &str) -> Vec<String> {
        response
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#') && l.len() > MIN_STEP_LEN)
            .take(MAX_NEW_STEPS)
            .map(str::to_string)
            .collect()
    }
}
