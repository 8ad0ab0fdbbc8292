//! BranchGenerator: one Generator call to seed k candidate reasoning paths.
//!
//! Parses the response on "Approach" section markers; each section becomes
//! an Active path with at most 3 seed steps and confidence 0.5. Malformed
//! output never aborts the stage: zero parsed sections fall back to k
//! generic placeholder paths.

use std::sync::Arc;

use tracing::debug;

use crate::llm::Generator;
use crate::path::ReasoningPath;
use crate::problem::ProblemInstance;
use crate::prompts;

/// Maximum seed steps carried into each initial branch.
const MAX_SEED_STEPS: usize = 3;

/// Produces the initial candidate paths for a problem.
///
/// **Interaction**: First stage of [`Engine::solve`](crate::engine::Engine::solve);
/// output flows into [`PathExpander`](crate::engine::PathExpander).
pub struct BranchGenerator {
    generator: Arc<dyn Generator>,
    num_branches: usize,
}

impl BranchGenerator {
    pub fn new(generator: Arc<dyn Generator>, num_branches: usize) -> Self {
        Self {
            generator,
            num_branches,
        }
    }

    /// One Generator call, parsed into up to `num_branches` Active paths.
    pub async fn generate(&self, problem: &ProblemInstance) -> Vec<ReasoningPath> {
        let prompt = prompts::branch_prompt(&problem.problem, self.num_branches);
        let response = self
            .generator
            .generate(&prompt, Some(prompts::SYSTEM_PROMPT))
            .await;

        let mut branches = self.parse_branches(&response, &problem.problem);
        if branches.is_empty() {
            debug!(
                problem_id = %problem.id,
                "branch parsing yielded nothing; using placeholder paths"
            );
            branches = self.placeholder_branches(&problem.problem);
        }
        debug!(problem_id = %problem.id, count = branches.len(), "initial branches ready");
        branches
    }

    /// Splits on "Approach" markers; each non-empty section seeds one path.
    fn parse_branches(&self, response: &str, problem_text: &str) -> Vec<ReasoningPath> {
        let mut branches = Vec::new();
        for (i, section) in response.split("Approach").skip(1).enumerate() {
            let steps: Vec<String> = section
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .take(MAX_SEED_STEPS)
                .map(str::to_string)
                .collect();
            if steps.is_empty() {
                continue;
            }
            let approach = format!("Approach {}", i + 1);
            branches.push(ReasoningPath::new(problem_text, approach, steps));
            if branches.len() == self.num_branches {
                break;
            }
        }
        branches
    }

    fn placeholder_branches(&self, problem_text: &str) -> Vec<ReasoningPath> {
        (1..=self.num_branches)
            .map(|i| {
                ReasoningPath::new(
                    problem_text,
                    format!("Standard approach {}", i),
                    vec![
                        "Step 1: Analyze the problem".to_string(),
                        "Step 2: Identify key information".to_string(),
                    ],
                )
            })
            .collect()
    }
}
