//! Mock Generator for tests and examples.
//!
//! Three modes: a fixed response, a scripted sequence consumed call by call,
//! and a canned keyword router that answers branch / critique / synthesis /
//! expansion prompts with plausible fixed text so a whole session can run
//! deterministically without a live model.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Generator;

enum Mode {
    Fixed(String),
    Sequence(Mutex<VecDeque<String>>, String),
    Canned,
}

/// Deterministic [`Generator`] double.
///
/// **Interaction**: Drop-in for any stage; `canned()` is enough to run
/// [`Engine::solve`](crate::engine::Engine::solve) end to end in tests.
pub struct MockGenerator {
    mode: Mode,
}

impl MockGenerator {
    /// Returns the same content for every call.
    pub fn fixed(content: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fixed(content.into()),
        }
    }

    /// Returns responses in order; repeats the last one when exhausted.
    pub fn sequence(responses: Vec<String>) -> Self {
        let fallback = responses.last().cloned().unwrap_or_default();
        Self {
            mode: Mode::Sequence(Mutex::new(responses.into()), fallback),
        }
    }

    /// Keyword-routed canned responses for each stage prompt.
    pub fn canned() -> Self {
        Self { mode: Mode::Canned }
    }

    fn canned_response(prompt: &str) -> String {
        let lower = prompt.to_lowercase();
        if lower.contains("generate") && lower.contains("approaches") {
            return "Approach 1: Direct calculation\n\
                    1. Identify the given values\n\
                    2. Set up the equation\n\
                    3. Solve step by step\n\n\
                    Approach 2: Working backwards\n\
                    1. Start with the desired result\n\
                    2. Reverse engineer the steps\n\
                    3. Verify the solution\n\n\
                    Approach 3: Elimination\n\
                    1. List the candidate answers\n\
                    2. Rule out the impossible ones\n\
                    3. Check what remains"
                .to_string();
        }
        if lower.contains("evaluate") {
            return "Correctness: 8\nCompleteness: 7\nEfficiency: 6\nClarity: 8\n\
                    Overall this is a solid approach with good logical flow."
                .to_string();
        }
        if lower.contains("synthesize") {
            return "The direct calculation method is the most reliable here.\n\n\
                    Final answer: 42\n\nConfidence: 8/10"
                .to_string();
        }
        "Step: Apply the relevant principle to the given values\n\
         Step: Verify the computation holds\n\
         Final answer: 42"
            .to_string()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str, _system: Option<&str>) -> String {
        match &self.mode {
            Mode::Fixed(content) => content.clone(),
            Mode::Sequence(queue, fallback) => match queue.lock() {
                Ok(mut q) => q.pop_front().unwrap_or_else(|| fallback.clone()),
                Err(_) => fallback.clone(),
            },
            Mode::Canned => Self::canned_response(prompt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_returns_same_content_every_call() {
        let gen = MockGenerator::fixed("always this");
        assert_eq!(gen.generate("a", None).await, "always this");
        assert_eq!(gen.generate("b", Some("sys")).await, "always this");
    }

    #[tokio::test]
    async fn sequence_pops_in_order_then_repeats_last() {
        let gen = MockGenerator::sequence(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(gen.generate("", None).await, "one");
        assert_eq!(gen.generate("", None).await, "two");
        assert_eq!(gen.generate("", None).await, "two");
    }

    #[tokio::test]
    async fn canned_routes_each_stage_prompt() {
        let gen = MockGenerator::canned();
        let branches = gen
            .generate("Generate 3 distinct approaches to solve this", None)
            .await;
        assert!(branches.contains("Approach 1"));
        assert!(branches.contains("Approach 3"));

        let critique = gen.generate("Evaluate this solution approach", None).await;
        assert!(critique.contains("Correctness: 8"));

        let synthesis = gen
            .generate("Synthesize the best solution from these approaches", None)
            .await;
        assert!(synthesis.contains("Final answer: 42"));

        let expansion = gen.generate("Continue solving this problem", None).await;
        assert!(expansion.contains("Final answer: 42"));
    }
}
