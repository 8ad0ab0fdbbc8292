//! Synthesizer: free-form combination of surviving paths into one answer.
//!
//! An empty viable set emits the sentinel answer with confidence 0.0 and an
//! explanatory note. Otherwise one Generator call over all surviving paths'
//! text, with answer and confidence pulled out by the marker-extraction
//! rules; absent markers degrade to the last non-empty line and 0.5.

use std::sync::Arc;

use tracing::debug;

use crate::llm::Generator;
use crate::path::ReasoningPath;
use crate::prompts;
use crate::session::NO_VIABLE_SOLUTION;
use crate::text;

/// Synthesis result: answer, confidence, and the raw reasoning text.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub answer: String,
    pub confidence: f64,
    pub reasoning: String,
}

/// Free-form answer synthesis over the viable set.
///
/// **Interaction**: Runs after pruning, on the same set as
/// [`ConsensusAggregator`](crate::engine::ConsensusAggregator); the engine's
/// override rule may replace its answer with the consensus one.
pub struct Synthesizer {
    generator: Arc<dyn Generator>,
}

impl Synthesizer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Synthesizes one answer from the viable paths (possibly none).
    pub async fn synthesize(&self, problem_text: &str, viable: &[ReasoningPath]) -> Synthesis {
        if viable.is_empty() {
            return Synthesis {
                answer: NO_VIABLE_SOLUTION.to_string(),
                confidence: 0.0,
                reasoning: "All reasoning paths were pruned due to low quality".to_string(),
            };
        }

        let mut paths_text = String::new();
        for (i, path) in viable.iter().enumerate() {
            paths_text.push_str(&format!(
                "Path {} ({}):\n{}\n\n",
                i + 1,
                path.approach,
                path.step_text()
            ));
        }
        let prompt = prompts::synthesis_prompt(problem_text, &paths_text);
        let response = self
            .generator
            .generate(&prompt, Some(prompts::SYSTEM_PROMPT))
            .await;

        let answer = text::extract_final_answer(&response);
        let confidence = text::extract_confidence(&response);
        debug!(paths = viable.len(), confidence, "synthesis complete");
        Synthesis {
            answer,
            confidence,
            reasoning: response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    fn path(steps: &[&str]) -> ReasoningPath {
        ReasoningPath::new(
            "q",
            "Approach 1",
            steps.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn empty_viable_set_yields_sentinel() {
        let synth = Synthesizer::new(Arc::new(MockGenerator::fixed("unused")));
        let out = synth.synthesize("q", &[]).await;

        assert_eq!(out.answer, NO_VIABLE_SOLUTION);
        assert_eq!(out.confidence, 0.0);
        assert!(!out.reasoning.is_empty());
    }

    #[tokio::test]
    async fn extracts_answer_and_confidence_markers() {
        let synth = Synthesizer::new(Arc::new(MockGenerator::fixed(
            "Comparing both paths, multiplication wins.\n\nFinal answer: 42\n\nConfidence: 9/10",
        )));
        let out = synth
            .synthesize("q", &[path(&["Step 1: multiply the factors"])])
            .await;

        assert_eq!(out.answer, "42");
        assert_eq!(out.confidence, 0.9);
        assert!(out.reasoning.contains("multiplication wins"));
    }

    #[tokio::test]
    async fn missing_markers_degrade_to_last_line_and_default_confidence() {
        let synth = Synthesizer::new(Arc::new(MockGenerator::fixed(
            "some musing\nthe total must be twelve",
        )));
        let out = synth
            .synthesize("q", &[path(&["Step 1: count the items"])])
            .await;

        assert_eq!(out.answer, "the total must be twelve");
        assert_eq!(out.confidence, 0.5);
    }
}
