//! Prompt templates for the four Generator-facing stages.
//!
//! Kept deliberately plain: the engine never depends on a particular model's
//! formatting habits, and every parse of a response has a fallback.

/// System instruction sent with every stage call.
pub const SYSTEM_PROMPT: &str = "You are a careful problem solver. Work step by step, \
state assumptions explicitly, and finish with a line starting with 'Final answer:'.";

/// Branch-generation prompt: requests `num_branches` distinct approaches.
pub fn branch_prompt(problem: &str, num_branches: usize) -> String {
    format!(
        "Generate {num} distinct approaches to solve this problem. Label each one \
         'Approach N:' on its own line, followed by its first reasoning steps.\n\n\
         Problem: {problem}",
        num = num_branches,
        problem = problem
    )
}

/// Expansion prompt: continues one path from its current step history.
pub fn expand_prompt(problem: &str, current_path: &str) -> String {
    format!(
        "Continue solving this problem from where we left off.\n\n\
         Problem: {problem}\n\n\
         Current progress:\n{current_path}\n\n\
         Next steps:"
    )
}

/// Critique prompt: asks for 0-10 ratings on the four scoring dimensions.
pub fn critique_prompt(problem: &str, path_text: &str) -> String {
    format!(
        "Evaluate this solution approach.\n\n\
         Problem: {problem}\n\n\
         Solution:\n{path_text}\n\n\
         Rate on a scale of 1-10, one per line: correctness, completeness, \
         efficiency, clarity."
    )
}

/// Synthesis prompt: combines all surviving paths into one answer.
pub fn synthesis_prompt(problem: &str, paths_text: &str) -> String {
    format!(
        "Synthesize the best solution from these approaches.\n\n\
         Problem: {problem}\n\n\
         Approaches:\n{paths_text}\n\
         Give a 'Final answer:' line and a 'Confidence: N/10' line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_prompt_contains_count_and_problem() {
        let p = branch_prompt("2+2?", 3);
        assert!(p.contains("Generate 3 distinct approaches"));
        assert!(p.contains("2+2?"));
    }

    #[test]
    fn expand_prompt_embeds_history() {
        let p = expand_prompt("q", "Step 1: read\nStep 2: think");
        assert!(p.contains("Current progress:\nStep 1: read\nStep 2: think"));
    }

    #[test]
    fn critique_prompt_names_all_four_dimensions() {
        let p = critique_prompt("q", "steps");
        for dim in ["correctness", "completeness", "efficiency", "clarity"] {
            assert!(p.contains(dim), "missing {}", dim);
        }
    }
}
