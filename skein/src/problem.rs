//! Problem instance: the immutable input to one solving session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A problem to solve. Immutable once created; sessions only read it.
///
/// **Interaction**: Consumed by [`Engine::solve`](crate::engine::Engine::solve);
/// the problem text is shared read-only across concurrent path expansions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInstance {
    /// Caller-assigned identifier, echoed into the session outcome.
    pub id: String,
    /// Task category (e.g. "math_problems", "logic_puzzles").
    pub task_type: String,
    /// The problem statement.
    pub problem: String,
    /// Known answer, when available (used by external evaluation, not the engine).
    #[serde(default)]
    pub expected_answer: Option<String>,
    /// Difficulty label. Default "intermediate".
    pub difficulty: String,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ProblemInstance {
    /// Creates a problem with default difficulty and empty metadata.
    pub fn new(
        id: impl Into<String>,
        task_type: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_type: task_type.into(),
            problem: problem.into(),
            expected_answer: None,
            difficulty: "intermediate".to_string(),
            metadata: HashMap::new(),
        }
    }

    /// Sets the expected answer (builder).
    pub fn with_expected_answer(mut self, answer: impl Into<String>) -> Self {
        self.expected_answer = Some(answer.into());
        self
    }

    /// Sets the difficulty label (builder).
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Adds one metadata entry (builder).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
