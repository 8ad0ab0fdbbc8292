//! Generator capability: the sole source of non-determinism.
//!
//! Every stage that needs model text (branching, expansion, scoring,
//! synthesis) calls [`Generator::generate`]. The capability is infallible at
//! this boundary: implementations must never return an error to the caller.
//! A failed call surfaces as an embedded marker string (`"Error: ..."`) in
//! the returned text, which downstream parsing treats like any other
//! malformed output. This keeps a slow or failing call scoped to the one
//! path that made it.

mod mock;
mod openai;

pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;

use async_trait::async_trait;

/// Prefix used by implementations to embed a failure in returned text.
pub const ERROR_MARKER: &str = "Error:";

/// Opaque text-generation capability.
///
/// **Interaction**: Consumed by [`BranchGenerator`](crate::engine::BranchGenerator),
/// [`PathExpander`](crate::engine::PathExpander),
/// [`PathScorer`](crate::engine::PathScorer), and
/// [`Synthesizer`](crate::engine::Synthesizer). Implementations:
/// [`MockGenerator`] (deterministic test double), [`OpenAiGenerator`]
/// (real API).
#[async_trait]
pub trait Generator: Send + Sync {
    /// One completion: prompt plus optional system instruction, text out.
    ///
    /// Must not panic and has no error channel; implementations embed
    /// failures as an [`ERROR_MARKER`]-prefixed string in the returned text.
    async fn generate(&self, prompt: &str, system: Option<&str>) -> String;
}

/// True when the text is a generation-failure marker rather than model output.
pub fn is_error_marker(text: &str) -> bool {
    text.trim_start().starts_with(ERROR_MARKER)
}
