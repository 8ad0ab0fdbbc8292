//! Engine error types.
//!
//! Only configuration problems surface as `Err` values: generation failures
//! are embedded as marker text by [`Generator`](crate::llm::Generator)
//! implementations, and parse failures resolve through documented fallbacks.

use thiserror::Error;

/// Engine construction/configuration error.
///
/// Returned by [`EngineConfig::validate`](crate::config::EngineConfig::validate)
/// and [`Engine::new`](crate::engine::Engine::new) before any Generator call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A threshold is outside [0,1] or a count is zero.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
