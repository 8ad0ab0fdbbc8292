//! # Skein
//!
//! A multi-path reasoning engine in Rust. A problem is solved by generating
//! several candidate reasoning paths, expanding and scoring each path
//! independently, pruning the weak ones, and then combining the survivors
//! two ways at once: free-form synthesis and statistical self-consistency
//! voting, with consensus overriding synthesis when agreement is strong.
//!
//! ## Design principles
//!
//! - **Infallible generation boundary**: The [`Generator`] trait never
//!   returns an error; provider failures surface as marker text inside the
//!   response, so a failed call degrades one path instead of aborting the
//!   session.
//! - **Independent paths**: Expansion and scoring of distinct paths share no
//!   mutable state and run concurrently; synthesis and aggregation join on
//!   all of them.
//! - **Deterministic core**: Clustering, scoring, and pruning are pure over
//!   path data — testable without live calls via [`MockGenerator`].
//!
//! ## Main modules
//!
//! - [`engine`]: [`Engine`] plus the pipeline stages ([`BranchGenerator`],
//!   [`PathExpander`], [`PathScorer`], [`Pruner`], [`Synthesizer`],
//!   [`ConsensusAggregator`]).
//! - [`llm`]: [`Generator`] trait, [`MockGenerator`], [`OpenAiGenerator`].
//! - [`path`]: [`ReasoningPath`] and its lifecycle ([`PathStatus`]).
//! - [`problem`] / [`session`]: [`ProblemInstance`] in, [`SessionOutcome`]
//!   and [`BatchSummary`] out.
//! - [`sink`]: append-only [`SessionSink`] event log ([`MemorySink`],
//!   [`JsonlSink`]).
//! - [`config`]: [`EngineConfig`] with validated defaults.
//! - [`text`]: answer and confidence extraction, normalization, similarity.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use skein::{Engine, EngineConfig, OpenAiGenerator, ProblemInstance};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let generator = Arc::new(OpenAiGenerator::new("gpt-4o-mini"));
//! let engine = Engine::new(EngineConfig::default(), generator).unwrap();
//!
//! let problem = ProblemInstance::new(
//!     "p1",
//!     "math",
//!     "A shirt costs $20 and is discounted 30%. What is the final price?",
//! );
//! let outcome = engine.solve(&problem).await;
//! println!("{} (confidence {:.2})", outcome.final_answer, outcome.confidence);
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod path;
pub mod problem;
pub mod prompts;
pub mod session;
pub mod sink;
pub mod text;

pub use config::{ConsensusWeights, EngineConfig};
pub use engine::{
    AgreementAnalysis, BranchGenerator, ConsensusAggregator, ConsensusOutcome, Engine,
    PathExpander, PathScorer, Pruner, Synthesis, Synthesizer,
};
pub use error::EngineError;
pub use llm::{Generator, MockGenerator, OpenAiGenerator, ERROR_MARKER};
pub use path::{PathStatus, ReasoningPath, OVERALL_SCORE};
pub use problem::ProblemInstance;
pub use session::{BatchSummary, SessionOutcome, NO_VIABLE_SOLUTION};
pub use sink::{JsonlSink, MemorySink, NullSink, SessionEvent, SessionSink};

/// When running `cargo test -p skein`, initializes tracing from `RUST_LOG` so
/// that unit tests in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
