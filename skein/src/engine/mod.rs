//! Staged solve pipeline: branch generation, expansion, scoring, pruning,
//! synthesis, and consensus aggregation, orchestrated by [`Engine`].

mod branch;
mod consensus;
mod expand;
mod prune;
mod runner;
mod score;
mod synthesize;

pub use branch::BranchGenerator;
pub use consensus::{AgreementAnalysis, ConsensusAggregator, ConsensusOutcome};
pub use expand::PathExpander;
pub use prune::Pruner;
pub use runner::Engine;
pub use score::PathScorer;
pub use synthesize::{Synthesis, Synthesizer};
