//! Engine: the staged multi-path solve pipeline.
//!
//! One solve runs branch generation, then up to `max_depth` rounds of
//! expansion and scoring over the active paths, then pruning, then
//! synthesis and consensus aggregation over the same viable set. Expansion
//! and scoring across distinct paths share no mutable state and run
//! concurrently; synthesis and aggregation wait for all of them.
//!
//! **Interaction**: Emits [`SessionEvent`]s to the configured
//! [`SessionSink`]; distinct problems in a batch run concurrently against
//! the same sink.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::{
    BranchGenerator, ConsensusAggregator, PathExpander, PathScorer, Pruner, Synthesizer,
};
use crate::error::EngineError;
use crate::llm::Generator;
use crate::problem::ProblemInstance;
use crate::session::{BatchSummary, SessionOutcome};
use crate::sink::{NullSink, SessionEvent, SessionSink};

/// Multi-path reasoning engine.
pub struct Engine {
    config: EngineConfig,
    branches: BranchGenerator,
    expander: PathExpander,
    scorer: PathScorer,
    pruner: Pruner,
    synthesizer: Synthesizer,
    aggregator: ConsensusAggregator,
    sink: Arc<dyn SessionSink>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Builds an engine from a validated configuration and a generator.
    pub fn new(config: EngineConfig, generator: Arc<dyn Generator>) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            branches: BranchGenerator::new(generator.clone(), config.num_initial_branches),
            expander: PathExpander::new(generator.clone()),
            scorer: PathScorer::new(generator.clone()),
            pruner: Pruner::new(
                config.pruning_threshold,
                config.confidence_threshold,
                config.max_viable_paths,
            ),
            synthesizer: Synthesizer::new(generator),
            aggregator: ConsensusAggregator::new(
                config.min_paths_for_consensus,
                config.answer_similarity_threshold,
                config.consistency_threshold,
                config.consensus_weights.clone(),
            ),
            sink: Arc::new(NullSink),
            config,
        })
    }

    /// Replaces the session sink.
    pub fn with_sink(mut self, sink: Arc<dyn SessionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Solves one problem end to end.
    pub async fn solve(&self, problem: &ProblemInstance) -> SessionOutcome {
        info!(problem_id = %problem.id, task_type = %problem.task_type, "starting solve");
        self.sink.record(SessionEvent::SessionStarted {
            problem_id: problem.id.clone(),
            task_type: problem.task_type.clone(),
            timestamp: Utc::now(),
        });
        let start = Instant::now();

        let mut paths = self.branches.generate(problem).await;

        for round in 0..self.config.max_depth {
            let active: Vec<usize> = paths
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.status.is_terminal())
                .map(|(i, _)| i)
                .collect();
            if active.is_empty() {
                break;
            }
            debug!(round, active = active.len(), "expansion round");

            // Each active path reads only its own history and the immutable
            // problem text, so the round fans out concurrently.
            let results = join_all(active.iter().map(|&i| {
                let path = &paths[i];
                async move {
                    let mut expanded = self.expander.expand(&problem.problem, path).await;
                    expanded.evaluation_scores =
                        self.scorer.score(&problem.problem, &expanded).await;
                    (i, expanded)
                }
            }))
            .await;

            for (i, mut expanded) in results {
                self.pruner.transition(&mut expanded);
                paths[i] = expanded;
            }
        }

        self.pruner.enforce_capacity(&mut paths);
        let viable = Pruner::viable(&paths);
        let num_paths_explored = paths.len();
        let num_viable_paths = viable.len();
        info!(
            explored = num_paths_explored,
            viable = viable.len(),
            "pruning complete"
        );

        let synthesis = self.synthesizer.synthesize(&problem.problem, &viable).await;

        let mut final_answer = synthesis.answer;
        let mut confidence = synthesis.confidence;
        let consistency_analysis = if viable.len() > 1 {
            let consensus = self.aggregator.aggregate(&viable);
            if consensus.confidence >= self.config.consensus_threshold {
                debug!(
                    consensus = %consensus.consensus_answer,
                    confidence = consensus.confidence,
                    "consensus overrides synthesized answer"
                );
                final_answer = consensus.consensus_answer.clone();
                confidence = consensus.confidence;
            }
            Some(consensus)
        } else {
            None
        };

        let outcome = SessionOutcome {
            problem_id: problem.id.clone(),
            final_answer,
            confidence,
            reasoning_paths: viable,
            synthesis_reasoning: synthesis.reasoning,
            processing_time: start.elapsed().as_secs_f64(),
            num_paths_explored,
            num_viable_paths,
            consistency_analysis,
        };

        self.sink.record(SessionEvent::SessionCompleted {
            timestamp: Utc::now(),
            outcome: Box::new(outcome.clone()),
        });
        info!(problem_id = %problem.id, answer = %outcome.final_answer, "solve finished");
        outcome
    }

    /// Solves a batch of problems concurrently and summarizes the results.
    pub async fn solve_batch(&self, problems: &[ProblemInstance]) -> BatchSummary {
        let outcomes = join_all(problems.iter().map(|p| self.solve(p))).await;
        BatchSummary::from_outcomes(outcomes)
    }
}
