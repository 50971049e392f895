//! Generation-by-generation training loop.
//!
//! The search algorithm lives behind [`Optimizer`]; this module only
//! evaluates whatever candidates it proposes and hands the fitness back.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::harness::{run_generation_with, FrameSink, GenerationOutcome};
use crate::hash::to_hex;
use crate::policy::DecisionPolicy;
use crate::types::{RunConfig, Tick};

/// A policy under evaluation, tagged with an optimizer-chosen id.
pub struct Candidate {
    pub id: u64,
    pub policy: Box<dyn DecisionPolicy>,
}

pub trait Optimizer {
    /// Policies to evaluate in `generation`.
    fn propose(&mut self, generation: u32) -> Vec<Candidate>;

    /// Fitness per candidate id, in proposal order.
    fn receive(&mut self, generation: u32, results: &[(u64, f64)]);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub number: u32,
    pub seed: u32,
    pub population: usize,
    pub best: f64,
    pub mean: f64,
    pub ticks: Tick,
    pub spawns: usize,
    pub timeline_digest: [u8; 32],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub generations: Vec<GenerationStats>,
    /// True when the sink asked to quit mid-generation.
    pub aborted: bool,
}

impl TrainingReport {
    /// Generation with the highest best fitness.
    pub fn best(&self) -> Option<&GenerationStats> {
        self.generations
            .iter()
            .max_by(|a, b| a.best.total_cmp(&b.best))
    }
}

/// Per-generation run config: the base seed offset by the generation number.
pub fn generation_config(base: &RunConfig, number: u32) -> RunConfig {
    RunConfig {
        seed: base.seed.wrapping_add(number),
        ..base.clone()
    }
}

/// Evaluate up to `max_generations` generations, numbered from 1.
pub fn train(
    optimizer: &mut dyn Optimizer,
    config: &RunConfig,
    max_generations: u32,
    sink: &mut dyn FrameSink,
) -> TrainingReport {
    let mut report = TrainingReport::default();

    for number in 1..=max_generations {
        let candidates = optimizer.propose(number);
        if candidates.is_empty() {
            warn!(generation = number, "optimizer proposed no candidates, stopping");
            break;
        }

        let (ids, policies): (Vec<u64>, Vec<Box<dyn DecisionPolicy>>) =
            candidates.into_iter().map(|c| (c.id, c.policy)).unzip();
        let run_config = generation_config(config, number);

        let summary = match run_generation_with(policies, &run_config, number, sink) {
            GenerationOutcome::Complete(summary) => summary,
            GenerationOutcome::Quit => {
                report.aborted = true;
                break;
            }
        };

        let results: Vec<(u64, f64)> = ids
            .iter()
            .zip(&summary.fitness)
            .map(|(&id, f)| (id, f.score))
            .collect();
        optimizer.receive(number, &results);

        let stats = GenerationStats {
            number,
            seed: run_config.seed,
            population: results.len(),
            best: summary.best(),
            mean: summary.mean(),
            ticks: summary.ticks,
            spawns: summary.spawns,
            timeline_digest: summary.timeline_digest,
        };
        info!(
            generation = number,
            population = stats.population,
            best = stats.best,
            mean = stats.mean,
            ticks = stats.ticks,
            timeline = %to_hex(&stats.timeline_digest),
            "training generation"
        );
        report.generations.push(stats);
    }

    report
}
