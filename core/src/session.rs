//! Single-player run: a population of one, driven by a human.

use serde::{Deserialize, Serialize};

use crate::harness::{FrameSink, Generation, GenerationOutcome};
use crate::policy::{HumanPolicy, InputSource};
use crate::types::{RunConfig, Tick};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// The runner hit an obstacle. `score` is the display score at the crash.
    Crashed { score: u64, ticks: Tick },
    /// The player quit before crashing.
    Quit,
}

pub struct PlaySession<I> {
    generation: Generation<HumanPolicy<I>>,
}

impl<I: InputSource> PlaySession<I> {
    pub fn new(input: I, config: &RunConfig) -> Self {
        PlaySession {
            generation: Generation::new(1, vec![HumanPolicy::new(input)], config),
        }
    }

    pub fn generation(&self) -> &Generation<HumanPolicy<I>> {
        &self.generation
    }

    pub fn generation_mut(&mut self) -> &mut Generation<HumanPolicy<I>> {
        &mut self.generation
    }

    pub fn is_over(&self) -> bool {
        self.generation.is_complete()
    }

    pub fn run(&mut self, sink: &mut dyn FrameSink) -> SessionOutcome {
        match self.generation.run(sink) {
            GenerationOutcome::Complete(summary) => SessionOutcome::Crashed {
                score: summary.score,
                ticks: summary.ticks,
            },
            GenerationOutcome::Quit => SessionOutcome::Quit,
        }
    }
}
