//! Population evaluation: many agents, one obstacle timeline.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, info};

use crate::collision::collides;
use crate::hash::{hash_timeline, to_hex};
use crate::init::{create_agent, create_world};
use crate::perception::perceive;
use crate::physics::advance;
use crate::policy::DecisionPolicy;
use crate::step::step_world;
use crate::types::*;

new_key_type! {
    /// Handle of an agent still in the live set.
    pub struct AgentId;
}

/// Live-set entry. `slot` is the agent's position in the input order.
struct Lane<P> {
    slot: usize,
    policy: P,
}

/// Outcome of a single tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Input slots eliminated this tick.
    pub eliminated: Vec<usize>,
    pub live: usize,
    pub complete: bool,
}

/// Read-only view handed to renderers after each tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub tick: Tick,
    pub generation: u32,
    /// Display score, already truncated.
    pub score: u64,
    pub scroll_speed: f64,
    /// Every agent in input order; eliminated ones have `alive == false`.
    pub agents: &'a [Agent],
    pub obstacles: &'a [Obstacle],
    pub live: usize,
    pub debug_overlay: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkSignal {
    Continue,
    ToggleDebug,
    Quit,
}

/// Consumer of per-tick frames: a renderer, a recorder, or nothing at all.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameSnapshot<'_>) -> SinkSignal;
}

/// Headless sink; never quits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameSnapshot<'_>) -> SinkSignal {
        SinkSignal::Continue
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub number: u32,
    /// One entry per input policy, in input order.
    pub fitness: Vec<Fitness>,
    pub ticks: Tick,
    pub score: u64,
    pub spawns: usize,
    pub timeline_digest: [u8; 32],
}

impl GenerationSummary {
    pub fn best(&self) -> f64 {
        self.fitness
            .iter()
            .map(|f| f.score)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.0;
        }
        self.fitness.iter().map(|f| f.score).sum::<f64>() / self.fitness.len() as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutcome {
    Complete(GenerationSummary),
    Quit,
}

/// One generation: Active while any agent lives, Complete once none do.
pub struct Generation<P> {
    number: u32,
    config: RunConfig,
    world: WorldState,
    agents: Vec<Agent>,
    fitness: Vec<Fitness>,
    live: SlotMap<AgentId, Lane<P>>,
    debug_overlay: bool,
}

impl<P: DecisionPolicy> Generation<P> {
    pub fn new(number: u32, policies: Vec<P>, config: &RunConfig) -> Self {
        let mut live = SlotMap::with_capacity_and_key(policies.len());
        for (slot, policy) in policies.into_iter().enumerate() {
            live.insert(Lane { slot, policy });
        }
        let population = live.len();
        Generation {
            number,
            config: config.clone(),
            world: create_world(config),
            agents: vec![create_agent(); population],
            fitness: vec![Fitness::default(); population],
            live,
            debug_overlay: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable world access, for staging scenarios before the first tick.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, slot: usize) -> Option<&Agent> {
        self.agents.get(slot)
    }

    pub fn fitness(&self) -> &[Fitness] {
        &self.fitness
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_complete(&self) -> bool {
        self.live.is_empty()
    }

    pub fn toggle_debug_overlay(&mut self) {
        self.debug_overlay = !self.debug_overlay;
    }

    /// Display score as shown to a player.
    pub fn display_score(&self) -> u64 {
        self.world.tick_score as u64
    }

    /// Advance every live agent by one tick against the shared world.
    ///
    /// The live set is only read during the scan; eliminations are applied
    /// once every agent has been evaluated, so evaluation order never
    /// matters.
    pub fn tick(&mut self) -> TickReport {
        if self.is_complete() {
            return TickReport {
                tick: self.world.tick,
                eliminated: Vec::new(),
                live: 0,
                complete: true,
            };
        }

        let step = step_world(&mut self.world, &self.config);
        if step.removed > 0 {
            debug!(
                tick = self.world.tick,
                removed = step.removed,
                "obstacles left the field"
            );
        }

        let world = &self.world;
        let agents = &mut self.agents;
        let fitness = &mut self.fitness;
        let reward = self.config.survival_reward;

        let mut crashed: Vec<AgentId> = Vec::new();
        for (id, lane) in self.live.iter_mut() {
            let agent = &mut agents[lane.slot];
            let perception = perceive(agent, world);
            let action = lane.policy.decide(&perception);
            *agent = advance(agent, &action);

            let f = &mut fitness[lane.slot];
            f.score += reward;
            f.ticks_alive += 1;

            if collides(agent, &world.obstacles) {
                crashed.push(id);
            }
        }

        let tick = self.world.tick;
        let mut eliminated = Vec::with_capacity(crashed.len());
        for id in crashed {
            if let Some(lane) = self.live.remove(id) {
                self.agents[lane.slot].alive = false;
                let f = &mut self.fitness[lane.slot];
                f.score -= self.config.elimination_penalty;
                f.eliminated_at = Some(tick);
                eliminated.push(lane.slot);
            }
        }
        eliminated.sort_unstable();

        if !eliminated.is_empty() {
            debug!(
                generation = self.number,
                tick,
                eliminated = eliminated.len(),
                live = self.live.len(),
                "agents eliminated"
            );
        }

        TickReport {
            tick,
            eliminated,
            live: self.live.len(),
            complete: self.live.is_empty(),
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            tick: self.world.tick,
            generation: self.number,
            score: self.display_score(),
            scroll_speed: self.world.scroll_speed,
            agents: &self.agents,
            obstacles: &self.world.obstacles,
            live: self.live.len(),
            debug_overlay: self.debug_overlay,
        }
    }

    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            number: self.number,
            fitness: self.fitness.clone(),
            ticks: self.world.tick,
            score: self.display_score(),
            spawns: self.world.timeline.len(),
            timeline_digest: hash_timeline(&self.world.timeline),
        }
    }

    /// Tick until every agent is eliminated or the sink asks to quit.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> GenerationOutcome {
        while !self.is_complete() {
            self.tick();
            match sink.present(&self.snapshot()) {
                SinkSignal::Continue => {}
                SinkSignal::ToggleDebug => self.toggle_debug_overlay(),
                SinkSignal::Quit => {
                    info!(generation = self.number, tick = self.world.tick, "generation aborted");
                    return GenerationOutcome::Quit;
                }
            }
        }

        let summary = self.summary();
        info!(
            generation = summary.number,
            population = summary.fitness.len(),
            ticks = summary.ticks,
            spawns = summary.spawns,
            best = summary.best(),
            timeline = %to_hex(&summary.timeline_digest),
            "generation complete"
        );
        GenerationOutcome::Complete(summary)
    }
}

/// Headless evaluation: one fitness value per policy, in input order.
pub fn run_generation<P: DecisionPolicy>(policies: Vec<P>, config: &RunConfig) -> Vec<Fitness> {
    match run_generation_with(policies, config, 1, &mut NullSink) {
        GenerationOutcome::Complete(summary) => summary.fitness,
        // NullSink never quits.
        GenerationOutcome::Quit => Vec::new(),
    }
}

pub fn run_generation_with<P: DecisionPolicy>(
    policies: Vec<P>,
    config: &RunConfig,
    number: u32,
    sink: &mut dyn FrameSink,
) -> GenerationOutcome {
    Generation::new(number, policies, config).run(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::init::default_config;
    use crate::policy::{FunctionPolicy, IdlePolicy};

    fn staged_barrier(x: f64) -> Obstacle {
        Obstacle {
            x,
            ..Obstacle::spawn(ObstacleKind::SmallBarrier { variant: 0 })
        }
    }

    #[test]
    fn idle_population_eliminated_together() {
        let config = default_config(42);
        let mut g = Generation::new(1, vec![IdlePolicy; 8], &config);
        g.world_mut().obstacles.push(staged_barrier(400.0));

        let mut reports = Vec::new();
        while !g.is_complete() {
            let r = g.tick();
            if !r.eliminated.is_empty() {
                reports.push(r);
            }
            assert!(g.world().tick < 1000);
        }
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].eliminated, (0..8).collect::<Vec<_>>());
        assert!(reports[0].complete);

        let fitness = g.fitness();
        assert_eq!(fitness.len(), 8);
        assert!(fitness.iter().all(|f| f == &fitness[0]));
        assert!(g.agents().iter().all(|a| !a.alive));
    }

    #[test]
    fn fitness_reward_and_penalty() {
        let config = default_config(42);
        let mut g = Generation::new(1, vec![IdlePolicy], &config);
        g.world_mut().obstacles.push(staged_barrier(AGENT_X + 20.0));
        let r = g.tick();
        assert_eq!(r.eliminated, vec![0]);
        let f = g.fitness()[0];
        assert!((f.score - (SURVIVAL_REWARD - ELIMINATION_PENALTY)).abs() < 1e-12);
        assert_eq!(f.ticks_alive, 1);
        assert_eq!(f.eliminated_at, Some(1));
    }

    #[test]
    fn fitness_frozen_after_elimination() {
        let config = default_config(7);
        // A low flyer clips the idle runner; the ducker passes under it.
        let policies: Vec<Box<dyn DecisionPolicy>> = vec![
            Box::new(IdlePolicy),
            Box::new(FunctionPolicy::new(|_: &Perception| [0.0, 1.0])),
        ];
        let mut g = Generation::new(1, policies, &config);
        g.world_mut().obstacles.push(Obstacle {
            x: 400.0,
            ..Obstacle::spawn(ObstacleKind::FlyingHazard { cursor: 0 })
        });

        let mut frozen = None;
        while !g.is_complete() {
            g.tick();
            let f = g.fitness()[0];
            match frozen {
                None if f.is_frozen() => {
                    assert!(g.agent(1).is_some_and(|a| a.alive));
                    frozen = Some(f);
                }
                Some(prev) => assert_eq!(f, prev),
                None => {}
            }
        }
        let f = g.fitness();
        assert!(f[0].eliminated_at < f[1].eliminated_at);
        assert!(f[1].score > f[0].score);
    }

    #[test]
    fn returns_one_fitness_per_policy_in_order() {
        let config = default_config(5);
        let policies: Vec<Box<dyn DecisionPolicy>> = vec![
            Box::new(IdlePolicy),
            Box::new(FunctionPolicy::new(|_: &Perception| [f64::NAN, f64::NAN])),
            Box::new(IdlePolicy),
        ];
        let fitness = run_generation(policies, &config);
        assert_eq!(fitness.len(), 3);
        // NaN outputs behave exactly like no action.
        assert_eq!(fitness[0], fitness[1]);
        assert_eq!(fitness[1], fitness[2]);
    }

    #[test]
    fn empty_population_is_complete_immediately() {
        let config = default_config(5);
        let fitness = run_generation(Vec::<IdlePolicy>::new(), &config);
        assert!(fitness.is_empty());
    }

    #[test]
    fn completed_generation_does_not_tick() {
        let config = default_config(5);
        let mut g = Generation::new(1, vec![IdlePolicy], &config);
        while !g.tick().complete {}
        let world = g.world().clone();
        let r = g.tick();
        assert!(r.complete);
        assert_eq!(g.world(), &world);
    }

    #[test]
    fn sink_quit_aborts() {
        struct QuitAfter(u32);
        impl FrameSink for QuitAfter {
            fn present(&mut self, frame: &FrameSnapshot<'_>) -> SinkSignal {
                if frame.tick >= self.0 {
                    SinkSignal::Quit
                } else {
                    SinkSignal::Continue
                }
            }
        }
        let config = default_config(5);
        let outcome =
            run_generation_with(vec![IdlePolicy; 2], &config, 3, &mut QuitAfter(1));
        assert_eq!(outcome, GenerationOutcome::Quit);
    }

    #[test]
    fn sink_toggles_debug_overlay() {
        struct Toggle {
            seen: Vec<bool>,
        }
        impl FrameSink for Toggle {
            fn present(&mut self, frame: &FrameSnapshot<'_>) -> SinkSignal {
                self.seen.push(frame.debug_overlay);
                if frame.tick == 1 {
                    SinkSignal::ToggleDebug
                } else {
                    SinkSignal::Continue
                }
            }
        }
        let config = default_config(5);
        let mut sink = Toggle { seen: Vec::new() };
        let outcome = run_generation_with(vec![IdlePolicy], &config, 1, &mut sink);
        assert!(matches!(outcome, GenerationOutcome::Complete(_)));
        assert!(sink.seen.len() > 2);
        assert!(!sink.seen[0]);
        assert!(sink.seen[1..].iter().all(|&d| d));
    }

    #[test]
    fn summary_reports_timeline() {
        let config = default_config(21);
        let a = match run_generation_with(vec![IdlePolicy; 3], &config, 4, &mut NullSink) {
            GenerationOutcome::Complete(s) => s,
            GenerationOutcome::Quit => panic!("null sink quit"),
        };
        let b = match run_generation_with(vec![IdlePolicy; 3], &config, 4, &mut NullSink) {
            GenerationOutcome::Complete(s) => s,
            GenerationOutcome::Quit => panic!("null sink quit"),
        };
        assert_eq!(a.number, 4);
        assert!(a.spawns >= 1);
        assert_eq!(a.score, (a.ticks as f64 * SCORE_INCREMENT) as u64);
        assert_eq!(a, b);
    }
}
