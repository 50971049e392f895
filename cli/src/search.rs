//! Reference optimizer: a (1 + λ) hill climber over network weights.
//!
//! Each generation evaluates the current elite alongside mutated copies of
//! it; whichever scores best on that generation's course becomes the elite.

use dinorun_core::{prng_next, prng_signed, Candidate, FeedForward, NetworkError, Optimizer};
use tracing::debug;

use crate::config::TrainerConfig;

/// Offsets the weight stream away from the obstacle stream for the same seed.
const WEIGHT_STREAM: u32 = 0x9E37_79B9;

pub struct HillClimber {
    population: usize,
    mutation_rate: f64,
    mutation_power: f64,
    rng_state: u32,
    elite: FeedForward,
    elite_fitness: Option<f64>,
    pending: Vec<(u64, FeedForward)>,
    next_id: u64,
}

impl HillClimber {
    pub fn new(config: &TrainerConfig, seed: u32) -> Result<Self, NetworkError> {
        let mut rng_state = seed.wrapping_add(WEIGHT_STREAM);
        let weights = (0..FeedForward::weight_count(config.hidden_units))
            .map(|_| {
                let (w, next) = prng_signed(rng_state);
                rng_state = next;
                w
            })
            .collect();
        let elite = FeedForward::from_weights(config.hidden_units, weights)?;
        Ok(HillClimber {
            population: config.population_size.max(1),
            mutation_rate: config.mutation_rate,
            mutation_power: config.mutation_power,
            rng_state,
            elite,
            elite_fitness: None,
            pending: Vec::new(),
            next_id: 0,
        })
    }

    pub fn best(&self) -> &FeedForward {
        &self.elite
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.elite_fitness
    }

    fn mutate(&mut self, parent: &FeedForward) -> FeedForward {
        let mut weights = parent.weights().to_vec();
        for w in &mut weights {
            let (roll, next) = prng_next(self.rng_state);
            self.rng_state = next;
            if roll < self.mutation_rate {
                let (delta, next) = prng_signed(self.rng_state);
                self.rng_state = next;
                *w += delta * self.mutation_power;
            }
        }
        FeedForward::from_weights(parent.hidden(), weights)
            .unwrap_or_else(|_| parent.clone())
    }

    fn issue(&mut self, net: FeedForward) -> Candidate {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push((id, net.clone()));
        Candidate {
            id,
            policy: Box::new(net.into_policy()),
        }
    }
}

impl Optimizer for HillClimber {
    fn propose(&mut self, generation: u32) -> Vec<Candidate> {
        self.pending.clear();
        let elite = self.elite.clone();
        let mut candidates = Vec::with_capacity(self.population);
        candidates.push(self.issue(elite.clone()));
        while candidates.len() < self.population {
            let child = self.mutate(&elite);
            candidates.push(self.issue(child));
        }
        debug!(generation, candidates = candidates.len(), "proposed");
        candidates
    }

    fn receive(&mut self, generation: u32, results: &[(u64, f64)]) {
        let Some(&(best_id, best)) = results.iter().max_by(|a, b| a.1.total_cmp(&b.1)) else {
            return;
        };
        if let Some((_, net)) = self.pending.iter().find(|(id, _)| *id == best_id) {
            self.elite = net.clone();
            self.elite_fitness = Some(best);
            debug!(generation, id = best_id, fitness = best, "new elite");
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinorun_core::{default_config, train, NullSink};

    fn small() -> TrainerConfig {
        TrainerConfig {
            population_size: 6,
            hidden_units: 3,
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn proposes_elite_plus_mutants() {
        let mut climber = HillClimber::new(&small(), 1).unwrap();
        let candidates = climber.propose(1);
        assert_eq!(candidates.len(), 6);
        let ids: Vec<u64> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(&climber.pending[0].1, climber.best());
        assert!(climber.pending[1..].iter().any(|(_, n)| n != climber.best()));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = HillClimber::new(&small(), 9).unwrap();
        let b = HillClimber::new(&small(), 9).unwrap();
        let c = HillClimber::new(&small(), 10).unwrap();
        assert_eq!(a.best(), b.best());
        assert_ne!(a.best(), c.best());
        assert!(a.best().weights().iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn receive_promotes_best_candidate() {
        let mut climber = HillClimber::new(&small(), 3).unwrap();
        let _ = climber.propose(1);
        let winner = climber.pending[4].1.clone();
        let results: Vec<(u64, f64)> = (0..6)
            .map(|id| (id, if id == 4 { 9.0 } else { 1.0 }))
            .collect();
        climber.receive(1, &results);
        assert_eq!(climber.best(), &winner);
        assert_eq!(climber.best_fitness(), Some(9.0));
    }

    #[test]
    fn zero_rate_never_mutates() {
        let config = TrainerConfig {
            mutation_rate: 0.0,
            ..small()
        };
        let mut climber = HillClimber::new(&config, 5).unwrap();
        let _ = climber.propose(1);
        assert!(climber.pending.iter().all(|(_, n)| n == climber.best()));
    }

    #[test]
    fn trains_against_the_harness() {
        let mut climber = HillClimber::new(&small(), 2).unwrap();
        let report = train(&mut climber, &default_config(2), 3, &mut NullSink);
        assert_eq!(report.generations.len(), 3);
        let last = report.generations.last().unwrap();
        assert_eq!(climber.best_fitness(), Some(last.best));
    }
}
