use crate::constants::*;
use crate::types::*;

/// Default run config: 60 Hz, speed 20 rising by 0.001 per tick.
pub fn default_config(seed: Seed) -> RunConfig {
    RunConfig {
        seed,
        tick_rate: TICK_RATE,
        initial_scroll_speed: INITIAL_SCROLL_SPEED,
        scroll_speed_increment: SCROLL_SPEED_INCREMENT,
        score_increment: SCORE_INCREMENT,
        survival_reward: SURVIVAL_REWARD,
        elimination_penalty: ELIMINATION_PENALTY,
    }
}

/// Fresh world: no obstacles, clock at zero, PRNG seeded from the config.
pub fn create_world(config: &RunConfig) -> WorldState {
    WorldState {
        tick: 0,
        scroll_speed: config.initial_scroll_speed,
        tick_score: 0.0,
        obstacles: Vec::new(),
        rng_state: config.seed,
        timeline: Vec::new(),
    }
}

/// Runner standing on the ground at the fixed column, ready to jump.
pub fn create_agent() -> Agent {
    Agent {
        x: AGENT_X,
        y: RUN_Y,
        vertical_velocity: JUMP_IMPULSE,
        pose: Pose::Running,
        animation_index: 0,
        frame: 0,
        alive: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_world_correct() {
        let config = default_config(42);
        let world = create_world(&config);
        assert_eq!(world.tick, 0);
        assert_eq!(world.scroll_speed, INITIAL_SCROLL_SPEED);
        assert_eq!(world.tick_score, 0.0);
        assert!(world.obstacles.is_empty());
        assert!(world.timeline.is_empty());
        assert_eq!(world.rng_state, 42);
    }

    #[test]
    fn initial_agent_on_ground() {
        let agent = create_agent();
        assert_eq!(agent.x, 80.0);
        assert_eq!(agent.y, RUN_Y);
        assert_eq!(agent.pose, Pose::Running);
        assert_eq!(agent.vertical_velocity, JUMP_IMPULSE);
        assert!(agent.alive);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = default_config(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
