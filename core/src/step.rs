use crate::obstacles::{maybe_spawn, scroll_obstacles};
use crate::types::*;

/// What the shared world did during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldStep {
    pub spawned: Option<Obstacle>,
    pub removed: usize,
}

/// Advance scroll speed, display score and the tick counter.
pub fn advance_clock(world: &mut WorldState, config: &RunConfig) {
    world.scroll_speed += config.scroll_speed_increment;
    world.tick_score += config.score_increment;
    world.tick += 1;
}

/// Shared-world half of a tick. Agents are handled by the harness.
///
/// Sub-step order:
///  1. Clock (speed, display score, tick counter)
///  2. Spawn check; a new obstacle enters at the right edge
///  3. Animate + shift every obstacle by the advanced speed
///  4. Drop obstacles fully past the left edge
pub fn step_world(world: &mut WorldState, config: &RunConfig) -> WorldStep {
    advance_clock(world, config);
    let spawned = maybe_spawn(world);
    let removed = scroll_obstacles(world);
    WorldStep { spawned, removed }
}
