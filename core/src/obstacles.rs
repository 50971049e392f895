use tracing::debug;

use crate::constants::*;
use crate::prng::prng_int_range;
use crate::types::*;

/// Stochastic spawn check.
///
/// Fires when the field is empty, or when it is below the cap and a roll over
/// 0..=SPAWN_ROLL_MAX lands on the sentinel. At the cap no draw is consumed,
/// so the outcome there is independent of the PRNG state. The new obstacle is
/// appended to `world.obstacles` and logged in the timeline.
pub fn maybe_spawn(world: &mut WorldState) -> Option<Obstacle> {
    let count = world.obstacles.len();
    if count >= OBSTACLE_CAP {
        return None;
    }

    let mut rng_state = world.rng_state;
    if count > 0 {
        let (roll, next) = prng_int_range(rng_state, 0, SPAWN_ROLL_MAX);
        rng_state = next;
        if roll != SPAWN_SENTINEL {
            world.rng_state = rng_state;
            return None;
        }
    }

    let (kind, rng_state) = choose_kind(rng_state);
    world.rng_state = rng_state;

    let obstacle = Obstacle::spawn(kind);
    world.obstacles.push(obstacle);
    world.timeline.push(SpawnEvent {
        tick: world.tick,
        kind,
    });
    debug!(tick = world.tick, kind = kind.name(), "obstacle spawned");
    Some(obstacle)
}

/// Uniform over the three kinds; barriers also draw one of their variants.
fn choose_kind(rng_state: u32) -> (ObstacleKind, u32) {
    let (choice, rng_state) = prng_int_range(rng_state, 0, 2);
    match choice {
        0 => {
            let (v, rng_state) = pick_variant(rng_state);
            (ObstacleKind::SmallBarrier { variant: v }, rng_state)
        }
        1 => {
            let (v, rng_state) = pick_variant(rng_state);
            (ObstacleKind::LargeBarrier { variant: v }, rng_state)
        }
        _ => (ObstacleKind::FlyingHazard { cursor: 0 }, rng_state),
    }
}

fn pick_variant(rng_state: u32) -> (u8, u32) {
    let (v, next) = prng_int_range(rng_state, 0, BARRIER_VARIANTS as i32 - 1);
    (v as u8, next)
}

/// Advance animation and shift left by `speed`.
pub fn move_obstacle(o: &Obstacle, speed: f64) -> Obstacle {
    let kind = match o.kind {
        ObstacleKind::FlyingHazard { cursor } => ObstacleKind::FlyingHazard {
            cursor: cursor.wrapping_add(1),
        },
        other => other,
    };
    Obstacle {
        kind,
        x: o.x - speed,
        ..*o
    }
}

/// Shift every obstacle and drop those fully past the left edge.
/// Returns how many were removed.
pub fn scroll_obstacles(world: &mut WorldState) -> usize {
    let speed = world.scroll_speed;
    let before = world.obstacles.len();
    world.obstacles = world
        .obstacles
        .iter()
        .map(|o| move_obstacle(o, speed))
        .filter(|o| !o.is_off_screen())
        .collect();
    before - world.obstacles.len()
}
