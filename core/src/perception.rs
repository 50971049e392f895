use crate::constants::*;
use crate::types::*;

/// Nearest obstacle strictly ahead of the agent.
pub fn nearest_ahead<'a>(a: &Agent, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .filter(|o| o.x > a.x)
        .min_by(|l, r| (l.x - a.x).total_cmp(&(r.x - a.x)))
}

/// Feature vector handed to the agent's policy. All zeros when nothing is ahead.
pub fn perceive(a: &Agent, world: &WorldState) -> Perception {
    let Some(o) = nearest_ahead(a, &world.obstacles) else {
        return Perception::ZERO;
    };
    Perception([
        (o.x - a.x) / SCREEN_WIDTH,
        o.width() / FEATURE_SIZE_DIVISOR,
        o.height() / FEATURE_SIZE_DIVISOR,
        a.y / SCREEN_HEIGHT,
        world.scroll_speed / FEATURE_SPEED_DIVISOR,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_agent, create_world, default_config};

    fn at(kind: ObstacleKind, x: f64) -> Obstacle {
        Obstacle {
            x,
            ..Obstacle::spawn(kind)
        }
    }

    #[test]
    fn empty_world_is_all_zero() {
        let world = create_world(&default_config(1));
        assert_eq!(perceive(&create_agent(), &world), Perception::ZERO);
    }

    #[test]
    fn obstacles_behind_are_ignored() {
        let mut world = create_world(&default_config(1));
        world.obstacles.push(at(ObstacleKind::SmallBarrier { variant: 0 }, 10.0));
        world.obstacles.push(at(ObstacleKind::SmallBarrier { variant: 0 }, AGENT_X));
        assert_eq!(perceive(&create_agent(), &world), Perception::ZERO);
    }

    #[test]
    fn picks_nearest_ahead() {
        let mut world = create_world(&default_config(1));
        world.obstacles.push(at(ObstacleKind::LargeBarrier { variant: 1 }, 900.0));
        world.obstacles.push(at(ObstacleKind::SmallBarrier { variant: 0 }, 300.0));
        world.obstacles.push(at(ObstacleKind::FlyingHazard { cursor: 0 }, 50.0));
        let p = perceive(&create_agent(), &world);
        assert!((p.distance() - 220.0 / 1100.0).abs() < 1e-12);
        assert!((p.obstacle_width() - 0.40).abs() < 1e-12);
        assert!((p.obstacle_height() - 0.71).abs() < 1e-12);
        assert!((p.agent_y() - 310.0 / 600.0).abs() < 1e-12);
        assert!((p.scroll_speed() - 20.0 / 50.0).abs() < 1e-12);
    }
}
