use crate::constants::*;
use crate::types::*;

/// Vertical baseline the agent is pinned to while in `pose` on the ground.
pub fn baseline(pose: Pose) -> f64 {
    match pose {
        Pose::Ducking => DUCK_Y,
        Pose::Running | Pose::Jumping => RUN_Y,
    }
}

/// Jumps only start from the running baseline; a ducking agent must stand up first.
pub fn on_ground(a: &Agent) -> bool {
    a.pose != Pose::Jumping && a.y == RUN_Y
}

/// One tick of the run/jump/duck state machine.
///
/// Precedence: an active jump always continues; otherwise up (from the
/// ground) starts a jump, down ducks, and anything else runs.
pub fn advance(a: &Agent, action: &ActionSignal) -> Agent {
    if !a.alive {
        return *a;
    }

    if a.pose == Pose::Jumping {
        return continue_jump(a);
    }

    if action.wants_up && on_ground(a) {
        // Lift-off happens on the next tick.
        return Agent {
            pose: Pose::Jumping,
            vertical_velocity: JUMP_IMPULSE,
            ..*a
        };
    }

    if action.wants_down {
        return stride(a, Pose::Ducking);
    }

    stride(a, Pose::Running)
}

fn continue_jump(a: &Agent) -> Agent {
    let y = a.y - a.vertical_velocity * JUMP_DISPLACEMENT_SCALE;
    let vertical_velocity = a.vertical_velocity - JUMP_DECAY;

    if vertical_velocity < -JUMP_IMPULSE || y > RUN_Y {
        // Landed: back on the running baseline, impulse primed for the next jump.
        return Agent {
            y: RUN_Y,
            vertical_velocity: JUMP_IMPULSE,
            pose: Pose::Running,
            ..*a
        };
    }

    Agent {
        y,
        vertical_velocity,
        ..*a
    }
}

/// Ground locomotion: pin to the pose baseline and advance the animation.
fn stride(a: &Agent, pose: Pose) -> Agent {
    Agent {
        y: baseline(pose),
        pose,
        frame: a.animation_index / ANIMATION_FRAME_TICKS,
        animation_index: (a.animation_index + 1) % ANIMATION_CYCLE,
        ..*a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_agent;

    fn jump_from_ground() -> (Agent, Vec<Agent>) {
        let start = advance(&create_agent(), &UP);
        let mut arc = Vec::new();
        let mut a = start;
        while a.pose == Pose::Jumping {
            a = advance(&a, &NO_ACTION);
            arc.push(a);
            assert!(arc.len() < 100, "jump never landed");
        }
        (start, arc)
    }

    #[test]
    fn up_on_ground_starts_jump() {
        let a = advance(&create_agent(), &UP);
        assert_eq!(a.pose, Pose::Jumping);
        assert_eq!(a.vertical_velocity, JUMP_IMPULSE);
        assert_eq!(a.y, RUN_Y);
    }

    #[test]
    fn jump_returns_to_ground_after_fixed_ticks() {
        let (_, arc) = jump_from_ground();
        assert_eq!(arc.len() as u32, jump_duration_ticks());
        assert_eq!(jump_duration_ticks(), 22);
        let landed = arc.last().unwrap();
        assert_eq!(landed.y, RUN_Y);
        assert_eq!(landed.pose, Pose::Running);
        assert_eq!(landed.vertical_velocity, JUMP_IMPULSE);
        for a in &arc[..arc.len() - 1] {
            assert!(a.y < RUN_Y);
        }
    }

    #[test]
    fn jump_arc_is_repeatable() {
        let (_, first) = jump_from_ground();
        let (_, second) = jump_from_ground();
        assert_eq!(first, second);
    }

    #[test]
    fn jump_apex_height() {
        let (_, arc) = jump_from_ground();
        let apex = arc.iter().map(|a| a.y).fold(f64::INFINITY, f64::min);
        // 4 * (8.5 + 7.7 + ... + 0.5) = 198
        assert!((apex - (RUN_Y - 198.0)).abs() < 1e-9, "apex {apex}");
    }

    #[test]
    fn jump_cannot_be_cancelled() {
        let mut a = advance(&create_agent(), &UP);
        a = advance(&a, &NO_ACTION);
        let mid = advance(&a, &DOWN);
        assert_eq!(mid.pose, Pose::Jumping);
        assert!(mid.y < a.y);
    }

    #[test]
    fn down_ducks_and_pins_baseline() {
        let a = advance(&create_agent(), &DOWN);
        assert_eq!(a.pose, Pose::Ducking);
        assert_eq!(a.y, DUCK_Y);
        let b = advance(&a, &NO_ACTION);
        assert_eq!(b.pose, Pose::Running);
        assert_eq!(b.y, RUN_Y);
    }

    #[test]
    fn up_takes_precedence_over_down_on_ground() {
        let both = ActionSignal {
            wants_up: true,
            wants_down: true,
        };
        let a = advance(&create_agent(), &both);
        assert_eq!(a.pose, Pose::Jumping);
    }

    #[test]
    fn ducking_agent_stands_before_jumping() {
        let ducked = advance(&create_agent(), &DOWN);
        assert!(!on_ground(&ducked));
        let standing = advance(&ducked, &UP);
        assert_eq!(standing.pose, Pose::Running);
        assert_eq!(standing.y, RUN_Y);
        let jumping = advance(&standing, &UP);
        assert_eq!(jumping.pose, Pose::Jumping);
        assert_eq!(jumping.y, RUN_Y);
    }

    #[test]
    fn up_and_down_while_ducking_keeps_ducking() {
        let both = ActionSignal {
            wants_up: true,
            wants_down: true,
        };
        let ducked = advance(&create_agent(), &DOWN);
        let held = advance(&ducked, &both);
        assert_eq!(held.pose, Pose::Ducking);
        assert_eq!(held.y, DUCK_Y);
    }

    #[test]
    fn jump_after_duck_keeps_full_arc() {
        let ducked = advance(&create_agent(), &DOWN);
        let mut a = advance(&advance(&ducked, &UP), &UP);
        let mut apex = a.y;
        while a.pose == Pose::Jumping {
            a = advance(&a, &NO_ACTION);
            apex = apex.min(a.y);
        }
        let (_, arc) = jump_from_ground();
        let expected = arc.iter().map(|a| a.y).fold(f64::INFINITY, f64::min);
        assert_eq!(apex, expected);
    }

    #[test]
    fn animation_wraps_and_selects_frames() {
        let mut a = create_agent();
        let mut frames = Vec::new();
        for _ in 0..20 {
            a = advance(&a, &NO_ACTION);
            assert!(a.animation_index < ANIMATION_CYCLE);
            frames.push(a.frame);
        }
        assert_eq!(&frames[..10], &[0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(&frames[..10], &frames[10..]);
    }

    #[test]
    fn dead_agent_not_affected() {
        let mut a = create_agent();
        a.alive = false;
        assert_eq!(advance(&a, &UP), a);
        assert_eq!(advance(&a, &DOWN), a);
    }
}
