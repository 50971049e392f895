use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::sprites::{sprites, SpriteId};

// ── Primitives ──────────────────────────────────────────────

pub type Tick = u32;
pub type Seed = u32;

// ── Action ──────────────────────────────────────────────────

/// Two independent intents produced by a policy each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSignal {
    pub wants_up: bool,
    pub wants_down: bool,
}

pub const NO_ACTION: ActionSignal = ActionSignal {
    wants_up: false,
    wants_down: false,
};

pub const UP: ActionSignal = ActionSignal {
    wants_up: true,
    wants_down: false,
};

pub const DOWN: ActionSignal = ActionSignal {
    wants_up: false,
    wants_down: true,
};

/// Normalised view of the nearest obstacle ahead plus the agent's own status:
/// [distance, width, height, agent_y, scroll_speed].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Perception(pub [f64; FEATURE_COUNT]);

impl Perception {
    pub const ZERO: Perception = Perception([0.0; FEATURE_COUNT]);

    pub fn distance(&self) -> f64 {
        self.0[0]
    }

    pub fn obstacle_width(&self) -> f64 {
        self.0[1]
    }

    pub fn obstacle_height(&self) -> f64 {
        self.0[2]
    }

    pub fn agent_y(&self) -> f64 {
        self.0[3]
    }

    pub fn scroll_speed(&self) -> f64 {
        self.0[4]
    }
}

// ── Obstacle ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// `variant` picks one of three silhouettes.
    SmallBarrier { variant: u8 },
    LargeBarrier { variant: u8 },
    /// `cursor` counts ticks since spawn and drives the wing frame.
    FlyingHazard { cursor: u32 },
}

impl ObstacleKind {
    /// Fixed vertical placement for this kind.
    pub fn baseline(&self) -> f64 {
        match self {
            ObstacleKind::SmallBarrier { .. } => SMALL_BARRIER_Y,
            ObstacleKind::LargeBarrier { .. } => LARGE_BARRIER_Y,
            ObstacleKind::FlyingHazard { .. } => FLYING_HAZARD_Y,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match *self {
            ObstacleKind::SmallBarrier { variant } => SpriteId::SmallBarrier(variant),
            ObstacleKind::LargeBarrier { variant } => SpriteId::LargeBarrier(variant),
            ObstacleKind::FlyingHazard { cursor } => {
                SpriteId::FlyingHazard(((cursor / FLYING_HAZARD_FRAME_TICKS) % 2) as u8)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::SmallBarrier { .. } => "small_barrier",
            ObstacleKind::LargeBarrier { .. } => "large_barrier",
            ObstacleKind::FlyingHazard { .. } => "flying_hazard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
}

impl Obstacle {
    /// New obstacle at the right edge of the screen on its kind's baseline.
    pub fn spawn(kind: ObstacleKind) -> Self {
        Obstacle {
            kind,
            x: SCREEN_WIDTH,
            y: kind.baseline(),
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.kind.sprite()
    }

    pub fn width(&self) -> f64 {
        sprites().size(self.sprite()).0
    }

    pub fn height(&self) -> f64 {
        sprites().size(self.sprite()).1
    }

    /// Fully past the left edge.
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.width()
    }
}

// ── Agent ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Running,
    Jumping,
    Ducking,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    pub vertical_velocity: f64,
    pub pose: Pose,
    /// Cycles 0..ANIMATION_CYCLE while running or ducking.
    pub animation_index: u8,
    /// Run/duck frame shown this tick (0 or 1).
    pub frame: u8,
    pub alive: bool,
}

impl Agent {
    pub fn sprite(&self) -> SpriteId {
        match self.pose {
            Pose::Running => SpriteId::Run(self.frame),
            Pose::Jumping => SpriteId::Jump,
            Pose::Ducking => SpriteId::Duck(self.frame),
        }
    }

    pub fn width(&self) -> f64 {
        sprites().size(self.sprite()).0
    }

    pub fn height(&self) -> f64 {
        sprites().size(self.sprite()).1
    }
}

// ── Fitness ─────────────────────────────────────────────────

/// Per-agent fitness signal handed back to the optimizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    pub score: f64,
    pub ticks_alive: Tick,
    /// World tick at which the agent collided, if it has.
    pub eliminated_at: Option<Tick>,
}

impl Fitness {
    pub fn is_frozen(&self) -> bool {
        self.eliminated_at.is_some()
    }
}

// ── World ───────────────────────────────────────────────────

/// One entry of the obstacle timeline shared by every agent of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub tick: Tick,
    pub kind: ObstacleKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Elapsed ticks.
    pub tick: Tick,
    pub scroll_speed: f64,
    /// Display score; independent of per-agent fitness.
    pub tick_score: f64,
    /// In spawn order.
    pub obstacles: Vec<Obstacle>,
    pub rng_state: u32,
    pub timeline: Vec<SpawnEvent>,
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub seed: Seed,
    pub tick_rate: u32,
    pub initial_scroll_speed: f64,
    pub scroll_speed_increment: f64,
    pub score_increment: f64,
    pub survival_reward: f64,
    pub elimination_penalty: f64,
}
