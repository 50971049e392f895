// All values are per-tick at 60 Hz unless noted.

// Screen
pub const SCREEN_WIDTH: f64 = 1100.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Tick rate
pub const TICK_RATE: u32 = 60;

// World clock
pub const INITIAL_SCROLL_SPEED: f64 = 20.0;
pub const SCROLL_SPEED_INCREMENT: f64 = 0.001;
pub const SCORE_INCREMENT: f64 = 0.25;

// Runner placement (top-left of the sprite)
pub const AGENT_X: f64 = 80.0;
pub const RUN_Y: f64 = 310.0;
pub const DUCK_Y: f64 = 340.0;

// Jump arc: y -= v * SCALE; v -= DECAY; ends once v < -IMPULSE
pub const JUMP_IMPULSE: f64 = 8.5;
pub const JUMP_DECAY: f64 = 0.8;
pub const JUMP_DISPLACEMENT_SCALE: f64 = 4.0;

// Run/duck animation
pub const ANIMATION_CYCLE: u8 = 10;
pub const ANIMATION_FRAME_TICKS: u8 = 5;

// Obstacle baselines
pub const SMALL_BARRIER_Y: f64 = 325.0;
pub const LARGE_BARRIER_Y: f64 = 300.0;
pub const FLYING_HAZARD_Y: f64 = 250.0;
pub const FLYING_HAZARD_FRAME_TICKS: u32 = 5;

// Spawn policy
pub const OBSTACLE_CAP: usize = 2;
pub const SPAWN_ROLL_MAX: i32 = 60;
pub const SPAWN_SENTINEL: i32 = 0;
pub const BARRIER_VARIANTS: u8 = 3;

// Fitness shaping
pub const SURVIVAL_REWARD: f64 = 0.1;
pub const ELIMINATION_PENALTY: f64 = 1.0;

// Perception normalisation
pub const FEATURE_SIZE_DIVISOR: f64 = 100.0;
pub const FEATURE_SPEED_DIVISOR: f64 = 50.0;
pub const FEATURE_COUNT: usize = 5;
pub const ACTION_COUNT: usize = 2;
pub const ACTION_THRESHOLD: f64 = 0.5;

// Training
pub const DEFAULT_MAX_GENERATIONS: u32 = 50;

/// Number of physics ticks a jump started on the ground stays airborne.
pub fn jump_duration_ticks() -> u32 {
    (2.0 * JUMP_IMPULSE / JUMP_DECAY).floor() as u32 + 1
}
