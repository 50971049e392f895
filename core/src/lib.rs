pub mod collision;
pub mod constants;
pub mod harness;
pub mod hash;
pub mod init;
pub mod mask;
pub mod network;
pub mod obstacles;
pub mod perception;
pub mod physics;
pub mod policy;
pub mod prng;
pub mod session;
pub mod sprites;
pub mod step;
pub mod training;
pub mod types;

pub use collision::collides;
pub use constants::*;
pub use harness::{
    run_generation, run_generation_with, AgentId, FrameSink, FrameSnapshot, Generation,
    GenerationOutcome, GenerationSummary, NullSink, SinkSignal, TickReport,
};
pub use hash::*;
pub use init::*;
pub use network::{FeedForward, NetworkError};
pub use obstacles::maybe_spawn;
pub use perception::perceive;
pub use physics::advance;
pub use policy::*;
pub use prng::*;
pub use session::{PlaySession, SessionOutcome};
pub use sprites::{sprites, SpriteId};
pub use step::step_world;
pub use training::{train, Candidate, GenerationStats, Optimizer, TrainingReport};
pub use types::*;
