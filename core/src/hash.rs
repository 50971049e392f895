use sha2::{Digest, Sha256};

use crate::types::{ObstacleKind, Seed, SpawnEvent};

/// SHA-256 of an obstacle timeline: spawn tick, kind tag and variant per event.
pub fn hash_timeline(timeline: &[SpawnEvent]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for event in timeline {
        let (tag, variant) = match event.kind {
            ObstacleKind::SmallBarrier { variant } => (0u8, variant),
            ObstacleKind::LargeBarrier { variant } => (1u8, variant),
            ObstacleKind::FlyingHazard { .. } => (2u8, 0),
        };
        hasher.update(event.tick.to_le_bytes());
        hasher.update([tag, variant]);
    }
    hasher.finalize().into()
}

/// SHA-256 commitment of the seed.
pub fn hash_seed(seed: Seed) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.finalize().into()
}

/// Lowercase hex, for logs.
pub fn to_hex(digest: &[u8; 32]) -> String {
    hex::encode(digest)
}
