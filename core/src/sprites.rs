//! Built-in silhouettes for the runner and every obstacle variant.
//!
//! Only the occupancy matters to the simulation; pixel colours belong to the
//! renderer. Each silhouette is assembled from blocks so that its bounding box
//! keeps empty corners, like the hand-drawn sprites it stands in for.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::mask::{block, Block, Mask};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Run(u8),
    Jump,
    Duck(u8),
    SmallBarrier(u8),
    LargeBarrier(u8),
    FlyingHazard(u8),
}

pub struct SpriteSet {
    run: [Mask; 2],
    jump: Mask,
    duck: [Mask; 2],
    small: [Mask; 3],
    large: [Mask; 3],
    flying: [Mask; 2],
}

impl SpriteSet {
    /// Out-of-range frame or variant indices wrap.
    pub fn mask(&self, id: SpriteId) -> &Mask {
        match id {
            SpriteId::Run(f) => &self.run[f as usize % 2],
            SpriteId::Jump => &self.jump,
            SpriteId::Duck(f) => &self.duck[f as usize % 2],
            SpriteId::SmallBarrier(v) => &self.small[v as usize % 3],
            SpriteId::LargeBarrier(v) => &self.large[v as usize % 3],
            SpriteId::FlyingHazard(f) => &self.flying[f as usize % 2],
        }
    }

    /// (width, height) of a sprite's bounding box.
    pub fn size(&self, id: SpriteId) -> (f64, f64) {
        let m = self.mask(id);
        (m.width() as f64, m.height() as f64)
    }
}

static SPRITES: OnceLock<SpriteSet> = OnceLock::new();

/// Shared, lazily built sprite set.
pub fn sprites() -> &'static SpriteSet {
    SPRITES.get_or_init(build)
}

fn build() -> SpriteSet {
    SpriteSet {
        run: [runner(true), runner(false)],
        jump: runner_airborne(),
        duck: [ducker(true), ducker(false)],
        small: [barrier(40, 71, 1), barrier(68, 71, 2), barrier(105, 71, 3)],
        large: [barrier(48, 95, 1), barrier(99, 95, 2), barrier(102, 95, 3)],
        flying: [flyer_wings_up(), flyer_wings_down()],
    }
}

// ── Runner ──────────────────────────────────────────────────

const RUNNER_W: u32 = 87;
const RUNNER_H: u32 = 94;

fn runner_torso() -> Vec<Block> {
    vec![
        block(44, 0, 43, 30),  // head
        block(20, 26, 46, 38), // body
        block(0, 34, 22, 22),  // tail
        block(60, 40, 12, 12), // arm
    ]
}

fn runner(left_down: bool) -> Mask {
    let mut blocks = runner_torso();
    let (left, right) = if left_down { (30, 20) } else { (20, 30) };
    blocks.push(block(26, 64, 10, left));
    blocks.push(block(50, 64, 8, right));
    Mask::from_blocks(RUNNER_W, RUNNER_H, &blocks)
}

fn runner_airborne() -> Mask {
    let mut blocks = runner_torso();
    blocks.push(block(26, 64, 10, 30));
    blocks.push(block(50, 64, 8, 30));
    Mask::from_blocks(RUNNER_W, RUNNER_H, &blocks)
}

const DUCKER_W: u32 = 118;
const DUCKER_H: u32 = 60;

fn ducker(left_down: bool) -> Mask {
    let (left, right) = if left_down { (16, 8) } else { (8, 16) };
    Mask::from_blocks(
        DUCKER_W,
        DUCKER_H,
        &[
            block(78, 0, 40, 26), // head
            block(10, 8, 76, 36), // body
            block(0, 12, 14, 16), // tail
            block(30, 44, 10, left),
            block(60, 44, 8, right),
        ],
    )
}

// ── Obstacles ───────────────────────────────────────────────

/// A row of `stems` saguaro-like stems, each with a trunk and two arms.
fn barrier(width: u32, height: u32, stems: u32) -> Mask {
    let stem_w = width / stems;
    let trunk_w = (stem_w / 3).max(6);
    let arm_w = (stem_w / 8).max(3);
    let mut blocks = Vec::new();
    for s in 0..stems {
        let sx = s * stem_w;
        let trunk_x = sx + (stem_w - trunk_w) / 2;
        blocks.push(block(trunk_x, 2, trunk_w, height - 2));
        // left arm: upright then elbow into the trunk
        let left_x = sx + 1;
        blocks.push(block(left_x, height / 5, arm_w, height * 3 / 10));
        blocks.push(block(left_x, height / 2 - arm_w, trunk_x - left_x, arm_w));
        // right arm sits a little higher
        let right_x = (trunk_x + trunk_w + (stem_w - trunk_w) / 2).saturating_sub(arm_w + 1);
        blocks.push(block(right_x, height / 6, arm_w, height / 4));
        blocks.push(block(
            trunk_x + trunk_w,
            height / 6 + height / 4 - arm_w,
            right_x.saturating_sub(trunk_x + trunk_w) + arm_w,
            arm_w,
        ));
    }
    Mask::from_blocks(width, height, &blocks)
}

fn flyer_wings_up() -> Mask {
    Mask::from_blocks(
        97,
        68,
        &[
            block(0, 24, 16, 8),   // beak
            block(8, 18, 20, 16),  // head
            block(14, 26, 70, 18), // body
            block(40, 0, 24, 28),  // wing
            block(80, 28, 17, 10), // tail
        ],
    )
}

fn flyer_wings_down() -> Mask {
    Mask::from_blocks(
        93,
        62,
        &[
            block(0, 18, 16, 8),   // beak
            block(8, 12, 20, 16),  // head
            block(14, 20, 68, 18), // body
            block(40, 36, 22, 26), // wing
            block(78, 22, 15, 10), // tail
        ],
    )
}
