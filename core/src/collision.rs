use crate::sprites::sprites;
use crate::types::*;

/// Pixel offset of `o`'s origin relative to `a`'s origin.
///
/// Rounded from the difference, not from each position, so the result only
/// depends on relative placement.
pub fn offset(a: &Agent, o: &Obstacle) -> (i32, i32) {
    ((o.x - a.x).floor() as i32, (o.y - a.y).floor() as i32)
}

/// Silhouette overlap between the agent's current frame and one obstacle.
pub fn overlaps(a: &Agent, o: &Obstacle) -> bool {
    let set = sprites();
    let (dx, dy) = offset(a, o);
    set.mask(a.sprite()).overlap(set.mask(o.sprite()), dx, dy)
}

/// True as soon as any obstacle overlaps the agent.
pub fn collides(a: &Agent, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| overlaps(a, o))
}
