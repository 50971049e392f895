//! Pixel occupancy masks used for precise overlap tests.

/// Widest mask a row bitset can hold.
pub const MAX_MASK_WIDTH: u32 = 128;

/// Axis-aligned block of occupied cells, in mask-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub const fn block(x: u32, y: u32, width: u32, height: u32) -> Block {
    Block { x, y, width, height }
}

/// Occupancy bitmap. Bit `c` of `rows[r]` is the cell at column `c`, row `r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    rows: Vec<u128>,
}

impl Mask {
    /// Empty mask. Widths above `MAX_MASK_WIDTH` are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width: width.min(MAX_MASK_WIDTH),
            height,
            rows: vec![0; height as usize],
        }
    }

    /// Union of blocks, clipped to the mask bounds.
    pub fn from_blocks(width: u32, height: u32, blocks: &[Block]) -> Self {
        let mut mask = Mask::new(width, height);
        for b in blocks {
            mask.fill(*b);
        }
        mask
    }

    pub fn fill(&mut self, b: Block) {
        let x0 = b.x.min(self.width);
        let x1 = b.x.saturating_add(b.width).min(self.width);
        let y0 = b.y.min(self.height);
        let y1 = b.y.saturating_add(b.height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let span = x1 - x0;
        let bits = if span == MAX_MASK_WIDTH {
            u128::MAX
        } else {
            ((1u128 << span) - 1) << x0
        };
        for row in &mut self.rows[y0 as usize..y1 as usize] {
            *row |= bits;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.rows[y as usize] & (1u128 << x) != 0
    }

    /// Number of occupied cells.
    pub fn count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Whether `other`, placed with its origin at (dx, dy) in this mask's
    /// frame, shares at least one occupied cell with this mask.
    pub fn overlap(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        if dx >= self.width as i32
            || dy >= self.height as i32
            || dx + other.width as i32 <= 0
            || dy + other.height as i32 <= 0
        {
            return false;
        }

        let first = dy.max(0);
        let last = (dy + other.height as i32).min(self.height as i32);
        for r in first..last {
            let theirs = other.rows[(r - dy) as usize];
            // Shift is below MAX_MASK_WIDTH: |dx| < max(width) after the
            // bounds check above.
            let aligned = if dx >= 0 {
                theirs << dx as u32
            } else {
                theirs >> (-dx) as u32
            };
            if self.rows[r as usize] & aligned != 0 {
                return true;
            }
        }
        false
    }
}
