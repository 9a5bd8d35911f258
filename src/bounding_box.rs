use crate::block_position::BlockPosition;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned box of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: BlockPosition,
    pub max: BlockPosition,
}

impl BoundingBox {
    /// Builds the box enclosing two arbitrary corners.
    pub fn from_corners(a: BlockPosition, b: BlockPosition) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn get_dimensions(&self) -> (u64, u64, u64) {
        (
            (self.max.x as i64 - self.min.x as i64 + 1) as u64,
            (self.max.y as i64 - self.min.y as i64 + 1) as u64,
            (self.max.z as i64 - self.min.z as i64 + 1) as u64,
        )
    }

    /// Number of cells, computed in `u64` so boxes spanning the full `i32`
    /// range do not overflow.
    pub fn volume(&self) -> u64 {
        let (w, h, l) = self.get_dimensions();
        w.saturating_mul(h).saturating_mul(l)
    }

    pub fn contains(&self, pos: BlockPosition) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    pub fn for_each_point<F>(&self, mut f: F)
    where
        F: FnMut(BlockPosition),
    {
        for x in self.min.x..=self.max.x {
            for y in self.min.y..=self.max.y {
                for z in self.min.z..=self.max.z {
                    f(BlockPosition::new(x, y, z));
                }
            }
        }
    }
}
