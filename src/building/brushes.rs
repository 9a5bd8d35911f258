use crate::block_position::BlockPosition;
use crate::block_state::BlockState;
use rand::Rng;

pub trait Brush {
    /// Get the block to place at `pos` for a fill whose selection starts at `origin`.
    fn get_block<R: Rng + ?Sized>(
        &self,
        pos: BlockPosition,
        origin: BlockPosition,
        rng: &mut R,
    ) -> BlockState;
}

/// A brush that places a single specific block
#[derive(Debug, Clone)]
pub struct SolidBrush {
    block: BlockState,
}

impl SolidBrush {
    pub fn new(block: BlockState) -> Self {
        Self { block }
    }
}

impl Brush for SolidBrush {
    fn get_block<R: Rng + ?Sized>(
        &self,
        _pos: BlockPosition,
        _origin: BlockPosition,
        _rng: &mut R,
    ) -> BlockState {
        self.block.clone()
    }
}

/// A brush that picks among several blocks with relative weights
#[derive(Debug, Clone)]
pub struct WeightedBrush {
    entries: Vec<(BlockState, u32)>,
    total_weight: u64,
}

impl WeightedBrush {
    /// Returns `None` when no entry carries a positive weight.
    pub fn new(entries: Vec<(BlockState, u32)>) -> Option<Self> {
        let entries: Vec<_> = entries.into_iter().filter(|(_, w)| *w > 0).collect();
        let total_weight = entries.iter().map(|(_, w)| *w as u64).sum();
        if total_weight == 0 {
            return None;
        }
        Some(Self {
            entries,
            total_weight,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Brush for WeightedBrush {
    fn get_block<R: Rng + ?Sized>(
        &self,
        _pos: BlockPosition,
        _origin: BlockPosition,
        rng: &mut R,
    ) -> BlockState {
        let mut roll = rng.gen_range(0..self.total_weight);
        for (block, weight) in &self.entries {
            let weight = *weight as u64;
            if roll < weight {
                return block.clone();
            }
            roll -= weight;
        }
        // Unreachable while total_weight is the sum of entry weights.
        self.entries[self.entries.len() - 1].0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_brush_ignores_position() {
        let brush = SolidBrush::new(BlockState::new("minecraft:stone"));
        let mut rng = StdRng::seed_from_u64(1);
        let origin = BlockPosition::new(0, 0, 0);
        for pos in [BlockPosition::new(0, 0, 0), BlockPosition::new(-5, 80, 12)] {
            assert_eq!(brush.get_block(pos, origin, &mut rng).get_name(), "minecraft:stone");
        }
    }

    #[test]
    fn test_weighted_brush_rejects_zero_weights() {
        assert!(WeightedBrush::new(vec![]).is_none());
        assert!(WeightedBrush::new(vec![(BlockState::new("minecraft:dirt"), 0)]).is_none());
    }

    #[test]
    fn test_weighted_brush_only_yields_entries() {
        let brush = WeightedBrush::new(vec![
            (BlockState::new("minecraft:stone"), 3),
            (BlockState::new("minecraft:andesite"), 1),
            (BlockState::new("minecraft:granite"), 0),
        ])
        .unwrap();
        assert_eq!(brush.len(), 2);

        let mut rng = StdRng::seed_from_u64(42);
        let origin = BlockPosition::new(0, 0, 0);
        let mut stone = 0;
        for i in 0..1000 {
            let block = brush.get_block(BlockPosition::new(i, 0, 0), origin, &mut rng);
            assert_ne!(block.get_name(), "minecraft:granite");
            if block.get_name() == "minecraft:stone" {
                stone += 1;
            }
        }
        // 3:1 weighting, generous margin for a seeded rng.
        assert!(stone > 600 && stone < 900, "stone picked {} times", stone);
    }
}
