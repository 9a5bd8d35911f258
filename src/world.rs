//! Host-facing collaborator traits and an in-memory world.

use crate::block_position::BlockPosition;
use crate::block_state::BlockState;
use crate::bounding_box::BoundingBox;
use rustc_hash::FxHashMap;

/// Read/write access to the host's cell storage.
///
/// Called from the tick thread only.
pub trait WorldAccess {
    fn get_block(&self, pos: BlockPosition) -> BlockState;

    /// Stores `block` at `pos`. `notify` asks the host to tell observers
    /// immediately; the mutation queue always passes `false` and reports
    /// changes through [`WorldAccess::broadcast`] instead.
    fn set_block(&mut self, pos: BlockPosition, block: &BlockState, notify: bool);

    fn is_in_bounds(&self, pos: BlockPosition) -> bool;

    /// Tells observers (network clients, renderers) that `pos` now holds `block`.
    fn broadcast(&mut self, pos: BlockPosition, block: &BlockState);
}

/// Live throughput metric sampled by the throughput controller.
pub trait PerformanceSignal {
    /// Current throughput, typically frames per second.
    fn current_throughput(&self) -> f64;
}

impl<F> PerformanceSignal for F
where
    F: Fn() -> f64,
{
    fn current_throughput(&self) -> f64 {
        self()
    }
}

/// A signal that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThroughput(pub f64);

impl PerformanceSignal for FixedThroughput {
    fn current_throughput(&self) -> f64 {
        self.0
    }
}

/// Sparse in-memory world. Unset cells read as air.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    blocks: FxHashMap<BlockPosition, BlockState>,
    bounds: Option<BoundingBox>,
    broadcasts: Vec<(BlockPosition, BlockState)>,
    writes: u64,
}

impl MemoryWorld {
    /// An unbounded world; every position is valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// A world that rejects positions outside `bounds`.
    pub fn with_bounds(bounds: BoundingBox) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Number of non-air cells stored.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total `set_block` calls since creation.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    pub fn broadcasts(&self) -> &[(BlockPosition, BlockState)] {
        &self.broadcasts
    }

    pub fn take_broadcasts(&mut self) -> Vec<(BlockPosition, BlockState)> {
        std::mem::take(&mut self.broadcasts)
    }
}

impl WorldAccess for MemoryWorld {
    fn get_block(&self, pos: BlockPosition) -> BlockState {
        self.blocks.get(&pos).cloned().unwrap_or_default()
    }

    fn set_block(&mut self, pos: BlockPosition, block: &BlockState, notify: bool) {
        self.writes += 1;
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block.clone());
        }
        if notify {
            self.broadcasts.push((pos, block.clone()));
        }
    }

    fn is_in_bounds(&self, pos: BlockPosition) -> bool {
        self.bounds.map_or(true, |b| b.contains(pos))
    }

    fn broadcast(&mut self, pos: BlockPosition, block: &BlockState) {
        self.broadcasts.push((pos, block.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cells_read_as_air() {
        let world = MemoryWorld::new();
        assert!(world.get_block(BlockPosition::new(4, 5, 6)).is_air());
    }

    #[test]
    fn test_air_writes_free_storage() {
        let mut world = MemoryWorld::new();
        let pos = BlockPosition::new(0, 0, 0);
        world.set_block(pos, &BlockState::new("minecraft:stone"), false);
        assert_eq!(world.block_count(), 1);
        world.set_block(pos, &BlockState::air(), false);
        assert_eq!(world.block_count(), 0);
        assert_eq!(world.write_count(), 2);
        assert!(world.broadcasts().is_empty());
    }

    #[test]
    fn test_bounds() {
        let world = MemoryWorld::with_bounds(BoundingBox::from_corners(
            (0, 0, 0).into(),
            (15, 255, 15).into(),
        ));
        assert!(world.is_in_bounds(BlockPosition::new(15, 0, 15)));
        assert!(!world.is_in_bounds(BlockPosition::new(16, 0, 0)));
        assert!(!world.is_in_bounds(BlockPosition::new(0, -1, 0)));
    }

    #[test]
    fn test_closure_signal() {
        let fps = || 60.0;
        assert_eq!(fps.current_throughput(), 60.0);
        assert_eq!(FixedThroughput(12.5).current_throughput(), 12.5);
    }
}
