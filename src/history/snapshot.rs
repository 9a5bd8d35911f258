use crate::block_position::BlockPosition;
use crate::block_state::BlockState;
use crate::world::WorldAccess;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

/// Immutable capture of block states at a moment in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    states: FxHashMap<BlockPosition, BlockState>,
    timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Reads the current state of every position from `world`.
    pub fn capture<W, I>(world: &W, positions: I) -> Self
    where
        W: WorldAccess + ?Sized,
        I: IntoIterator<Item = BlockPosition>,
    {
        let positions = positions.into_iter();
        let mut states = FxHashMap::default();
        states.reserve(positions.size_hint().0);
        for pos in positions {
            states.insert(pos, world.get_block(pos));
        }
        Self {
            states,
            timestamp: Utc::now(),
        }
    }

    pub fn get(&self, pos: BlockPosition) -> Option<&BlockState> {
        self.states.get(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockPosition, &BlockState)> {
        self.states.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = BlockPosition> + '_ {
        self.states.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MemoryWorld;

    #[test]
    fn test_capture_reads_current_states() {
        let mut world = MemoryWorld::new();
        let stone = BlockState::new("minecraft:stone");
        world.set_block(BlockPosition::new(1, 0, 0), &stone, false);

        let before = Utc::now();
        let snapshot = Snapshot::capture(
            &world,
            [BlockPosition::new(0, 0, 0), BlockPosition::new(1, 0, 0)],
        );
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get(BlockPosition::new(0, 0, 0)).unwrap().is_air());
        assert_eq!(snapshot.get(BlockPosition::new(1, 0, 0)), Some(&stone));
        assert_eq!(snapshot.get(BlockPosition::new(2, 0, 0)), None);
        assert!(snapshot.timestamp() >= before);
    }

    #[test]
    fn test_capture_is_detached_from_world() {
        let mut world = MemoryWorld::new();
        let pos = BlockPosition::new(0, 0, 0);
        let snapshot = Snapshot::capture(&world, [pos]);
        world.set_block(pos, &BlockState::new("minecraft:dirt"), false);
        assert!(snapshot.get(pos).unwrap().is_air());
    }
}
