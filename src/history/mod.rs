//! Bounded undo/redo over block snapshots.
//!
//! Not thread-safe: save, undo and redo must run on the tick thread so that
//! their "current state" reads are ordered against queue drains.

pub mod snapshot;

pub use snapshot::Snapshot;

use crate::config::EditConfig;
use crate::queue::MutationQueue;
use crate::region::Region;
use crate::world::WorldAccess;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_history_size: usize,
    max_snapshot_size: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_config(&EditConfig::default())
    }

    pub fn with_config(config: &EditConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_history_size: config.max_history_size.max(1),
            max_snapshot_size: config.max_snapshot_size,
        }
    }

    /// Captures the region's current contents as a new undo entry and drops
    /// any redo history. Returns whether an entry was recorded.
    ///
    /// Regions larger than `max_snapshot_size` are edited without undo
    /// coverage.
    pub fn save_state<W>(&mut self, region: &Region, world: &W) -> bool
    where
        W: WorldAccess + ?Sized,
    {
        if !region.has_valid_selection() {
            return false;
        }
        if region.size() > self.max_snapshot_size {
            log::warn!(
                "Selection of {} blocks exceeds the snapshot limit of {}; this edit cannot be undone",
                region.size(),
                self.max_snapshot_size
            );
            return false;
        }

        let snapshot = Snapshot::capture(world, region.iter().copied());
        push_bounded(&mut self.undo_stack, snapshot, self.max_history_size);
        self.redo_stack.clear();
        true
    }

    /// Restores the most recent undo entry through `queue`, recording the
    /// state it replaces for redo.
    pub fn undo<W>(&mut self, world: &W, queue: &MutationQueue) -> bool
    where
        W: WorldAccess + ?Sized,
    {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        log::debug!("Undoing edit of {} blocks", snapshot.len());
        let current = Snapshot::capture(world, snapshot.positions());
        push_bounded(&mut self.redo_stack, current, self.max_history_size);
        replay(&snapshot, queue);
        true
    }

    pub fn redo<W>(&mut self, world: &W, queue: &MutationQueue) -> bool
    where
        W: WorldAccess + ?Sized,
    {
        let Some(snapshot) = self.redo_stack.pop_back() else {
            return false;
        };
        log::debug!("Redoing edit of {} blocks", snapshot.len());
        let current = Snapshot::capture(world, snapshot.positions());
        push_bounded(&mut self.undo_stack, current, self.max_history_size);
        replay(&snapshot, queue);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Depth of the undo stack.
    pub fn history_size(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent undo entry, if any.
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, capacity: usize) {
    stack.push_back(snapshot);
    while stack.len() > capacity {
        stack.pop_front();
    }
}

// Restores are not broadcast; hosts relying on observers must resync them.
fn replay(snapshot: &Snapshot, queue: &MutationQueue) {
    for (&pos, state) in snapshot.iter() {
        queue.enqueue_restore(pos, state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_position::BlockPosition;
    use crate::block_state::BlockState;
    use crate::world::{FixedThroughput, MemoryWorld};

    fn drain_all(queue: &MutationQueue, world: &mut MemoryWorld) {
        while !queue.is_idle() {
            queue.drain(world, &FixedThroughput(60.0));
        }
    }

    #[test]
    fn test_save_state_requires_selection() {
        let mut history = HistoryManager::new();
        let world = MemoryWorld::new();
        assert!(!history.save_state(&Region::new(), &world));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_oversized_region_is_skipped() {
        let config = EditConfig {
            max_snapshot_size: 8,
            ..EditConfig::default()
        };
        let mut history = HistoryManager::with_config(&config);
        let world = MemoryWorld::new();

        assert!(history.save_state(&Region::from_corners((0, 0, 0), (1, 1, 1)), &world));
        assert!(!history.save_state(&Region::from_corners((0, 0, 0), (2, 1, 1)), &world));
        assert_eq!(history.history_size(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = HistoryManager::new();
        let mut world = MemoryWorld::new();
        let region = Region::from_corners((0, 0, 0), (0, 0, 0));
        let marker = BlockPosition::new(0, 0, 0);

        for i in 0..51 {
            world.set_block(marker, &BlockState::new(format!("minecraft:b{}", i)), false);
            history.save_state(&region, &world);
        }
        assert_eq!(history.history_size(), 50);

        // The oldest surviving entry is the second save.
        let queue = MutationQueue::new();
        for _ in 0..50 {
            assert!(history.undo(&world, &queue));
            drain_all(&queue, &mut world);
        }
        assert!(!history.can_undo());
        assert_eq!(world.get_block(marker).get_name(), "minecraft:b1");
    }

    #[test]
    fn test_empty_stacks_report_false() {
        let mut history = HistoryManager::new();
        let world = MemoryWorld::new();
        let queue = MutationQueue::new();
        assert!(!history.undo(&world, &queue));
        assert!(!history.redo(&world, &queue));
        assert!(queue.is_idle());
    }

    #[test]
    fn test_undo_then_redo_round_trip() {
        let mut history = HistoryManager::new();
        let mut world = MemoryWorld::new();
        let queue = MutationQueue::new();
        let region = Region::from_corners((0, 0, 0), (1, 0, 1));
        let gold = BlockState::new("minecraft:gold_block");

        history.save_state(&region, &world);
        for &pos in region.iter() {
            queue.enqueue_write(pos, gold.clone());
        }
        drain_all(&queue, &mut world);
        world.take_broadcasts();

        assert!(history.undo(&world, &queue));
        assert!(history.can_redo());
        drain_all(&queue, &mut world);
        assert!(region.iter().all(|&p| world.get_block(p).is_air()));
        // Restores are silent.
        assert!(world.broadcasts().is_empty());

        assert!(history.redo(&world, &queue));
        drain_all(&queue, &mut world);
        assert!(region.iter().all(|&p| world.get_block(p) == gold));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = HistoryManager::new();
        let world = MemoryWorld::new();
        let queue = MutationQueue::new();
        let region = Region::from_corners((0, 0, 0), (0, 0, 0));

        history.save_state(&region, &world);
        history.undo(&world, &queue);
        assert_eq!(history.redo_len(), 1);

        history.save_state(&region, &world);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_clear_history() {
        let mut history = HistoryManager::new();
        let world = MemoryWorld::new();
        let queue = MutationQueue::new();
        let region = Region::from_corners((0, 0, 0), (0, 0, 0));
        history.save_state(&region, &world);
        history.save_state(&region, &world);
        history.undo(&world, &queue);

        history.clear_history();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.history_size(), 0);
    }
}
