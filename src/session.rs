use crate::block_position::BlockPosition;
use crate::block_state::BlockState;
use crate::building::Brush;
use crate::config::EditConfig;
use crate::history::HistoryManager;
use crate::queue::{DrainReport, MutationQueue};
use crate::region::Region;
use crate::world::{PerformanceSignal, WorldAccess};
use rand::Rng;
use std::sync::Arc;

/// One user's editing state: a selection, its history, and a handle to the
/// mutation queue.
///
/// The session lives on the tick thread. Clone [`EditSession::queue`] to
/// enqueue from elsewhere.
pub struct EditSession {
    region: Region,
    history: HistoryManager,
    queue: Arc<MutationQueue>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_config(&EditConfig::default())
    }

    pub fn with_config(config: &EditConfig) -> Self {
        Self::with_queue(config, Arc::new(MutationQueue::with_config(config)))
    }

    /// Builds a session that shares an existing queue.
    pub fn with_queue(config: &EditConfig, queue: Arc<MutationQueue>) -> Self {
        Self {
            region: Region::new(),
            history: HistoryManager::with_config(config),
            queue,
        }
    }

    // -- Selection --

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn set_corner_a(&mut self, pos: impl Into<BlockPosition>) {
        self.region.set_corner_a(pos);
    }

    pub fn set_corner_b(&mut self, pos: impl Into<BlockPosition>) {
        self.region.set_corner_b(pos);
    }

    pub fn clear_selection(&mut self) {
        self.region.clear();
    }

    // -- Edits --

    /// Snapshots the selection and queues a write for every cell. Returns
    /// the number of writes queued.
    pub fn fill<W, B, R>(&mut self, world: &W, brush: &B, rng: &mut R) -> usize
    where
        W: WorldAccess + ?Sized,
        B: Brush,
        R: Rng + ?Sized,
    {
        if !self.region.has_valid_selection() {
            return 0;
        }
        self.history.save_state(&self.region, world);
        self.queue.enqueue_fill(
            &self.region,
            |pos, origin, rng| brush.get_block(pos, origin, rng),
            rng,
        )
    }

    /// Snapshots the selection and queues `to` for every cell currently
    /// holding `from`. Matching happens now, not when the writes drain.
    pub fn replace<W>(&mut self, world: &W, from: &BlockState, to: &BlockState) -> usize
    where
        W: WorldAccess + ?Sized,
    {
        if !self.region.has_valid_selection() {
            return 0;
        }
        self.history.save_state(&self.region, world);
        let mut count = 0;
        for &pos in self.region.iter() {
            if world.get_block(pos) == *from {
                self.queue.enqueue_write(pos, to.clone());
                count += 1;
            }
        }
        count
    }

    pub fn undo<W>(&mut self, world: &W) -> bool
    where
        W: WorldAccess + ?Sized,
    {
        self.history.undo(world, &self.queue)
    }

    pub fn redo<W>(&mut self, world: &W) -> bool
    where
        W: WorldAccess + ?Sized,
    {
        self.history.redo(world, &self.queue)
    }

    /// Drops every pending write and notification.
    pub fn cancel(&self) {
        self.queue.clear_queues();
    }

    /// Runs one drain. Call exactly once per simulation tick.
    pub fn tick<W, P>(&self, world: &mut W, perf: &P) -> DrainReport
    where
        W: WorldAccess + ?Sized,
        P: PerformanceSignal + ?Sized,
    {
        self.queue.drain(world, perf)
    }

    // -- Accessors --

    pub fn queue(&self) -> &Arc<MutationQueue> {
        &self.queue
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryManager {
        &mut self.history
    }
}
