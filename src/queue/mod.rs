//! Tick-amortized mutation queue.
//!
//! Producers on any thread enqueue writes; the tick thread calls
//! [`MutationQueue::drain`] once per simulation step, applying a bounded
//! slice of writes and a bounded slice of change notifications. The two
//! slices are drained independently, so a notification may reach observers
//! before or after its paired write lands.

pub mod controller;
pub mod task;

pub use controller::{updates_for, Adjustment, ThroughputController};
pub use task::MutationTask;

use crate::block_position::BlockPosition;
use crate::block_state::BlockState;
use crate::config::EditConfig;
use crate::region::Region;
use crate::world::{PerformanceSignal, WorldAccess};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What a single drain call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrainReport {
    pub tick: u64,
    pub writes_applied: usize,
    /// Writes dropped because their position was out of bounds.
    pub writes_skipped: usize,
    pub notifications_sent: usize,
    pub notifications_skipped: usize,
    pub adjustment: Option<Adjustment>,
}

impl DrainReport {
    pub fn is_empty(&self) -> bool {
        self.writes_applied == 0
            && self.writes_skipped == 0
            && self.notifications_sent == 0
            && self.notifications_skipped == 0
    }
}

pub struct MutationQueue {
    writes: Mutex<VecDeque<MutationTask>>,
    notifications: Mutex<VecDeque<MutationTask>>,
    blocks_per_tick: AtomicUsize,
    updates_per_tick: AtomicUsize,
    tick_counter: AtomicU64,
    controller: ThroughputController,
    min_blocks_per_tick: usize,
    max_blocks_per_tick: usize,
    notify_after_write: bool,
}

impl Default for MutationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::with_config(&EditConfig::default())
    }

    pub fn with_config(config: &EditConfig) -> Self {
        let min = config.min_blocks_per_tick.max(1);
        let max = config.max_blocks_per_tick.max(min);
        let blocks_per_tick = config.blocks_per_tick.clamp(min, max);
        Self {
            writes: Mutex::new(VecDeque::new()),
            notifications: Mutex::new(VecDeque::new()),
            blocks_per_tick: AtomicUsize::new(blocks_per_tick),
            updates_per_tick: AtomicUsize::new(updates_for(blocks_per_tick)),
            tick_counter: AtomicU64::new(0),
            controller: ThroughputController::from_config(config),
            min_blocks_per_tick: min,
            max_blocks_per_tick: max,
            notify_after_write: config.notify_after_write,
        }
    }

    // -- Producers --

    /// Queues a write, paired with a change notification unless
    /// `notify_after_write` is disabled.
    pub fn enqueue_write(&self, position: BlockPosition, state: BlockState) {
        lock(&self.writes).push_back(MutationTask::write(position, state));
        if self.notify_after_write {
            lock(&self.notifications).push_back(MutationTask::notify(position));
        }
    }

    /// Queues a write that observers are never told about. Used when
    /// replaying history.
    pub fn enqueue_restore(&self, position: BlockPosition, state: BlockState) {
        lock(&self.writes).push_back(MutationTask::write(position, state));
    }

    /// Queues one write per enclosed cell of `region`, with the block chosen
    /// by `brush(cell, origin, rng)`. Returns the number of writes queued.
    pub fn enqueue_fill<R, F>(&self, region: &Region, mut brush: F, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
        F: FnMut(BlockPosition, BlockPosition, &mut R) -> BlockState,
    {
        let Some(origin) = region.origin() else {
            return 0;
        };

        let writes: Vec<MutationTask> = region
            .iter()
            .map(|&cell| MutationTask::write(cell, brush(cell, origin, rng)))
            .collect();
        let count = writes.len();

        if self.notify_after_write {
            let notifications = writes.iter().map(|t| MutationTask::notify(t.position));
            lock(&self.notifications).extend(notifications);
        }
        lock(&self.writes).extend(writes);
        count
    }

    /// Drops every task not yet popped by a drain. Writes already applied
    /// stay applied.
    pub fn clear_queues(&self) {
        lock(&self.writes).clear();
        lock(&self.notifications).clear();
    }

    // -- Consumer --

    /// Applies one tick's worth of pending work. Must only be called from
    /// the tick thread, never concurrently with itself.
    pub fn drain<W, P>(&self, world: &mut W, perf: &P) -> DrainReport
    where
        W: WorldAccess + ?Sized,
        P: PerformanceSignal + ?Sized,
    {
        let tick = self.tick_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut report = DrainReport {
            tick,
            ..DrainReport::default()
        };

        if self.controller.should_sample(tick, self.pending_writes()) {
            report.adjustment = Some(self.run_controller(perf.current_throughput()));
        }

        let writes = pop_front(&self.writes, self.blocks_per_tick());
        for task in writes {
            let Some(state) = task.target_state else {
                continue;
            };
            if world.is_in_bounds(task.position) {
                world.set_block(task.position, &state, false);
                report.writes_applied += 1;
            } else {
                report.writes_skipped += 1;
            }
        }

        let notifications = pop_front(&self.notifications, self.updates_per_tick());
        for task in notifications {
            if world.is_in_bounds(task.position) {
                let current = world.get_block(task.position);
                world.broadcast(task.position, &current);
                report.notifications_sent += 1;
            } else {
                report.notifications_skipped += 1;
            }
        }

        if !report.is_empty() {
            log::trace!(
                "tick {}: {} writes ({} out of bounds), {} notifications, {} writes pending",
                tick,
                report.writes_applied,
                report.writes_skipped,
                report.notifications_sent,
                self.pending_writes()
            );
        }
        report
    }

    fn run_controller(&self, throughput: f64) -> Adjustment {
        let previous = self.blocks_per_tick();
        let current = self.controller.adjust(previous, throughput);
        self.store_budget(current);
        log::debug!(
            "throughput {:.1}: blocks per tick {} -> {}",
            throughput,
            previous,
            current
        );
        Adjustment {
            throughput,
            previous,
            current,
        }
    }

    // -- Budget --

    pub fn blocks_per_tick(&self) -> usize {
        self.blocks_per_tick.load(Ordering::Relaxed)
    }

    pub fn updates_per_tick(&self) -> usize {
        self.updates_per_tick.load(Ordering::Relaxed)
    }

    /// Sets the write budget by hand, clamped to `[min, max]`. The
    /// controller may move it again once the backlog is large.
    pub fn set_blocks_per_tick(&self, blocks_per_tick: usize) {
        self.store_budget(blocks_per_tick.clamp(self.min_blocks_per_tick, self.max_blocks_per_tick));
    }

    fn store_budget(&self, blocks_per_tick: usize) {
        self.blocks_per_tick.store(blocks_per_tick, Ordering::Relaxed);
        self.updates_per_tick
            .store(updates_for(blocks_per_tick), Ordering::Relaxed);
    }

    pub fn controller(&self) -> &ThroughputController {
        &self.controller
    }

    // -- Observability --

    pub fn pending_writes(&self) -> usize {
        lock(&self.writes).len()
    }

    pub fn pending_notifications(&self) -> usize {
        lock(&self.notifications).len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending_writes() == 0 && self.pending_notifications() == 0
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_counter.load(Ordering::Relaxed)
    }
}

// A panic on another producer thread must not wedge the tick thread; the
// deques stay structurally valid whatever the panicking holder was doing.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pops up to `max` tasks under the lock so that applying them does not
/// block producers.
fn pop_front(queue: &Mutex<VecDeque<MutationTask>>, max: usize) -> Vec<MutationTask> {
    let mut queue = lock(queue);
    let n = max.min(queue.len());
    queue.drain(..n).collect()
}
