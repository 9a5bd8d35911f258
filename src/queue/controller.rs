use crate::config::EditConfig;

/// Result of one controller decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub throughput: f64,
    pub previous: usize,
    pub current: usize,
}

/// Tunes the per-tick write budget against a live throughput signal.
///
/// The controller only acts while the backlog is large, on every
/// `interval`-th tick. Each decision moves the budget one `increment` up
/// (throughput at or above the threshold) or down, and always lands inside
/// `[floor, ceiling]`.
#[derive(Debug, Clone)]
pub struct ThroughputController {
    interval: u64,
    fps_threshold: f64,
    increment: usize,
    floor: usize,
    ceiling: usize,
    backlog_threshold: usize,
}

impl ThroughputController {
    pub fn from_config(config: &EditConfig) -> Self {
        Self {
            interval: config.adjustment_interval.max(1),
            fps_threshold: config.fps_threshold,
            increment: config.blocks_per_tick_increment,
            floor: config.controller_floor,
            ceiling: config.max_blocks_per_tick.max(config.controller_floor),
            backlog_threshold: config.backlog_threshold,
        }
    }

    pub fn should_sample(&self, tick: u64, backlog: usize) -> bool {
        backlog > self.backlog_threshold && tick % self.interval == 0
    }

    pub fn adjust(&self, current: usize, throughput: f64) -> usize {
        let next = if throughput >= self.fps_threshold {
            current.saturating_add(self.increment)
        } else {
            current.saturating_sub(self.increment)
        };
        next.clamp(self.floor, self.ceiling)
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}

impl Default for ThroughputController {
    fn default() -> Self {
        Self::from_config(&EditConfig::default())
    }
}

/// Notification budget paired with a write budget.
pub fn updates_for(blocks_per_tick: usize) -> usize {
    (blocks_per_tick / 2).max(1)
}
