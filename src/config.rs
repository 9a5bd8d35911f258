use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BLOCKS_PER_TICK: usize = 1000;
pub const MIN_BLOCKS_PER_TICK: usize = 1;
pub const MAX_BLOCKS_PER_TICK: usize = 100_000;
pub const CONTROLLER_FLOOR: usize = 1000;
pub const BLOCKS_PER_TICK_INCREMENT: usize = 250;
pub const ADJUSTMENT_INTERVAL: u64 = 5;
pub const FPS_THRESHOLD: f64 = 45.0;
pub const BACKLOG_THRESHOLD: usize = 10_000;
pub const MAX_HISTORY_SIZE: usize = 50;
pub const MAX_SNAPSHOT_SIZE: usize = 1_000_000;

/// Tunables for the mutation queue and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Writes applied per drain before the controller first adjusts it.
    pub blocks_per_tick: usize,
    /// Lowest value accepted by manual budget changes.
    pub min_blocks_per_tick: usize,
    pub max_blocks_per_tick: usize,
    /// Lowest value the controller will shrink the budget to.
    pub controller_floor: usize,
    pub blocks_per_tick_increment: usize,
    /// Controller sampling cadence, in ticks.
    pub adjustment_interval: u64,
    pub fps_threshold: f64,
    /// Pending writes required before the controller samples at all.
    pub backlog_threshold: usize,
    pub max_history_size: usize,
    pub max_snapshot_size: usize,
    /// Pair every direct write with a change notification.
    pub notify_after_write: bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            blocks_per_tick: DEFAULT_BLOCKS_PER_TICK,
            min_blocks_per_tick: MIN_BLOCKS_PER_TICK,
            max_blocks_per_tick: MAX_BLOCKS_PER_TICK,
            controller_floor: CONTROLLER_FLOOR,
            blocks_per_tick_increment: BLOCKS_PER_TICK_INCREMENT,
            adjustment_interval: ADJUSTMENT_INTERVAL,
            fps_threshold: FPS_THRESHOLD,
            backlog_threshold: BACKLOG_THRESHOLD,
            max_history_size: MAX_HISTORY_SIZE,
            max_snapshot_size: MAX_SNAPSHOT_SIZE,
            notify_after_write: true,
        }
    }
}

impl EditConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_blocks_per_tick == 0 {
            return Err(ConfigError::invalid("min_blocks_per_tick", "must be at least 1"));
        }
        if self.max_blocks_per_tick < self.min_blocks_per_tick {
            return Err(ConfigError::invalid(
                "max_blocks_per_tick",
                format!("{} is below min_blocks_per_tick", self.max_blocks_per_tick),
            ));
        }
        if !(self.min_blocks_per_tick..=self.max_blocks_per_tick).contains(&self.blocks_per_tick) {
            return Err(ConfigError::invalid(
                "blocks_per_tick",
                format!(
                    "{} is outside [{}, {}]",
                    self.blocks_per_tick, self.min_blocks_per_tick, self.max_blocks_per_tick
                ),
            ));
        }
        if self.controller_floor < self.min_blocks_per_tick
            || self.controller_floor > self.max_blocks_per_tick
        {
            return Err(ConfigError::invalid(
                "controller_floor",
                format!(
                    "{} is outside [{}, {}]",
                    self.controller_floor, self.min_blocks_per_tick, self.max_blocks_per_tick
                ),
            ));
        }
        if self.adjustment_interval == 0 {
            return Err(ConfigError::invalid("adjustment_interval", "must be at least 1"));
        }
        if !self.fps_threshold.is_finite() {
            return Err(ConfigError::invalid("fps_threshold", "must be finite"));
        }
        if self.max_history_size == 0 {
            return Err(ConfigError::invalid("max_history_size", "must be at least 1"));
        }
        if self.max_snapshot_size == 0 {
            return Err(ConfigError::invalid("max_snapshot_size", "must be at least 1"));
        }
        Ok(())
    }
}
