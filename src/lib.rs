//! Region fill and undo/redo engine for voxel worlds.
//!
//! Writes are queued and applied a bounded slice per simulation tick, with
//! the slice size tuned against a live throughput signal. Snapshots taken
//! before each edit back a bounded undo/redo history.

pub mod block_position;
pub mod block_state;
pub mod bounding_box;
pub mod building;
pub mod config;
pub mod error;
pub mod history;
pub mod queue;
pub mod region;
pub mod session;
pub mod world;

pub use block_position::BlockPosition;
pub use block_state::BlockState;
pub use bounding_box::BoundingBox;
pub use config::EditConfig;
pub use error::ConfigError;
pub use history::{HistoryManager, Snapshot};
pub use queue::{DrainReport, MutationQueue, MutationTask};
pub use region::Region;
pub use session::EditSession;
pub use world::{FixedThroughput, MemoryWorld, PerformanceSignal, WorldAccess};
