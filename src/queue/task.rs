use crate::block_position::BlockPosition;
use crate::block_state::BlockState;

/// One pending unit of work in the mutation queue.
///
/// Write tasks carry the block to store. Notification tasks carry no block:
/// the current state at `position` is re-read and broadcast when drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTask {
    pub position: BlockPosition,
    pub target_state: Option<BlockState>,
    pub notify_only: bool,
}

impl MutationTask {
    pub fn write(position: BlockPosition, state: BlockState) -> Self {
        Self {
            position,
            target_state: Some(state),
            notify_only: false,
        }
    }

    pub fn notify(position: BlockPosition) -> Self {
        Self {
            position,
            target_state: None,
            notify_only: true,
        }
    }
}
