//! Bucket keys and area handles.

use prism_core::{ChunkPos, Position, WorldId};

/// Stable handle to a registered area, valid until it is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AreaId(pub u32);

/// One chunk column of one world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub world: WorldId,
    pub chunk: ChunkPos,
}

impl BucketKey {
    #[must_use]
    pub const fn new(world: WorldId, chunk: ChunkPos) -> Self {
        Self { world, chunk }
    }

    /// Bucket a query position falls into.
    #[must_use]
    pub fn of(pos: &Position) -> Self {
        Self::new(pos.world, pos.chunk())
    }
}
