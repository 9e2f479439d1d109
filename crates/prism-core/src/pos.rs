//! Worlds, positions and chunk columns.

use core::fmt;

pub const CHUNK_SHIFT: u32 = 4;
pub const CHUNK_SIZE: i32 = 1 << CHUNK_SHIFT;

/// Host-assigned numeric world id.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct WorldId(pub u32);

/// A world as the host knows it: numeric id for indexing, folder name for persistence.
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub struct WorldRef {
    pub id: WorldId,
    pub name: String,
}

impl WorldRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: WorldId(id),
            name: name.into(),
        }
    }
}

impl fmt::Display for WorldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Integer block coordinate.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::containing(self.x, self.z)
    }
}

/// A 16x16 column on the horizontal plane. Vertical extent is ignored.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Default)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Column holding the block at `(x, z)`. Arithmetic shift, so negatives floor.
    pub const fn containing(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x >> CHUNK_SHIFT,
            z: block_z >> CHUNK_SHIFT,
        }
    }
}

/// A point inside a world, as reported for an actor or an event.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Position {
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z }
    }

    /// Position at the corner of a block.
    pub fn at_block(world: WorldId, block: BlockPos) -> Self {
        Self::new(
            world,
            f64::from(block.x),
            f64::from(block.y),
            f64::from(block.z),
        )
    }

    /// Block containing this position.
    pub fn block(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    pub fn chunk(&self) -> ChunkPos {
        self.block().chunk()
    }
}
