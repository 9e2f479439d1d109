//! Prism area model.
//!
//! An [`Area`] is a named, prioritized, axis-aligned box in one world. It
//! carries two boolean maps, one keyed by [`Flag`] and one by [`SubFlag`];
//! tags an area does not mention are allowed.
//!
//! This crate holds the data model and the capability-node table. Indexing
//! and permission evaluation live in `prism-spatial`, persistence in
//! `prism-persist`.

pub mod area;
pub mod error;
pub mod flag;
pub mod node;
pub mod pos;
pub mod selection;

pub use area::{Area, Bounds, validate_name};
pub use error::{AreaError, AreaResult, ParseError};
pub use flag::{AnyFlag, Flag, SubFlag};
pub use node::{NAMESPACE, NodeRegistrar, PermissionRegistry, PermissionTree, area_node};
pub use pos::{BlockPos, CHUNK_SIZE, ChunkPos, Position, WorldId, WorldRef};
pub use selection::{Selection, SelectionProvider};
