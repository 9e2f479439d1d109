//! Area persistence.
//!
//! Areas are stored as one JSON object keyed by lower-cased area name:
//!
//! ```ignore
//! use prism_persist::{AreaStore, StaticWorlds};
//!
//! let store = AreaStore::open("data/areas.json");
//! let report = store.load_into(&areas, &worlds)?;
//! // ...
//! store.save_shared(&areas)?;
//! ```
//!
//! Loading is per record: a record that fails to parse, names an unknown
//! world or flag, or collides with a registered name is logged and skipped.

mod record;
mod store;

pub use record::{Aabb, AreaRecord, StaticWorlds, WorldRegistry};
pub use store::{AreaStore, LoadReport};
