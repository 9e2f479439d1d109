//! Area lookup and permission evaluation.
//!
//! Areas are bucketed by the 16x16 chunk columns their footprint touches, so
//! resolving a position scans one short, priority-sorted list:
//!
//! ```text
//! position ──► (world, x >> 4, z >> 4) ──► bucket [hi .. lo] ──► first box hit
//! ```

pub mod abilities;
pub mod evaluator;
pub mod index;
pub mod key;
pub mod priority;
pub mod shared;

pub use abilities::{AbilityChange, AbilityTracker, Abilities};
pub use evaluator::{Actor, Principal, area_permits};
pub use index::{AreaIndex, Bucket, covered_keys};
pub use key::{AreaId, BucketKey};
pub use priority::priority_order;
pub use shared::SharedAreas;
