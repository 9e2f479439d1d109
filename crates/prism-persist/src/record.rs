//! On-disk area record.
//!
//! ```json
//! {
//!   "priority": 1,
//!   "name": "spawn",
//!   "world": "world",
//!   "aabb": { "minX": 0, "minY": 0, "minZ": 0, "maxX": 10, "maxY": 10, "maxZ": 10 },
//!   "flags": { "PLAYER_BREAK": false },
//!   "subFlags": {}
//! }
//! ```

use std::collections::BTreeMap;

use hashbrown::HashMap;
use prism_core::{Area, BlockPos, Bounds, Flag, ParseError, SubFlag, WorldRef};
use serde::{Deserialize, Deserializer, Serialize};

/// Resolves persisted world names to live worlds.
pub trait WorldRegistry {
    fn world_by_name(&self, name: &str) -> Option<WorldRef>;
}

/// Fixed world table, for hosts that know their worlds up front.
#[derive(Debug, Default, Clone)]
pub struct StaticWorlds {
    worlds: HashMap<String, WorldRef>,
}

impl StaticWorlds {
    #[must_use]
    pub fn new(worlds: impl IntoIterator<Item = WorldRef>) -> Self {
        Self {
            worlds: worlds.into_iter().map(|w| (w.name.clone(), w)).collect(),
        }
    }

    pub fn insert(&mut self, world: WorldRef) {
        self.worlds.insert(world.name.clone(), world);
    }
}

impl WorldRegistry for StaticWorlds {
    fn world_by_name(&self, name: &str) -> Option<WorldRef> {
        self.worlds.get(name).cloned()
    }
}

/// Box corners. Older files may store them as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aabb {
    #[serde(deserialize_with = "block_coord")]
    pub min_x: i32,
    #[serde(deserialize_with = "block_coord")]
    pub min_y: i32,
    #[serde(deserialize_with = "block_coord")]
    pub min_z: i32,
    #[serde(deserialize_with = "block_coord")]
    pub max_x: i32,
    #[serde(deserialize_with = "block_coord")]
    pub max_y: i32,
    #[serde(deserialize_with = "block_coord")]
    pub max_z: i32,
}

fn block_coord<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.floor() as i32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    #[serde(default)]
    pub priority: i32,
    pub name: String,
    pub world: String,
    pub aabb: Aabb,
    pub flags: BTreeMap<Flag, bool>,
    #[serde(rename = "subFlags")]
    pub sub_flags: BTreeMap<SubFlag, bool>,
}

impl AreaRecord {
    pub fn from_area(area: &Area) -> Self {
        let (min, max) = (area.bounds().min(), area.bounds().max());
        Self {
            priority: area.priority(),
            name: area.name().to_owned(),
            world: area.world().name.clone(),
            aabb: Aabb {
                min_x: min.x,
                min_y: min.y,
                min_z: min.z,
                max_x: max.x,
                max_y: max.y,
                max_z: max.z,
            },
            flags: area.flags().clone(),
            sub_flags: area.sub_flags().clone(),
        }
    }

    /// Resolve the world and validate the box.
    pub fn into_area(self, worlds: &dyn WorldRegistry) -> Result<Area, ParseError> {
        let world = worlds
            .world_by_name(&self.world)
            .ok_or(ParseError::UnknownWorld(self.world))?;
        let a = self.aabb;
        let bounds = Bounds::new(
            BlockPos::new(a.min_x, a.min_y, a.min_z),
            BlockPos::new(a.max_x, a.max_y, a.max_z),
        )?;

        Ok(Area::new(self.priority, self.name, world, bounds)
            .with_flags(self.flags)
            .with_sub_flags(self.sub_flags))
    }
}
