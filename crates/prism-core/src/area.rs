//! Areas: named, prioritized boxes carrying flag overrides.

use std::collections::BTreeMap;

use crate::flag::{AnyFlag, Flag, SubFlag};
use crate::pos::{BlockPos, ChunkPos, Position, WorldRef};
use crate::selection::Selection;
use crate::ParseError;

/// Axis-aligned box with inclusive integer bounds on all three axes.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct Bounds {
    min: BlockPos,
    max: BlockPos,
}

impl Bounds {
    /// Build from explicit min/max corners.
    ///
    /// Fails if `min > max` on any axis.
    pub fn new(min: BlockPos, max: BlockPos) -> Result<Self, ParseError> {
        for (axis, lo, hi) in [
            ('x', min.x, max.x),
            ('y', min.y, max.y),
            ('z', min.z, max.z),
        ] {
            if lo > hi {
                return Err(ParseError::InvalidBounds {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Build from two arbitrary opposite corners.
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub const fn min(&self) -> BlockPos {
        self.min
    }

    pub const fn max(&self) -> BlockPos {
        self.max
    }

    /// Inclusive on all six faces.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        x >= f64::from(self.min.x)
            && x <= f64::from(self.max.x)
            && y >= f64::from(self.min.y)
            && y <= f64::from(self.max.y)
            && z >= f64::from(self.min.z)
            && z <= f64::from(self.max.z)
    }

    /// Every chunk column the horizontal footprint touches.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkPos> + use<> {
        let lo = self.min.chunk();
        let hi = self.max.chunk();
        (lo.x..=hi.x).flat_map(move |x| (lo.z..=hi.z).map(move |z| ChunkPos::new(x, z)))
    }

    /// The eight corner blocks.
    pub fn corners(&self) -> [BlockPos; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            BlockPos::new(lo.x, lo.y, lo.z),
            BlockPos::new(hi.x, lo.y, lo.z),
            BlockPos::new(lo.x, hi.y, lo.z),
            BlockPos::new(hi.x, hi.y, lo.z),
            BlockPos::new(lo.x, lo.y, hi.z),
            BlockPos::new(hi.x, lo.y, hi.z),
            BlockPos::new(lo.x, hi.y, hi.z),
            BlockPos::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Check an operator-supplied area name: ASCII alphanumerics or `_`, at least two long.
pub fn validate_name(name: &str) -> Result<(), ParseError> {
    let valid =
        name.len() >= 2 && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidName(name.to_owned()))
    }
}

/// A named box in one world.
///
/// Name, world and bounds are fixed at construction; only priority and the
/// flag maps change afterwards. Unset flags are allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    priority: i32,
    name: String,
    world: WorldRef,
    bounds: Bounds,
    flags: BTreeMap<Flag, bool>,
    sub_flags: BTreeMap<SubFlag, bool>,
}

impl Area {
    pub fn new(priority: i32, name: impl Into<String>, world: WorldRef, bounds: Bounds) -> Self {
        Self {
            priority,
            name: name.into(),
            world,
            bounds,
            flags: BTreeMap::new(),
            sub_flags: BTreeMap::new(),
        }
    }

    /// Create an area covering an operator's two-corner selection.
    pub fn from_selection(
        priority: i32,
        name: impl Into<String>,
        selection: &Selection,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::new(
            priority,
            name,
            selection.world.clone(),
            selection.bounds(),
        ))
    }

    #[must_use]
    pub fn with_flags(mut self, flags: BTreeMap<Flag, bool>) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_sub_flags(mut self, sub_flags: BTreeMap<SubFlag, bool>) -> Self {
        self.sub_flags = sub_flags;
        self
    }

    pub const fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name used for lookups.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub const fn world(&self) -> &WorldRef {
        &self.world
    }

    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Same world and inside the box.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.world == self.world.id && self.bounds.contains(pos.x, pos.y, pos.z)
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(true)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.insert(flag, value);
    }

    pub const fn flags(&self) -> &BTreeMap<Flag, bool> {
        &self.flags
    }

    pub fn set_flags(&mut self, flags: BTreeMap<Flag, bool>) {
        self.flags = flags;
    }

    pub fn has_sub_flag(&self, sub: SubFlag) -> bool {
        self.sub_flags.get(&sub).copied().unwrap_or(true)
    }

    pub fn set_sub_flag(&mut self, sub: SubFlag, value: bool) {
        self.sub_flags.insert(sub, value);
    }

    pub const fn sub_flags(&self) -> &BTreeMap<SubFlag, bool> {
        &self.sub_flags
    }

    pub fn set_sub_flags(&mut self, sub_flags: BTreeMap<SubFlag, bool>) {
        self.sub_flags = sub_flags;
    }

    /// The area's own answer for a tag, ignoring who asks.
    pub fn allows(&self, flag: AnyFlag) -> bool {
        match flag {
            AnyFlag::Flag(flag) => self.has_flag(flag),
            AnyFlag::SubFlag(sub) => self.has_sub_flag(sub),
        }
    }

    /// Set either kind of tag.
    pub fn set(&mut self, flag: AnyFlag, value: bool) {
        match flag {
            AnyFlag::Flag(flag) => self.set_flag(flag, value),
            AnyFlag::SubFlag(sub) => self.set_sub_flag(sub, value),
        }
    }

    /// Per-area override node for a tag, e.g. `prism.area.spawn.flag.player_build`.
    pub fn node(&self, flag: AnyFlag) -> String {
        crate::node::area_node(&self.name, flag)
    }
}
