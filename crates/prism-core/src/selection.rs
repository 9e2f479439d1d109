//! Two-corner selections handed over by the host's selection tool.

use crate::area::{Area, Bounds};
use crate::pos::{BlockPos, WorldRef};

/// Two opposite corners in one world, in the order the operator picked them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub world: WorldRef,
    pub pos1: BlockPos,
    pub pos2: BlockPos,
}

impl Selection {
    pub const fn new(world: WorldRef, pos1: BlockPos, pos2: BlockPos) -> Self {
        Self { world, pos1, pos2 }
    }

    /// Selection spanning an existing area, min corner first.
    pub fn of_area(area: &Area) -> Self {
        Self {
            world: area.world().clone(),
            pos1: area.bounds().min(),
            pos2: area.bounds().max(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.pos1, self.pos2)
    }

    /// True when this selection spans exactly `area`'s box.
    pub fn matches(&self, area: &Area) -> bool {
        self.world == *area.world() && self.bounds() == *area.bounds()
    }
}

/// Access to the host's per-actor selection state.
///
/// `A` is the host's actor handle.
pub trait SelectionProvider<A: ?Sized> {
    /// Current complete selection, if both corners are set.
    fn selection(&self, actor: &A) -> Option<Selection>;

    /// Replace (or clear, with `None`) the actor's selection.
    fn set_selection(&self, actor: &A, selection: Option<Selection>);
}
