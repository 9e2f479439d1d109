//! Permission evaluation.
//!
//! ```text
//! can(flag, actor, pos)
//!   │
//!   ├─ no area at pos ───────────────────────► allow
//!   ├─ actor bypasses areas ─────────────────► allow
//!   ├─ actor holds prism.area.<a>.<flag> ────► allow
//!   └─ otherwise ─────────────────────────────► area's own flag (unset = allow)
//! ```
//!
//! Total over its inputs: an unresolvable area is "outside", never an error.

use prism_core::{AnyFlag, Area, Position};

use crate::index::AreaIndex;

/// Capability answers for an actor that carries permissions (a player, as
/// opposed to a plain entity).
pub trait Principal {
    /// Whether the actor holds `node`, directly or through a parent node.
    fn has_permission(&self, node: &str) -> bool;

    /// Whether the actor is exempt from area rules altogether (creative mode,
    /// operators, ...).
    fn bypasses_areas(&self) -> bool;
}

/// Anything whose actions are checked against areas.
pub trait Actor {
    /// Where the actor currently is.
    fn position(&self) -> Position;

    /// Permission-bearing view of this actor, if it has one.
    fn principal(&self) -> Option<&dyn Principal> {
        None
    }
}

/// Decide `flag` for `actor` inside `area`, skipping the containment check.
pub fn area_permits<A: Actor + ?Sized>(area: &Area, flag: AnyFlag, actor: &A) -> bool {
    let overridden = actor
        .principal()
        .is_some_and(|p| p.bypasses_areas() || p.has_permission(&area.node(flag)));
    overridden || area.allows(flag)
}

impl AreaIndex {
    /// May `actor` do `flag` at `position` (or where it stands, when `None`)?
    pub fn can<A: Actor + ?Sized>(
        &self,
        flag: impl Into<AnyFlag>,
        actor: &A,
        position: Option<Position>,
    ) -> bool {
        let pos = position.unwrap_or_else(|| actor.position());
        match self.find(&pos) {
            Some(area) => area_permits(area, flag.into(), actor),
            None => true,
        }
    }
}
