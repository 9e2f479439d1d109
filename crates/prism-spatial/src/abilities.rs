//! Per-actor ability snapshots.
//!
//! Hosts that drive client-side prediction (hiding the break animation,
//! greying out attack) need a coarse summary of what an actor may do where it
//! stands. [`AbilityTracker`] recomputes that summary on a tick interval and
//! reports only transitions.

use core::hash::Hash;

use hashbrown::HashMap;
use prism_core::{Area, Flag};

use crate::evaluator::{Actor, area_permits};
use crate::index::AreaIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Abilities {
    pub build: bool,
    pub mine: bool,
    pub open_containers: bool,
    pub attack_players: bool,
    pub attack_mobs: bool,
    pub right_click: bool,
    pub drop: bool,
}

impl Abilities {
    /// What `actor` may do inside `area`.
    pub fn in_area<A: Actor + ?Sized>(area: &Area, actor: &A) -> Self {
        let can = |flag: Flag| area_permits(area, flag.into(), actor);
        Self {
            build: can(Flag::PlayerBuild),
            mine: can(Flag::PlayerBreak),
            open_containers: can(Flag::PlayerContainers),
            attack_players: can(Flag::WorldAttackPlayers),
            attack_mobs: can(Flag::WorldAttackMobs),
            right_click: can(Flag::RightClick),
            drop: can(Flag::PlayerDrop),
        }
    }

    /// Snapshot at the actor's position; `None` outside every area.
    pub fn for_actor<A: Actor + ?Sized>(index: &AreaIndex, actor: &A) -> Option<Self> {
        index
            .find(&actor.position())
            .map(|area| Self::in_area(area, actor))
    }
}

/// A snapshot transition for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityChange {
    pub previous: Option<Abilities>,
    pub current: Option<Abilities>,
}

impl AbilityChange {
    /// Whether the drop permission flipped. Hosts toggle item-drop handling
    /// separately from the rest of the ability set.
    pub fn drop_changed(&self) -> bool {
        let drop = |a: Option<Abilities>| a.is_none_or(|a| a.drop);
        drop(self.previous) != drop(self.current)
    }
}

/// Last snapshot per actor key.
#[derive(Debug)]
pub struct AbilityTracker<K> {
    every: u64,
    last: HashMap<K, Option<Abilities>>,
}

impl<K: Hash + Eq> AbilityTracker<K> {
    /// Recompute every `every` ticks; zero is treated as one.
    #[must_use]
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last: HashMap::new(),
        }
    }

    pub const fn every(&self) -> u64 {
        self.every
    }

    /// Recompute for `key` if `tick` falls on the interval, returning the
    /// transition when the snapshot changed.
    ///
    /// The first observation of an actor counts as a change from `None`
    /// only when it lands inside an area.
    pub fn observe<A: Actor + ?Sized>(
        &mut self,
        key: K,
        tick: u64,
        actor: &A,
        index: &AreaIndex,
    ) -> Option<AbilityChange> {
        if tick % self.every != 0 {
            return None;
        }

        let current = Abilities::for_actor(index, actor);
        let previous = self.last.insert(key, current).flatten();
        (previous != current).then_some(AbilityChange { previous, current })
    }

    /// Drop state for an actor that left.
    pub fn forget(&mut self, key: &K) {
        self.last.remove(key);
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
