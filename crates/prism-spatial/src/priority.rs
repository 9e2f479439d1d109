//! Priority resolution.
//!
//! Buckets are kept sorted by [`priority_order`]: priority descending, then
//! name ascending (case-insensitive). Each bucket is sorted on its own, so a
//! lookup only ever scans the one bucket it hits.
//!
//! [`AreaIndex::prioritize`] is the one operation that looks at the global
//! order. It moves an area directly ahead of another and renumbers every
//! area densely:
//!
//! ```text
//! before:   market(10)  arena(7)  spawn(7)  wild(1)
//! prioritize(wild, spawn)
//! order:    market      arena     wild      spawn
//! after:    market(4)   arena(3)  wild(2)   spawn(1)
//! ```

use core::cmp::Ordering;

use prism_core::Area;

use crate::index::{AreaIndex, covered_keys};
use crate::key::{AreaId, BucketKey};

/// Scan order: higher priority first, ties by name ascending, ignoring case.
pub fn priority_order(a: &Area, b: &Area) -> Ordering {
    b.priority().cmp(&a.priority()).then_with(|| {
        let lower_a = a.name().chars().flat_map(char::to_lowercase);
        let lower_b = b.name().chars().flat_map(char::to_lowercase);
        lower_a.cmp(lower_b)
    })
}

impl AreaIndex {
    /// Stable sort of one bucket by [`priority_order`].
    pub fn sort_bucket(&mut self, key: BucketKey) {
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return;
        };
        let areas = &self.areas;
        bucket.sort_by(|a, b| match (areas.get(a), areas.get(b)) {
            (Some(x), Some(y)) => priority_order(x, y),
            _ => a.cmp(b),
        });
    }

    /// Every area id in global scan order.
    pub fn ordered_ids(&self) -> Vec<AreaId> {
        let mut ids: Vec<_> = self.areas.keys().copied().collect();
        ids.sort_by(|a, b| match (self.areas.get(a), self.areas.get(b)) {
            (Some(x), Some(y)) => priority_order(x, y),
            _ => a.cmp(b),
        });
        ids
    }

    /// Every area in global scan order.
    pub fn by_priority(&self) -> Vec<&Area> {
        self.ordered_ids()
            .into_iter()
            .filter_map(|id| self.areas.get(&id))
            .collect()
    }

    /// Place `target` immediately ahead of `reference`, then renumber all
    /// areas `N..=1` in the resulting order.
    ///
    /// Returns `false` without changing anything if either name is unknown or
    /// both name the same area.
    pub fn prioritize(&mut self, target: &str, reference: &str) -> bool {
        let (Some(target), Some(reference)) = (self.id_of(target), self.id_of(reference)) else {
            return false;
        };
        if target == reference {
            return false;
        }

        let mut ordered = self.ordered_ids();
        ordered.retain(|&id| id != target);
        let Some(at) = ordered.iter().position(|&id| id == reference) else {
            return false;
        };
        ordered.insert(at, target);

        let n = ordered.len();
        for (i, id) in ordered.iter().enumerate() {
            let priority = (n - i) as i32;
            if let Some(area) = self.areas.get_mut(id) {
                if area.priority() != priority {
                    area.set_priority(priority);
                }
            }
        }

        self.recalculate_priorities(None);
        true
    }

    /// Re-sort the buckets `scope` covers, or every bucket when `None`.
    pub fn recalculate_priorities(&mut self, scope: Option<AreaId>) {
        let keys: Vec<BucketKey> = match scope.and_then(|id| self.areas.get(&id)) {
            Some(area) => covered_keys(area)
                .filter(|key| self.buckets.contains_key(key))
                .collect(),
            None if scope.is_some() => return,
            None => self.buckets.keys().copied().collect(),
        };

        for key in keys {
            self.sort_bucket(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use prism_core::{BlockPos, Bounds, Position, WorldId, WorldRef};

    use super::*;

    fn add(index: &mut AreaIndex, name: &str, priority: i32) {
        let bounds = Bounds::new(BlockPos::new(0, 0, 0), BlockPos::new(20, 20, 20)).unwrap();
        index
            .register(Area::new(priority, name, WorldRef::new(0, "world"), bounds))
            .unwrap();
    }

    fn priorities(index: &AreaIndex) -> Vec<(String, i32)> {
        index
            .by_priority()
            .into_iter()
            .map(|a| (a.name().to_owned(), a.priority()))
            .collect()
    }

    fn p() -> Position {
        Position::new(WorldId(0), 5.0, 5.0, 5.0)
    }

    #[test]
    fn test_bucket_order_priority_then_name() {
        let mut index = AreaIndex::new();
        add(&mut index, "beta", 3);
        add(&mut index, "Alpha", 3);
        add(&mut index, "gamma", 8);
        add(&mut index, "delta", -2);

        let key = BucketKey::of(&p());
        assert_eq!(index.bucket_names(key), vec!["gamma", "Alpha", "beta", "delta"]);
    }

    #[test]
    fn test_prioritize_moves_target_ahead_of_reference() {
        let mut index = AreaIndex::new();
        add(&mut index, "a", 5);
        add(&mut index, "b", 10);
        assert_eq!(index.find(&p()).map(Area::name), Some("b"));

        assert!(index.prioritize("a", "b"));
        assert_eq!(index.find(&p()).map(Area::name), Some("a"));
    }

    #[test]
    fn test_prioritize_renumbers_densely_and_keeps_others_in_order() {
        let mut index = AreaIndex::new();
        add(&mut index, "market", 10);
        add(&mut index, "spawn", 7);
        add(&mut index, "arena", 7);
        add(&mut index, "wild", 1);

        assert!(index.prioritize("wild", "spawn"));
        assert_eq!(
            priorities(&index),
            vec![
                ("market".to_owned(), 4),
                ("arena".to_owned(), 3),
                ("wild".to_owned(), 2),
                ("spawn".to_owned(), 1),
            ]
        );
        assert_eq!(
            index.bucket_names(BucketKey::of(&p())),
            vec!["market", "arena", "wild", "spawn"]
        );
    }

    #[test]
    fn test_prioritize_rejects_self_and_unknown() {
        let mut index = AreaIndex::new();
        add(&mut index, "a", 5);
        add(&mut index, "b", 10);

        assert!(!index.prioritize("a", "A"));
        assert!(!index.prioritize("a", "ghost"));
        assert!(!index.prioritize("ghost", "a"));
        assert_eq!(
            priorities(&index),
            vec![("b".to_owned(), 10), ("a".to_owned(), 5)]
        );
    }

    #[test]
    fn test_recalculate_single_scope() {
        let mut index = AreaIndex::new();
        add(&mut index, "a", 1);
        add(&mut index, "b", 2);
        let a = index.id_of("a").unwrap();

        // Bypass `edit` so the bucket is stale until recalculated.
        index.areas.get_mut(&a).unwrap().set_priority(5);
        assert_eq!(index.find(&p()).map(Area::name), Some("b"));

        index.recalculate_priorities(Some(a));
        assert_eq!(index.find(&p()).map(Area::name), Some("a"));
    }
}
