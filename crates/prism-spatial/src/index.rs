//! Chunk-bucketed area index.

use hashbrown::HashMap;
use prism_core::{Area, AreaError, AreaResult, Position};
use smallvec::SmallVec;

use crate::key::{AreaId, BucketKey};

/// Areas overlapping one chunk column, highest priority first.
pub type Bucket = SmallVec<[AreaId; 4]>;

/// Every registered area, indexed by name and by the chunk columns it covers.
///
/// An area sits once in each bucket its horizontal footprint overlaps. Vertical
/// extent is not bucketed, so lookups re-check the full box.
#[derive(Debug, Default)]
pub struct AreaIndex {
    pub(crate) areas: HashMap<AreaId, Area>,
    /// Lower-cased name -> id.
    names: HashMap<String, AreaId>,
    pub(crate) buckets: HashMap<BucketKey, Bucket>,
    next_id: u32,
}

/// Bucket keys covered by an area's footprint.
pub fn covered_keys(area: &Area) -> impl Iterator<Item = BucketKey> + use<> {
    let world = area.world().id;
    area.bounds()
        .chunks()
        .map(move |chunk| BucketKey::new(world, chunk))
}

impl AreaIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `area` under its name and into every covered bucket.
    ///
    /// Names are unique case-insensitively; a taken name fails with
    /// [`AreaError::Duplicate`] and leaves the index untouched.
    pub fn register(&mut self, area: Area) -> AreaResult<AreaId> {
        let key = area.key();
        if self.names.contains_key(&key) {
            return Err(AreaError::Duplicate(area.name().to_owned()));
        }

        let id = AreaId(self.next_id);
        self.next_id += 1;

        let buckets: Vec<_> = covered_keys(&area).collect();
        self.areas.insert(id, area);
        self.names.insert(key, id);

        for bucket in buckets {
            self.buckets.entry(bucket).or_default().push(id);
            self.sort_bucket(bucket);
        }
        Ok(id)
    }

    /// Remove an area from every bucket and from the name table.
    pub fn delete(&mut self, name: &str) -> AreaResult<Area> {
        let key = name.to_lowercase();
        let Some(&id) = self.names.get(&key) else {
            return Err(AreaError::NotFound(name.to_owned()));
        };
        let Some(area) = self.areas.get(&id) else {
            return Err(AreaError::NotFound(name.to_owned()));
        };

        for bucket_key in covered_keys(area) {
            let Some(bucket) = self.buckets.get_mut(&bucket_key) else {
                continue;
            };

            let areas = &self.areas;
            bucket.retain(|other| {
                *other != id && !areas.get(&*other).is_some_and(|a| a.key() == key)
            });

            if bucket.is_empty() {
                self.buckets.remove(&bucket_key);
            } else {
                self.sort_bucket(bucket_key);
            }
        }

        self.names.remove(&key);
        self.areas
            .remove(&id)
            .ok_or_else(|| AreaError::NotFound(name.to_owned()))
    }

    /// Highest-priority area whose box contains `pos`.
    ///
    /// Scans only the bucket `pos` falls into.
    pub fn find(&self, pos: &Position) -> Option<&Area> {
        self.find_id(pos).and_then(|id| self.areas.get(&id))
    }

    pub fn find_id(&self, pos: &Position) -> Option<AreaId> {
        self.buckets
            .get(&BucketKey::of(pos))?
            .iter()
            .copied()
            .find(|id| self.areas.get(id).is_some_and(|area| area.contains(pos)))
    }

    /// Case-insensitive lookup.
    pub fn get_area(&self, name: &str) -> Option<&Area> {
        self.id_of(name).and_then(|id| self.areas.get(&id))
    }

    pub fn exist_area(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_lowercase())
    }

    pub fn id_of(&self, name: &str) -> Option<AreaId> {
        self.names.get(&name.to_lowercase()).copied()
    }

    pub fn get(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    /// Run `f` on a registered area.
    ///
    /// A priority change re-sorts the buckets the area covers.
    pub fn edit<R>(&mut self, name: &str, f: impl FnOnce(&mut Area) -> R) -> AreaResult<R> {
        let id = self
            .id_of(name)
            .ok_or_else(|| AreaError::NotFound(name.to_owned()))?;
        let area = self
            .areas
            .get_mut(&id)
            .ok_or_else(|| AreaError::NotFound(name.to_owned()))?;

        let before = area.priority();
        let out = f(area);
        let moved = area.priority() != before;

        if moved {
            self.recalculate_priorities(Some(id));
        }
        Ok(out)
    }

    pub fn set_priority(&mut self, name: &str, priority: i32) -> AreaResult<()> {
        self.edit(name, |area| area.set_priority(priority))
    }

    /// Replace `to`'s flags and sub-flags with `from`'s.
    pub fn copy_flags(&mut self, from: &str, to: &str) -> AreaResult<()> {
        let source = self
            .get_area(from)
            .ok_or_else(|| AreaError::NotFound(from.to_owned()))?;
        let (flags, sub_flags) = (source.flags().clone(), source.sub_flags().clone());

        self.edit(to, |area| {
            area.set_flags(flags);
            area.set_sub_flags(sub_flags);
        })
    }

    /// All areas, in no particular order.
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Ids stored in one bucket, in scan order.
    pub fn bucket(&self, key: BucketKey) -> Option<&[AreaId]> {
        self.buckets.get(&key).map(|b| b.as_slice())
    }

    /// Names stored in one bucket, in scan order.
    pub fn bucket_names(&self, key: BucketKey) -> Vec<&str> {
        self.bucket(key)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.areas.get(id))
            .map(Area::name)
            .collect()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
