//! JSON area store.

use std::path::{Path, PathBuf};
use std::{fs, io};

use prism_core::{Area, AreaError, AreaResult, ParseError};
use prism_spatial::SharedAreas;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::record::{AreaRecord, WorldRegistry};

/// Outcome of a load pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// All areas in one JSON object, keyed by lower-cased name.
#[derive(Debug, Clone)]
pub struct AreaStore {
    path: PathBuf,
}

impl AreaStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse every record, skipping the malformed ones.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// fails as a whole.
    pub fn load(&self, worlds: &dyn WorldRegistry) -> AreaResult<(Vec<Area>, usize)> {
        let object = match self.read_object()? {
            Some(object) => object,
            None => return Ok((Vec::new(), 0)),
        };

        let mut areas = Vec::with_capacity(object.len());
        let mut skipped = 0;
        for (key, value) in object {
            match parse_record(value, worlds) {
                Ok(area) => {
                    debug!("Parsed area {key}");
                    areas.push(area);
                }
                Err(err) => {
                    warn!("Skipping area record {key}: {err}");
                    skipped += 1;
                }
            }
        }
        Ok((areas, skipped))
    }

    /// Load straight into a live registry.
    ///
    /// Records whose name is already registered are skipped.
    pub fn load_into(
        &self,
        areas: &SharedAreas,
        worlds: &dyn WorldRegistry,
    ) -> AreaResult<LoadReport> {
        let (parsed, mut skipped) = self.load(worlds)?;
        let mut loaded = 0;

        for area in parsed {
            match areas.register(area) {
                Ok(_) => loaded += 1,
                Err(err) => {
                    warn!("Skipping area: {err}");
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {loaded} areas from {} ({skipped} skipped)",
            self.path.display()
        );
        Ok(LoadReport { loaded, skipped })
    }

    /// Write every area, replacing the file atomically.
    pub fn save<'a>(&self, areas: impl IntoIterator<Item = &'a Area>) -> AreaResult<usize> {
        let mut object = Map::new();
        for area in areas {
            let record = serde_json::to_value(AreaRecord::from_area(area)).map_err(ParseError::from)?;
            object.insert(area.key(), record);
        }
        let count = object.len();
        let json = serde_json::to_string_pretty(&Value::Object(object)).map_err(ParseError::from)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Saved {count} areas to {}", self.path.display());
        Ok(count)
    }

    /// Save a registry's current contents in priority order.
    pub fn save_shared(&self, areas: &SharedAreas) -> AreaResult<usize> {
        self.save(&areas.snapshot())
    }

    fn read_object(&self) -> AreaResult<Option<Map<String, Value>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AreaError::Io(err)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let object = serde_json::from_str(&text).map_err(ParseError::from)?;
        Ok(Some(object))
    }
}

fn parse_record(value: Value, worlds: &dyn WorldRegistry) -> Result<Area, ParseError> {
    let record: AreaRecord = serde_json::from_value(value)?;
    record.into_area(worlds)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prism_core::{BlockPos, Bounds, Flag, SubFlag, WorldRef};
    use serde_json::json;

    use super::*;
    use crate::record::StaticWorlds;

    fn worlds() -> StaticWorlds {
        StaticWorlds::new([WorldRef::new(0, "world"), WorldRef::new(1, "nether")])
    }

    fn area(name: &str, priority: i32) -> Area {
        let bounds = Bounds::new(BlockPos::new(0, 0, 0), BlockPos::new(10, 10, 10)).unwrap();
        Area::new(priority, name, WorldRef::new(0, "world"), bounds)
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = AreaStore::open(dir.path().join("areas.json"));

        let mut spawn = area("Spawn", 2);
        spawn.set_flag(Flag::PlayerBreak, false);
        spawn.set_sub_flag(SubFlag::WorldDamageFall, false);
        let market = area("market", 1);

        assert_eq!(store.save([&spawn, &market]).unwrap(), 2);

        let (mut loaded, skipped) = store.load(&worlds()).unwrap();
        loaded.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(skipped, 0);
        assert_eq!(loaded, vec![spawn, market]);
    }

    #[test]
    fn test_keys_are_lower_case_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = AreaStore::open(dir.path().join("areas.json"));
        store.save([&area("Spawn", 1)]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["spawn"]["name"], json!("Spawn"));
        assert!(!dir.path().join("areas.json.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AreaStore::open(dir.path().join("nope.json"));
        let (areas, skipped) = store.load(&worlds()).unwrap();
        assert!(areas.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.json");
        let aabb = json!({"minX": 0, "minY": 0, "minZ": 0, "maxX": 5, "maxY": 5, "maxZ": 5});
        let data = json!({
            "good": {"priority": 1, "name": "good", "world": "world", "aabb": aabb, "flags": {}, "subFlags": {}},
            "noflags": {"name": "noflags", "world": "world", "aabb": aabb, "subFlags": {}},
            "badflag": {"name": "badflag", "world": "world", "aabb": aabb, "flags": {"FLY": true}, "subFlags": {}},
            "lost": {"name": "lost", "world": "the_end", "aabb": aabb, "flags": {}, "subFlags": {}},
            "inverted": {"name": "inverted", "world": "world",
                "aabb": {"minX": 9, "minY": 0, "minZ": 0, "maxX": 1, "maxY": 5, "maxZ": 5},
                "flags": {}, "subFlags": {}},
        });
        fs::write(&path, data.to_string()).unwrap();

        let shared = SharedAreas::new();
        let report = AreaStore::open(&path).load_into(&shared, &worlds()).unwrap();

        assert_eq!(report, LoadReport { loaded: 1, skipped: 4 });
        assert!(shared.exist_area("good"));
    }

    #[test]
    fn test_duplicate_names_skipped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.json");
        let aabb = json!({"minX": 0, "minY": 0, "minZ": 0, "maxX": 5, "maxY": 5, "maxZ": 5});
        let data = json!({
            "one": {"name": "Twin", "world": "world", "aabb": aabb, "flags": {}, "subFlags": {}},
            "two": {"name": "twin", "world": "world", "aabb": aabb, "flags": {}, "subFlags": {}},
        });
        fs::write(&path, data.to_string()).unwrap();

        let shared = SharedAreas::new();
        let report = AreaStore::open(&path).load_into(&shared, &worlds()).unwrap();
        assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });
    }

    #[test]
    fn test_non_object_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = AreaStore::open(&path).load(&worlds()).unwrap_err();
        assert!(matches!(err, AreaError::Parse(ParseError::Json(_))));
    }

    #[test]
    fn test_save_shared_roundtrip_through_registry() {
        let dir = tempfile::tempdir().unwrap();
        let store = AreaStore::open(dir.path().join("nested").join("areas.json"));

        let shared = SharedAreas::new();
        shared.register(area("high", 5)).unwrap();
        shared.register(area("low", 1)).unwrap();
        assert_eq!(store.save_shared(&shared).unwrap(), 2);

        let reloaded = SharedAreas::new();
        let report = store.load_into(&reloaded, &worlds()).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(reloaded.snapshot(), shared.snapshot());
    }
}
