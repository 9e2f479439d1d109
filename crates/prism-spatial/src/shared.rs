//! Shared area registry handle.

use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use prism_core::{AnyFlag, Area, AreaResult, NodeRegistrar, PermissionRegistry, Position};
use tracing::info;

use crate::evaluator::Actor;
use crate::index::AreaIndex;
use crate::key::AreaId;

struct Permissions {
    registrar: NodeRegistrar,
    registry: Box<dyn PermissionRegistry + Send + Sync>,
}

#[derive(Default)]
struct Inner {
    index: AreaIndex,
    permissions: Option<Permissions>,
}

/// Cloneable handle to one [`AreaIndex`].
///
/// Queries share a read lock. Mutations hold the write lock for the whole
/// operation, so a query never sees a half-registered area or a half-sorted
/// bucket.
#[derive(Clone, Default)]
pub struct SharedAreas {
    inner: Arc<RwLock<Inner>>,
}

impl SharedAreas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare capability nodes with `registry`: the catalog now, and per-area
    /// nodes as each area is registered.
    #[must_use]
    pub fn with_permissions(registry: impl PermissionRegistry + Send + Sync + 'static) -> Self {
        let mut permissions = Permissions {
            registrar: NodeRegistrar::new(),
            registry: Box::new(registry),
        };
        permissions
            .registrar
            .register_catalog(permissions.registry.as_mut());

        Self {
            inner: Arc::new(RwLock::new(Inner {
                index: AreaIndex::new(),
                permissions: Some(permissions),
            })),
        }
    }

    /// Read-locked view of the index.
    pub fn read(&self) -> MappedRwLockReadGuard<'_, AreaIndex> {
        RwLockReadGuard::map(self.inner.read(), |inner| &inner.index)
    }

    /// Register an area and declare its per-area nodes.
    pub fn register(&self, area: Area) -> AreaResult<AreaId> {
        let mut inner = self.inner.write();
        let name = area.name().to_owned();
        let id = inner.index.register(area)?;

        if let Some(permissions) = inner.permissions.as_mut() {
            permissions
                .registrar
                .register_area(&name, permissions.registry.as_mut());
        }
        info!("Registered area {name}");
        Ok(id)
    }

    pub fn delete(&self, name: &str) -> AreaResult<Area> {
        let area = self.inner.write().index.delete(name)?;
        info!("Deleted area {}", area.name());
        Ok(area)
    }

    pub fn prioritize(&self, target: &str, reference: &str) -> bool {
        self.inner.write().index.prioritize(target, reference)
    }

    pub fn edit<R>(&self, name: &str, f: impl FnOnce(&mut Area) -> R) -> AreaResult<R> {
        self.inner.write().index.edit(name, f)
    }

    pub fn set_priority(&self, name: &str, priority: i32) -> AreaResult<()> {
        self.inner.write().index.set_priority(name, priority)
    }

    pub fn copy_flags(&self, from: &str, to: &str) -> AreaResult<()> {
        self.inner.write().index.copy_flags(from, to)
    }

    pub fn can<A: Actor + ?Sized>(
        &self,
        flag: impl Into<AnyFlag>,
        actor: &A,
        position: Option<Position>,
    ) -> bool {
        self.read().can(flag, actor, position)
    }

    /// Name of the area governing `pos`, if any.
    pub fn find_name(&self, pos: &Position) -> Option<String> {
        self.read().find(pos).map(|area| area.name().to_owned())
    }

    pub fn get_area(&self, name: &str) -> Option<Area> {
        self.read().get_area(name).cloned()
    }

    pub fn exist_area(&self, name: &str) -> bool {
        self.read().exist_area(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every area in scan order.
    pub fn snapshot(&self) -> Vec<Area> {
        self.read().by_priority().into_iter().cloned().collect()
    }
}
