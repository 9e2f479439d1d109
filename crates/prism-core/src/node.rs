//! Capability nodes.
//!
//! ```text
//! prism.flag.*                               wildcard root
//! └── prism.flag.player_build                global node (static)
//!     └── prism.area.spawn.flag.player_build per-area node
//! ```
//!
//! Sub-flags mirror this under `prism.subflag.*`. Granting a parent node
//! grants every child beneath it.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::flag::{AnyFlag, Flag, SubFlag};

/// Root of every node this crate declares.
pub const NAMESPACE: &str = "prism";
pub const FLAG_WILDCARD: &str = "prism.flag.*";
pub const SUB_FLAG_WILDCARD: &str = "prism.subflag.*";

/// Per-area override node, all lower case.
pub fn area_node(area_name: &str, flag: AnyFlag) -> String {
    format!(
        "{NAMESPACE}.area.{}.{}",
        area_name.to_lowercase(),
        flag.node_suffix()
    )
}

/// Host permission system, as far as node declaration goes.
pub trait PermissionRegistry {
    /// Declare `node`, as a child of `parent` when given.
    fn declare(&mut self, node: &str, parent: Option<&str>);
}

/// Declares catalog and per-area nodes at most once per process.
#[derive(Debug, Default)]
pub struct NodeRegistrar {
    catalog: bool,
    areas: HashSet<String>,
}

impl NodeRegistrar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare wildcards and every global flag/sub-flag node.
    pub fn register_catalog(&mut self, registry: &mut dyn PermissionRegistry) {
        if self.catalog {
            return;
        }
        registry.declare(FLAG_WILDCARD, None);
        registry.declare(SUB_FLAG_WILDCARD, None);
        for flag in Flag::ALL {
            registry.declare(flag.node(), Some(FLAG_WILDCARD));
            debug!("Registered permission for flag: {}", flag.node());
        }
        for sub in SubFlag::ALL {
            registry.declare(sub.node(), Some(SUB_FLAG_WILDCARD));
            debug!("Registered permission for sub-flag: {}", sub.node());
        }
        self.catalog = true;
    }

    /// Declare per-area nodes for `area_name`. Returns `false` if already done.
    pub fn register_area(&mut self, area_name: &str, registry: &mut dyn PermissionRegistry) -> bool {
        self.register_catalog(registry);
        if !self.areas.insert(area_name.to_lowercase()) {
            return false;
        }

        let tags = Flag::ALL
            .iter()
            .map(|&f| AnyFlag::from(f))
            .chain(SubFlag::ALL.iter().map(|&s| AnyFlag::from(s)));
        for tag in tags {
            registry.declare(&area_node(area_name, tag), Some(tag.node()));
        }
        debug!("Registered permissions for area {area_name}");
        true
    }
}

/// In-memory node tree, for hosts without their own permission system.
#[derive(Debug, Default)]
pub struct PermissionTree {
    parents: HashMap<String, Option<String>>,
}

impl PermissionTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.parents.contains_key(node)
    }

    pub fn parent(&self, node: &str) -> Option<&str> {
        self.parents.get(node).and_then(|p| p.as_deref())
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether holding `granted` implies `node`, directly or through an ancestor.
    pub fn implies(&self, granted: &HashSet<String>, node: &str) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if granted.contains(n) {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}

impl PermissionRegistry for PermissionTree {
    fn declare(&mut self, node: &str, parent: Option<&str>) {
        self.parents
            .insert(node.to_owned(), parent.map(str::to_owned));
    }
}
