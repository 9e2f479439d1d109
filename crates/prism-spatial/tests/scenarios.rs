//! End-to-end area resolution scenarios.

use hashbrown::HashSet;
use pretty_assertions::assert_eq;
use prism_core::{
    Area, AreaError, BlockPos, Bounds, Flag, NodeRegistrar, PermissionTree, Position, SubFlag,
    WorldId, WorldRef,
};
use prism_spatial::{Actor, AreaIndex, BucketKey, Principal, SharedAreas};

const OVERWORLD: WorldId = WorldId(0);
const NETHER: WorldId = WorldId(1);

/// A player whose permissions resolve through a [`PermissionTree`].
struct Player<'a> {
    pos: Position,
    tree: &'a PermissionTree,
    granted: HashSet<String>,
    bypass: bool,
}

impl<'a> Player<'a> {
    fn new(tree: &'a PermissionTree, x: f64, y: f64, z: f64) -> Self {
        Self {
            pos: Position::new(OVERWORLD, x, y, z),
            tree,
            granted: HashSet::new(),
            bypass: false,
        }
    }

    fn grant(mut self, node: &str) -> Self {
        self.granted.insert(node.to_owned());
        self
    }
}

impl Principal for Player<'_> {
    fn has_permission(&self, node: &str) -> bool {
        self.tree.implies(&self.granted, node)
    }

    fn bypasses_areas(&self) -> bool {
        self.bypass
    }
}

impl Actor for Player<'_> {
    fn position(&self) -> Position {
        self.pos
    }

    fn principal(&self) -> Option<&dyn Principal> {
        Some(self)
    }
}

struct Zombie(Position);

impl Actor for Zombie {
    fn position(&self) -> Position {
        self.0
    }
}

fn boxed(name: &str, priority: i32, world: u32, min: [i32; 3], max: [i32; 3]) -> Area {
    let bounds = Bounds::new(
        BlockPos::new(min[0], min[1], min[2]),
        BlockPos::new(max[0], max[1], max[2]),
    )
    .unwrap();
    let world_name = if world == 0 { "world" } else { "nether" };
    Area::new(priority, name, WorldRef::new(world, world_name), bounds)
}

fn at(x: f64, y: f64, z: f64) -> Option<Position> {
    Some(Position::new(OVERWORLD, x, y, z))
}

fn spawn_index() -> (AreaIndex, PermissionTree) {
    let mut tree = PermissionTree::new();
    let mut registrar = NodeRegistrar::new();

    let mut spawn = boxed("spawn", 1, 0, [0, 0, 0], [10, 10, 10]);
    spawn.set_flag(Flag::PlayerBreak, false);
    spawn.set_flag(Flag::WorldAttackPlayers, false);
    spawn.set_sub_flag(SubFlag::PlayerInteractBucket, false);
    registrar.register_area(spawn.name(), &mut tree);

    let mut index = AreaIndex::new();
    index.register(spawn).unwrap();
    (index, tree)
}

#[test]
fn spawn_denies_break_inside_only() {
    let (index, tree) = spawn_index();
    let player = Player::new(&tree, 100.0, 64.0, 100.0);

    assert!(!index.can(Flag::PlayerBreak, &player, at(5.0, 5.0, 5.0)));
    assert!(!index.can(Flag::PlayerBreak, &player, at(10.0, 10.0, 10.0)));
    assert!(index.can(Flag::PlayerBreak, &player, at(10.5, 5.0, 5.0)));
    assert!(index.can(Flag::PlayerBreak, &player, at(5.0, 11.0, 5.0)));
    assert!(index.can(Flag::PlayerBuild, &player, at(5.0, 5.0, 5.0)));
}

#[test]
fn other_world_is_unaffected() {
    let (index, tree) = spawn_index();
    let player = Player::new(&tree, 0.0, 0.0, 0.0);
    let nether = Some(Position::new(NETHER, 5.0, 5.0, 5.0));

    assert!(index.can(Flag::PlayerBreak, &player, nether));
}

#[test]
fn override_node_and_wildcard_grant() {
    let (index, tree) = spawn_index();

    let exact = Player::new(&tree, 5.0, 5.0, 5.0).grant("prism.area.spawn.flag.player_break");
    assert!(index.can(Flag::PlayerBreak, &exact, None));
    assert!(!index.can(Flag::WorldAttackPlayers, &exact, None));

    // Global node is the parent of every per-area node for that flag.
    let global = Player::new(&tree, 5.0, 5.0, 5.0).grant("prism.flag.world_attack_players");
    assert!(index.can(Flag::WorldAttackPlayers, &global, None));

    let wildcard = Player::new(&tree, 5.0, 5.0, 5.0).grant("prism.subflag.*");
    assert!(index.can(SubFlag::PlayerInteractBucket, &wildcard, None));
    assert!(!index.can(Flag::PlayerBreak, &wildcard, None));
}

#[test]
fn bypass_beats_area_flags() {
    let (index, tree) = spawn_index();
    let mut player = Player::new(&tree, 5.0, 5.0, 5.0);
    player.bypass = true;

    for &flag in Flag::ALL {
        assert!(index.can(flag, &player, None), "{flag}");
    }
}

#[test]
fn plain_entities_cannot_hold_overrides() {
    let (index, _tree) = spawn_index();
    let zombie = Zombie(Position::new(OVERWORLD, 5.0, 5.0, 5.0));

    assert!(!index.can(Flag::WorldAttackPlayers, &zombie, None));
    assert!(index.can(Flag::WorldAttackMobs, &zombie, None));
}

#[test]
fn overlapping_areas_resolve_by_priority_then_name() {
    let mut index = AreaIndex::new();
    let mut town = boxed("town", 1, 0, [-100, 0, -100], [100, 255, 100]);
    town.set_flag(Flag::PlayerBuild, false);
    let plot = boxed("plot", 5, 0, [10, 60, 10], [20, 80, 20]);
    index.register(town).unwrap();
    index.register(plot).unwrap();

    let tree = PermissionTree::new();
    let player = Player::new(&tree, 0.0, 0.0, 0.0);

    assert!(index.can(Flag::PlayerBuild, &player, at(15.0, 70.0, 15.0)));
    assert!(!index.can(Flag::PlayerBuild, &player, at(15.0, 90.0, 15.0)));
    assert!(!index.can(Flag::PlayerBuild, &player, at(-50.0, 70.0, -50.0)));

    index.register(boxed("Alpha", 5, 0, [10, 60, 10], [20, 80, 20])).unwrap();
    let hit = Position::new(OVERWORLD, 12.0, 61.0, 12.0);
    assert_eq!(index.find(&hit).map(Area::name), Some("Alpha"));
}

#[test]
fn chunk_straddling_area_found_from_both_sides() {
    let mut index = AreaIndex::new();
    index.register(boxed("bridge", 1, 0, [15, 0, 0], [17, 5, 5])).unwrap();

    for x in [15.0, 15.9, 16.0, 17.0] {
        let p = Position::new(OVERWORLD, x, 1.0, 1.0);
        assert_eq!(index.find(&p).map(Area::name), Some("bridge"), "x = {x}");
    }
    assert!(index.find(&Position::new(OVERWORLD, 18.0, 1.0, 1.0)).is_none());
    assert_eq!(index.bucket_count(), 2);
}

#[test]
fn negative_coordinates_bucket_by_floor() {
    let mut index = AreaIndex::new();
    index.register(boxed("south", 1, 0, [-17, 0, -1], [-16, 5, 0])).unwrap();

    assert_eq!(
        index.bucket_names(BucketKey::new(OVERWORLD, prism_core::ChunkPos::new(-2, -1))),
        vec!["south"]
    );
    let p = Position::new(OVERWORLD, -16.5, 2.0, -0.5);
    assert_eq!(index.find(&p).map(Area::name), Some("south"));
}

#[test]
fn delete_then_reregister_same_name() {
    let mut index = AreaIndex::new();
    index.register(boxed("arena", 1, 0, [0, 0, 0], [40, 40, 40])).unwrap();
    assert!(matches!(
        index.register(boxed("ARENA", 1, 0, [0, 0, 0], [4, 4, 4])),
        Err(AreaError::Duplicate(_))
    ));

    index.delete("Arena").unwrap();
    index.register(boxed("arena", 1, 0, [100, 0, 100], [104, 4, 104])).unwrap();

    assert!(index.find(&Position::new(OVERWORLD, 20.0, 20.0, 20.0)).is_none());
    assert_eq!(
        index
            .find(&Position::new(OVERWORLD, 102.0, 2.0, 102.0))
            .map(Area::name),
        Some("arena")
    );
    assert_eq!(index.len(), 1);
}

#[test]
fn prioritize_flips_resolution_everywhere() {
    let areas = SharedAreas::new();
    areas.register(boxed("wide", 9, 0, [-40, 0, -40], [40, 40, 40])).unwrap();
    areas.register(boxed("narrow", 2, 0, [-20, 0, -20], [20, 40, 20])).unwrap();

    let probes = [(-20.0, 10.0, -20.0), (0.0, 10.0, 0.0), (20.0, 10.0, 20.0)];
    for (x, y, z) in probes {
        let p = Position::new(OVERWORLD, x, y, z);
        assert_eq!(areas.find_name(&p).as_deref(), Some("wide"));
    }

    assert!(areas.prioritize("narrow", "wide"));
    for (x, y, z) in probes {
        let p = Position::new(OVERWORLD, x, y, z);
        assert_eq!(areas.find_name(&p).as_deref(), Some("narrow"));
    }

    let priorities: Vec<_> = areas
        .snapshot()
        .iter()
        .map(|a| (a.name().to_owned(), a.priority()))
        .collect();
    assert_eq!(
        priorities,
        vec![("narrow".to_owned(), 2), ("wide".to_owned(), 1)]
    );
}
