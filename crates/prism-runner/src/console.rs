//! Operator console: line parsing and command execution.

use prism_core::{AnyFlag, Area, BlockPos, Position, Selection};
use prism_persist::{AreaStore, StaticWorlds, WorldRegistry};
use prism_spatial::SharedAreas;
use tracing::error;

/// Commands sent from the input thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Info(String),
    Find {
        world: String,
        x: f64,
        y: f64,
        z: f64,
    },
    Create {
        name: String,
        world: String,
        pos1: BlockPos,
        pos2: BlockPos,
    },
    Prioritize {
        target: String,
        reference: String,
    },
    Delete(String),
    Copy {
        from: String,
        to: String,
    },
    Flag {
        area: String,
        flag: AnyFlag,
        value: bool,
    },
    Save,
    Help,
    Quit,
    /// Known command, wrong arguments.
    Usage(&'static str),
    /// Known command, argument rejected.
    Invalid(String),
    Unknown(String),
}

const HELP: &[&str] = &[
    "Commands:",
    "  list                               - List areas by priority",
    "  info <area>                        - Show an area",
    "  find <world> <x> <y> <z>           - Area governing a position",
    "  create <area> <world> <x1> <y1> <z1> <x2> <y2> <z2>",
    "                                     - Create an area from two corners",
    "  prioritize <target> <reference>    - Put target directly above reference",
    "  delete <area>                      - Delete an area",
    "  copy <from> <to>                   - Copy flags between areas",
    "  flag <area> <flag> <true|false>    - Set a flag or sub-flag",
    "  save                               - Write areas to disk",
    "  q, quit                            - Save and exit",
    "  help                               - Show this help",
];

pub fn parse_command(input: &str) -> Command {
    let args: Vec<&str> = input.split_whitespace().collect();
    let Some((&head, rest)) = args.split_first() else {
        return Command::Unknown(String::new());
    };

    match (head.to_lowercase().as_str(), rest) {
        ("l" | "list", []) => Command::List,
        ("info", [name]) => Command::Info((*name).to_owned()),
        ("info", _) => Command::Usage("info <area>"),
        ("find", [world, x, y, z]) => match coords([x, y, z]) {
            Some([x, y, z]) => Command::Find {
                world: (*world).to_owned(),
                x,
                y,
                z,
            },
            None => Command::Usage("find <world> <x> <y> <z>"),
        },
        ("find", _) => Command::Usage("find <world> <x> <y> <z>"),
        ("create", [name, world, a @ ..]) if a.len() == 6 => {
            match (block(&a[..3]), block(&a[3..])) {
                (Some(pos1), Some(pos2)) => Command::Create {
                    name: (*name).to_owned(),
                    world: (*world).to_owned(),
                    pos1,
                    pos2,
                },
                _ => Command::Usage("create <area> <world> <x1> <y1> <z1> <x2> <y2> <z2>"),
            }
        }
        ("create", _) => Command::Usage("create <area> <world> <x1> <y1> <z1> <x2> <y2> <z2>"),
        ("prioritize", [target, reference]) => Command::Prioritize {
            target: (*target).to_owned(),
            reference: (*reference).to_owned(),
        },
        ("prioritize", _) => Command::Usage("prioritize <target> <reference>"),
        ("delete", [name]) => Command::Delete((*name).to_owned()),
        ("delete", _) => Command::Usage("delete <area>"),
        ("copy", [from, to]) => Command::Copy {
            from: (*from).to_owned(),
            to: (*to).to_owned(),
        },
        ("copy", _) => Command::Usage("copy <from> <to>"),
        ("flag", [area, flag, value]) => {
            let Ok(value) = value.to_lowercase().parse::<bool>() else {
                return Command::Usage("flag <area> <flag> <true|false>");
            };
            match flag.parse::<AnyFlag>() {
                Ok(flag) => Command::Flag {
                    area: (*area).to_owned(),
                    flag,
                    value,
                },
                Err(err) => Command::Invalid(err.to_string()),
            }
        }
        ("flag", _) => Command::Usage("flag <area> <flag> <true|false>"),
        ("save", []) => Command::Save,
        ("q" | "quit" | "exit", []) => Command::Quit,
        ("help" | "h" | "?", []) => Command::Help,
        _ => Command::Unknown(input.trim().to_owned()),
    }
}

fn coords(raw: [&&str; 3]) -> Option<[f64; 3]> {
    let [x, y, z] = raw.map(|s| s.parse::<f64>().ok());
    Some([x?, y?, z?])
}

fn block(raw: &[&str]) -> Option<BlockPos> {
    let [x, y, z] = raw else {
        return None;
    };
    Some(BlockPos::new(x.parse().ok()?, y.parse().ok()?, z.parse().ok()?))
}

/// Executes commands against the live registry.
pub struct Console {
    areas: SharedAreas,
    store: AreaStore,
    worlds: StaticWorlds,
}

impl Console {
    pub const fn new(areas: SharedAreas, store: AreaStore, worlds: StaticWorlds) -> Self {
        Self {
            areas,
            store,
            worlds,
        }
    }

    /// Write all areas to the store. Failures are logged, not fatal.
    pub fn save(&self) -> Option<usize> {
        match self.store.save_shared(&self.areas) {
            Ok(count) => Some(count),
            Err(err) => {
                error!("Failed to save areas to {}: {err}", self.store.path().display());
                None
            }
        }
    }

    /// Run one command and return the lines to show the operator.
    ///
    /// `Quit` is handled by the caller.
    pub fn execute(&self, command: Command) -> Vec<String> {
        match command {
            Command::List => self.list(),
            Command::Info(name) => match self.areas.get_area(&name) {
                Some(area) => describe(&area),
                None => vec![format!("Area '{name}' not found")],
            },
            Command::Find { world, x, y, z } => {
                let Some(world) = self.worlds.world_by_name(&world) else {
                    return vec![format!("World '{world}' not loaded")];
                };
                let pos = Position::new(world.id, x, y, z);
                match self.areas.find_name(&pos) {
                    Some(name) => vec![format!("{x} {y} {z} in {world} is inside '{name}'")],
                    None => vec![format!("{x} {y} {z} in {world} is outside every area")],
                }
            }
            Command::Create {
                name,
                world,
                pos1,
                pos2,
            } => self.create(&name, &world, pos1, pos2),
            Command::Prioritize { target, reference } => {
                if self.areas.prioritize(&target, &reference) {
                    vec![format!("'{target}' now takes priority over '{reference}'")]
                } else {
                    vec![format!("Cannot prioritize '{target}' over '{reference}'")]
                }
            }
            Command::Delete(name) => match self.areas.delete(&name) {
                Ok(area) => vec![format!("Deleted area '{}'", area.name())],
                Err(err) => vec![err.to_string()],
            },
            Command::Copy { from, to } => match self.areas.copy_flags(&from, &to) {
                Ok(()) => vec![format!("Copied flags from '{from}' to '{to}'")],
                Err(err) => vec![err.to_string()],
            },
            Command::Flag { area, flag, value } => {
                match self.areas.edit(&area, |a| a.set(flag, value)) {
                    Ok(()) => vec![format!("Set {flag} = {value} on '{area}'")],
                    Err(err) => vec![err.to_string()],
                }
            }
            Command::Save => match self.save() {
                Some(count) => vec![format!("Saved {count} areas")],
                None => vec!["Save failed, see log".to_owned()],
            },
            Command::Help => HELP.iter().map(|&line| line.to_owned()).collect(),
            Command::Quit => Vec::new(),
            Command::Usage(usage) => vec![format!("Usage: {usage}")],
            Command::Invalid(reason) => vec![reason],
            Command::Unknown(input) if input.is_empty() => Vec::new(),
            Command::Unknown(input) => {
                vec![format!("Unknown command: '{input}'. Type 'help' for commands.")]
            }
        }
    }

    fn list(&self) -> Vec<String> {
        let areas = self.areas.snapshot();
        let mut lines = Vec::with_capacity(areas.len() + 1);
        lines.push(format!("Areas ({}):", areas.len()));
        lines.extend(
            areas
                .iter()
                .map(|a| format!("  {:>4}  {} ({})", a.priority(), a.name(), a.world())),
        );
        lines
    }

    fn create(&self, name: &str, world: &str, pos1: BlockPos, pos2: BlockPos) -> Vec<String> {
        let Some(world) = self.worlds.world_by_name(world) else {
            return vec![format!("World '{world}' not loaded")];
        };
        let selection = Selection::new(world, pos1, pos2);
        let priority = i32::try_from(self.areas.len()).unwrap_or(i32::MAX);

        let area = match Area::from_selection(priority, name, &selection) {
            Ok(area) => area,
            Err(err) => return vec![err.to_string()],
        };
        match self.areas.register(area) {
            Ok(_) => vec![format!("Created area '{name}' with priority {priority}")],
            Err(err) => vec![err.to_string()],
        }
    }
}

fn describe(area: &Area) -> Vec<String> {
    let (min, max) = (area.bounds().min(), area.bounds().max());
    let mut lines = vec![
        format!("Area '{}' (priority {})", area.name(), area.priority()),
        format!(
            "  world {}: ({}, {}, {}) to ({}, {}, {})",
            area.world(),
            min.x,
            min.y,
            min.z,
            max.x,
            max.y,
            max.z
        ),
    ];
    lines.extend(area.flags().iter().map(|(f, v)| format!("  {f} = {v}")));
    lines.extend(area.sub_flags().iter().map(|(s, v)| format!("  {s} = {v}")));
    lines
}
