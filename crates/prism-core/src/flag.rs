//! Flag catalog.
//!
//! Two closed sets of capability tags an area can allow or deny:
//!
//! - [`Flag`] - coarse actions (`PLAYER_BUILD`, `WORLD_ATTACK_MOBS`, ...)
//! - [`SubFlag`] - finer overrides, each owned by one parent flag whose name
//!   is its prefix (`PLAYER_INTERACT_BUCKET` belongs to `PLAYER_INTERACT`)
//!
//! Each tag carries a compile-time capability node suffix, so the permission
//! strings handed to the host never have to be assembled from enum names at
//! runtime:
//!
//! ```text
//! Flag::PlayerBuild        -> "prism.flag.player_build"
//! SubFlag::WorldDamageFall -> "prism.subflag.world_damage_fall"
//! ```

use core::fmt;
use core::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident in $kind:literal, unknown = $unknown:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $name:literal / $lower:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $ty {
            /// Every tag, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Upper-case identifier, as persisted.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Global capability node for this tag.
            #[must_use]
            pub const fn node(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("prism.", $kind, ".", $lower),)*
                }
            }

            /// Node suffix shared by the global and per-area nodes.
            #[must_use]
            pub const fn node_suffix(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!($kind, ".", $lower),)*
                }
            }
        }

        impl FromStr for $ty {
            type Err = ParseError;

            /// Case-insensitive: `"left_click"` and `"LEFT_CLICK"` are the same tag.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|tag| tag.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseError::$unknown(s.to_owned()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(D::Error::custom)
            }
        }
    };
}

catalog! {
    /// Coarse capability tag.
    pub enum Flag in "flag", unknown = UnknownFlag {
        PlayerBuild = "PLAYER_BUILD" / "player_build",
        PlayerBreak = "PLAYER_BREAK" / "player_break",
        PlayerInteract = "PLAYER_INTERACT" / "player_interact",
        PlayerContainers = "PLAYER_CONTAINERS" / "player_containers",
        PlayerUseItems = "PLAYER_USE_ITEMS" / "player_use_items",
        PlayerDrop = "PLAYER_DROP" / "player_drop",
        PlayerPickup = "PLAYER_PICKUP" / "player_pickup",
        PlayerEmote = "PLAYER_EMOTE" / "player_emote",
        LeftClick = "LEFT_CLICK" / "left_click",
        RightClick = "RIGHT_CLICK" / "right_click",
        WorldAttackPlayers = "WORLD_ATTACK_PLAYERS" / "world_attack_players",
        WorldAttackMobs = "WORLD_ATTACK_MOBS" / "world_attack_mobs",
        WorldInteractPlayers = "WORLD_INTERACT_PLAYERS" / "world_interact_players",
        WorldInteractMobs = "WORLD_INTERACT_MOBS" / "world_interact_mobs",
        WorldDamage = "WORLD_DAMAGE" / "world_damage",
        WorldRegeneration = "WORLD_REGENERATION" / "world_regeneration",
        WorldHungerLoss = "WORLD_HUNGER_LOSS" / "world_hunger_loss",
    }
}

catalog! {
    /// Fine-grained override under a parent [`Flag`].
    pub enum SubFlag in "subflag", unknown = UnknownSubFlag {
        PlayerInteractAxe = "PLAYER_INTERACT_AXE" / "player_interact_axe",
        PlayerInteractShovel = "PLAYER_INTERACT_SHOVEL" / "player_interact_shovel",
        PlayerInteractHoe = "PLAYER_INTERACT_HOE" / "player_interact_hoe",
        PlayerInteractBucket = "PLAYER_INTERACT_BUCKET" / "player_interact_bucket",
        PlayerInteractFlintAndSteel = "PLAYER_INTERACT_FLINT_AND_STEEL" / "player_interact_flint_and_steel",
        PlayerContainersChest = "PLAYER_CONTAINERS_CHEST" / "player_containers_chest",
        PlayerContainersEnderChest = "PLAYER_CONTAINERS_ENDER_CHEST" / "player_containers_ender_chest",
        PlayerContainersFurnace = "PLAYER_CONTAINERS_FURNACE" / "player_containers_furnace",
        PlayerContainersBarrel = "PLAYER_CONTAINERS_BARREL" / "player_containers_barrel",
        PlayerContainersHopper = "PLAYER_CONTAINERS_HOPPER" / "player_containers_hopper",
        PlayerContainersBrewingStand = "PLAYER_CONTAINERS_BREWING_STAND" / "player_containers_brewing_stand",
        PlayerContainersShulkerBox = "PLAYER_CONTAINERS_SHULKER_BOX" / "player_containers_shulker_box",
        PlayerUseItemsEnderPearl = "PLAYER_USE_ITEMS_ENDER_PEARL" / "player_use_items_ender_pearl",
        PlayerUseItemsSnowball = "PLAYER_USE_ITEMS_SNOWBALL" / "player_use_items_snowball",
        PlayerUseItemsEgg = "PLAYER_USE_ITEMS_EGG" / "player_use_items_egg",
        PlayerUseItemsPotions = "PLAYER_USE_ITEMS_POTIONS" / "player_use_items_potions",
        WorldDamageFall = "WORLD_DAMAGE_FALL" / "world_damage_fall",
    }
}

impl SubFlag {
    /// The flag this sub-flag refines.
    #[must_use]
    pub const fn parent(self) -> Flag {
        match self {
            Self::PlayerInteractAxe
            | Self::PlayerInteractShovel
            | Self::PlayerInteractHoe
            | Self::PlayerInteractBucket
            | Self::PlayerInteractFlintAndSteel => Flag::PlayerInteract,
            Self::PlayerContainersChest
            | Self::PlayerContainersEnderChest
            | Self::PlayerContainersFurnace
            | Self::PlayerContainersBarrel
            | Self::PlayerContainersHopper
            | Self::PlayerContainersBrewingStand
            | Self::PlayerContainersShulkerBox => Flag::PlayerContainers,
            Self::PlayerUseItemsEnderPearl
            | Self::PlayerUseItemsSnowball
            | Self::PlayerUseItemsEgg
            | Self::PlayerUseItemsPotions => Flag::PlayerUseItems,
            Self::WorldDamageFall => Flag::WorldDamage,
        }
    }
}

impl Flag {
    /// Sub-flags refining this flag. Empty for most flags.
    pub fn sub_flags(self) -> impl Iterator<Item = SubFlag> {
        SubFlag::ALL
            .iter()
            .copied()
            .filter(move |sub| sub.parent() == self)
    }
}

/// Either kind of tag, as accepted by permission checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnyFlag {
    Flag(Flag),
    SubFlag(SubFlag),
}

impl AnyFlag {
    /// Upper-case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flag(flag) => flag.name(),
            Self::SubFlag(sub) => sub.name(),
        }
    }

    /// Global capability node.
    #[must_use]
    pub const fn node(self) -> &'static str {
        match self {
            Self::Flag(flag) => flag.node(),
            Self::SubFlag(sub) => sub.node(),
        }
    }

    #[must_use]
    pub const fn node_suffix(self) -> &'static str {
        match self {
            Self::Flag(flag) => flag.node_suffix(),
            Self::SubFlag(sub) => sub.node_suffix(),
        }
    }
}

impl From<Flag> for AnyFlag {
    fn from(flag: Flag) -> Self {
        Self::Flag(flag)
    }
}

impl From<SubFlag> for AnyFlag {
    fn from(sub: SubFlag) -> Self {
        Self::SubFlag(sub)
    }
}

impl FromStr for AnyFlag {
    type Err = ParseError;

    /// Flags first, then sub-flags. An identifier in neither set reports as an unknown flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Flag>()
            .map(Self::Flag)
            .or_else(|_| s.parse::<SubFlag>().map(Self::SubFlag))
            .map_err(|_| ParseError::UnknownFlag(s.to_owned()))
    }
}

impl fmt::Display for AnyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
