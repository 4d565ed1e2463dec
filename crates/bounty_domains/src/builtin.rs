//! # Built-in Names
//!
//! Stock names for the classic block game ids, so small rule files can say
//! `mob = "zombie"` without shipping their own registry.

use crate::error::RegistryResult;
use crate::ids::{DamageCause, ItemId, MobType, PotionType};
use crate::registry::{Registries, Registry};

const ITEMS: &[(&str, u32)] = &[
    ("stone", 1),
    ("grass", 2),
    ("dirt", 3),
    ("cobblestone", 4),
    ("wood", 5),
    ("sapling", 6),
    ("sand", 12),
    ("gravel", 13),
    ("gold_ore", 14),
    ("iron_ore", 15),
    ("coal_ore", 16),
    ("log", 17),
    ("leaves", 18),
    ("glass", 20),
    ("lapis_ore", 21),
    ("wool", 35),
    ("obsidian", 49),
    ("torch", 50),
    ("diamond_ore", 56),
    ("workbench", 58),
    ("crops", 59),
    ("furnace", 61),
    ("redstone_ore", 73),
    ("cactus", 81),
    ("sugar_cane_block", 83),
    ("pumpkin", 86),
    ("netherrack", 87),
    ("melon_block", 103),
    ("iron_ingot", 265),
    ("gold_ingot", 266),
    ("diamond", 264),
    ("bread", 297),
    ("cooked_fish", 350),
    ("cooked_beef", 364),
    ("cooked_chicken", 366),
    ("grilled_pork", 320),
];

const ITEM_GROUPS: &[(&str, &[&str])] = &[
    ("ores", &["gold_ore", "iron_ore", "coal_ore", "lapis_ore", "diamond_ore", "redstone_ore"]),
    ("ingots", &["iron_ingot", "gold_ingot"]),
    ("cooked_food", &["cooked_fish", "cooked_beef", "cooked_chicken", "grilled_pork"]),
    ("plants", &["sapling", "crops", "cactus", "sugar_cane_block", "pumpkin", "melon_block"]),
];

const MOBS: &[(&str, u32)] = &[
    ("creeper", 50),
    ("skeleton", 51),
    ("spider", 52),
    ("giant", 53),
    ("zombie", 54),
    ("slime", 55),
    ("ghast", 56),
    ("pig_zombie", 57),
    ("enderman", 58),
    ("cave_spider", 59),
    ("silverfish", 60),
    ("blaze", 61),
    ("magma_cube", 62),
    ("ender_dragon", 63),
    ("pig", 90),
    ("sheep", 91),
    ("cow", 92),
    ("chicken", 93),
    ("squid", 94),
    ("wolf", 95),
    ("mushroom_cow", 96),
    ("snowman", 97),
    ("ocelot", 98),
    ("iron_golem", 99),
    ("villager", 120),
];

const MOB_GROUPS: &[(&str, &[&str])] = &[
    (
        "hostile",
        &["creeper", "skeleton", "spider", "giant", "zombie", "slime", "ghast", "enderman",
          "cave_spider", "silverfish", "blaze", "magma_cube", "ender_dragon"],
    ),
    ("animals", &["pig", "sheep", "cow", "chicken", "squid", "wolf", "mushroom_cow", "ocelot"]),
    ("golems", &["snowman", "iron_golem"]),
    ("undead", &["skeleton", "zombie", "pig_zombie"]),
];

const POTIONS: &[(&str, u16)] = &[
    ("regeneration", 1),
    ("swiftness", 2),
    ("fire_resistance", 3),
    ("poison", 4),
    ("healing", 5),
    ("weakness", 8),
    ("strength", 9),
    ("slowness", 10),
    ("harming", 12),
];

const DAMAGE_CAUSES: &[(&str, u16)] = &[
    ("contact", 0),
    ("entity_attack", 1),
    ("projectile", 2),
    ("suffocation", 3),
    ("fall", 4),
    ("fire", 5),
    ("fire_tick", 6),
    ("melting", 7),
    ("lava", 8),
    ("drowning", 9),
    ("block_explosion", 10),
    ("entity_explosion", 11),
    ("void", 12),
    ("lightning", 13),
    ("suicide", 14),
    ("starvation", 15),
    ("poison", 16),
    ("magic", 17),
    ("custom", 18),
];

const DAMAGE_GROUPS: &[(&str, &[&str])] = &[
    ("burning", &["fire", "fire_tick", "lava"]),
    ("explosion", &["block_explosion", "entity_explosion"]),
];

fn build<V, R>(
    kind: &'static str,
    names: &[(&str, R)],
    groups: &[(&str, &[&str])],
) -> RegistryResult<Registry<V>>
where
    V: Clone + PartialEq + From<R>,
    R: Copy,
{
    let mut builder = Registry::builder(kind);
    for &(name, raw) in names {
        builder.define(name, V::from(raw))?;
    }
    for &(name, targets) in groups {
        builder.alias(name, targets)?;
    }
    Ok(builder.build())
}

impl Registries {
    /// Registries preloaded with the stock block game names.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in tables contain a duplicate.
    pub fn builtin() -> RegistryResult<Self> {
        Ok(Self {
            items: build::<ItemId, u32>("item", ITEMS, ITEM_GROUPS)?,
            mobs: build::<MobType, u32>("mob", MOBS, MOB_GROUPS)?,
            potions: build::<PotionType, u16>("potion", POTIONS, &[])?,
            damage_causes: build::<DamageCause, u16>("damage cause", DAMAGE_CAUSES, DAMAGE_GROUPS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_build() {
        let registries = Registries::builtin().unwrap();
        assert_eq!(registries.mobs.resolve("zombie"), Some(&[MobType(54)][..]));
        assert_eq!(registries.items.resolve("Diamond Ore"), Some(&[ItemId(56)][..]));
        assert_eq!(registries.potions.name_of(&PotionType(5)), Some("healing"));
        assert_eq!(registries.damage_causes.resolve("burning").map(<[_]>::len), Some(3));
    }

    #[test]
    fn test_groups_overlap() {
        let registries = Registries::builtin().unwrap();
        let hostile = registries.mobs.resolve("hostile").unwrap();
        let undead = registries.mobs.resolve("undead").unwrap();
        assert!(hostile.contains(&MobType(54)) && undead.contains(&MobType(54)));
        assert!(!hostile.contains(&MobType(57)));
    }
}
