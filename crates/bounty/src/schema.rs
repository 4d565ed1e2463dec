//! # File Schemas
//!
//! Serde shapes of the two file kinds the loader reads.
//!
//! ## Rule Files
//!
//! ```toml
//! multiplier = 1.5
//!
//! [[mob_kill]]
//! mob = ["zombie", "skeleton"]
//! damage_cause = "fire"
//! inherit = true
//! reward = { experience = "2-5", money = 1.5 }
//! ```
//!
//! Attribute keys take one value or a list. An omitted key leaves the
//! attribute open, an empty list (`mob = []`) matches nothing.
//!
//! ## Engine Config (`bounty.toml`)
//!
//! ```toml
//! multiplier = 1.0
//! default = ["rules/base.toml", "rules/server.toml"]
//!
//! [[preset]]
//! world = "world_nether"
//! files = ["rules/nether.toml"]
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// A single value or a list of values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// `key = value`
    One(T),
    /// `key = [a, b]`
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A registry name or a raw numeric id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NameOrId {
    /// Raw id.
    Id(u32),
    /// Registry name.
    Name(String),
}

/// Fields every rule carries besides its attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleBody {
    /// Layer this rule over the less specific rules that also match.
    pub inherit: bool,
    /// Scale for this rule's own rewards.
    pub multiplier: Option<f64>,
    /// Scale for rewards inherited from less specific rules.
    pub inherit_multiplier: Option<f64>,
    /// Resource kind -> range, in file order.
    pub reward: toml::Table,
}

/// `[[block_break]]`, `[[block_place]]`, `[[craft]]` and `[[smelt]]`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRuleDef {
    /// Item or block.
    pub item: Option<OneOrMany<NameOrId>>,
    /// Durability or data value.
    pub durability: Option<OneOrMany<u16>>,
    /// Placed by a player.
    pub player_placed: Option<OneOrMany<bool>>,
    /// See [`RuleBody::inherit`].
    #[serde(default)]
    pub inherit: bool,
    /// See [`RuleBody::multiplier`].
    pub multiplier: Option<f64>,
    /// See [`RuleBody::inherit_multiplier`].
    pub inherit_multiplier: Option<f64>,
    /// See [`RuleBody::reward`].
    #[serde(default)]
    pub reward: toml::Table,
}

/// `[[mob_kill]]`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MobRuleDef {
    /// Mob type or category.
    pub mob: Option<OneOrMany<NameOrId>>,
    /// Damage cause or cause group.
    pub damage_cause: Option<OneOrMany<NameOrId>>,
    /// Size.
    pub size: Option<OneOrMany<u8>>,
    /// Variant.
    pub variant: Option<OneOrMany<u8>>,
    /// Spawner origin.
    pub spawner: Option<OneOrMany<bool>>,
    /// Baby form.
    pub baby: Option<OneOrMany<bool>>,
    /// Tamed.
    pub tamed: Option<OneOrMany<bool>>,
    /// Killed by a player.
    pub player_killed: Option<OneOrMany<bool>>,
    /// Villager origin.
    pub villager: Option<OneOrMany<bool>>,
    /// See [`RuleBody::inherit`].
    #[serde(default)]
    pub inherit: bool,
    /// See [`RuleBody::multiplier`].
    pub multiplier: Option<f64>,
    /// See [`RuleBody::inherit_multiplier`].
    pub inherit_multiplier: Option<f64>,
    /// See [`RuleBody::reward`].
    #[serde(default)]
    pub reward: toml::Table,
}

/// `[[brew]]`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PotionRuleDef {
    /// Potion effect.
    pub potion: Option<OneOrMany<NameOrId>>,
    /// Tier.
    pub tier: Option<OneOrMany<u8>>,
    /// Extended duration.
    pub extended: Option<OneOrMany<bool>>,
    /// Splash potion.
    pub splash: Option<OneOrMany<bool>>,
    /// See [`RuleBody::inherit`].
    #[serde(default)]
    pub inherit: bool,
    /// See [`RuleBody::multiplier`].
    pub multiplier: Option<f64>,
    /// See [`RuleBody::inherit_multiplier`].
    pub inherit_multiplier: Option<f64>,
    /// See [`RuleBody::reward`].
    #[serde(default)]
    pub reward: toml::Table,
}

/// `[[player_death]]`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerRuleDef {
    /// Player name.
    pub name: Option<OneOrMany<String>>,
    /// Permission group.
    pub group: Option<OneOrMany<String>>,
    /// Damage cause or cause group.
    pub damage_cause: Option<OneOrMany<NameOrId>>,
    /// Killed by another player.
    pub murder: Option<OneOrMany<bool>>,
    /// See [`RuleBody::inherit`].
    #[serde(default)]
    pub inherit: bool,
    /// See [`RuleBody::multiplier`].
    pub multiplier: Option<f64>,
    /// See [`RuleBody::inherit_multiplier`].
    pub inherit_multiplier: Option<f64>,
    /// See [`RuleBody::reward`].
    #[serde(default)]
    pub reward: toml::Table,
}

macro_rules! rule_body {
    ($($def:ty),*) => {
        $(
            impl $def {
                /// The non-attribute part of this rule.
                #[must_use]
                pub fn body(&self) -> RuleBody {
                    RuleBody {
                        inherit: self.inherit,
                        multiplier: self.multiplier,
                        inherit_multiplier: self.inherit_multiplier,
                        reward: self.reward.clone(),
                    }
                }
            }
        )*
    };
}

rule_body!(ItemRuleDef, MobRuleDef, PotionRuleDef, PlayerRuleDef);

/// A whole rule file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Scale for every rule in this file.
    pub multiplier: Option<f64>,
    /// Block break rules.
    #[serde(default)]
    pub block_break: Vec<ItemRuleDef>,
    /// Block place rules.
    #[serde(default)]
    pub block_place: Vec<ItemRuleDef>,
    /// Craft rules.
    #[serde(default)]
    pub craft: Vec<ItemRuleDef>,
    /// Smelt rules.
    #[serde(default)]
    pub smelt: Vec<ItemRuleDef>,
    /// Brew rules.
    #[serde(default)]
    pub brew: Vec<PotionRuleDef>,
    /// Mob kill rules.
    #[serde(default)]
    pub mob_kill: Vec<MobRuleDef>,
    /// Player death rules.
    #[serde(default)]
    pub player_death: Vec<PlayerRuleDef>,
}

/// One `[[preset]]` of the engine config.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetDef {
    /// Named preset the host can activate.
    pub name: Option<String>,
    /// World the preset applies to.
    pub world: Option<String>,
    /// Scale for every rule of this preset.
    pub multiplier: Option<f64>,
    /// Rule files, merged in order.
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

/// The engine config, `bounty.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Scale applied to every reward of the generation.
    pub multiplier: Option<f64>,
    /// Rule files of the default book, merged in order.
    #[serde(default)]
    pub default: Vec<PathBuf>,
    /// Preset books.
    #[serde(default)]
    pub preset: Vec<PresetDef>,
}
