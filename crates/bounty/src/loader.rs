//! # Rule Loader
//!
//! Turns rule files into rule books and engine configs into catalogs.
//!
//! ## Multipliers
//!
//! ```text
//!   effective scale of a rule's own rewards
//!     = preset multiplier * file multiplier * rule multiplier
//!   global multiplier (engine config) is applied at lookup by the catalog
//! ```
//!
//! Loading is all-or-nothing: any error discards the partial result. Warnings
//! never stop a load; they accumulate on the loader and are logged.

use std::fs;
use std::path::{Path, PathBuf};

use bounty_core::{Attr, RuleQuery, RuleStore};
use bounty_domains::{
    is_blank_name, rule_names, DamageCause, ItemId, ItemQuery, MobQuery, MobType, PlayerQuery, PotionQuery,
    PotionType, PresetQuery, Registries, Registry,
};
use bounty_economy::{Range, ResourceKind, Reward};
use serde::de::DeserializeOwned;

use crate::book::RuleBook;
use crate::catalog::Catalog;
use crate::error::{ConfigError, ConfigResult, ConfigWarning};
use crate::schema::{
    EngineConfig, ItemRuleDef, MobRuleDef, NameOrId, OneOrMany, PlayerRuleDef, PotionRuleDef,
    RuleBody, RuleFile,
};
use crate::trigger::Trigger;

/// Loads rule files against a set of registries.
#[derive(Debug)]
pub struct RuleLoader<'r> {
    registries: &'r Registries,
    warnings: Vec<ConfigWarning>,
}

impl<'r> RuleLoader<'r> {
    /// Creates a loader resolving names through `registries`.
    #[must_use]
    pub fn new(registries: &'r Registries) -> Self {
        Self {
            registries,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Takes the collected warnings, leaving none behind.
    pub fn take_warnings(&mut self) -> Vec<ConfigWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Loads one rule file from text. `file` labels errors and warnings.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, unknown names, negative multipliers and
    /// malformed ranges.
    pub fn load_str(&mut self, file: &str, text: &str, multiplier: f64) -> ConfigResult<RuleBook> {
        let parsed: RuleFile = parse(file, text)?;
        let scale = multiplier * check_multiplier(file, parsed.multiplier)?.unwrap_or(1.0);

        let mut book = RuleBook::new();
        for (trigger, defs) in [
            (Trigger::BlockBreak, &parsed.block_break),
            (Trigger::BlockPlace, &parsed.block_place),
            (Trigger::Craft, &parsed.craft),
            (Trigger::Smelt, &parsed.smelt),
        ] {
            if let Some(store) = book.item_rules_mut(trigger) {
                let mut section = Section::new(self, file, trigger, scale);
                for def in defs {
                    let query = section.item_query(def)?;
                    section.push(store, query, &def.body())?;
                }
            }
        }

        let mut section = Section::new(self, file, Trigger::Brew, scale);
        for def in &parsed.brew {
            let query = section.potion_query(def)?;
            section.push(book.potion_rules_mut(), query, &def.body())?;
        }

        let mut section = Section::new(self, file, Trigger::MobKill, scale);
        for def in &parsed.mob_kill {
            let query = section.mob_query(def)?;
            section.push(book.mob_rules_mut(), query, &def.body())?;
        }

        let mut section = Section::new(self, file, Trigger::PlayerDeath, scale);
        for def in &parsed.player_death {
            let query = section.player_query(def)?;
            section.push(book.player_rules_mut(), query, &def.body())?;
        }

        tracing::debug!(file, rules = book.rule_count(), "rule file loaded");
        Ok(book)
    }

    /// Loads one rule file from disk.
    ///
    /// # Errors
    ///
    /// As [`RuleLoader::load_str`], plus I/O errors.
    pub fn load_file(&mut self, path: &Path, multiplier: f64) -> ConfigResult<RuleBook> {
        let text = read(path)?;
        self.load_str(&path.display().to_string(), &text, multiplier)
    }

    /// Loads rule files in order and merges them into one book. Later files
    /// win ties against earlier ones.
    ///
    /// # Errors
    ///
    /// Fails on the first file that fails to load.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P], multiplier: f64) -> ConfigResult<RuleBook> {
        let mut book = RuleBook::new();
        for path in paths {
            book.merge(self.load_file(path.as_ref(), multiplier)?);
        }
        Ok(book)
    }

    /// Builds a catalog from an engine config whose relative paths are
    /// resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the config or any rule file it names fails to load.
    pub fn build_catalog(&mut self, config: &EngineConfig, base_dir: &Path) -> ConfigResult<Catalog> {
        let label = "engine config";
        let global = check_multiplier(label, config.multiplier)?.unwrap_or(1.0);

        let default = self.load_files(&resolve_paths(base_dir, &config.default), 1.0)?;
        let mut catalog = Catalog::new(default).with_multiplier(global);

        for preset in &config.preset {
            let scale = check_multiplier(label, preset.multiplier)?.unwrap_or(1.0);
            if preset.name.as_deref().is_some_and(is_blank_name) {
                return Err(blank(label, "preset"));
            }
            if preset.world.as_deref().is_some_and(is_blank_name) {
                return Err(blank(label, "world"));
            }
            let book = self.load_files(&resolve_paths(base_dir, &preset.files), scale)?;
            let selector = PresetQuery::rule(preset.name.as_deref(), preset.world.as_deref());
            catalog = catalog.with_preset(selector, book);
        }

        tracing::info!(
            rules = catalog.rule_count(),
            presets = catalog.preset_count(),
            warnings = self.warnings.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Reads an engine config file and builds its catalog. Rule file paths
    /// are relative to the config file.
    ///
    /// # Errors
    ///
    /// As [`RuleLoader::build_catalog`], plus I/O and parse errors on the
    /// config itself.
    pub fn load_catalog(&mut self, config_path: &Path) -> ConfigResult<Catalog> {
        let text = read(config_path)?;
        let config: EngineConfig = parse(&config_path.display().to_string(), &text)?;
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        self.build_catalog(&config, base_dir)
    }

    fn warn(&mut self, warning: ConfigWarning) {
        tracing::warn!(%warning, "suspicious rule");
        self.warnings.push(warning);
    }
}

/// Loader state while reading one `[[trigger]]` section of one file.
struct Section<'l, 'r> {
    loader: &'l mut RuleLoader<'r>,
    file: &'l str,
    trigger: Trigger,
    scale: f64,
    index: usize,
}

impl<'l, 'r> Section<'l, 'r> {
    fn new(loader: &'l mut RuleLoader<'r>, file: &'l str, trigger: Trigger, scale: f64) -> Self {
        Self {
            loader,
            file,
            trigger,
            scale,
            index: 0,
        }
    }

    fn item_query(&self, def: &ItemRuleDef) -> ConfigResult<ItemQuery> {
        Ok(ItemQuery {
            item: self.named(&self.loader.registries.items, def.item.as_ref(), ItemId::new)?,
            durability: plain(def.durability.as_ref()),
            player_placed: plain(def.player_placed.as_ref()),
        })
    }

    fn mob_query(&self, def: &MobRuleDef) -> ConfigResult<MobQuery> {
        Ok(MobQuery {
            mob: self.named(&self.loader.registries.mobs, def.mob.as_ref(), MobType::new)?,
            damage_cause: self.damage_cause(def.damage_cause.as_ref())?,
            size: plain(def.size.as_ref()),
            variant: plain(def.variant.as_ref()),
            spawner: plain(def.spawner.as_ref()),
            baby: plain(def.baby.as_ref()),
            tamed: plain(def.tamed.as_ref()),
            player_killed: plain(def.player_killed.as_ref()),
            villager: plain(def.villager.as_ref()),
        })
    }

    fn potion_query(&self, def: &PotionRuleDef) -> ConfigResult<PotionQuery> {
        Ok(PotionQuery {
            potion: self.named_small(&self.loader.registries.potions, def.potion.as_ref(), PotionType::new)?,
            tier: plain(def.tier.as_ref()),
            extended: plain(def.extended.as_ref()),
            splash: plain(def.splash.as_ref()),
        })
    }

    fn player_query(&self, def: &PlayerRuleDef) -> ConfigResult<PlayerQuery> {
        Ok(PlayerQuery {
            name: self.names("player", def.name.as_ref())?,
            group: self.names("group", def.group.as_ref())?,
            damage_cause: self.damage_cause(def.damage_cause.as_ref())?,
            murder: plain(def.murder.as_ref()),
        })
    }

    /// Free-form names, which must not be blank.
    fn names(&self, kind: &'static str, values: Option<&OneOrMany<String>>) -> ConfigResult<Attr<String>> {
        let Some(values) = values else {
            return Ok(Attr::Unconstrained);
        };
        let names = values.clone().into_vec();
        if names.iter().any(|name| is_blank_name(name)) {
            return Err(blank(self.file, kind));
        }
        Ok(rule_names(names))
    }

    fn damage_cause(&self, values: Option<&OneOrMany<NameOrId>>) -> ConfigResult<Attr<DamageCause>> {
        self.named_small(&self.loader.registries.damage_causes, values, DamageCause::new)
    }

    /// Resolves names and u32 ids.
    fn named<V: Copy + PartialEq>(
        &self,
        registry: &Registry<V>,
        values: Option<&OneOrMany<NameOrId>>,
        from_id: fn(u32) -> V,
    ) -> ConfigResult<Attr<V>> {
        self.resolve(registry, values, |id| Some(from_id(id)))
    }

    /// Resolves names and ids that must fit in 16 bits.
    fn named_small<V: Copy + PartialEq>(
        &self,
        registry: &Registry<V>,
        values: Option<&OneOrMany<NameOrId>>,
        from_id: fn(u16) -> V,
    ) -> ConfigResult<Attr<V>> {
        self.resolve(registry, values, |id| u16::try_from(id).ok().map(from_id))
    }

    fn resolve<V: Copy + PartialEq>(
        &self,
        registry: &Registry<V>,
        values: Option<&OneOrMany<NameOrId>>,
        from_id: impl Fn(u32) -> Option<V>,
    ) -> ConfigResult<Attr<V>> {
        let Some(values) = values else {
            return Ok(Attr::Unconstrained);
        };

        let mut resolved = Vec::new();
        for value in values.clone().into_vec() {
            match value {
                NameOrId::Id(id) => resolved.push(from_id(id).ok_or_else(|| ConfigError::IdOutOfRange {
                    file: self.file.to_string(),
                    kind: registry.kind(),
                    id,
                })?),
                NameOrId::Name(name) => {
                    let found = registry.resolve(&name).ok_or_else(|| ConfigError::UnknownName {
                        file: self.file.to_string(),
                        kind: registry.kind(),
                        name: name.clone(),
                    })?;
                    resolved.extend_from_slice(found);
                }
            }
        }
        Ok(Attr::one_of(resolved))
    }

    fn reward(&self, body: &RuleBody) -> ConfigResult<Reward> {
        let multiplier = check_multiplier(self.file, body.multiplier)?.unwrap_or(1.0);
        let inherit_multiplier = check_multiplier(self.file, body.inherit_multiplier)?.unwrap_or(1.0);

        let mut reward = Reward::new(format!("{}:{}#{}", self.file, self.trigger, self.index))
            .with_inherit(body.inherit)
            .with_multiplier(multiplier * self.scale)
            .with_inherit_multiplier(inherit_multiplier);

        for (name, value) in &body.reward {
            let kind: ResourceKind = name.parse().map_err(|error| self.economy(error))?;
            let range: Range = value
                .clone()
                .try_into()
                .map_err(|error| self.parse_error(error))?;
            reward = reward.with_factory(kind, range);
        }
        Ok(reward)
    }

    /// Inserts one rule, reporting duplicates and negative rewards.
    fn push<Q: RuleQuery + PartialEq>(
        &mut self,
        store: &mut RuleStore<Q, Reward>,
        query: Q,
        body: &RuleBody,
    ) -> ConfigResult<()> {
        let reward = self.reward(body)?;

        if let Some(shadows) = store.find_exact(&query) {
            self.loader.warn(ConfigWarning::DuplicateRule {
                file: self.file.to_string(),
                trigger: self.trigger,
                index: self.index,
                shadows,
            });
        }
        let negative: Vec<ResourceKind> = reward
            .factories()
            .filter(|(_, range)| range.min() < 0.0)
            .map(|(kind, _)| kind.clone())
            .collect();
        for kind in negative {
            self.loader.warn(ConfigWarning::NegativeReward {
                file: self.file.to_string(),
                trigger: self.trigger,
                index: self.index,
                kind,
            });
        }

        store.insert(query, reward);
        self.index += 1;
        Ok(())
    }

    fn economy(&self, error: bounty_economy::EconomyError) -> ConfigError {
        ConfigError::Economy {
            file: self.file.to_string(),
            error,
        }
    }

    fn parse_error(&self, error: toml::de::Error) -> ConfigError {
        ConfigError::Parse {
            file: self.file.to_string(),
            error,
        }
    }
}

fn plain<V: Clone + PartialEq>(values: Option<&OneOrMany<V>>) -> Attr<V> {
    values.map_or(Attr::Unconstrained, |values| Attr::one_of(values.clone().into_vec()))
}

fn blank(file: &str, kind: &'static str) -> ConfigError {
    ConfigError::BlankName {
        file: file.to_string(),
        kind,
    }
}

fn check_multiplier(file: &str, multiplier: Option<f64>) -> ConfigResult<Option<f64>> {
    match multiplier {
        Some(value) if !value.is_finite() => Err(ConfigError::Economy {
            file: file.to_string(),
            error: bounty_economy::EconomyError::NonFiniteBound(value),
        }),
        Some(value) if value < 0.0 => Err(ConfigError::NegativeMultiplier {
            file: file.to_string(),
            value,
        }),
        other => Ok(other),
    }
}

fn parse<T: DeserializeOwned>(file: &str, text: &str) -> ConfigResult<T> {
    toml::from_str(text).map_err(|error| ConfigError::Parse {
        file: file.to_string(),
        error,
    })
}

fn read(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.to_path_buf(),
        error,
    })
}

fn resolve_paths(base_dir: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|path| base_dir.join(path)).collect()
}
