//! # Bounty
//!
//! Configurable rewards for block game events.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  load   ┌──────────────┐ publish ┌──────────────┐
//! │  rule files  │ ──────> │   Catalog    │ ──────> │  RuleEngine  │
//! │  bounty.toml │         │  (RuleBooks) │         │  (ArcSwap)   │
//! └──────────────┘         └──────────────┘         └──────┬───────┘
//!                                                          │ snapshot
//!   event -> query -> book_for(preset) -> reward_for_* <───┘
//!         -> Reward::apply(rng, sink)
//! ```
//!
//! ## Crates
//!
//! - `bounty_core`: attribute indexes and specificity resolution
//! - `bounty_economy`: ranges, rewards and inheritance
//! - `bounty_domains`: event queries and name registries
//!
//! ## Example
//!
//! ```rust
//! use bounty::{Catalog, RuleEngine, RuleLoader};
//! use bounty_domains::{MobKill, MobQuery, MobType, PresetQuery, Registries};
//! use bounty_economy::{Range, ResourceKind};
//!
//! let registries = Registries::builtin().unwrap();
//! let mut loader = RuleLoader::new(&registries);
//! let book = loader
//!     .load_str(
//!         "inline",
//!         r#"
//!         [[mob_kill]]
//!         mob = "hostile"
//!         reward = { xp = 2, money = "1-3" }
//!
//!         [[mob_kill]]
//!         mob = "creeper"
//!         inherit = true
//!         reward = { xp = 5 }
//!         "#,
//!         1.0,
//!     )
//!     .unwrap();
//!
//! let engine = RuleEngine::new(Catalog::new(book));
//! let catalog = engine.snapshot();
//! let kill = MobQuery::event(&MobKill::new(MobType(50)));
//! let reward = catalog
//!     .reward_for_mob(&PresetQuery::event::<&str>("world", &[]), &kill)
//!     .unwrap();
//! assert_eq!(reward.factory(&ResourceKind::Experience), Some(Range::constant(5.0)));
//! assert_eq!(reward.factory(&ResourceKind::Currency), Some(Range::new(1.0, 3.0)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod book;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod loader;
pub mod schema;
pub mod trigger;

pub use book::RuleBook;
pub use catalog::Catalog;
pub use engine::RuleEngine;
pub use error::{ConfigError, ConfigResult, ConfigWarning};
pub use loader::RuleLoader;
pub use schema::{EngineConfig, RuleFile};
pub use trigger::Trigger;
