//! # Bounty Economy
//!
//! What a matched rule is worth.
//!
//! ## Components
//!
//! - **Range**: closed real intervals, sampled into whole units without bias
//! - **Reward**: named resource factories with multipliers
//! - **Inheritance**: folding the ranked rule chain into one effective reward
//!
//! ## Example
//!
//! ```rust
//! use bounty_core::{rule_query, Attr, RuleStore};
//! use bounty_economy::{EffectiveReward, Range, ResourceKind, Reward};
//!
//! rule_query! {
//!     /// Kill event.
//!     pub struct KillQuery indexed by KillIndex {
//!         /// Mob type.
//!         mob: u32,
//!     }
//! }
//!
//! let mut store = RuleStore::new();
//! store.insert(
//!     KillQuery::default(),
//!     Reward::new("any kill")
//!         .with_factory(ResourceKind::Experience, 1.0)
//!         .with_factory(ResourceKind::Currency, Range::new(1.0, 3.0)),
//! );
//! store.insert(
//!     KillQuery { mob: Attr::one(54) },
//!     Reward::new("zombie")
//!         .with_factory(ResourceKind::Experience, 5.0)
//!         .with_inherit(true),
//! );
//!
//! let reward = store.effective_reward(&KillQuery { mob: Attr::one(54) }).unwrap();
//! assert_eq!(reward.factory(&ResourceKind::Experience), Some(Range::constant(5.0)));
//! assert_eq!(reward.factory(&ResourceKind::Currency), Some(Range::new(1.0, 3.0)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod inherit;
pub mod range;
pub mod reward;

pub use error::{EconomyError, EconomyResult};
pub use inherit::{resolve_chain, EffectiveReward};
pub use range::{round_stochastic, Range};
pub use reward::{ResourceKind, Reward, RewardDraw, RewardSink};
