//! # Bounty Core
//!
//! Multi-attribute rule matching with a well-defined specificity order.
//!
//! Administrators author rules as partial attribute specifications ("any
//! zombie killed by fire", "any wool of any colour"). At runtime a concrete
//! event becomes a query and the store answers which rule applies:
//!
//! 1. **Wildcards absorb** - a rule that leaves an attribute open matches any
//!    value of it
//! 2. **Most specific wins** - the rule constraining the most attributes
//! 3. **Latest wins ties** - among equally specific rules, the highest id
//!
//! ## Example
//!
//! ```rust
//! use bounty_core::{rule_query, Attr, RuleStore};
//!
//! rule_query! {
//!     /// Kill event.
//!     pub struct KillQuery indexed by KillIndex {
//!         /// Mob type.
//!         mob: u32,
//!         /// Killed by fire.
//!         fire: bool,
//!     }
//! }
//!
//! let mut store = RuleStore::new();
//! store.insert(KillQuery { mob: Attr::one(54), ..Default::default() }, "zombie");
//! store.insert(KillQuery { mob: Attr::one(54), fire: Attr::one(true) }, "burnt zombie");
//!
//! let event = KillQuery { mob: Attr::one(54), fire: Attr::one(true) };
//! assert_eq!(store.resolve(&event), Some(&"burnt zombie"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attr;
pub mod id;
pub mod index;
pub mod query;
pub mod store;

pub use attr::Attr;
pub use id::RuleId;
pub use index::{AttributeIndex, CandidateSet};
pub use query::RuleQuery;
pub use store::RuleStore;
