//! Integration tests: registry names driving domain lookups.
//!
//! Run with: cargo test --package bounty_domains --test domain_lookup

use bounty_core::{Attr, RuleStore};
use bounty_domains::{
    rule_names, DamageCause, MobKill, MobQuery, MobType, PlayerQuery, Registries,
};
use proptest::prelude::*;

fn mob_attr(registries: &Registries, name: &str) -> Attr<MobType> {
    Attr::one_of(registries.mobs.resolve(name).unwrap().iter().copied())
}

#[test]
fn test_category_rule_loses_to_named_mob() {
    let registries = Registries::builtin().unwrap();
    let mut store = RuleStore::new();
    store.insert(MobQuery { mob: mob_attr(&registries, "hostile"), ..MobQuery::default() }, "hostile");
    store.insert(MobQuery { mob: mob_attr(&registries, "undead"), ..MobQuery::default() }, "undead");
    store.insert(
        MobQuery {
            mob: mob_attr(&registries, "zombie"),
            damage_cause: Attr::one_of(registries.damage_causes.resolve("burning").unwrap().iter().copied()),
            ..MobQuery::default()
        },
        "burning zombie",
    );

    let zombie = registries.mobs.resolve("zombie").unwrap()[0];
    let lava = registries.damage_causes.resolve("lava").unwrap()[0];
    let fall = registries.damage_causes.resolve("fall").unwrap()[0];

    // Same specificity: the later rule wins.
    assert_eq!(
        store.resolve(&MobQuery::event(&MobKill::new(zombie).with_damage_cause(fall))),
        Some(&"undead")
    );
    assert_eq!(
        store.resolve(&MobQuery::event(&MobKill::new(zombie).with_damage_cause(lava))),
        Some(&"burning zombie")
    );

    let creeper = registries.mobs.resolve("creeper").unwrap()[0];
    assert_eq!(store.resolve(&MobQuery::event(&MobKill::new(creeper))), Some(&"hostile"));

    let cow = registries.mobs.resolve("cow").unwrap()[0];
    assert_eq!(store.resolve(&MobQuery::event(&MobKill::new(cow))), None);
}

#[test]
fn test_merged_domain_stores_keep_their_rules() {
    let mut first = RuleStore::new();
    first.insert(MobQuery { mob: Attr::one(MobType(50)), ..MobQuery::default() }, "creeper");
    let mut second = RuleStore::new();
    second.insert(MobQuery { mob: Attr::one(MobType(51)), ..MobQuery::default() }, "skeleton");
    second.insert(MobQuery { mob: Attr::one(MobType(50)), ..MobQuery::default() }, "creeper v2");

    first.merge(second);

    assert_eq!(first.resolve(&MobQuery::event(&MobKill::new(MobType(51)))), Some(&"skeleton"));
    assert_eq!(first.resolve(&MobQuery::event(&MobKill::new(MobType(50)))), Some(&"creeper v2"));
}

#[test]
fn test_empty_name_list_matches_nothing() {
    let mut store = RuleStore::new();
    store.insert(PlayerQuery { group: rule_names(Vec::<String>::new()), ..PlayerQuery::default() }, "never");
    let event = PlayerQuery::event::<&str>("steve", &[], Some(DamageCause(4)), false);
    assert_eq!(store.resolve(&event), None);
}

proptest! {
    #[test]
    fn prop_player_names_ignore_case(name in "[A-Za-z0-9_]{1,16}") {
        let mut store = RuleStore::new();
        store.insert(
            PlayerQuery { name: PlayerQuery::names(&[name.to_uppercase()]), ..PlayerQuery::default() },
            (),
        );
        let event = PlayerQuery::event::<&str>(&name.to_lowercase(), &[], None, false);
        prop_assert!(store.resolve(&event).is_some());
    }
}
