//! Bounty configuration checker.
//!
//! Loads an engine config, reports rule counts and warnings, and optionally
//! resolves a sample mob kill or item event against it.
//!
//! Run with: cargo run --bin bounty_check -- bounty.toml --mob zombie --samples 5

use std::path::PathBuf;
use std::process::ExitCode;

use bounty::{Catalog, ConfigError, RuleEngine, Trigger};
use bounty_domains::{ItemQuery, MobKill, MobQuery, PresetQuery, Registries};
use bounty_economy::Reward;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Reasons a check run stops.
#[derive(Error, Debug)]
enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown {kind} name {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("{0} is not an item trigger")]
    NotItemTrigger(Trigger),
}

/// Check a Bounty configuration and try it against sample events
#[derive(Parser, Debug)]
#[command(name = "bounty_check")]
#[command(about = "Load a Bounty engine config and resolve sample events against it")]
struct Args {
    /// Engine config file (bounty.toml)
    config: PathBuf,

    /// Resolve a kill of this mob (registry name)
    #[arg(long)]
    mob: Option<String>,

    /// Damage cause of the sample kill (registry name)
    #[arg(long)]
    cause: Option<String>,

    /// Resolve an item event for this item (registry name)
    #[arg(long)]
    item: Option<String>,

    /// Trigger of the item event
    #[arg(long, default_value = "block_break")]
    trigger: Trigger,

    /// World the sample event happens in
    #[arg(long, default_value = "world")]
    world: String,

    /// Active named presets
    #[arg(long)]
    preset: Vec<String>,

    /// Number of reward draws to print
    #[arg(long, default_value_t = 1)]
    samples: u32,

    /// Random seed for deterministic draws
    #[arg(long)]
    seed: Option<u64>,

    /// Log loader details
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bounty=debug,bounty_core=debug,bounty_domains=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), CheckError> {
    let registries = Registries::builtin().map_err(ConfigError::from)?;
    let (engine, warnings) = RuleEngine::load(&args.config, &registries)?;
    let catalog = engine.snapshot();

    print_summary(&catalog);
    for warning in &warnings {
        println!("warning: {warning}");
    }

    let selector = PresetQuery::event(&args.world, &args.preset);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed.unwrap_or_else(rand::random));

    if let Some(mob) = &args.mob {
        let mut kill = MobKill {
            mob: lookup(registries.mobs.resolve(mob), "mob", mob)?,
            player_killed: true,
            ..MobKill::default()
        };
        if let Some(cause) = &args.cause {
            let causes = lookup(registries.damage_causes.resolve(cause), "damage cause", cause)?;
            kill.damage_cause = causes.first().copied();
        }
        let reward = catalog.reward_for_mob(&selector, &MobQuery::event(&kill));
        report(&format!("mob_kill {mob}"), reward.as_ref(), args.samples, &mut rng);
    }

    if let Some(item) = &args.item {
        if !args.trigger.is_item() {
            return Err(CheckError::NotItemTrigger(args.trigger));
        }
        let items = lookup(registries.items.resolve(item), "item", item)?;
        let query = ItemQuery::event(&items, None, Some(false));
        let reward = catalog.reward_for_item(&selector, args.trigger, &query);
        report(&format!("{} {item}", args.trigger), reward.as_ref(), args.samples, &mut rng);
    }

    Ok(())
}

fn lookup<V: Copy>(found: Option<&[V]>, kind: &'static str, name: &str) -> Result<Vec<V>, CheckError> {
    found.map(<[V]>::to_vec).ok_or_else(|| CheckError::UnknownName {
        kind,
        name: name.to_string(),
    })
}

fn print_summary(catalog: &Catalog) {
    println!(
        "generation {}: {} rules, {} presets, multiplier {}",
        catalog.generation(),
        catalog.rule_count(),
        catalog.preset_count(),
        catalog.multiplier()
    );
    for trigger in Trigger::ALL {
        let count = catalog.default_book().count(trigger);
        if count > 0 {
            println!("  {trigger:<13} {count}");
        }
    }
}

fn report(event: &str, reward: Option<&Reward>, samples: u32, rng: &mut ChaCha8Rng) {
    let Some(reward) = reward else {
        println!("{event}: no rule matches");
        return;
    };

    println!("{event}: {}", reward.name());
    for (kind, range) in reward.factories() {
        println!("  {kind:<12} {range} (mean {:.2})", range.mean());
    }
    for _ in 0..samples {
        let draw = reward.draw(rng);
        let amounts: Vec<String> = draw.iter().map(|(kind, amount)| format!("{kind}={amount}")).collect();
        println!("  draw: {}", amounts.join(" "));
    }
}
