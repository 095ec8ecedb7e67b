#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting the Relay Defence simulation core.

mod run_transfer;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use relay_defence_core::{baseline_catalog, ContentCatalog, WavePlan};
use relay_defence_system_enemy_factory::{EnemyFactory, EnemySpawnRequest};
use relay_defence_system_wave_generation::{WaveGeneration, WaveRequest};

use run_transfer::RunSnapshot;

/// Relay Defence balance and generation toolbox.
#[derive(Debug, Parser)]
#[command(name = "relay-defence", version, about)]
struct Cli {
    /// Path to a JSON content catalog; the built-in baseline when omitted.
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Generates wave plans for a seed and prints them.
    Plan(PlanArgs),
    /// Runs one spawn request through the enemy factory.
    PreviewEnemy(PreviewArgs),
    /// Encodes run parameters into a shareable run code.
    Share(ShareArgs),
    /// Decodes a shareable run code.
    Decode {
        /// Run code produced by `share`.
        code: String,
    },
}

#[derive(Debug, Args)]
struct PlanArgs {
    /// Run seed; random when omitted.
    #[arg(long)]
    seed: Option<u32>,
    /// First wave index to generate.
    #[arg(long, default_value_t = 1)]
    wave: u32,
    /// Number of consecutive waves to generate.
    #[arg(long, default_value_t = 1)]
    count: u32,
    /// Difficulty tier id.
    #[arg(long, default_value = "NORMAL")]
    tier: String,
    /// Mission difficulty scalar.
    #[arg(long, default_value_t = 1.0)]
    difficulty: f32,
    /// Number of lanes in the mission.
    #[arg(long, default_value_t = 3)]
    lanes: u32,
    /// Emit plans as JSON instead of the readable table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct PreviewArgs {
    /// Archetype id to spawn.
    #[arg(long)]
    enemy: String,
    /// Wave index the spawn belongs to.
    #[arg(long, default_value_t = 1)]
    wave: u32,
    /// Difficulty tier id.
    #[arg(long, default_value = "NORMAL")]
    tier: String,
    /// Mission difficulty scalar.
    #[arg(long, default_value_t = 1.0)]
    difficulty: f32,
    /// Promote the spawn to elite.
    #[arg(long)]
    elite: bool,
    /// Spawn as a boss.
    #[arg(long)]
    boss: bool,
}

#[derive(Debug, Args)]
struct ShareArgs {
    /// Run seed; random when omitted.
    #[arg(long)]
    seed: Option<u32>,
    /// Difficulty tier id.
    #[arg(long, default_value = "NORMAL")]
    tier: String,
    /// Mission difficulty scalar.
    #[arg(long, default_value_t = 1.0)]
    difficulty: f32,
    /// Number of lanes in the mission.
    #[arg(long, default_value_t = 3)]
    lanes: u32,
}

/// Entry point for the Relay Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = load_catalog(cli.content.as_ref())?;
    catalog
        .validate()
        .context("content catalog failed validation")?;

    match cli.command {
        CliCommand::Plan(args) => print_plans(&catalog, &args),
        CliCommand::PreviewEnemy(args) => preview_enemy(&catalog, &args),
        CliCommand::Share(args) => {
            let snapshot = RunSnapshot {
                tier: args.tier,
                seed: args.seed.unwrap_or_else(rand::random),
                mission_difficulty: args.difficulty,
                lane_count: args.lanes,
            };
            println!("{}", snapshot.encode());
            Ok(())
        }
        CliCommand::Decode { code } => {
            let snapshot = RunSnapshot::decode(&code).context("could not decode run code")?;
            println!(
                "tier={} seed={} difficulty={} lanes={}",
                snapshot.tier, snapshot.seed, snapshot.mission_difficulty, snapshot.lane_count,
            );
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ContentCatalog> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read content file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("could not parse content file {}", path.display()))
        }
        None => Ok(baseline_catalog()),
    }
}

fn print_plans(catalog: &ContentCatalog, args: &PlanArgs) -> Result<()> {
    let tier = catalog
        .tier(&args.tier)
        .with_context(|| format!("unknown difficulty tier '{}'", args.tier))?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let generator = WaveGeneration::default();

    for wave in args.wave..args.wave.saturating_add(args.count) {
        let plan = generator.generate(
            catalog,
            &WaveRequest {
                run_seed: seed,
                wave_index: wave,
                tier,
                mission_difficulty: args.difficulty,
                lane_count: args.lanes,
            },
        );

        if args.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan_table(seed, &plan);
        }
    }

    Ok(())
}

fn print_plan_table(seed: u32, plan: &WavePlan) {
    let kind = if plan.is_boss_wave() {
        " [boss]"
    } else if plan.has_miniboss_escort() {
        " [escort]"
    } else {
        ""
    };
    println!(
        "wave {} (seed {seed}){kind} modifiers: {}",
        plan.wave_index(),
        if plan.modifier_ids().is_empty() {
            "none".to_owned()
        } else {
            plan.modifier_ids().join(", ")
        },
    );

    for entry in plan.entries() {
        println!(
            "  {:>7.2}s  {:<14} x{:<4} lane {}  elite {:.1}%",
            entry.time_offset_sec,
            entry.enemy_id,
            entry.count,
            entry.lane_index,
            entry.elite_chance * 100.0,
        );
    }
}

fn preview_enemy(catalog: &ContentCatalog, args: &PreviewArgs) -> Result<()> {
    let tier = catalog
        .tier(&args.tier)
        .with_context(|| format!("unknown difficulty tier '{}'", args.tier))?;

    let mut request = EnemySpawnRequest::new(&args.enemy, tier, args.wave);
    request.mission_difficulty = args.difficulty;
    request.is_elite = args.elite;
    request.is_boss = args.boss;

    let factory = EnemyFactory::default();
    let packet = factory
        .create_enemy_packet(catalog, &request)
        .context("spawn request failed")?;

    println!(
        "{} (wave {}, {}{}{})",
        packet.archetype_id,
        args.wave,
        args.tier,
        if packet.is_elite { ", elite" } else { "" },
        if packet.is_boss { ", boss" } else { "" },
    );
    println!("  hp/unit : {:.1}", packet.hp_per_unit);
    println!("  damage  : {:.1}", packet.damage);
    println!("  speed   : {:.2}", packet.speed);
    println!("  armor   : {:.1}", packet.armor);
    println!("  range   : {:.1}", packet.attack_range);
    println!("  cooldown: {:.2}s", packet.attack_cooldown_sec);

    Ok(())
}
