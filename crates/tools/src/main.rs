use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delve_core::mapgen::derive_level_seed;
use delve_core::replay::replay_to_end;
use delve_core::{Game, MapGenerator, ReplayResult};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tools::{load_config, read_journal};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated level as text
    Preview {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
        /// Show the whole level instead of the initial fog-of-war view
        #[arg(long)]
        reveal_all: bool,
        /// Optional JSON game config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay a recorded journal and print the final state
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Preview { seed, level, reveal_all, config } => {
            preview(seed, level, reveal_all, config)
        }
        Command::Replay { journal } => replay(journal),
    }
}

fn preview(seed: u64, level: u32, reveal_all: bool, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    if level <= 1 {
        let game = Game::new(seed, config).context("Failed to start session")?;
        print!("{}", game.map().render_ascii(reveal_all));
        println!("{}", game.hud());
        return Ok(());
    }

    let size = config.map_size_for_level(level);
    let generator = MapGenerator::new(size, size, &config).context("Failed to set up generator")?;
    let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(seed, level));
    let map = generator.generate(&mut rng);
    print!("{}", map.render_ascii(reveal_all));
    println!(
        "Level {level} | Map {size}x{size} | Spawn ({}, {}) | Portal ({}, {}) | Enemies {} | Chests {}",
        map.spawn.y,
        map.spawn.x,
        map.portal.y,
        map.portal.x,
        map.enemies.len(),
        map.chests.len(),
    );
    Ok(())
}

fn replay(path: PathBuf) -> Result<()> {
    let journal = read_journal(&path)?;
    let result: ReplayResult = replay_to_end(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Turns: {}", result.turns);
    println!("Final Level: {}", result.final_level);
    println!("Phase: {:?}", result.final_phase);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
    Ok(())
}
