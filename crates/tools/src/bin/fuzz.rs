use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use delve_core::{Direction, Game, GameConfig, InputJournal, SessionPhase, TurnOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::write_journal;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    moves: u32,
    /// Follow the shortest route to the portal instead of walking randomly
    #[arg(long)]
    autoplay: bool,
    /// Write the played inputs to this journal file
    #[arg(long)]
    record: Option<PathBuf>,
}

fn choose(rng: &mut ChaCha8Rng) -> Direction {
    Direction::ALL[rng.next_u64() as usize % Direction::ALL.len()]
}

fn next_direction(game: &Game, autoplay: bool, rng: &mut ChaCha8Rng) -> Direction {
    if autoplay
        && let Some(route) = game.map().route_to(game.map().portal)
        && let Some(first) = route.first().copied()
    {
        return first;
    }
    choose(rng)
}

fn check_invariants(game: &Game) -> Result<()> {
    let map = game.map();
    let player = &map.player;
    ensure!(map.grid.is_walkable(player.pos), "Invariant failed: player inside wall");
    ensure!(player.hearts_full <= player.hearts_total, "Invariant failed: hearts overflow");
    for enemy in map.enemies.values() {
        ensure!(map.grid.is_walkable(enemy.pos), "Invariant failed: enemy inside wall");
    }
    ensure!(map.route_to(map.portal).is_some(), "Invariant failed: portal unreachable");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} moves...", args.seed, args.moves);
    let config = GameConfig::default();
    let mut game = Game::new(args.seed, config.clone())?;
    let mut journal = InputJournal::new(args.seed, config);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for _ in 0..args.moves {
        let direction = next_direction(&game, args.autoplay, &mut rng);
        journal.append_move(direction, journal.next_seq());
        let seen_events = game.log().len();
        let outcome = game.apply_move(direction)?;
        for event in &game.log()[seen_events..] {
            println!("  {event}");
        }
        if let TurnOutcome::LevelAdvanced { level } = outcome {
            println!("Reached level {level} after {} turns", game.turns());
        }
        check_invariants(&game)?;
        if game.phase() == SessionPhase::Defeated {
            println!("Defeated on level {} after {} turns", game.level(), game.turns());
            break;
        }
    }

    println!("{}", game.hud());
    println!("Snapshot Hash: {}", game.snapshot_hash());
    if let Some(path) = &args.record {
        write_journal(path, &journal)?;
        println!("Journal written to {}", path.display());
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
