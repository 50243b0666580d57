// src/main.rs
use std::env;
use std::error::Error;

use log::info;
use rbmc::{play_local_game, GameConfig, LocalGame, RandomBot};

const DEFAULT_MAX_TURNS: usize = 1000;

/// Usage: `rbmc [config.json|-] [seed]`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next().as_deref() {
        None | Some("-") => GameConfig::default(),
        Some(path) => GameConfig::from_file(path)?,
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 0,
    };
    info!("config: {:?}, seed {}", config, seed);

    let mut game = LocalGame::new(config)?;
    let mut white = RandomBot::new(seed);
    let mut black = RandomBot::new(seed.wrapping_add(1));

    println!("==============================");
    println!("| Reconnaissance Blind Chess |");
    println!("==============================");

    let result = play_local_game(&mut white, &mut black, &mut game, Some(DEFAULT_MAX_TURNS))?;

    println!("{}", game.board());
    match (result.winner, result.reason) {
        (Some(color), Some(reason)) => println!("=== GAME OVER: {} wins by {:?} after {} half-moves. ===", color, reason, result.turns),
        _ => println!("=== No result after {} half-moves. ===", result.turns),
    }
    println!("{}", game.history().to_json()?);
    Ok(())
}
