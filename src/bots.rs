// src/bots.rs
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::game::WinReason;
use crate::history::GameHistory;
use crate::moves::Move;
use crate::player::Player;
use crate::sense::SenseResult;
use crate::types::{Color, Square};

/// Senses and moves uniformly at random. The same seed replays the same
/// choices given the same offers.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: StdRng,
    color: Option<Color>,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        RandomBot { rng: StdRng::seed_from_u64(seed), color: None }
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Player for RandomBot {
    fn handle_game_start(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn handle_opponent_move_result(&mut self, _captured_my_piece: bool, _capture_square: Option<Square>) {}

    fn choose_sense(&mut self, _seconds_left: f64, sense_actions: &[Square], _move_actions: &[Move]) -> Option<Square> {
        sense_actions.choose(&mut self.rng).copied()
    }

    fn handle_sense_result(&mut self, _sense_result: &SenseResult) {}

    fn choose_move(&mut self, _seconds_left: f64, move_actions: &[Move]) -> Option<Move> {
        move_actions.choose(&mut self.rng).copied()
    }

    fn handle_move_result(&mut self, _requested: Move, _taken: Move, _captured: bool, _capture_square: Option<Square>) {}

    fn handle_game_end(&mut self, _winner: Option<Color>, _reason: Option<WinReason>, _history: &GameHistory) {}
}
