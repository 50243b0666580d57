// src/player.rs
use log::{info, warn};

use crate::error::{GameError, Result};
use crate::game::{GameStatus, LocalGame, WinReason};
use crate::history::GameHistory;
use crate::moves::Move;
use crate::sense::SenseResult;
use crate::types::{Color, Square};

/// A side in a game. The driver calls these strictly in turn order and
/// never shows a player the true board.
pub trait Player {
    fn handle_game_start(&mut self, color: Color);

    /// Called at the start of each of this player's turns with the result
    /// of the opponent's last move.
    fn handle_opponent_move_result(&mut self, captured_my_piece: bool, capture_square: Option<Square>);

    /// `None` skips sensing this turn.
    fn choose_sense(&mut self, seconds_left: f64, sense_actions: &[Square], move_actions: &[Move]) -> Option<Square>;

    fn handle_sense_result(&mut self, sense_result: &SenseResult);

    /// `None` passes.
    fn choose_move(&mut self, seconds_left: f64, move_actions: &[Move]) -> Option<Move>;

    fn handle_move_result(
        &mut self,
        requested: Move,
        taken: Move,
        captured_opponent_piece: bool,
        capture_square: Option<Square>,
    );

    fn handle_game_end(&mut self, winner: Option<Color>, reason: Option<WinReason>, history: &GameHistory);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Option<Color>,
    pub reason: Option<WinReason>,
    /// Half-moves played.
    pub turns: usize,
}

/// Plays `game` to completion, or until `max_turns` half-moves when given.
/// Starts the game if it has not been started.
pub fn play_local_game(
    white: &mut dyn Player,
    black: &mut dyn Player,
    game: &mut LocalGame,
    max_turns: Option<usize>,
) -> Result<MatchResult> {
    if game.status() == GameStatus::NotStarted {
        game.start()?;
    }
    white.handle_game_start(Color::White);
    black.handle_game_start(Color::Black);

    let mut turns = 0;
    while !game.is_over() {
        if max_turns.is_some_and(|limit| turns >= limit) {
            info!("stopping after {} half-moves", turns);
            break;
        }
        let color = game.turn();
        let player: &mut dyn Player = match color {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        play_turn(game, player, color)?;
        turns += 1;
    }

    let result = MatchResult { winner: game.winner(), reason: game.win_reason(), turns };
    white.handle_game_end(result.winner, result.reason, game.history());
    black.handle_game_end(result.winner, result.reason, game.history());
    Ok(result)
}

/// Runs one sense-move-end cycle for `color`. Timeouts end the game
/// quietly; other errors are programming errors and propagate.
fn play_turn(game: &mut LocalGame, player: &mut dyn Player, color: Color) -> Result<()> {
    let capture = game.last_capture_square();
    player.handle_opponent_move_result(capture.is_some(), capture);

    let seconds_left = match game.check_time() {
        Ok(left) => left,
        Err(GameError::TimeExpired { .. }) => return Ok(()),
        Err(e) => return Err(e),
    };

    let sense_actions = game.valid_senses();
    let move_actions = game.valid_moves();

    if let Some(square) = player.choose_sense(seconds_left, &sense_actions, &move_actions) {
        match game.sense(color, square) {
            Ok(result) => player.handle_sense_result(&result),
            Err(GameError::InvalidSense { square }) => warn!("{} asked to sense {}; skipping", color, square),
            Err(e) => return Err(e),
        }
    }

    let seconds_left = match game.check_time() {
        Ok(left) => left,
        Err(GameError::TimeExpired { .. }) => return Ok(()),
        Err(e) => return Err(e),
    };

    let requested = player.choose_move(seconds_left, &move_actions).unwrap_or_else(Move::null);
    let outcome = match game.attempt_move(color, requested) {
        Ok(outcome) => outcome,
        Err(GameError::InvalidMove { reason, .. }) => {
            warn!("{} requested {} which is not on offer ({}); passing", color, requested, reason);
            game.attempt_move(color, Move::null())?
        }
        Err(e) => return Err(e),
    };
    player.handle_move_result(requested, outcome.taken, outcome.was_capture(), outcome.capture_square);

    match game.end_turn() {
        Ok(()) | Err(GameError::TimeExpired { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}
