// src/game.rs
use log::{debug, info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::actions;
use crate::board::Board;
use crate::clock::TurnClock;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::history::GameHistory;
use crate::moves::{Move, MoveOutcome};
use crate::resolve::resolve_move;
use crate::sense::{self, SenseResult};
use crate::types::{Color, Piece, PieceType, Square};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason { KingCapture, Timeout, Resignation }

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    GameOver { winner: Option<Color>, reason: WinReason },
}

/// Where the active side is within its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnPhase {
    /// May sense once, or move straight away.
    Sense,
    /// Has sensed; must move.
    Move,
    /// Has moved; waiting for `end_turn`.
    Moved,
}

/// The authoritative local game. Owns the one true board and both clocks;
/// players only ever see copies handed out by its methods.
#[derive(Debug, Clone)]
pub struct LocalGame {
    config: GameConfig,
    budget: Duration,
    start_board: Board,
    board: Board,
    clock: TurnClock,
    status: GameStatus,
    turn: Color,
    phase: TurnPhase,
    turn_sense: Option<Square>,
    turn_outcome: Option<MoveOutcome>,
    king_captured: bool,
    last_capture: Option<Square>,
    history: GameHistory,
}

impl LocalGame {
    /// A game from the standard starting position.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_board(config, Board::initial())
    }

    /// A game that will start from `board` (scenario setup).
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self> {
        let budget = config.time_budget()?;
        Ok(LocalGame {
            config,
            budget,
            turn: board.turn,
            start_board: board.clone(),
            board,
            clock: TurnClock::new(budget),
            status: GameStatus::NotStarted,
            phase: TurnPhase::Sense,
            turn_sense: None,
            turn_outcome: None,
            king_captured: false,
            last_capture: None,
            history: GameHistory::new(),
        })
    }

    pub fn from_fen(config: GameConfig, fen: &str) -> Result<Self> {
        Self::with_board(config, Board::from_fen(fen)?)
    }

    pub fn start(&mut self) -> Result<()> {
        self.start_at(Instant::now())
    }

    /// Resets the board to the start position and puts the side to move on
    /// the clock.
    pub fn start_at(&mut self, now: Instant) -> Result<()> {
        if self.status != GameStatus::NotStarted {
            return Err(GameError::out_of_turn("the game has already been started"));
        }
        self.board = self.start_board.clone();
        self.turn = self.board.turn;
        self.clock = TurnClock::new(self.budget);
        self.clock.start_at(self.turn, now);
        self.status = GameStatus::InProgress;
        self.phase = TurnPhase::Sense;
        self.turn_sense = None;
        self.turn_outcome = None;
        self.king_captured = false;
        self.last_capture = None;
        self.history = GameHistory::new();
        info!("game started, {} to move, {:.1}s per side", self.turn, self.budget.as_secs_f64());
        Ok(())
    }

    fn ensure_active(&self, color: Color) -> Result<()> {
        match self.status {
            GameStatus::InProgress => {}
            GameStatus::NotStarted => return Err(GameError::out_of_turn("the game has not started")),
            GameStatus::GameOver { .. } => return Err(GameError::out_of_turn("the game is over")),
        }
        if color != self.turn {
            return Err(GameError::out_of_turn(format!("it is {}'s turn, not {}'s", self.turn, color)));
        }
        Ok(())
    }

    // --- Turn Actions ---

    pub fn valid_senses(&self) -> Vec<Square> {
        sense::valid_senses()
    }

    /// Moves the side to move on the board may attempt.
    pub fn valid_moves(&self) -> Vec<Move> {
        actions::valid_moves(&self.board)
    }

    /// The active side's single optional sense for this turn.
    pub fn sense(&mut self, color: Color, square: Square) -> Result<SenseResult> {
        self.ensure_active(color)?;
        if self.phase != TurnPhase::Sense {
            return Err(GameError::out_of_turn("only one sense is allowed per turn, before moving"));
        }
        let result = sense::sense(&self.board, square)?;
        debug!("{} senses {}", color, square);
        self.turn_sense = Some(square);
        self.phase = TurnPhase::Move;
        Ok(result)
    }

    /// Resolves and commits the active side's move. Any rejection leaves
    /// the game untouched.
    pub fn make_move(&mut self, color: Color, requested: Move) -> Result<MoveOutcome> {
        self.ensure_can_move(color)?;
        let outcome = resolve_move(&self.board, &requested, &self.config)?;
        Ok(self.commit(color, outcome))
    }

    /// Like [`make_move`](Self::make_move), except that a move offered by
    /// [`valid_moves`](Self::valid_moves) which turns out to be impossible
    /// on the true board is played as a pass instead of raising.
    pub fn attempt_move(&mut self, color: Color, requested: Move) -> Result<MoveOutcome> {
        self.ensure_can_move(color)?;
        let outcome = match resolve_move(&self.board, &requested, &self.config) {
            Ok(outcome) => outcome,
            Err(GameError::InvalidMove { reason, .. }) if self.valid_moves().contains(&self.as_offered(requested)) => {
                warn!("{} move {} could not be played ({}); passing", color, requested, reason);
                MoveOutcome::pass(requested)
            }
            Err(e) => return Err(e),
        };
        Ok(self.commit(color, outcome))
    }

    /// The form `valid_moves` lists a request in: pawn moves onto the last
    /// rank always carry a queen promotion.
    fn as_offered(&self, requested: Move) -> Move {
        let own_pawn = Piece::new(PieceType::Pawn, self.board.turn);
        let last_rank = match self.board.turn { Color::White => 7, Color::Black => 0 };
        if self.board.piece_at(requested.from) == Some(own_pawn) && requested.to.rank() == last_rank {
            Move { promotion: Some(PieceType::Queen), ..requested }
        } else {
            requested
        }
    }

    fn ensure_can_move(&self, color: Color) -> Result<()> {
        self.ensure_active(color)?;
        if self.phase == TurnPhase::Moved {
            return Err(GameError::out_of_turn("a move has already been made this turn"));
        }
        Ok(())
    }

    fn commit(&mut self, color: Color, outcome: MoveOutcome) -> MoveOutcome {
        let captured = self.board.push(&outcome.taken);
        self.king_captured = matches!(captured, Some((_, piece)) if piece.kind == PieceType::King);
        self.last_capture = outcome.capture_square;
        self.turn_outcome = Some(outcome);
        self.phase = TurnPhase::Moved;
        debug!("{} plays {} (requested {})", color, outcome.taken, outcome.requested);
        outcome
    }

    pub fn end_turn(&mut self) -> Result<()> {
        self.end_turn_at(Instant::now())
    }

    /// Charges the clock, passes the turn, and checks for the end of the
    /// game. Running out of time is reported as `TimeExpired` after the
    /// game has been ended.
    pub fn end_turn_at(&mut self, now: Instant) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::out_of_turn("the game is not in progress"));
        }
        let Some(outcome) = self.turn_outcome.take() else {
            return Err(GameError::out_of_turn("cannot end the turn before moving"));
        };
        let mover = self.turn;
        self.history.record_turn(mover, self.turn_sense.take(), outcome);
        let left = self.clock.end_turn_at(now);
        self.turn = mover.opponent();
        self.phase = TurnPhase::Sense;

        if self.king_captured {
            self.finish(Some(mover), WinReason::KingCapture, now);
            return Ok(());
        }
        if left.is_zero() {
            self.finish(Some(mover.opponent()), WinReason::Timeout, now);
            return Err(GameError::TimeExpired { color: mover });
        }
        Ok(())
    }

    /// Ends the game in the opponent's favour.
    pub fn resign(&mut self, color: Color) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::out_of_turn("the game is not in progress"));
        }
        self.finish(Some(color.opponent()), WinReason::Resignation, Instant::now());
        Ok(())
    }

    fn finish(&mut self, winner: Option<Color>, reason: WinReason, now: Instant) {
        self.clock.stop_at(now);
        self.status = GameStatus::GameOver { winner, reason };
        match winner {
            Some(color) => info!("game over: {} wins by {:?}", color, reason),
            None => info!("game over: no winner ({:?})", reason),
        }
    }

    // --- Time ---

    /// Seconds left for the active side. Never changes game state.
    pub fn get_seconds_left(&self) -> f64 {
        self.clock.seconds_left()
    }

    pub fn get_seconds_left_at(&self, now: Instant) -> f64 {
        self.clock.seconds_left_at(now)
    }

    pub fn check_time(&mut self) -> Result<f64> {
        self.check_time_at(Instant::now())
    }

    /// Time query that ends the game once the active side's budget is gone.
    pub fn check_time_at(&mut self, now: Instant) -> Result<f64> {
        if self.status != GameStatus::InProgress {
            return Ok(self.clock.seconds_left_at(now));
        }
        let left = self.clock.remaining_at(now);
        if left.is_zero() {
            let loser = self.turn;
            self.finish(Some(loser.opponent()), WinReason::Timeout, now);
            return Err(GameError::TimeExpired { color: loser });
        }
        Ok(left.as_secs_f64())
    }

    /// Stored budget of `color`, not counting a turn in progress.
    pub fn seconds_left_for(&self, color: Color) -> f64 {
        self.clock.budget(color).as_secs_f64()
    }

    // --- Accessors ---

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::GameOver { winner, .. } => winner,
            _ => None,
        }
    }

    pub fn win_reason(&self) -> Option<WinReason> {
        match self.status {
            GameStatus::GameOver { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The side whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Square where the most recent committed move removed a piece. At the
    /// start of a turn this is the capture of one of the active side's
    /// pieces, if any.
    pub fn last_capture_square(&self) -> Option<Square> {
        self.last_capture
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The true board, for harnesses and display. Never hand this to a player.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_fen(&self) -> String {
        self.board.board_fen()
    }

    pub fn fen(&self) -> String {
        self.board.fen()
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }
}
