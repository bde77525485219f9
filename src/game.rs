// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game state machine. A `Game` owns a `Position` together with the
//! record of every ply played so far, referees moves submitted to it and
//! decides after each one whether the game goes on.
use hashbrown::HashMap;
use std::fmt;
use thiserror::Error;

use crate::fen::FenParseError;
use crate::position::{Position, Snapshot};
use crate::san::SanMove;
use crate::square_set::SquareSet;
use crate::types::{Color, Piece, PieceKind, Square, SquareParseError};

/// Number of plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Number of occurrences of the same position after which the game is drawn.
pub const REPETITION_LIMIT: u32 = 3;

/// Reasons a move, or a query, can be refused. A refused move leaves the game untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    InvalidSquare(#[from] SquareParseError),
    #[error("there is no piece on {0}")]
    NoPiecePresent(Square),
    #[error("the piece on {0} belongs to the side not on move")]
    NotYourTurn(Square),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("could not understand move: {0:?}")]
    InvalidNotation(String),
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
    #[error("the game is over ({0})")]
    GameOver(GameStatus),
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenParseError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    Repetition,
    FiftyMove,
}

/// Where the game stands after the most recent ply. `Checkmate`, `Stalemate` and `Draw`
/// are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress { check: bool },
    Checkmate { winner: Color },
    Stalemate,
    Draw { reason: DrawReason },
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            GameStatus::InProgress { .. } => false,
            _ => true,
        }
    }

    /// Whether the side to move is in check. A checkmated side counts as in check.
    pub fn is_check(self) -> bool {
        match self {
            GameStatus::InProgress { check } => check,
            GameStatus::Checkmate { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GameStatus::InProgress { check: false } => write!(f, "in progress"),
            GameStatus::InProgress { check: true } => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw {
                reason: DrawReason::Repetition,
            } => write!(f, "draw by threefold repetition"),
            GameStatus::Draw {
                reason: DrawReason::FiftyMove,
            } => write!(f, "draw by the fifty-move rule"),
        }
    }
}

/// The result of an accepted move: the squares it moved between and the status it left
/// the game in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub start: Square,
    pub end: Square,
    pub status: GameStatus,
}

/// One entry of the game record.
#[derive(Clone, Debug)]
struct Ply {
    fen: String,
    snapshot: Snapshot,
}

impl Ply {
    fn of(pos: &Position) -> Ply {
        Ply {
            fen: pos.as_fen(),
            snapshot: pos.snapshot(),
        }
    }

    /// Two positions repeat when their placement, side to move, castling rights and
    /// en-passant target agree; the clocks don't take part.
    fn repetition_key(&self) -> String {
        self.fen
            .split_whitespace()
            .take(4)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    // The first entry is the record the game was started from; every accepted move
    // pushes one more.
    history: Vec<Ply>,
    repetitions: HashMap<String, u32>,
    status: GameStatus,
}

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Game {
        Game::starting_from(Position::from_start_position())
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game, GameError> {
        let pos = Position::from_fen(fen)?;
        Ok(Game::starting_from(pos))
    }

    fn starting_from(position: Position) -> Game {
        let mut game = Game {
            position,
            history: vec![],
            repetitions: HashMap::new(),
            status: GameStatus::InProgress { check: false },
        };

        game.record_ply();
        game.status = game.evaluate();
        game
    }

    /// Throws away the current game and starts over from the standard opening.
    pub fn load_start(&mut self) {
        debug!("loading start position");
        *self = Game::new();
    }

    /// Throws away the current game and starts over from the given record. On failure the
    /// current game is kept.
    pub fn set_fen<S: AsRef<str>>(&mut self, fen: S) -> Result<(), GameError> {
        let game = Game::from_fen(fen.as_ref())?;
        debug!("loading position {}", fen.as_ref());
        *self = game;
        Ok(())
    }

    pub fn fen(&self) -> String {
        self.position.as_fen()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// The record of every position in the game, starting with the one it was loaded from.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|ply| ply.fen.as_str())
    }

    /// The number of moves played since the game was loaded.
    pub fn ply(&self) -> usize {
        self.history.len() - 1
    }

    pub fn legal_moves(&self, square: Square) -> SquareSet {
        self.position.legal_moves(square)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    /// Looks up the piece on a square given as text, such as `e4`.
    pub fn get_piece(&self, square: &str) -> Result<Option<Piece>, GameError> {
        let square = square.parse::<Square>()?;
        Ok(self.piece_at(square))
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.position.in_check(color)
    }

    /// Plays the piece on `start` to `end`. A pawn reaching the last rank becomes
    /// `promotion`, or a queen when none is given; the kind is ignored for any other move.
    ///
    /// A move that ends the game is still accepted: its outcome carries the terminal status.
    pub fn make_move(
        &mut self,
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let piece = self
            .position
            .piece_at(start)
            .ok_or(GameError::NoPiecePresent(start))?;
        if piece.color != self.position.side_to_move() {
            return Err(GameError::NotYourTurn(start));
        }

        if let Some(kind) = promotion {
            if !kind.is_promotion_target() {
                return Err(GameError::InvalidPromotion(kind));
            }
        }

        if !self.position.legal_moves(start).contains(end) {
            return Err(GameError::IllegalMove(format!("{}{}", start, end)));
        }

        self.position.apply_move(start, end, promotion);
        self.record_ply();
        self.status = self.evaluate();
        debug!("{} played {}{}, now {}", piece.color, start, end, self.status);
        Ok(MoveOutcome {
            start,
            end,
            status: self.status,
        })
    }

    /// Plays a move written in algebraic (`Nf3`, `exd5`, `O-O`) or coordinate (`g1f3`)
    /// notation.
    pub fn move_by_notation(&mut self, text: &str) -> Result<MoveOutcome, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let san = text.parse::<SanMove>()?;
        let resolved = san.resolve(&self.position)?;
        trace!("{} resolved to {}{}", text, resolved.start, resolved.end);
        self.make_move(resolved.start, resolved.end, resolved.promotion)
    }

    /// Takes back the most recent move, returning whether there was one. With nothing to
    /// take back the position is reset to the record the game started from.
    pub fn undo(&mut self) -> bool {
        let undone = if self.history.len() > 1 {
            if let Some(ply) = self.history.pop() {
                self.forget_ply(&ply);
            }

            true
        } else {
            false
        };

        if let Some(last) = self.history.last() {
            self.position.restore(&last.snapshot);
        }

        self.status = self.evaluate();
        trace!("undo (undone: {}), now at ply {}", undone, self.ply());
        undone
    }

    fn record_ply(&mut self) {
        let ply = Ply::of(&self.position);
        *self.repetitions.entry(ply.repetition_key()).or_insert(0) += 1;
        self.history.push(ply);
    }

    fn forget_ply(&mut self, ply: &Ply) {
        let key = ply.repetition_key();
        let remaining = match self.repetitions.get_mut(&key) {
            Some(count) => {
                *count -= 1;
                *count
            }
            None => return,
        };

        if remaining == 0 {
            self.repetitions.remove(&key);
        }
    }

    /// Decides the status of the current position. Repetition is considered before the
    /// availability of moves, and mate or stalemate before the fifty-move rule.
    fn evaluate(&self) -> GameStatus {
        let occurrences = self
            .history
            .last()
            .and_then(|ply| self.repetitions.get(&ply.repetition_key()))
            .cloned()
            .unwrap_or(0);
        if occurrences >= REPETITION_LIMIT {
            return GameStatus::Draw {
                reason: DrawReason::Repetition,
            };
        }

        let side = self.position.side_to_move();
        let check = self.position.in_check(side);
        if !self.position.has_legal_moves(side) {
            return if check {
                GameStatus::Checkmate {
                    winner: side.toggle(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if self.position.halfmove_clock() >= FIFTY_MOVE_PLIES {
            return GameStatus::Draw {
                reason: DrawReason::FiftyMove,
            };
        }

        GameStatus::InProgress { check }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.position)?;
        writeln!(f, "{}", self.fen())?;
        writeln!(f, "{}", self.status)
    }
}
