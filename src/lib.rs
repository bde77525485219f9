// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine: board state, legal move generation, check detection,
//! FEN and algebraic notation, and a game referee that recognizes checkmate,
//! stalemate and the repetition and fifty-move draws.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod fen;
mod game;
mod movegen;
mod perft;
mod position;
mod san;
mod square_set;
mod types;

pub use fen::{FenParseError, START_FEN};
pub use game::{
    DrawReason, Game, GameError, GameStatus, MoveOutcome, FIFTY_MOVE_PLIES, REPETITION_LIMIT,
};
pub use perft::{divide, legal_moves, perft, PerftMove};
pub use position::{Position, Snapshot};
pub use san::{ResolvedMove, SanMove};
pub use square_set::{SquareSet, SquareSetIterator};
pub use types::{
    CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square, SquareParseError,
};
