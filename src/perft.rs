// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Counting of legal move paths ("perft"), the usual way of checking a move
//! generator against published node counts.
use rayon::prelude::*;

use crate::position::Position;
use crate::types::{PieceKind, Rank, Square};

static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A fully specified legal move: a pawn reaching its last rank is listed once per
/// promotion kind.
pub type PerftMove = (Square, Square, Option<PieceKind>);

/// Every legal move available to the side to move.
pub fn legal_moves(pos: &Position) -> Vec<PerftMove> {
    let side = pos.side_to_move();
    let mut moves = vec![];
    for start in pos.pieces(side) {
        let promotes = pos.piece_at(start).map(|p| p.kind) == Some(PieceKind::Pawn);
        for end in pos.legal_moves(start) {
            if promotes && end.rank() == Rank::promotion(side) {
                for &kind in &PROMOTION_KINDS {
                    moves.push((start, end, Some(kind)));
                }
            } else {
                moves.push((start, end, None));
            }
        }
    }

    moves
}

/// Number of leaf positions reached by playing every sequence of `depth` legal moves.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    legal_moves(pos)
        .par_iter()
        .map(|&(start, end, promotion)| {
            let mut new_pos = pos.clone();
            new_pos.apply_move(start, end, promotion);
            perft(&new_pos, depth - 1)
        })
        .sum()
}

/// Perft split by root move, useful for locating where two generators disagree.
pub fn divide(pos: &Position, depth: u32) -> Vec<(PerftMove, u64)> {
    legal_moves(pos)
        .into_par_iter()
        .map(|mov| {
            let (start, end, promotion) = mov;
            let mut new_pos = pos.clone();
            new_pos.apply_move(start, end, promotion);
            (mov, perft(&new_pos, depth.saturating_sub(1)))
        })
        .collect()
}
