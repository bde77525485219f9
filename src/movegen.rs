// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Each piece kind has its own generator and
//! `pseudo_legal_moves` dispatches on the piece standing on a square. None of
//! these consider whether the mover's king is left attacked; that is the job
//! of `Position::legal_moves`.
use crate::position::Position;
use crate::square_set::SquareSet;
use crate::types::{Color, Direction, Piece, PieceKind, Rank, Square};
use crate::types::{DIAGONALS, ORTHOGONALS};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub fn pseudo_legal_moves(pos: &Position, square: Square) -> SquareSet {
    let piece = match pos.piece_at(square) {
        Some(piece) => piece,
        None => return SquareSet::none(),
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(pos, square, piece.color),
        PieceKind::Knight => step_moves(pos, square, piece.color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => slide_moves(pos, square, piece.color, &DIAGONALS),
        PieceKind::Rook => slide_moves(pos, square, piece.color, &ORTHOGONALS),
        PieceKind::Queen => {
            slide_moves(pos, square, piece.color, &DIAGONALS)
                | slide_moves(pos, square, piece.color, &ORTHOGONALS)
        }
        PieceKind::King => step_moves(pos, square, piece.color, &KING_OFFSETS),
    }
}

fn pawn_moves(pos: &Position, square: Square, color: Color) -> SquareSet {
    let mut moves = SquareSet::none();
    let dir = color.pawn_direction();

    // Pushes: one square if empty, two from the home rank if both are empty.
    if let Some(single) = square.offset(dir, 0) {
        if pos.piece_at(single).is_none() {
            moves.insert(single);
            if square.rank() == Rank::pawn_home(color) {
                if let Some(double) = single.offset(dir, 0) {
                    if pos.piece_at(double).is_none() {
                        moves.insert(double);
                    }
                }
            }
        }
    }

    // Captures: diagonally onto an enemy piece, or onto the en-passant target when it
    // was left behind by an enemy pawn beside this one.
    for &file_delta in &[-1, 1] {
        let target = match square.offset(dir, file_delta) {
            Some(target) => target,
            None => continue,
        };

        match pos.piece_at(target) {
            Some(victim) if victim.color != color => moves.insert(target),
            None if is_en_passant_capture(pos, square, target, color) => moves.insert(target),
            _ => {}
        }
    }

    moves
}

fn is_en_passant_capture(pos: &Position, square: Square, target: Square, color: Color) -> bool {
    if pos.en_passant_square() != Some(target) {
        return false;
    }

    if target.rank() != Rank::en_passant_target(color) {
        return false;
    }

    let victim_square = Square::of(square.rank(), target.file());
    pos.piece_at(victim_square) == Some(Piece::new(PieceKind::Pawn, color.toggle()))
}

/// Moves for pieces that jump a fixed set of offsets (knights, kings).
fn step_moves(pos: &Position, square: Square, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(rank_delta, file_delta)| square.offset(rank_delta, file_delta))
        .filter(|&target| pos.piece_at(target).map(|p| p.color) != Some(color))
        .collect()
}

/// Moves for pieces that slide along rays (bishops, rooks, queens). A ray stops at the
/// board edge, before an own piece, or on an enemy piece.
fn slide_moves(pos: &Position, square: Square, color: Color, dirs: &[Direction]) -> SquareSet {
    let mut moves = SquareSet::none();
    for &dir in dirs {
        let mut cursor = square.towards(dir);
        while let Some(target) = cursor {
            match pos.piece_at(target) {
                Some(piece) => {
                    if piece.color != color {
                        moves.insert(target);
                    }

                    break;
                }
                None => moves.insert(target),
            }

            cursor = target.towards(dir);
        }
    }

    moves
}
