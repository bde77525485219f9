// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::movegen;
use crate::square_set::SquareSet;
use crate::types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS, SQUARES};

/// The complete state of a chess board: where the pieces stand, whose turn it
/// is, the castling rights, the en-passant target and both move clocks.
///
/// The board is a plain 8x8 grid indexed by `[rank][file]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: [[Option<Piece>; 8]; 8],
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_clock: u32,
    pub(crate) side_to_move: Color,
    pub(crate) castle_status: CastleStatus,
}

/// A saved copy of a `Position`, produced by `Position::snapshot` and consumed
/// by `Position::restore`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(Position);

//
// Board state getters
//

impl Position {
    /// An empty board with White to move and no castling rights.
    pub fn new() -> Position {
        Position {
            board: [[None; 8]; 8],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
        }
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(kingside_castle_mask(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(queenside_castle_mask(color))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.rank() as usize][square.file() as usize]
    }

    /// Every square holding a piece of the given color.
    pub fn pieces(&self, color: Color) -> SquareSet {
        SQUARES
            .iter()
            .cloned()
            .filter(|&sq| self.piece_at(sq).map(|p| p.color) == Some(color))
            .collect()
    }

    /// Every square holding a piece of the given color and kind.
    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> SquareSet {
        let wanted = Some(Piece::new(kind, color));
        SQUARES
            .iter()
            .cloned()
            .filter(|&sq| self.piece_at(sq) == wanted)
            .collect()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of_kind(color, PieceKind::King).first()
    }

    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.rank() as usize][square.file() as usize] = piece;
    }

    fn take_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square);
        self.set_piece(square, None);
        piece
    }
}

//
// Move application and board manipulation
//

impl Position {
    /// Moves the piece on `start` to `end` without checking that the move is legal, and
    /// returns the captured piece, if any.
    ///
    /// The board-level side effects of the move are carried out here:
    ///   1. Whatever stands on `end` is captured.
    ///   2. A pawn moving diagonally onto an empty en-passant target captures the pawn
    ///      beside it.
    ///   3. A king moving two files drags the rook on that side across it.
    ///   4. A pawn landing on its last rank is replaced by `promotion` (a queen if none).
    ///
    /// Side to move, castling rights, the en-passant target and the clocks are left alone;
    /// `apply_move` updates those.
    pub fn apply_raw_move(
        &mut self,
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Piece> {
        debug_assert!(
            self.piece_at(start).is_some(),
            "invalid move: no piece at source square {}",
            start
        );
        let moving_piece = match self.take_piece(start) {
            Some(piece) => piece,
            None => return None,
        };

        let mut captured = self.take_piece(end);
        if moving_piece.kind == PieceKind::Pawn
            && captured.is_none()
            && start.file() != end.file()
            && Some(end) == self.en_passant_square
        {
            // The captured pawn sits beside the mover, not on the target square.
            captured = self.take_piece(Square::of(start.rank(), end.file()));
        }

        if moving_piece.kind == PieceKind::King
            && (end.file() as i8 - start.file() as i8).abs() == 2
        {
            let (rook_start, rook_end) = if end.file() > start.file() {
                (File::H, File::F)
            } else {
                (File::A, File::D)
            };

            let rank = start.rank();
            if let Some(rook) = self.take_piece(Square::of(rank, rook_start)) {
                self.set_piece(Square::of(rank, rook_end), Some(rook));
            }
        }

        let piece_to_add = if moving_piece.kind == PieceKind::Pawn
            && end.rank() == Rank::promotion(moving_piece.color)
        {
            Piece::new(promotion.unwrap_or(PieceKind::Queen), moving_piece.color)
        } else {
            moving_piece
        };

        self.set_piece(end, Some(piece_to_add));
        captured
    }

    /// Plays a move and advances the rest of the position state along with it: the
    /// en-passant target, castling rights, clocks and side to move. Legality is not
    /// checked.
    pub fn apply_move(&mut self, start: Square, end: Square, promotion: Option<PieceKind>) {
        let moving_piece = match self.piece_at(start) {
            Some(piece) => piece,
            None => return,
        };

        let captured = self.apply_raw_move(start, end, promotion);

        // Double pawn pushes set the en-passant square; all other moves clear it.
        let rank_distance = (end.rank() as i8 - start.rank() as i8).abs();
        self.en_passant_square = if moving_piece.kind == PieceKind::Pawn && rank_distance == 2 {
            start.offset(moving_piece.color.pawn_direction(), 0)
        } else {
            None
        };

        // Anything leaving or arriving on a king or rook home square invalidates the castles
        // that depend on it, which covers king moves, rook moves and rooks being captured.
        self.castle_status &= !(castle_rights_touched(start) | castle_rights_touched(end));

        if captured.is_some() || moving_piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if self.side_to_move == Color::Black {
            self.fullmove_clock = self.fullmove_clock.saturating_add(1);
        }

        self.side_to_move = self.side_to_move.toggle();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.clone_from(&snapshot.0);
    }
}

//
// Board analysis (check detection and move legality)
//

impl Position {
    /// Destinations reachable by the piece on `square` according to its movement pattern,
    /// ignoring whether the move would leave its own king attacked. Castling is not included.
    pub fn pseudo_legal_moves(&self, square: Square) -> SquareSet {
        movegen::pseudo_legal_moves(self, square)
    }

    /// Returns the squares of the pieces of color `attacker` that could capture on `target`.
    pub fn squares_attacking(&self, attacker: Color, target: Square) -> SquareSet {
        let mut attacks = SquareSet::none();
        for square in self.pieces(attacker) {
            // Pawn pushes never capture.
            if self.piece_at(square).map(|p| p.kind) == Some(PieceKind::Pawn)
                && square.file() == target.file()
            {
                continue;
            }

            if self.pseudo_legal_moves(square).contains(target) {
                attacks.insert(square);
            }
        }

        attacks
    }

    /// Whether the king of the given color is attacked. A side without a king is never in
    /// check.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => !self.squares_attacking(color.toggle(), king).is_empty(),
            None => false,
        }
    }

    /// Destinations the piece on `square` may legally move to: its pseudo-legal moves plus
    /// any castles, keeping only those that do not leave its own king attacked.
    pub fn legal_moves(&self, square: Square) -> SquareSet {
        let piece = match self.piece_at(square) {
            Some(piece) => piece,
            None => return SquareSet::none(),
        };

        let castles = if piece.kind == PieceKind::King {
            self.castle_candidates(square, piece.color)
        } else {
            SquareSet::none()
        };

        let candidates = self.pseudo_legal_moves(square) | castles;
        let snapshot = self.snapshot();
        let mut scratch = self.clone();
        let mut legal = SquareSet::none();
        for destination in candidates {
            scratch.apply_raw_move(square, destination, None);
            if !scratch.in_check(piece.color) {
                legal.insert(destination);
            }

            scratch.restore(&snapshot);
        }

        // The king may not pass through an attacked square: a castle only survives if the
        // one-step king move in the same direction is legal too.
        for destination in castles {
            let step = if destination.file() > square.file() {
                destination.towards(Direction::West)
            } else {
                destination.towards(Direction::East)
            };

            if step.map(|s| !legal.contains(s)).unwrap_or(true) {
                legal.remove(destination);
            }
        }

        legal
    }

    /// Castling destinations for the king of `color` standing on `square`, considering
    /// rights, the rook, empty squares between king and rook and whether the king is
    /// currently in check. Safety of the squares the king crosses is left to `legal_moves`.
    fn castle_candidates(&self, square: Square, color: Color) -> SquareSet {
        let mut candidates = SquareSet::none();
        if square != king_home(color) || self.in_check(color) {
            return candidates;
        }

        let rank = square.rank();
        let rook = Some(Piece::new(PieceKind::Rook, color));
        for lane in &CASTLE_LANES {
            if !self.castle_status.contains((lane.mask)(color)) {
                continue;
            }

            if self.piece_at(Square::of(rank, lane.rook)) != rook {
                continue;
            }

            let clear = lane
                .between
                .iter()
                .all(|&file| self.piece_at(Square::of(rank, file)).is_none());
            if clear {
                candidates.insert(Square::of(rank, lane.king_destination));
            }
        }

        candidates
    }

    /// Total number of legal moves available to the given color, counting each
    /// destination once.
    pub fn legal_move_count(&self, color: Color) -> u32 {
        self.pieces(color)
            .iter()
            .map(|sq| self.legal_moves(sq).count())
            .sum()
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces(color)
            .iter()
            .any(|sq| !self.legal_moves(sq).is_empty())
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        let side = self.side_to_move;
        self.in_check(side) && !self.has_legal_moves(side)
    }

    /// Whether the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        let side = self.side_to_move;
        !self.in_check(side) && !self.has_legal_moves(side)
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

//
// Helper functions
//

struct CastleLane {
    mask: fn(Color) -> CastleStatus,
    rook: File,
    between: &'static [File],
    king_destination: File,
}

static CASTLE_LANES: [CastleLane; 2] = [
    CastleLane {
        mask: kingside_castle_mask,
        rook: File::H,
        between: &[File::F, File::G],
        king_destination: File::G,
    },
    CastleLane {
        mask: queenside_castle_mask,
        rook: File::A,
        between: &[File::B, File::C, File::D],
        king_destination: File::C,
    },
];

fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

fn kingside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_KINGSIDE,
        Color::Black => CastleStatus::BLACK_KINGSIDE,
    }
}

fn queenside_castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_QUEENSIDE,
        Color::Black => CastleStatus::BLACK_QUEENSIDE,
    }
}

fn castle_rights_touched(square: Square) -> CastleStatus {
    match square {
        Square::E1 => CastleStatus::WHITE,
        Square::H1 => CastleStatus::WHITE_KINGSIDE,
        Square::A1 => CastleStatus::WHITE_QUEENSIDE,
        Square::E8 => CastleStatus::BLACK,
        Square::H8 => CastleStatus::BLACK_KINGSIDE,
        Square::A8 => CastleStatus::BLACK_QUEENSIDE,
        _ => CastleStatus::NONE,
    }
}
