// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//
// FEN parsing and generation.
//
// The routines in this file are oriented around FEN, a simple notation for chess positions.
// Positions can be created by parsing FEN and FEN can be produced from particular positions.
//
use std::convert::TryFrom;
use thiserror::Error;

use crate::position::Position;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

/// The standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("expected 6 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid digit: {0}")]
    InvalidDigit(char),
    #[error("file does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castle")]
    InvalidCastle,
    #[error("invalid en-passant")]
    InvalidEnPassant,
    #[error("invalid halfmove")]
    InvalidHalfmove,
    #[error("invalid fullmove")]
    InvalidFullmove,
}

impl Position {
    pub fn from_start_position() -> Position {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pos = Position::new();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            let white_pawn = Piece::new(PieceKind::Pawn, Color::White);
            let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
            pos.set_piece(Square::of(Rank::One, file), Some(Piece::new(kind, Color::White)));
            pos.set_piece(Square::of(Rank::Two, file), Some(white_pawn));
            pos.set_piece(Square::of(Rank::Seven, file), Some(black_pawn));
            pos.set_piece(Square::of(Rank::Eight, file), Some(Piece::new(kind, Color::Black)));
        }

        pos.castle_status = CastleStatus::WHITE | CastleStatus::BLACK;
        pos
    }

    /// Constructs a new position from a FEN representation of a board position. The record
    /// must have exactly six whitespace-separated fields.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        let fields: Vec<&str> = fen.as_ref().split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenParseError::WrongFieldCount(fields.len()));
        }

        let mut pos = Position::new();
        eat_board(&mut pos, fields[0])?;
        pos.side_to_move = eat_side_to_move(fields[1])?;
        pos.castle_status = eat_castle_status(fields[2])?;
        pos.en_passant_square = eat_en_passant(fields[3])?;
        pos.halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidHalfmove)?;
        pos.fullmove_clock = fields[5]
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidFullmove)?;
        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.side_to_move() {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        buf.push(' ');
        if self.castle_status().is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');
        if let Some(ep_square) = self.en_passant_square() {
            buf.push_str(&ep_square.to_string());
        } else {
            buf.push('-');
        }
        buf.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_clock()
        ));
        buf
    }
}

fn eat_board(pos: &mut Position, field: &str) -> Result<(), FenParseError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::WrongRankCount(ranks.len()));
    }

    for (text, &rank) in ranks.iter().zip(RANKS.iter().rev()) {
        let mut file = 0usize;
        for c in text.chars() {
            // digits 1 through 8 indicate empty squares.
            if let Some(value) = c.to_digit(10) {
                if value < 1 || value > 8 {
                    return Err(FenParseError::InvalidDigit(c));
                }

                file += value as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            if file >= 8 {
                return Err(FenParseError::FileDoesNotSumToEight);
            }

            pos.set_piece(Square::of(rank, FILES[file]), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(FenParseError::FileDoesNotSumToEight);
        }
    }

    Ok(())
}

fn eat_side_to_move(field: &str) -> Result<Color, FenParseError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenParseError::InvalidSideToMove),
    }
}

fn eat_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
    if field == "-" {
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for c in field.chars() {
        match c {
            'K' => status |= CastleStatus::WHITE_KINGSIDE,
            'k' => status |= CastleStatus::BLACK_KINGSIDE,
            'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
            'q' => status |= CastleStatus::BLACK_QUEENSIDE,
            _ => return Err(FenParseError::InvalidCastle),
        }
    }

    Ok(status)
}

fn eat_en_passant(field: &str) -> Result<Option<Square>, FenParseError> {
    if field == "-" {
        return Ok(None);
    }

    let square = field
        .parse::<Square>()
        .map_err(|_| FenParseError::InvalidEnPassant)?;
    match square.rank() {
        Rank::Three | Rank::Six => Ok(Some(square)),
        _ => Err(FenParseError::InvalidEnPassant),
    }
}
