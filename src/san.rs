// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of moves written in algebraic notation (`Nbd7`, `exd5`, `e8=Q`,
//! `O-O-O`) or as plain coordinates (`e2e4`, `e7e8q`).
//!
//! Algebraic text names a destination and, at most, a hint about where the
//! moving piece stands. Turning it into a concrete source square requires the
//! position, since the mover is found by asking which pieces can legally reach
//! the destination.
use regex::Regex;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::game::GameError;
use crate::position::Position;
use crate::square_set::SquareSet;
use crate::types::{Color, File, PieceKind, Rank, Square};

lazy_static! {
    static ref CASTLE: Regex = Regex::new(r"^(?:O-O(-O)?|0-0(-0)?)[+#]?$").expect("castle pattern");
    static ref COORDINATE: Regex =
        Regex::new(r"(?i)^([a-h][1-8])([a-h][1-8])=?([nbrq])?[+#]?$").expect("coordinate pattern");
    static ref ALGEBRAIC: Regex =
        Regex::new(r"^([PNBRQK])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([NBRQ]))?[+#]?$")
            .expect("algebraic pattern");
}

/// A move as written, before it has been matched against a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SanMove {
    Castle {
        kingside: bool,
    },
    Coordinate {
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    },
    Algebraic {
        kind: PieceKind,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        destination: Square,
        promotion: Option<PieceKind>,
    },
}

/// A move with its source square worked out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    pub start: Square,
    pub end: Square,
    pub promotion: Option<PieceKind>,
}

impl FromStr for SanMove {
    type Err = GameError;

    fn from_str(text: &str) -> Result<SanMove, GameError> {
        let text = text.trim();
        let invalid = || GameError::InvalidNotation(text.to_owned());

        if let Some(caps) = CASTLE.captures(text) {
            let queenside = caps.get(1).is_some() || caps.get(2).is_some();
            return Ok(SanMove::Castle {
                kingside: !queenside,
            });
        }

        if let Some(caps) = COORDINATE.captures(text) {
            let start = caps[1].parse::<Square>().map_err(|_| invalid())?;
            let end = caps[2].parse::<Square>().map_err(|_| invalid())?;
            let promotion = match caps.get(3) {
                Some(m) => Some(kind_of(m.as_str()).ok_or_else(invalid)?),
                None => None,
            };

            return Ok(SanMove::Coordinate {
                start,
                end,
                promotion,
            });
        }

        let caps = ALGEBRAIC.captures(text).ok_or_else(invalid)?;
        let kind = match caps.get(1) {
            Some(m) => kind_of(m.as_str()).ok_or_else(invalid)?,
            None => PieceKind::Pawn,
        };
        let file = match caps.get(2) {
            Some(m) => {
                let file = first_char(m.as_str()).and_then(|c| File::try_from(c).ok());
                Some(file.ok_or_else(invalid)?)
            }
            None => None,
        };
        let rank = match caps.get(3) {
            Some(m) => {
                let rank = first_char(m.as_str()).and_then(|c| Rank::try_from(c).ok());
                Some(rank.ok_or_else(invalid)?)
            }
            None => None,
        };
        let destination = caps[5].parse::<Square>().map_err(|_| invalid())?;
        let promotion = match caps.get(6) {
            Some(m) => Some(kind_of(m.as_str()).ok_or_else(invalid)?),
            None => None,
        };

        if promotion.is_some() && kind != PieceKind::Pawn {
            return Err(invalid());
        }

        Ok(SanMove::Algebraic {
            kind,
            file,
            rank,
            capture: caps.get(4).is_some(),
            destination,
            promotion,
        })
    }
}

impl SanMove {
    /// Finds the piece this move refers to among the pieces of the side to move.
    ///
    /// Algebraic moves fail with `IllegalMove` when no piece of the named kind can legally
    /// reach the destination, and with `AmbiguousMove` when more than one can and the
    /// written file/rank hint does not single one out.
    pub fn resolve(&self, pos: &Position) -> Result<ResolvedMove, GameError> {
        let side = pos.side_to_move();
        match *self {
            SanMove::Castle { kingside } => {
                let rank = match side {
                    Color::White => Rank::One,
                    Color::Black => Rank::Eight,
                };
                let start = Square::of(rank, File::E);
                let end = Square::of(rank, if kingside { File::G } else { File::C });
                let is_king = pos.piece_at(start).map(|p| (p.kind, p.color))
                    == Some((PieceKind::King, side));
                if !is_king || !pos.legal_moves(start).contains(end) {
                    return Err(GameError::IllegalMove(self.to_string()));
                }

                Ok(ResolvedMove {
                    start,
                    end,
                    promotion: None,
                })
            }
            SanMove::Coordinate {
                start,
                end,
                promotion,
            } => Ok(ResolvedMove {
                start,
                end,
                promotion,
            }),
            SanMove::Algebraic {
                kind,
                file,
                rank,
                destination,
                promotion,
                ..
            } => {
                if promotion.is_some() && destination.rank() != Rank::promotion(side) {
                    return Err(GameError::InvalidNotation(self.to_string()));
                }

                let candidates: SquareSet = pos
                    .pieces_of_kind(side, kind)
                    .iter()
                    .filter(|&sq| pos.legal_moves(sq).contains(destination))
                    .filter(|&sq| file.map(|f| sq.file() == f).unwrap_or(true))
                    .filter(|&sq| rank.map(|r| sq.rank() == r).unwrap_or(true))
                    .collect();

                match (candidates.first(), candidates.count()) {
                    (Some(start), 1) => Ok(ResolvedMove {
                        start,
                        end: destination,
                        promotion,
                    }),
                    (None, _) => Err(GameError::IllegalMove(self.to_string())),
                    _ => Err(GameError::AmbiguousMove(self.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SanMove::Castle { kingside: true } => write!(f, "O-O"),
            SanMove::Castle { kingside: false } => write!(f, "O-O-O"),
            SanMove::Coordinate {
                start,
                end,
                promotion,
            } => {
                write!(f, "{}{}", start, end)?;
                if let Some(kind) = promotion {
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
            SanMove::Algebraic {
                kind,
                file,
                rank,
                capture,
                destination,
                promotion,
            } => {
                if kind != PieceKind::Pawn {
                    write!(f, "{}", kind.letter().to_ascii_uppercase())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }
                if capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", destination)?;
                if let Some(kind) = promotion {
                    write!(f, "={}", kind.letter().to_ascii_uppercase())?;
                }
                Ok(())
            }
        }
    }
}

fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}

fn kind_of(s: &str) -> Option<PieceKind> {
    first_char(s).and_then(|c| PieceKind::try_from(c).ok())
}
