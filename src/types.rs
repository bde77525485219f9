// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core vocabulary of the referee: squares, ranks, files, colors and pieces,
//! along with their textual forms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;
use thiserror::Error;

/// Possible errors that can arise when turning text or raw coordinates into a `Square`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("invalid square: {0:?}")]
    Malformed(String),
    #[error("coordinate out of range: rank {rank}, file {file}")]
    OutOfRange { rank: u8, file: u8 },
}

#[rustfmt::skip]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        SQUARES[rank as usize * 8 + file as usize]
    }

    /// Builds a square from a zero-based (rank, file) pair, where rank 0 is "1" and
    /// file 0 is "a".
    pub fn from_coords(rank: u8, file: u8) -> Result<Square, SquareParseError> {
        match (Rank::from_u8(rank), File::from_u8(file)) {
            (Some(r), Some(f)) => Ok(Square::of(r, f)),
            _ => Err(SquareParseError::OutOfRange { rank, file }),
        }
    }

    pub fn rank(self) -> Rank {
        RANKS[self as usize >> 3]
    }

    pub fn file(self) -> File {
        FILES[self as usize & 7]
    }

    /// Returns the square `rank_delta` ranks and `file_delta` files away from this one,
    /// or `None` if that walks off the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }

        Some(SQUARES[(rank * 8 + file) as usize])
    }

    pub fn towards(self, dir: Direction) -> Option<Square> {
        let (rank_delta, file_delta) = dir.as_vector();
        self.offset(rank_delta, file_delta)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    /// Parses a coordinate such as `e4` or `E4`. The file letter is case-insensitive.
    fn from_str(s: &str) -> Result<Square, SquareParseError> {
        let malformed = || SquareParseError::Malformed(s.to_owned());
        let mut chars = s.chars();
        let (file_c, rank_c) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(malformed()),
        };

        let file = File::try_from(file_c).map_err(|_| malformed())?;
        let rank = Rank::try_from(rank_c).map_err(|_| malformed())?;
        Ok(Square::of(rank, file))
    }
}

#[rustfmt::skip]
pub static SQUARES: [Square; 64] = [
    Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
    Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
    Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
    Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
    Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
    Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
    Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
    Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    /// The rank a pawn of the given color starts on.
    pub fn pawn_home(color: Color) -> Rank {
        match color {
            Color::White => Rank::Two,
            Color::Black => Rank::Seven,
        }
    }

    /// The rank a pawn of the given color promotes on.
    pub fn promotion(color: Color) -> Rank {
        match color {
            Color::White => Rank::Eight,
            Color::Black => Rank::One,
        }
    }

    /// The rank on which a pawn of the given color may capture en-passant.
    pub fn en_passant_target(color: Color) -> Rank {
        match color {
            Color::White => Rank::Six,
            Color::Black => Rank::Three,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = (b'1' + self.to_u8().unwrap_or(0)) as char;
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Rank::from_u32(value as u32 - '1' as u32).ok_or(()),
            _ => Err(()),
        }
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = (b'a' + self.to_u8().unwrap_or(0)) as char;
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    // Files are accepted in either case.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        let lower = value.to_ascii_lowercase();
        match lower {
            'a'..='h' => File::from_u32(lower as u32 - 'a' as u32).ok_or(()),
            _ => Err(()),
        }
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The direction, in ranks, that pawns of this color advance.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The lowercase letter used for this kind in position records.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Whether or not a pawn may promote to this kind.
    pub fn is_promotion_target(self) -> bool {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            PieceKind::Pawn | PieceKind::King => false,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.letter())
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    // Kind letters are accepted in either case; color is not implied.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let res = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(res)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// (rank, file) step for one square in this direction.
    pub fn as_vector(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }
}

pub static DIAGONALS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

pub static ORTHOGONALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE =0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    // Uppercase letters are white pieces, lowercase letters are black pieces.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        };

        f.write_char(chr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_rank_and_file() {
        assert_eq!(Rank::Four, Square::E4.rank());
        assert_eq!(File::E, Square::E4.file());
        assert_eq!(Square::H8, Square::of(Rank::Eight, File::H));
    }

    #[test]
    fn square_parse_case_insensitive() {
        assert_eq!(Ok(Square::E2), "E2".parse::<Square>());
        assert_eq!(Ok(Square::E2), "e2".parse::<Square>());
        assert_eq!(Ok(Square::A1), "a1".parse::<Square>());
    }

    #[test]
    fn square_parse_rejects_garbage() {
        for bad in &["", "e", "e9", "i1", "e22", "22", "ee"] {
            assert_eq!(
                Err(SquareParseError::Malformed(bad.to_string())),
                bad.parse::<Square>()
            );
        }
    }

    #[test]
    fn square_display_round_trip() {
        for &sq in SQUARES.iter() {
            assert_eq!(Ok(sq), sq.to_string().parse::<Square>());
        }
    }

    #[test]
    fn square_from_coords() {
        assert_eq!(Ok(Square::A1), Square::from_coords(0, 0));
        assert_eq!(Ok(Square::D5), Square::from_coords(4, 3));
        assert_eq!(
            Err(SquareParseError::OutOfRange { rank: 8, file: 0 }),
            Square::from_coords(8, 0)
        );
    }

    #[test]
    fn square_offset_stays_on_board() {
        assert_eq!(Some(Square::B3), Square::A1.offset(2, 1));
        assert_eq!(None, Square::A1.offset(-1, 0));
        assert_eq!(None, Square::H4.towards(Direction::East));
        assert_eq!(Some(Square::G5), Square::H4.towards(Direction::NorthWest));
    }

    #[test]
    fn piece_letters() {
        let white_knight = Piece::try_from('N').unwrap();
        assert_eq!(Piece::new(PieceKind::Knight, Color::White), white_knight);
        assert_eq!("N", white_knight.to_string());

        let black_queen = Piece::try_from('q').unwrap();
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black), black_queen);
        assert_eq!("q", black_queen.to_string());

        assert!(Piece::try_from('x').is_err());
    }
}
