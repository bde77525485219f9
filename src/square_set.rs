// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `SquareSet` type, a set of squares on the chess board.
//! Every query that answers "which squares" (move destinations, candidate
//! source pieces) answers with a `SquareSet`.
//!
//! A square set is a single 64-bit integer, one bit per square, so the usual
//! set operations are bitwise operations and copying one is free.
use std::fmt;
use std::iter::{FromIterator, Iterator};
use std::ops;

use crate::types::{self, Square, SQUARES};

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SquareSet {
    bits: u64,
}

impl SquareSet {
    pub const fn from_bits(bits: u64) -> SquareSet {
        SquareSet { bits }
    }

    /// The empty set.
    pub const fn none() -> SquareSet {
        SquareSet::from_bits(0)
    }

    /// Tests whether or not a square is a member of this set.
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << (square as u8))) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.bits |= 1u64 << (square as u8);
    }

    pub fn remove(&mut self, square: Square) {
        self.bits &= !(1u64 << square as u8);
    }

    pub const fn and(self, other: SquareSet) -> SquareSet {
        SquareSet::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: SquareSet) -> SquareSet {
        SquareSet::from_bits(self.bits | other.bits)
    }

    pub fn iter(self) -> SquareSetIterator {
        SquareSetIterator { bits: self.bits }
    }

    /// Retrieves the number of squares in this set.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                let sq = Square::of(rank, file);
                if self.contains(sq) {
                    write!(f, " 1 ")?
                } else {
                    write!(f, " . ")?
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &types::FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in &types::FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl ops::BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        self.and(rhs)
    }
}

impl ops::BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        *self = self.or(rhs);
    }
}

/// Iterates the members of a `SquareSet` from A1 towards H8.
pub struct SquareSetIterator {
    bits: u64,
}

impl Iterator for SquareSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(SQUARES[next as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIterator;

    fn into_iter(self) -> SquareSetIterator {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        let mut set = SquareSet::none();
        for sq in iter {
            set.insert(sq);
        }

        set
    }
}
