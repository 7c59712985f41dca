//! A fixed-size bitboard over board coordinates, using const generics.
//!
//! Boards are an `N×N` grid packed into an unsigned integer `T`; cell
//! `(x, y)` lives at bit `y * N + x`. The engine uses it for fleet
//! occupancy and shot-history lookups, where scanning vectors would be
//! quadratic.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

use num_traits::{PrimInt, Unsigned};
use thiserror::Error;

use super::config::BOARD_SIZE;
use super::geometry::Coord;

/// Bitboard sized for the game grid.
pub type Grid = BitBoard<u128, { BOARD_SIZE as usize }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitBoardError {
    #[error("a {n}x{n} board needs more than the {capacity} bits available")]
    SizeTooLarge { n: usize, capacity: usize },
    #[error("{0} is off the board")]
    OutOfBounds(Coord),
}

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    const CELLS: usize = N * N;

    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Checked constructor for boards that may not fit in `T`.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = T::zero().count_zeros() as usize;
        if Self::CELLS > capacity {
            return Err(BitBoardError::SizeTooLarge { n: N, capacity });
        }
        Ok(Self::new())
    }

    /// Number of marked cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether `coord` is marked. Coordinates off the board are never marked.
    pub fn contains(&self, coord: Coord) -> bool {
        match self.index(coord) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Mark `coord`.
    pub fn insert(&mut self, coord: Coord) -> Result<(), BitBoardError> {
        let idx = self.index(coord)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    fn index(&self, coord: Coord) -> Result<usize, BitBoardError> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        (x < N && y < N)
            .then_some(y * N + x)
            .ok_or(BitBoardError::OutOfBounds(coord))
    }

    /// Build a bitboard from an iterator of coordinates.
    pub fn from_coords<I>(iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for c in iter {
            board.insert(c)?;
        }
        Ok(board)
    }

    /// Marked cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..Self::CELLS)
            .filter(move |idx| ((self.bits >> *idx) & T::one()) != T::zero())
            .map(|idx| Coord::new((idx % N) as u8, (idx / N) as u8))
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> fmt::Display for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let mark = if self.contains(Coord::new(x as u8, y as u8)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", mark)?;
            }
            if y + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
