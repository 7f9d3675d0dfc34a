//! Hex grid topology.
//!
//! The board is an "offset" hex grid embedded in a rectangular array: every
//! row is shifted half a cell relative to its neighbors, so the column offsets
//! of the diagonal neighbors depend on row parity. Even rows lean left, odd
//! rows lean right (odd rows are indented when the board is printed).
//!
//! Everything here is pure: points are plain values and the edge table is
//! computed once and shared read-only.

use std::fmt;
use std::sync::OnceLock;

use bitvec::prelude::*;

use crate::constants::{C, N, R};

/// A cell coordinate on the board.
///
/// Ordering is row-major, which matches ordering by [`Point::index`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i8,
    pub col: i8,
}

impl Point {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// The center cell, where generated boards place the cat.
    pub const fn center() -> Self {
        Self::new(R / 2, C / 2)
    }

    /// Inverse of [`Point::index`].
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < N);
        Self::new((idx / C as usize) as i8, (idx % C as usize) as i8)
    }

    /// Linear index used for bitmap storage. Only meaningful for valid points.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * C as usize + self.col as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        (0..R).contains(&self.row) && (0..C).contains(&self.col)
    }

    /// True if the point lies on the outer ring of the board.
    #[inline]
    pub fn is_edge(self) -> bool {
        self.row == 0 || self.row == R - 1 || self.col == 0 || self.col == C - 1
    }

    /// The valid hex neighbors of this point, in ascending index order.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        let Point { row: r, col: c } = self;
        // Column of the upper-left / lower-left neighbor.
        let shift = c - (r + 1) % 2;
        [
            Point::new(r - 1, shift),
            Point::new(r - 1, shift + 1),
            Point::new(r, c - 1),
            Point::new(r, c + 1),
            Point::new(r + 1, shift),
            Point::new(r + 1, shift + 1),
        ]
        .into_iter()
        .filter(|p| p.is_valid())
    }

    /// Every valid point in ascending index order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..N).map(Point::from_index)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

static EDGES: OnceLock<Vec<Point>> = OnceLock::new();

/// All edge cells in ascending index order, computed on first use.
pub fn edge_cells() -> &'static [Point] {
    EDGES.get_or_init(|| Point::all().filter(|p| p.is_edge()).collect())
}

/// A set of cells stored as a bitmap over linear indices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet(BitArray<[u64; 2], Lsb0>);

impl CellSet {
    pub const fn new() -> Self {
        Self(BitArray::ZERO)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.0[p.index()]
    }

    /// Insert a point, returning `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, p: Point) -> bool {
        !self.0.replace(p.index(), true)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }
}
