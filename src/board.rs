//! Board state: blocked cells plus the cat's position.
//!
//! A [`Board`] is a small `Copy` value (a 128-bit bitmap and a point), so
//! search code can snapshot it freely. Blocks are permanent: nothing in this
//! module ever clears a blocked cell, and the cat's cell is never blocked.
//!
//! The text format is `R` lines of `C` tokens: `C` for the cat, `#` for a
//! blocked cell, `-` for an open cell. Odd rows are indented by one space when
//! printed; the loader ignores all whitespace.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{C, N, R, TOKEN_BLOCKED, TOKEN_CAT, TOKEN_OPEN};
use crate::grid::{CellSet, Point};

/// Error produced when loading a malformed board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unexpected end of input at r={row} c={col}")]
    UnexpectedEnd { row: i8, col: i8 },
    #[error("unexpected token '{token}' at r={row} c={col}")]
    InvalidToken { token: char, row: i8, col: i8 },
    #[error("second cat at r={row} c={col}")]
    DuplicateCat { row: i8, col: i8 },
    #[error("no cat on the board")]
    MissingCat,
    #[error("unexpected token '{0}' after the last row")]
    TrailingInput(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    blocked: CellSet,
    cat: Point,
}

impl Board {
    /// An open board with the cat at `cat`.
    pub fn new(cat: Point) -> Self {
        debug_assert!(cat.is_valid());
        Self {
            blocked: CellSet::new(),
            cat,
        }
    }

    /// Generate a board with the cat in the center and up to `walls` random
    /// blocks. Draws that land on the cat (or on an existing block) are
    /// simply lost, so fewer than `walls` cells may end up blocked.
    pub fn random(rng: &mut fastrand::Rng, walls: usize) -> Self {
        let mut board = Self::new(Point::center());
        for _ in 0..walls {
            let p = Point::new(rng.i8(0..R), rng.i8(0..C));
            board.block(p);
        }
        board
    }

    #[inline]
    pub fn cat(&self) -> Point {
        self.cat
    }

    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.blocked.contains(p)
    }

    /// True if `p` is on the board and not blocked. The cat's cell is open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        p.is_valid() && !self.blocked.contains(p)
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// True if a block may be placed at `p`.
    #[inline]
    pub fn can_block(&self, p: Point) -> bool {
        self.is_open(p) && p != self.cat
    }

    /// Place a player block at `p`.
    ///
    /// Returns `false` and leaves the board untouched if `p` is off the board,
    /// already blocked, or under the cat.
    pub fn block(&mut self, p: Point) -> bool {
        if !self.can_block(p) {
            return false;
        }
        self.blocked.insert(p);
        true
    }

    /// Every cell where a block may be placed, in ascending index order.
    pub fn legal_blocks(&self) -> impl Iterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.can_block(p))
    }

    /// The cat's open neighbors.
    pub fn cat_moves(&self) -> impl Iterator<Item = Point> + '_ {
        self.cat.neighbors().filter(move |&p| !self.blocked.contains(p))
    }

    pub(crate) fn set_cat(&mut self, p: Point) {
        debug_assert!(self.is_open(p));
        self.cat = p;
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.chars().filter(|ch| !ch.is_whitespace());
        let mut blocked = CellSet::new();
        let mut cat = None;

        for idx in 0..N {
            let p = Point::from_index(idx);
            let token = tokens.next().ok_or(BoardError::UnexpectedEnd {
                row: p.row,
                col: p.col,
            })?;
            match token {
                TOKEN_CAT => {
                    if cat.is_some() {
                        return Err(BoardError::DuplicateCat {
                            row: p.row,
                            col: p.col,
                        });
                    }
                    cat = Some(p);
                }
                TOKEN_BLOCKED => {
                    blocked.insert(p);
                }
                TOKEN_OPEN => {}
                other => {
                    return Err(BoardError::InvalidToken {
                        token: other,
                        row: p.row,
                        col: p.col,
                    });
                }
            }
        }

        if let Some(extra) = tokens.next() {
            return Err(BoardError::TrailingInput(extra));
        }

        let cat = cat.ok_or(BoardError::MissingCat)?;
        Ok(Board { blocked, cat })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..R {
            if r % 2 == 1 {
                write!(f, " ")?;
            }
            for c in 0..C {
                let p = Point::new(r, c);
                if c > 0 {
                    write!(f, " ")?;
                }
                let ch = if p == self.cat {
                    TOKEN_CAT
                } else if self.blocked.contains(p) {
                    TOKEN_BLOCKED
                } else {
                    TOKEN_OPEN
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
