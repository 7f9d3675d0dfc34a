//! The cat's escape decision.
//!
//! For every open neighbor of the cat (a candidate first move) an independent
//! breadth-first flood is started from that neighbor. Each flood keeps its own
//! visited set and, for the current wave-front, the number of distinct
//! layer-by-layer paths reaching each cell. All floods advance in lockstep;
//! after each layer the candidate whose wave-front touches the edge through
//! the most paths wins. Exhausted floods drop out, and when none remain the
//! cat is trapped.
//!
//! Ties between candidates with the same path count go to the candidate with
//! the lowest linear index.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::board::Board;
use crate::grid::{CellSet, Point, edge_cells};

/// An internal inconsistency in the escape search.
///
/// This is a bug, never a game outcome: a trapped cat is reported as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("best edge path count {paths} has no matching candidate")]
    MissingBestMove { paths: u64 },
}

/// One candidate's flood.
#[derive(Debug)]
struct Flood {
    visited: CellSet,
    /// Wave-front cell -> number of paths reaching it from the first move.
    front: BTreeMap<Point, u64>,
}

impl Flood {
    fn new(cat: Point, first: Point) -> Self {
        let mut visited = CellSet::new();
        visited.insert(cat);
        visited.insert(first);
        Self {
            visited,
            front: BTreeMap::from([(first, 1)]),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.front.is_empty()
    }

    /// Paths currently ending on an edge cell.
    fn edge_paths(&self) -> u64 {
        edge_cells().iter().filter_map(|p| self.front.get(p)).sum()
    }

    /// Push the wave-front out by one layer.
    fn advance(&mut self, board: &Board) {
        let mut next: BTreeMap<Point, u64> = BTreeMap::new();
        for (&p, &paths) in &self.front {
            for q in p.neighbors() {
                if !board.is_blocked(q) && !self.visited.contains(q) {
                    *next.entry(q).or_insert(0) += paths;
                }
            }
        }
        for &q in next.keys() {
            self.visited.insert(q);
        }
        self.front = next;
    }
}

/// Decide where the cat moves without changing the board.
///
/// Returns `Ok(None)` if the cat cannot reach any edge cell.
pub fn choose_escape(board: &Board) -> Result<Option<Point>, EscapeError> {
    let cat = board.cat();
    let mut floods: BTreeMap<Point, Flood> = board
        .cat_moves()
        .map(|first| (first, Flood::new(cat, first)))
        .collect();

    let mut depth = 0usize;
    while !floods.is_empty() {
        let most = floods.values().map(Flood::edge_paths).max().unwrap_or(0);
        if most > 0 {
            let (&best, _) = floods
                .iter()
                .find(|(_, flood)| flood.edge_paths() == most)
                .ok_or(EscapeError::MissingBestMove { paths: most })?;
            log::debug!("cat at {cat} picks {best}: {most} edge paths at depth {depth}");
            return Ok(Some(best));
        }

        floods.retain(|_, flood| {
            flood.advance(board);
            !flood.is_exhausted()
        });
        depth += 1;
    }

    Ok(None)
}

/// Move the cat one step along its best escape route.
///
/// Returns the cell the cat moved to, or `Ok(None)` if it is trapped (the
/// board is left unchanged in that case).
pub fn advance_cat(board: &mut Board) -> Result<Option<Point>, EscapeError> {
    let choice = choose_escape(board)?;
    if let Some(p) = choice {
        board.set_cat(p);
    }
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surround(board: &mut Board, keep: &[Point]) {
        let around: Vec<_> = board.cat().neighbors().collect();
        for p in around {
            if !keep.contains(&p) {
                board.block(p);
            }
        }
    }

    #[test]
    fn test_steps_onto_adjacent_edge() {
        // (1, 4) is odd-row, neighbors (0, 4) and (0, 5) are edge cells.
        let mut board = Board::new(Point::new(1, 4));
        let mv = advance_cat(&mut board).unwrap().unwrap();
        assert!(mv.is_edge());
        // Several first moves touch the edge with one path; lowest index wins.
        assert_eq!(mv, Point::new(0, 4));
        assert_eq!(board.cat(), mv);
    }

    #[test]
    fn test_trapped_when_surrounded() {
        let mut board = Board::new(Point::center());
        surround(&mut board, &[]);
        let before = board;
        assert_eq!(advance_cat(&mut board), Ok(None));
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_exit_is_taken() {
        let mut board = Board::new(Point::center());
        let exit = Point::new(4, 5);
        surround(&mut board, &[exit]);
        assert_eq!(advance_cat(&mut board), Ok(Some(exit)));
    }

    #[test]
    fn test_enclosed_pocket_is_trapped() {
        // Cat can move, but only inside a sealed two-cell pocket.
        let mut board = Board::new(Point::center());
        let pocket = Point::new(5, 6);
        surround(&mut board, &[pocket]);
        for p in pocket.neighbors().collect::<Vec<_>>() {
            if p != board.cat() {
                board.block(p);
            }
        }
        assert_eq!(choose_escape(&board), Ok(None));
    }

    #[test]
    fn test_prefers_more_edge_paths() {
        // From (2, 4) both (1, 3) and (1, 4) reach two top-edge cells one
        // layer later; the tie goes to the lower index.
        let mut board = Board::new(Point::new(2, 4));
        assert_eq!(choose_escape(&board), Ok(Some(Point::new(1, 3))));

        // Cutting one of (1, 3)'s edge cells leaves (1, 4) ahead 2 to 1.
        board.block(Point::new(0, 3));
        assert_eq!(choose_escape(&board), Ok(Some(Point::new(1, 4))));
    }

    #[test]
    fn test_blocked_edge_neighbor_skipped() {
        let mut board = Board::new(Point::new(1, 4));
        board.block(Point::new(0, 4));
        assert_eq!(choose_escape(&board), Ok(Some(Point::new(0, 5))));
    }

    #[test]
    fn test_path_counts_accumulate() {
        let board = Board::new(Point::center());
        let mut flood = Flood::new(board.cat(), Point::new(5, 6));
        flood.advance(&board);
        // Every new cell is reached through exactly one path from (5, 6).
        assert!(flood.front.values().all(|&n| n == 1));
        flood.advance(&board);
        // Second layer has cells reached from two first-layer parents.
        assert!(flood.front.values().any(|&n| n == 2));
        assert!(!flood.front.contains_key(&board.cat()));
    }
}
