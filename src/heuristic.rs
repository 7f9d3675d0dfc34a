//! Escape distance: how many moves the cat needs to reach the edge.
//!
//! This ignores any blocks the player might still place, so it is only a
//! priority signal for the search. Larger values are better for the player.

use crate::board::Board;
use crate::constants::UNREACHABLE;
use crate::grid::{CellSet, Point};

/// Minimum number of cat moves to any edge cell, or [`UNREACHABLE`] if the
/// cat is walled in.
pub fn escape_distance(board: &Board) -> usize {
    let start = board.cat();
    let mut visited = CellSet::new();
    visited.insert(start);
    let mut layer = vec![start];
    let mut distance = 0;

    while !layer.is_empty() {
        if layer.iter().any(|p| p.is_edge()) {
            return distance;
        }
        let mut next: Vec<Point> = Vec::new();
        for &p in &layer {
            for q in p.neighbors() {
                if !board.is_blocked(q) && visited.insert(q) {
                    next.push(q);
                }
            }
        }
        layer = next;
        distance += 1;
    }

    UNREACHABLE
}
