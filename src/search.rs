//! Best-first search for the automated player.
//!
//! Each search node is a board right after a hypothetical player block. When a
//! node is taken off the frontier the cat's reply is simulated with the real
//! escape algorithm, and one child is created for every cell the player could
//! block next. Nodes are ordered by escape distance, largest first, so the
//! search dives toward boards where the cat is furthest from freedom. The
//! first node whose escape distance is [`UNREACHABLE`] is a win; its block
//! sequence is recovered by walking parent links back to the root.
//!
//! Nodes are immutable once built and refer to their parent through an `Rc`,
//! so siblings share one ancestor chain. The only interior mutability is the
//! lazily computed escape distance.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::rc::Rc;

use thiserror::Error;

use crate::board::Board;
use crate::cat::{EscapeError, advance_cat};
use crate::constants::{DEFAULT_MAX_EXPANSIONS, UNREACHABLE};
use crate::grid::Point;
use crate::heuristic::escape_distance;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("cat simulation failed: {0}")]
    Escape(#[from] EscapeError),
    #[error("no cell left to block")]
    NoLegalMove,
    #[error("cat found no move at escape distance {distance}")]
    StuckCat { distance: usize },
}

/// Search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nodes expanded before giving up and returning the best line so far.
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Outcome of one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Blocks to play, earliest first. Never empty.
    pub moves: VecDeque<Point>,
    /// True if `moves` ends with the cat trapped; false for a budget fallback.
    pub solved: bool,
    /// Number of nodes expanded.
    pub expanded: usize,
}

/// A node in the search tree.
struct SearchNode {
    board: Board,
    distance: OnceCell<usize>,
    /// Block that produced this node (`None` for the root).
    placed: Option<Point>,
    parent: Option<Rc<SearchNode>>,
    depth: usize,
}

impl SearchNode {
    fn root(board: Board) -> Self {
        Self {
            board,
            distance: OnceCell::new(),
            placed: None,
            parent: None,
            depth: 0,
        }
    }

    fn child(parent: &Rc<SearchNode>, board: Board, placed: Point) -> Self {
        Self {
            board,
            distance: OnceCell::new(),
            placed: Some(placed),
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        }
    }

    #[inline]
    fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Memoized escape distance of this node's board.
    fn escape_distance(&self) -> usize {
        *self.distance.get_or_init(|| escape_distance(&self.board))
    }

    /// Blocks from the root down to this node, earliest first.
    fn line(&self) -> VecDeque<Point> {
        let mut moves = VecDeque::with_capacity(self.depth);
        let mut node = self;
        while let Some(parent) = node.parent.as_deref() {
            if let Some(p) = node.placed {
                moves.push_front(p);
            }
            node = parent;
        }
        moves
    }
}

/// Frontier entry. Larger escape distance first, then most recently pushed.
struct Queued {
    seq: usize,
    node: Rc<SearchNode>,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .escape_distance()
            .cmp(&other.node.escape_distance())
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Search for a sequence of blocks that traps the cat on `board`.
///
/// If the budget runs out first, the result holds a single move: the first
/// block on the line to the most promising node seen, or failing that the
/// first legal block.
pub fn search(board: &Board, config: &SearchConfig) -> Result<SearchResult, SearchError> {
    let mut frontier = BinaryHeap::new();
    let mut seq = 0usize;
    frontier.push(Queued {
        seq,
        node: Rc::new(SearchNode::root(*board)),
    });

    let mut best: Option<Rc<SearchNode>> = None;
    let mut expanded = 0usize;

    while let Some(Queued { node, .. }) = frontier.pop() {
        if node.escape_distance() == UNREACHABLE {
            let moves = node.line();
            if !moves.is_empty() {
                log::info!(
                    "trapping line of {} blocks found after {expanded} expansions",
                    moves.len()
                );
                return Ok(SearchResult {
                    moves,
                    solved: true,
                    expanded,
                });
            }
            // Root is already trapped; any legal block will do.
            break;
        }
        if expanded >= config.max_expansions {
            log::warn!("search budget of {} expansions exhausted", config.max_expansions);
            break;
        }
        expanded += 1;

        let mut settled = node.board;
        if !node.is_root() {
            if cat_reply(&mut settled, node.escape_distance())?.is_edge() {
                continue;
            }
            let improves = best
                .as_ref()
                .is_none_or(|b| node.escape_distance() > b.escape_distance());
            if improves {
                best = Some(Rc::clone(&node));
            }
        }

        for p in settled.legal_blocks() {
            let mut next = settled;
            next.block(p);
            seq += 1;
            frontier.push(Queued {
                seq,
                node: Rc::new(SearchNode::child(&node, next, p)),
            });
        }
        log::debug!(
            "expanded depth {} (distance {}), frontier {}",
            node.depth,
            node.escape_distance(),
            frontier.len()
        );
    }

    let fallback = best
        .and_then(|node| node.line().front().copied())
        .or_else(|| board.legal_blocks().next())
        .ok_or(SearchError::NoLegalMove)?;
    Ok(SearchResult {
        moves: VecDeque::from([fallback]),
        solved: false,
        expanded,
    })
}

/// Simulate the cat's answer on a board whose escape distance is finite.
///
/// A finite distance means an edge is reachable, so the cat must move.
fn cat_reply(board: &mut Board, distance: usize) -> Result<Point, SearchError> {
    advance_cat(board)?.ok_or(SearchError::StuckCat { distance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cat::choose_escape;

    /// Cat in the center with every neighbor blocked but `exit`.
    fn one_exit(exit: Point) -> Board {
        let mut board = Board::new(Point::center());
        let around: Vec<_> = board.cat().neighbors().collect();
        for p in around {
            if p != exit {
                board.block(p);
            }
        }
        board
    }

    #[test]
    fn test_line_walks_parents() {
        let root = Rc::new(SearchNode::root(Board::new(Point::center())));
        let a = Point::new(1, 1);
        let b = Point::new(2, 2);
        let mut board = root.board;
        board.block(a);
        let first = Rc::new(SearchNode::child(&root, board, a));
        board.block(b);
        let second = SearchNode::child(&first, board, b);

        assert_eq!(second.depth, 2);
        assert_eq!(second.line(), VecDeque::from([a, b]));
        assert!(root.line().is_empty());
        // Two references to root: the local and `first`'s parent link.
        assert_eq!(Rc::strong_count(&root), 2);
    }

    #[test]
    fn test_distance_is_memoized() {
        let node = SearchNode::root(Board::new(Point::center()));
        assert!(node.distance.get().is_none());
        let d = node.escape_distance();
        assert_eq!(node.distance.get(), Some(&d));
        assert_eq!(node.escape_distance(), d);
    }

    #[test]
    fn test_frontier_order() {
        let root = Rc::new(SearchNode::root(Board::new(Point::center())));
        let near = Rc::new(SearchNode::root(Board::new(Point::new(1, 4))));
        let mut heap = BinaryHeap::new();
        heap.push(Queued { seq: 0, node: Rc::clone(&near) });
        heap.push(Queued { seq: 1, node: Rc::clone(&root) });
        heap.push(Queued { seq: 2, node: Rc::clone(&root) });

        // Farthest from the edge first, newest first among equals.
        assert_eq!(heap.pop().map(|q| q.seq), Some(2));
        assert_eq!(heap.pop().map(|q| q.seq), Some(1));
        assert_eq!(heap.pop().map(|q| q.seq), Some(0));
    }

    #[test]
    fn test_finds_single_block_win() {
        let exit = Point::new(4, 5);
        let board = one_exit(exit);
        let result = search(&board, &SearchConfig::default()).unwrap();
        assert!(result.solved);
        assert_eq!(result.moves, VecDeque::from([exit]));

        let mut after = board;
        assert!(after.block(exit));
        assert_eq!(choose_escape(&after), Ok(None));
    }

    #[test]
    fn test_budget_fallback_is_legal() {
        let board = Board::new(Point::center());
        let result = search(&board, &SearchConfig { max_expansions: 0 }).unwrap();
        assert!(!result.solved);
        assert_eq!(result.expanded, 0);
        assert_eq!(result.moves.len(), 1);
        assert!(board.can_block(result.moves[0]));

        let result = search(&board, &SearchConfig { max_expansions: 3 }).unwrap();
        assert!(!result.solved);
        assert!(result.expanded <= 3);
        assert_eq!(result.moves.len(), 1);
        assert!(board.can_block(result.moves[0]));
    }

    #[test]
    fn test_default_budget() {
        assert_eq!(SearchConfig::default().max_expansions, DEFAULT_MAX_EXPANSIONS);
        assert_eq!(DEFAULT_MAX_EXPANSIONS, 50_000);
    }

    #[test]
    fn test_cat_reply_moves_toward_edge() {
        let mut board = Board::new(Point::new(1, 4));
        let distance = escape_distance(&board);
        assert_eq!(cat_reply(&mut board, distance), Ok(Point::new(0, 4)));
    }

    #[test]
    fn test_stuck_cat_is_an_error() {
        // Trapped board paired with a finite distance: the reply must fail
        // instead of claiming the line traps the cat.
        let mut board = one_exit(Point::new(4, 5));
        board.block(Point::new(4, 5));
        assert_eq!(
            cat_reply(&mut board, 3),
            Err(SearchError::StuckCat { distance: 3 })
        );
        assert_eq!(board.cat(), Point::center());
    }

    #[test]
    fn test_already_trapped_falls_back() {
        let board = one_exit(Point::new(4, 5));
        let mut trapped = board;
        trapped.block(Point::new(4, 5));
        let result = search(&trapped, &SearchConfig::default()).unwrap();
        assert!(!result.solved);
        assert!(trapped.can_block(result.moves[0]));
    }
}
