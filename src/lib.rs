//! Cat-Trap: trap a cat on a hex board before it reaches the edge.
//!
//! The player blocks one cell per turn; the cat then steps toward the edge
//! along the route with the most shortest escape paths. This crate provides
//! the cat's decision procedure and a best-first search that plays the
//! blocking side.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`grid`] - Hex grid topology (points, neighbors, edges)
//! - [`board`] - Board state, text format, random boards
//! - [`cat`] - The cat's escape algorithm
//! - [`heuristic`] - Escape distance used to rank search nodes
//! - [`search`] - Best-first search for a trapping line
//! - [`player`] - Automated and interactive players
//! - [`game`] - Turn loop and outcome detection
//!
//! ## Example
//!
//! ```
//! use cat_trap::board::Board;
//! use cat_trap::cat::advance_cat;
//! use cat_trap::grid::Point;
//! use cat_trap::player::AutoPlayer;
//! use cat_trap::search::SearchConfig;
//!
//! let mut board = Board::new(Point::center());
//! let mut player = AutoPlayer::with_config(SearchConfig { max_expansions: 200 });
//!
//! // Player blocks a cell, then the cat answers.
//! let block = player.next_automated_move(&board).unwrap();
//! assert!(board.block(block));
//! let cat = advance_cat(&mut board).unwrap();
//! println!("blocked {block}, cat moved to {cat:?}");
//! ```

pub mod board;
pub mod cat;
pub mod constants;
pub mod game;
pub mod grid;
pub mod heuristic;
pub mod player;
pub mod search;
