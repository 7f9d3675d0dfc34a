//! The turn loop: the player blocks a cell, then the cat moves.
//!
//! The cat escapes once it stands on an edge cell and is trapped once it has
//! no escaping move. Every turn blocks one more cell, so a game always ends
//! within [`N`] turns.

use anyhow::bail;

use crate::board::Board;
use crate::cat::advance_cat;
use crate::constants::N;
use crate::grid::Point;
use crate::player::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The cat reached the edge.
    Escaped,
    /// The cat has nowhere left to go.
    Trapped,
}

/// What happened during one call to [`Game::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The player blocked `block` and the cat moved to `cat`.
    Played { block: Point, cat: Point },
    /// The game ended, after `block` if one was placed this turn.
    Over {
        block: Option<Point>,
        outcome: Outcome,
    },
}

pub struct Game {
    board: Board,
    player: Box<dyn Player>,
    turns: usize,
}

impl Game {
    pub fn new(board: Board, player: Box<dyn Player>) -> Self {
        Self {
            board,
            player,
            turns: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Completed player turns.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Play one turn.
    pub fn step(&mut self) -> anyhow::Result<Turn> {
        if self.board.cat().is_edge() {
            return Ok(Turn::Over {
                block: None,
                outcome: Outcome::Escaped,
            });
        }

        let Some(block) = self.request_block()? else {
            return Ok(Turn::Over {
                block: None,
                outcome: Outcome::Trapped,
            });
        };
        self.turns += 1;
        log::info!("turn {}: player blocks {block}", self.turns);

        let turn = match advance_cat(&mut self.board)? {
            None => Turn::Over {
                block: Some(block),
                outcome: Outcome::Trapped,
            },
            Some(cat) if cat.is_edge() => Turn::Over {
                block: Some(block),
                outcome: Outcome::Escaped,
            },
            Some(cat) => Turn::Played { block, cat },
        };
        if let Turn::Over { outcome, .. } = turn {
            log::info!("game over after {} turns: {outcome:?}", self.turns);
        }
        Ok(turn)
    }

    /// Play until the game ends.
    pub fn run(&mut self) -> anyhow::Result<Outcome> {
        loop {
            if let Turn::Over { outcome, .. } = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Ask the player until it names a legal cell, and block it.
    ///
    /// Returns `None` if no cell can be blocked at all.
    fn request_block(&mut self) -> anyhow::Result<Option<Point>> {
        if self.board.legal_blocks().next().is_none() {
            return Ok(None);
        }
        for _ in 0..N {
            let p = self.player.next_move(&self.board)?;
            if self.board.block(p) {
                return Ok(Some(p));
            }
            log::warn!("rejected move {p}");
            self.player.reject(p);
        }
        bail!("player proposed {N} illegal moves in a row");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays a fixed list of moves, then repeats the last one.
    struct Scripted(Vec<Point>);

    impl Player for Scripted {
        fn next_move(&mut self, _board: &Board) -> anyhow::Result<Point> {
            Ok(if self.0.len() > 1 {
                self.0.remove(0)
            } else {
                self.0[0]
            })
        }
    }

    #[test]
    fn test_cat_on_edge_already_escaped() {
        let board = Board::new(Point::new(0, 4));
        let mut game = Game::new(board, Box::new(Scripted(vec![Point::new(5, 5)])));
        assert_eq!(
            game.step().unwrap(),
            Turn::Over {
                block: None,
                outcome: Outcome::Escaped
            }
        );
        assert_eq!(game.turns(), 0);
    }

    #[test]
    fn test_final_block_traps() {
        let mut board = Board::new(Point::center());
        let exit = Point::new(4, 5);
        let around: Vec<_> = board.cat().neighbors().collect();
        for p in around {
            if p != exit {
                board.block(p);
            }
        }
        let mut game = Game::new(board, Box::new(Scripted(vec![exit])));
        assert_eq!(
            game.step().unwrap(),
            Turn::Over {
                block: Some(exit),
                outcome: Outcome::Trapped
            }
        );
        assert!(game.board().is_blocked(exit));
    }

    #[test]
    fn test_rejected_moves_are_retried() {
        // First proposal is the cat's own cell, second is legal.
        let board = Board::new(Point::center());
        let block = Point::new(0, 0);
        let mut game = Game::new(board, Box::new(Scripted(vec![Point::center(), block])));
        match game.step().unwrap() {
            Turn::Played { block: b, cat } => {
                assert_eq!(b, block);
                assert!(Point::center().neighbors().any(|n| n == cat));
            }
            other => panic!("unexpected turn {other:?}"),
        }
        assert_eq!(game.board().blocked_count(), 1);
    }

    #[test]
    fn test_stubborn_player_errors() {
        let board = Board::new(Point::center());
        let mut game = Game::new(board, Box::new(Scripted(vec![Point::center()])));
        assert!(game.step().is_err());
    }

    #[test]
    fn test_cat_runs_to_edge() {
        // A player that only blocks a far corner cannot stop the cat.
        let board = Board::new(Point::center());
        let corners = vec![
            Point::new(0, 0),
            Point::new(0, 9),
            Point::new(10, 0),
            Point::new(10, 9),
            Point::new(1, 0),
        ];
        let mut game = Game::new(board, Box::new(Scripted(corners)));
        assert_eq!(game.run().unwrap(), Outcome::Escaped);
        assert!(game.board().cat().is_edge());
        assert_eq!(game.turns(), 4);
    }
}
