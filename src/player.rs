//! Player strategies.
//!
//! The game loop talks to a `dyn Player` and does not care whether moves come
//! from a person or from the search engine.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};

use crate::board::Board;
use crate::grid::Point;
use crate::search::{SearchConfig, SearchError, search};

/// Something that proposes where to place the next block.
pub trait Player {
    /// Propose a block for `board`. The caller validates it.
    fn next_move(&mut self, board: &Board) -> anyhow::Result<Point>;

    /// Called when the proposed move was illegal.
    fn reject(&mut self, _p: Point) {}
}

/// Plays the blocks found by [`search`], serving a found line one move per
/// turn before searching again.
#[derive(Debug, Default)]
pub struct AutoPlayer {
    config: SearchConfig,
    pending: VecDeque<Point>,
    searches: usize,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Moves still queued from the last search, next move first.
    pub fn pending(&self) -> &VecDeque<Point> {
        &self.pending
    }

    /// Number of searches run so far.
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Next block, from the cached line if one is left.
    pub fn next_automated_move(&mut self, board: &Board) -> Result<Point, SearchError> {
        if let Some(p) = self.pending.pop_front() {
            log::debug!("cached move {p}, {} left", self.pending.len());
            return Ok(p);
        }

        self.searches += 1;
        let mut result = search(board, &self.config)?;
        let first = result.moves.pop_front().ok_or(SearchError::NoLegalMove)?;
        self.pending = result.moves;
        Ok(first)
    }
}

impl Player for AutoPlayer {
    fn next_move(&mut self, board: &Board) -> anyhow::Result<Point> {
        Ok(self.next_automated_move(board)?)
    }

    fn reject(&mut self, p: Point) {
        log::warn!("auto player move {p} rejected, dropping cached line");
        self.pending.clear();
    }
}

/// Reads `row col` pairs from a text stream.
pub struct InteractivePlayer<R, W> {
    input: R,
    output: W,
}

impl InteractivePlayer<io::StdinLock<'static>, io::Stdout> {
    /// A player on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Parse a `row col` line into a valid point.
    fn parse_move(line: &str) -> Result<Point, &'static str> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [r, c] = parts.as_slice() else {
            return Err("Invalid input format. Please enter row and column separated by a space.");
        };
        let (Ok(r), Ok(c)) = (r.parse::<i8>(), c.parse::<i8>()) else {
            return Err("Invalid input. Please enter two numbers (e.g., '5 4').");
        };
        let p = Point::new(r, c);
        if !p.is_valid() {
            return Err("Invalid position: coordinates out of bounds.");
        }
        Ok(p)
    }
}

impl<R: BufRead, W: Write> Player for InteractivePlayer<R, W> {
    fn next_move(&mut self, _board: &Board) -> anyhow::Result<Point> {
        writeln!(self.output, "Please enter your move (r c):")?;
        loop {
            self.output.flush()?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read move")?;
            if read == 0 {
                bail!("input closed before a move was entered");
            }
            match Self::parse_move(&line) {
                Ok(p) => return Ok(p),
                Err(msg) => writeln!(self.output, "{msg}")?,
            }
        }
    }

    fn reject(&mut self, p: Point) {
        if let Err(err) = writeln!(
            self.output,
            "Invalid move: {p} (blocked, the cat, or out of bounds). Try again."
        ) {
            log::warn!("failed to report rejected move {p}: {err}");
        }
    }
}
