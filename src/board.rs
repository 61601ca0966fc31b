//! Sliding-tile board.
//!
//! Tiles are numbered `0..n*n` in row-major order of the solved picture; the
//! last id is the blank. Scrambles are produced by random legal moves from
//! the solved state, so every shuffled board is solvable.

use crate::{constants::SHUFFLE_MOVES_PER_CELL, Error, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Board cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell
    #[must_use]
    pub const fn manhattan(&self, other: &Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// N x N sliding puzzle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid_size: usize,
    grid: Vec<Vec<usize>>,
    blank: GridPos,
}

impl Board {
    /// Create a solved board of `grid_size` x `grid_size` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if `grid_size` is smaller than 2
    pub fn new(grid_size: usize) -> Result<Self> {
        if grid_size < 2 {
            return Err(Error::InvalidInput(format!(
                "Grid size must be at least 2, got {grid_size}"
            )));
        }

        let grid = (0..grid_size)
            .map(|row| (0..grid_size).map(|col| row * grid_size + col).collect())
            .collect();

        Ok(Self {
            grid_size,
            grid,
            blank: GridPos::new(grid_size - 1, grid_size - 1),
        })
    }

    /// Create a board and scramble it
    ///
    /// # Errors
    ///
    /// Returns an error if `grid_size` is smaller than 2
    pub fn shuffled<R: Rng + ?Sized>(grid_size: usize, moves_per_cell: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::new(grid_size)?;
        board.shuffle_with(moves_per_cell, rng);
        Ok(board)
    }

    #[must_use]
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Id of the blank tile
    #[must_use]
    pub const fn blank_id(&self) -> usize {
        self.grid_size * self.grid_size - 1
    }

    #[must_use]
    pub const fn blank_position(&self) -> GridPos {
        self.blank
    }

    /// Rows of tile ids
    #[must_use]
    pub fn grid(&self) -> &[Vec<usize>] {
        &self.grid
    }

    /// Tile id at a cell, `None` outside the board
    #[must_use]
    pub fn tile_at(&self, pos: GridPos) -> Option<usize> {
        self.grid.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    /// Cells adjacent to the blank, in up/down/left/right order
    #[must_use]
    pub fn legal_moves(&self) -> Vec<GridPos> {
        let GridPos { row, col } = self.blank;
        let mut moves = Vec::with_capacity(4);
        if row > 0 {
            moves.push(GridPos::new(row - 1, col));
        }
        if row + 1 < self.grid_size {
            moves.push(GridPos::new(row + 1, col));
        }
        if col > 0 {
            moves.push(GridPos::new(row, col - 1));
        }
        if col + 1 < self.grid_size {
            moves.push(GridPos::new(row, col + 1));
        }
        moves
    }

    /// True if `target` is next to the blank
    #[must_use]
    pub fn can_move(&self, target: GridPos) -> bool {
        target.row < self.grid_size && target.col < self.grid_size && target.manhattan(&self.blank) == 1
    }

    /// Slide the tile at `target` into the blank. Illegal targets are ignored.
    pub fn move_tile(&mut self, target: GridPos) -> bool {
        if !self.can_move(target) {
            return false;
        }
        self.swap_with_blank(target);
        true
    }

    /// Scramble with the default `20 * n * n` random legal moves
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<GridPos> {
        self.shuffle_with(SHUFFLE_MOVES_PER_CELL, rng)
    }

    /// Scramble with `moves_per_cell * n * n` random legal moves.
    ///
    /// Returns the cells moved, in order; replaying the blank's earlier
    /// positions in reverse undoes the scramble.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, moves_per_cell: usize, rng: &mut R) -> Vec<GridPos> {
        let count = moves_per_cell * self.grid_size * self.grid_size;
        let mut history = Vec::with_capacity(count);

        for _ in 0..count {
            let moves = self.legal_moves();
            if let Some(&target) = moves.choose(rng) {
                self.swap_with_blank(target);
                history.push(target);
            }
        }

        debug!(
            "Shuffled {}x{} board with {} moves, solved: {}",
            self.grid_size,
            self.grid_size,
            history.len(),
            self.is_solved()
        );
        history
    }

    /// True if every tile is at its home cell
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.grid
            .iter()
            .flatten()
            .enumerate()
            .all(|(index, &tile)| index == tile)
    }

    // Shuffle bypass: callers guarantee adjacency.
    fn swap_with_blank(&mut self, target: GridPos) {
        let blank = self.blank;
        let tile = self.grid[target.row][target.col];
        self.grid[blank.row][blank.col] = tile;
        self.grid[target.row][target.col] = self.blank_id();
        self.blank = target;
    }
}
