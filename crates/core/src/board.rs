//! Board module - settled cells, the active piece and line clearing
//!
//! The board owns the grid and the one active piece. When the piece can no
//! longer fall it is acquired into the grid, completed rows inside the
//! piece's span are removed, and a new random piece is spawned centred at the
//! top. The board is the only writer of the grid; collaborators read it
//! through [`Board::snapshot`] or the query methods.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::RandomSource;
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::{Cell, Color, ShapeKind};

/// Result of one board step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No active piece (the board has not been reset yet)
    Idle,
    /// The piece fell one row
    Moved,
    /// The piece was acquired into the grid and a new one spawned
    Locked { lines_cleared: u32 },
    /// The piece could not fall from the top row; the game is over
    Over,
    /// The piece was acquired but the next one overlaps settled cells; the
    /// game is over
    ToppedOut { lines_cleared: u32 },
}

#[derive(Debug, Clone)]
pub struct Board<R> {
    grid: Grid,
    current: Option<Piece>,
    rng: R,
    lines_removed: u32,
    is_over: bool,
}

impl<R> Board<R> {
    /// Empty board with no active piece; call [`Board::reset`] to start
    pub fn new(rows: usize, columns: usize, rng: R) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            current: None,
            rng,
            lines_removed: 0,
            is_over: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn lines_removed(&self) -> u32 {
        self.lines_removed
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Filled if out of bounds or settled
    pub fn cell_filled(&self, row: i32, col: i32) -> bool {
        self.grid.cell_filled(row, col)
    }

    pub fn cell_color(&self, row: i32, col: i32) -> Option<Color> {
        self.grid.color(row, col)
    }

    /// Write a settled cell directly; returns false if out of bounds
    pub fn fill_cell(&mut self, row: i32, col: i32, color: Color) -> bool {
        self.grid.set(row, col, Some(color))
    }

    pub fn clear_cell(&mut self, row: i32, col: i32) -> bool {
        self.grid.set(row, col, None)
    }

    pub fn filled_count(&self) -> usize {
        self.grid.filled_count()
    }

    /// Change dimensions; the grid comes back empty and the piece is dropped
    pub fn resize(&mut self, rows: usize, columns: usize) {
        self.grid.resize(rows, columns);
        self.current = None;
    }

    /// New piece of a given kind at rotation 0, shifted right towards the
    /// centre. Shifting stops at the first blocked step.
    pub fn spawn_shape(&self, kind: ShapeKind) -> Piece {
        let mut piece = Piece::new(kind);
        let centred = (self.grid.columns() as i32 - piece.width()) / 2;
        for _ in 0..centred {
            if !piece.right(&self.grid) {
                break;
            }
        }
        piece
    }

    /// Replace the active piece; rejected if it overlaps settled cells or
    /// leaves the grid
    pub fn set_current(&mut self, piece: Piece) -> bool {
        if piece.collides(&self.grid, piece.row(), piece.column()) {
            return false;
        }
        self.current = Some(piece);
        true
    }

    /// Write the active piece's color into every cell it covers
    pub fn acquire_current_shape(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let color = piece.color();
        for (row, col) in piece.cells() {
            self.grid.set(row, col, Some(color));
        }
    }

    /// Remove completed rows among `[top_row, top_row + height)`
    ///
    /// After a row is removed everything above it has shifted down into the
    /// same index, so that index is examined again before moving on.
    pub fn check_fills(&mut self, top_row: i32, height: i32) -> u32 {
        let mut filled_lines = 0;
        let start = top_row.max(0);
        let end = top_row
            .saturating_add(height)
            .min(self.grid.rows() as i32);

        let mut row = start;
        while row < end {
            if self.grid.is_row_full(row) {
                filled_lines += 1;
                self.move_lines(row);
                // Same index again: the row above now sits here
                continue;
            }
            row += 1;
        }

        filled_lines
    }

    /// Drop every row above `bottom_row` by one, overwriting `bottom_row`,
    /// and leave an empty row at the top
    pub fn move_lines(&mut self, bottom_row: i32) {
        if bottom_row < 0 || bottom_row as usize >= self.grid.rows() {
            return;
        }
        for row in (1..=bottom_row as usize).rev() {
            self.grid.copy_row(row - 1, row);
        }
        self.grid.clear_row(0);
    }

    pub fn left(&mut self) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.left(&self.grid),
            None => false,
        }
    }

    pub fn right(&mut self) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.right(&self.grid),
            None => false,
        }
    }

    pub fn down(&mut self) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.down(&self.grid),
            None => false,
        }
    }

    pub fn rotate_left(&mut self) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.rotate_left(&self.grid),
            None => false,
        }
    }

    pub fn rotate_right(&mut self) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.rotate_right(&self.grid),
            None => false,
        }
    }

    /// Move down until blocked; true if the piece moved at all
    ///
    /// Bounded by the row count since every successful step moves one row.
    pub fn drop_piece(&mut self) -> bool {
        let mut moved = false;
        while self.down() {
            moved = true;
        }
        moved
    }

    /// Fill `out` without reallocating its cell buffer when sizes match
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.grid.rows();
        out.columns = self.grid.columns();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.current.map(ActiveSnapshot::from);
        out.lines_removed = self.lines_removed;
        out.is_over = self.is_over;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Settled cell at (row, col), `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.grid.get(row, col)
    }
}

impl<R: RandomSource> Board<R> {
    /// Clear the grid and counters, then spawn the first piece
    pub fn reset(&mut self) {
        self.grid.clear();
        self.lines_removed = 0;
        self.is_over = false;
        self.current = None;
        let piece = self.random_shape();
        if !self.install(piece) {
            log::debug!("first piece {:?} does not fit", piece.kind());
            return;
        }
        log::debug!(
            "board reset {}x{}, first piece {:?}",
            self.grid.rows(),
            self.grid.columns(),
            piece.kind()
        );
    }

    /// Make `piece` active, or end the game if it overlaps the grid
    fn install(&mut self, piece: Piece) -> bool {
        if piece.collides(&self.grid, piece.row(), piece.column()) {
            self.is_over = true;
            self.current = None;
            return false;
        }
        self.current = Some(piece);
        true
    }

    /// New piece of a random kind, centred horizontally
    pub fn random_shape(&mut self) -> Piece {
        let kind = self.rng.next_kind();
        self.spawn_shape(kind)
    }

    /// One tick of board work
    pub fn step(&mut self) -> StepOutcome {
        if self.is_over {
            return StepOutcome::Over;
        }
        let Some(piece) = self.current.as_mut() else {
            return StepOutcome::Idle;
        };
        if piece.down(&self.grid) {
            return StepOutcome::Moved;
        }

        let piece = *piece;
        if piece.row() == 0 {
            self.is_over = true;
            log::debug!("{:?} blocked on the top row", piece.kind());
            return StepOutcome::Over;
        }

        self.acquire_current_shape();
        let lines_cleared = self.check_fills(piece.row(), piece.height());
        self.lines_removed += lines_cleared;

        log::debug!(
            "{:?} locked at row {} col {}, {} line(s) cleared",
            piece.kind(),
            piece.row(),
            piece.column(),
            lines_cleared
        );

        let next = self.random_shape();
        if !self.install(next) {
            log::debug!("no room for {:?} at column {}", next.kind(), next.column());
            return StepOutcome::ToppedOut { lines_cleared };
        }
        StepOutcome::Locked { lines_cleared }
    }
}
