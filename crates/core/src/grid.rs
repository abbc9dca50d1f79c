//! Grid module - the settled cells of the board
//!
//! A `rows x columns` grid stored as a flat row-major `Vec` of cells.
//! Coordinates are (row, col) with row 0 at the top. Queries take signed
//! coordinates so callers can probe just past an edge; anything outside the
//! grid reads as filled, which makes the edges behave as walls and a floor.

use crate::types::{Cell, Color};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.columns {
            return None;
        }
        Some(row as usize * self.columns + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get cell at (row, col), `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Out-of-bounds positions count as filled
    pub fn cell_filled(&self, row: i32, col: i32) -> bool {
        !matches!(self.get(row, col), Some(None))
    }

    /// Color at (row, col), `None` if empty or out of bounds
    pub fn color(&self, row: i32, col: i32) -> Option<Color> {
        self.get(row, col).flatten()
    }

    /// Whether every column of an in-bounds row is filled
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < 0 || row as usize >= self.rows {
            return false;
        }
        self.row_slice(row as usize).iter().all(|cell| cell.is_some())
    }

    fn row_slice(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Copy row `src` over row `dst`
    pub(crate) fn copy_row(&mut self, src: usize, dst: usize) {
        let width = self.columns;
        self.cells
            .copy_within(src * width..src * width + width, dst * width);
    }

    /// Empty every cell of a row
    pub(crate) fn clear_row(&mut self, row: usize) {
        let start = row * self.columns;
        for cell in &mut self.cells[start..start + self.columns] {
            *cell = None;
        }
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Replace the grid with an empty one of a different size
    pub fn resize(&mut self, rows: usize, columns: usize) {
        *self = Self::new(rows, columns);
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
