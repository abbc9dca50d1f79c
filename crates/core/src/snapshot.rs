use serde::Serialize;

use crate::piece::Piece;
use crate::shapes::RotationState;
use crate::types::{Cell, Color, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub row: i32,
    pub column: i32,
    pub rotation: usize,
    pub mask: RotationState,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            row: value.row(),
            column: value.column(),
            rotation: value.rotation(),
            mask: *value.state(),
        }
    }
}

impl ActiveSnapshot {
    /// Absolute grid (row, col) of every filled cell of the piece
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask
            .filled_cells()
            .map(move |(r, c)| (self.row + r, self.column + c))
    }
}

/// Read-only picture of a board handed to the redraw sink
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    /// Settled cells, row-major
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub lines_removed: u32,
    pub is_over: bool,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.columns = 0;
        self.cells.clear();
        self.active = None;
        self.lines_removed = 0;
        self.is_over = false;
    }

    /// Settled cell at (row, col); `None` when empty or out of bounds
    pub fn settled(&self, row: i32, col: i32) -> Cell {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.columns {
            return None;
        }
        self.cells[row as usize * self.columns + col as usize]
    }

    /// Color to paint at (row, col): the active piece over the settled cells
    pub fn color_at(&self, row: i32, col: i32) -> Option<Color> {
        if let Some(active) = &self.active {
            if active.mask.cell_filled(row - active.row, col - active.column) {
                return Some(active.color);
            }
        }
        self.settled(row, col)
    }
}
