//! Geometry module - pixel layout of the board inside a client area
//!
//! Cells are square and separated by `padding` pixels, including a padding
//! border around the whole board. The board is centred in the client area.
//! Pure integer arithmetic, so hosts get identical layouts everywhere.

use serde::{Deserialize, Serialize};

/// Client area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Side of one square cell, clamped at 0
fn cell_side(size: Size, rows: i32, columns: i32, padding: i32) -> i32 {
    let cx = (size.width - padding * (columns + 1)) / columns;
    let cy = (size.height - padding * (rows + 1)) / rows;
    cx.min(cy).max(0)
}

/// Top-left corner of the padded board area
fn board_origin(size: Size, rows: i32, columns: i32, padding: i32, side: i32) -> (i32, i32) {
    let total_x = (side + padding) * columns + padding;
    let total_y = (side + padding) * rows + padding;
    ((size.width - total_x) / 2, (size.height - total_y) / 2)
}

/// Rectangle of cell (row, col) for a `rows x columns` board drawn in `size`
///
/// Returns an empty rect when the board has no rows or columns. Positions
/// outside the board are still laid out on the same lattice.
pub fn cell_rect(size: Size, rows: i32, columns: i32, padding: i32, row: i32, col: i32) -> Rect {
    if rows <= 0 || columns <= 0 {
        return Rect::default();
    }
    let side = cell_side(size, rows, columns, padding);
    let (left, top) = board_origin(size, rows, columns, padding, side);
    Rect::new(
        left + padding + (side + padding) * col,
        top + padding + (side + padding) * row,
        side,
        side,
    )
}

/// Outer rectangle of the whole board including its padding border
pub fn board_rect(size: Size, rows: i32, columns: i32, padding: i32) -> Rect {
    if rows <= 0 || columns <= 0 {
        return Rect::default();
    }
    let side = cell_side(size, rows, columns, padding);
    let (left, top) = board_origin(size, rows, columns, padding, side);
    Rect::new(
        left,
        top,
        (side + padding) * columns + padding,
        (side + padding) * rows + padding,
    )
}
