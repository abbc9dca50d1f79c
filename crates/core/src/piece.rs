//! Piece module - the falling piece and its movement rules
//!
//! A piece is a kind plus the top-left corner of its bounding box and the
//! index of its current rotation state. Every move or rotation is checked
//! through [`Piece::collides_at`] against the grid, which reports anything
//! outside its bounds as filled. There are no wall kicks: a rotation either
//! fits where the piece stands or is rejected.

use serde::Serialize;

use crate::grid::Grid;
use crate::shapes::{self, RotationState};
use crate::types::{Color, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    kind: ShapeKind,
    row: i32,
    column: i32,
    rotation: usize,
}

impl Piece {
    /// New piece at the top-left corner in its first rotation state
    pub fn new(kind: ShapeKind) -> Self {
        Self::at(kind, 0, 0, 0)
    }

    /// Piece at an explicit position; the rotation index wraps
    pub fn at(kind: ShapeKind, row: i32, column: i32, rotation: usize) -> Self {
        Self {
            kind,
            row,
            column,
            rotation: rotation % shapes::rotations(kind).len(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        shapes::shape(self.kind).color
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn rotation_count(&self) -> usize {
        shapes::rotations(self.kind).len()
    }

    /// Mask of the current rotation state
    pub fn state(&self) -> &'static RotationState {
        &shapes::rotations(self.kind)[self.rotation]
    }

    pub fn width(&self) -> i32 {
        self.state().width()
    }

    pub fn height(&self) -> i32 {
        self.state().height()
    }

    /// Mask lookup in piece-relative coordinates
    pub fn cell_filled(&self, row: i32, col: i32) -> bool {
        self.state().cell_filled(row, col)
    }

    /// Absolute grid (row, col) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.state()
            .filled_cells()
            .map(move |(r, c)| (self.row + r, self.column + c))
    }

    /// Collision test for the current rotation placed at (row, col)
    pub fn collides(&self, grid: &Grid, row: i32, col: i32) -> bool {
        self.collides_at(grid, row, col, self.rotation)
    }

    /// Collision test for an arbitrary rotation placed at (row, col)
    ///
    /// A rotation index the kind does not have always collides.
    pub fn collides_at(&self, grid: &Grid, row: i32, col: i32, rotation: usize) -> bool {
        match shapes::rotations(self.kind).get(rotation) {
            Some(state) => state
                .filled_cells()
                .any(|(r, c)| grid.cell_filled(row + r, col + c)),
            None => true,
        }
    }

    /// Move down one row
    pub fn down(&mut self, grid: &Grid) -> bool {
        if self.row + self.height() + 1 > grid.rows() as i32 {
            return false;
        }
        if self.collides(grid, self.row + 1, self.column) {
            return false;
        }
        self.row += 1;
        true
    }

    /// Move left one column
    pub fn left(&mut self, grid: &Grid) -> bool {
        if self.column - 1 < 0 {
            return false;
        }
        if self.collides(grid, self.row, self.column - 1) {
            return false;
        }
        self.column -= 1;
        true
    }

    /// Move right one column
    pub fn right(&mut self, grid: &Grid) -> bool {
        if self.column + self.width() + 1 > grid.columns() as i32 {
            return false;
        }
        if self.collides(grid, self.row, self.column + 1) {
            return false;
        }
        self.column += 1;
        true
    }

    /// Step to the previous rotation state, wrapping
    pub fn rotate_left(&mut self, grid: &Grid) -> bool {
        let count = self.rotation_count();
        self.rotate_to(grid, (self.rotation + count - 1) % count)
    }

    /// Step to the next rotation state, wrapping
    pub fn rotate_right(&mut self, grid: &Grid) -> bool {
        self.rotate_to(grid, (self.rotation + 1) % self.rotation_count())
    }

    fn rotate_to(&mut self, grid: &Grid, rotation: usize) -> bool {
        if self.collides_at(grid, self.row, self.column, rotation) {
            return false;
        }
        self.rotation = rotation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_starts_at_origin() {
        let piece = Piece::new(ShapeKind::T);
        assert_eq!((piece.row(), piece.column(), piece.rotation()), (0, 0, 0));
        assert_eq!(piece.color(), Color::Red);
    }

    #[test]
    fn test_unknown_rotation_collides() {
        let grid = Grid::new(10, 10);
        let piece = Piece::new(ShapeKind::Box);
        assert!(!piece.collides_at(&grid, 2, 2, 0));
        assert!(piece.collides_at(&grid, 2, 2, 1));
        assert!(piece.collides_at(&grid, 2, 2, usize::MAX));
    }

    #[test]
    fn test_down_stops_at_floor() {
        let grid = Grid::new(4, 4);
        let mut piece = Piece::new(ShapeKind::Box);
        assert!(piece.down(&grid));
        assert!(piece.down(&grid));
        assert!(!piece.down(&grid));
        assert_eq!(piece.row(), 2);
    }

    #[test]
    fn test_down_stops_on_settled_cell() {
        let mut grid = Grid::new(6, 4);
        grid.set(3, 1, Some(Color::Blue));
        let mut piece = Piece::new(ShapeKind::Box);
        assert!(piece.down(&grid));
        assert!(!piece.down(&grid));
        assert_eq!(piece.row(), 1);
    }

    #[test]
    fn test_left_and_right_stop_at_walls() {
        let grid = Grid::new(5, 5);
        let mut piece = Piece::new(ShapeKind::T);
        assert!(!piece.left(&grid));
        assert!(piece.right(&grid));
        assert!(piece.right(&grid));
        assert!(!piece.right(&grid));
        assert_eq!(piece.column(), 2);
    }

    #[test]
    fn test_rotation_wraps_both_ways() {
        let grid = Grid::new(10, 10);
        let mut piece = Piece::at(ShapeKind::T, 2, 2, 0);
        assert!(piece.rotate_left(&grid));
        assert_eq!(piece.rotation(), 3);
        assert!(piece.rotate_right(&grid));
        assert_eq!(piece.rotation(), 0);
    }

    #[test]
    fn test_rotation_rejected_out_of_bounds() {
        // Vertical line in the last column cannot turn horizontal in place
        let grid = Grid::new(10, 4);
        let mut piece = Piece::at(ShapeKind::Line, 0, 3, 1);
        assert!(!piece.rotate_right(&grid));
        assert_eq!(piece.rotation(), 1);
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::at(ShapeKind::Line, 3, 5, 1);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 5), (4, 5), (5, 5), (6, 5)]);
    }
}
