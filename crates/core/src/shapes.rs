//! Shapes module - rotation masks and the fixed shape table
//!
//! Every piece kind owns an ordered list of rotation states. A rotation state
//! is a small rectangular bitmask (at most 4x4) written as rows of `0`/`1`
//! symbols, top row first. The built-in table is parsed in `const` context, so
//! a malformed mask in the table fails compilation instead of surfacing at
//! runtime.

use std::fmt;

use serde::Serialize;

use crate::types::{Color, ShapeKind};

/// Largest mask side supported by [`RotationState`]
pub const MAX_MASK_SIDE: usize = 4;

/// Reasons a mask description is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    /// No rows, or a first row with no symbols
    Empty,
    /// More than [`MAX_MASK_SIDE`] rows or columns
    TooLarge,
    /// Row `row` has a different length than the first row
    Ragged { row: usize },
    /// A symbol other than `0` or `1`
    InvalidSymbol { row: usize, column: usize, symbol: u8 },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Empty => write!(f, "rotation mask is empty"),
            MaskError::TooLarge => {
                write!(f, "rotation mask exceeds {0}x{0}", MAX_MASK_SIDE)
            }
            MaskError::Ragged { row } => {
                write!(f, "rotation mask row {} differs in length from row 0", row)
            }
            MaskError::InvalidSymbol {
                row,
                column,
                symbol,
            } => write!(
                f,
                "only 0s and 1s are accepted in rotation masks, found {:?} at ({}, {})",
                *symbol as char, row, column
            ),
        }
    }
}

impl std::error::Error for MaskError {}

/// One orientation of a piece: which cells of its bounding box are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RotationState {
    rows: u8,
    columns: u8,
    /// Row-major bits, `row * MAX_MASK_SIDE + column`
    bits: u16,
}

impl RotationState {
    /// Parse a mask, reporting the first problem found
    pub const fn try_from_rows(rows: &[&str]) -> Result<Self, MaskError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(MaskError::Empty);
        }
        let columns = rows[0].len();
        if rows.len() > MAX_MASK_SIDE || columns > MAX_MASK_SIDE {
            return Err(MaskError::TooLarge);
        }

        let mut bits: u16 = 0;
        let mut row = 0;
        while row < rows.len() {
            let line = rows[row].as_bytes();
            if line.len() != columns {
                return Err(MaskError::Ragged { row });
            }
            let mut column = 0;
            while column < columns {
                match line[column] {
                    b'0' => {}
                    b'1' => bits |= 1 << (row * MAX_MASK_SIDE + column),
                    symbol => {
                        return Err(MaskError::InvalidSymbol {
                            row,
                            column,
                            symbol,
                        })
                    }
                }
                column += 1;
            }
            row += 1;
        }

        Ok(Self {
            rows: rows.len() as u8,
            columns: columns as u8,
            bits,
        })
    }

    /// Build a mask from a table literal
    ///
    /// Panics on a malformed mask; in a `const` item that panic is a compile
    /// error.
    pub const fn from_rows(rows: &[&str]) -> Self {
        match Self::try_from_rows(rows) {
            Ok(state) => state,
            Err(_) => panic!("malformed rotation mask: only 0s and 1s are accepted"),
        }
    }

    /// Parse a mask supplied at runtime
    ///
    /// # Examples
    ///
    /// ```
    /// use wahoo_core::shapes::{MaskError, RotationState};
    ///
    /// let state = RotationState::parse(&["010", "111"]).unwrap();
    /// assert_eq!((state.width(), state.height()), (3, 2));
    ///
    /// assert!(matches!(
    ///     RotationState::parse(&["01x"]),
    ///     Err(MaskError::InvalidSymbol { column: 2, .. })
    /// ));
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self, MaskError> {
        Self::try_from_rows(rows)
    }

    pub const fn width(&self) -> i32 {
        self.columns as i32
    }

    pub const fn height(&self) -> i32 {
        self.rows as i32
    }

    /// Whether the mask is set at (row, col); false outside the mask
    pub fn cell_filled(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row >= self.height() || col >= self.width() {
            return false;
        }
        self.bits & (1 << (row as usize * MAX_MASK_SIDE + col as usize)) != 0
    }

    /// Mask-relative (row, col) of every filled cell, top row first
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height())
            .flat_map(move |row| (0..self.width()).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.cell_filled(row, col))
    }

    pub fn filled_count(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl fmt::Display for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                f.write_str("/")?;
            }
            for col in 0..self.width() {
                f.write_str(if self.cell_filled(row, col) { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

/// Fixed geometry of one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    pub color: Color,
    pub rotations: &'static [RotationState],
}

const T_ROTATIONS: [RotationState; 4] = [
    RotationState::from_rows(&["010", "111"]),
    RotationState::from_rows(&["10", "11", "10"]),
    RotationState::from_rows(&["111", "010"]),
    RotationState::from_rows(&["01", "11", "01"]),
];

const CROOK1_ROTATIONS: [RotationState; 2] = [
    RotationState::from_rows(&["110", "011"]),
    RotationState::from_rows(&["01", "11", "10"]),
];

const CROOK2_ROTATIONS: [RotationState; 2] = [
    RotationState::from_rows(&["011", "110"]),
    RotationState::from_rows(&["10", "11", "01"]),
];

const L1_ROTATIONS: [RotationState; 4] = [
    RotationState::from_rows(&["001", "111"]),
    RotationState::from_rows(&["10", "10", "11"]),
    RotationState::from_rows(&["111", "100"]),
    RotationState::from_rows(&["11", "01", "01"]),
];

const L2_ROTATIONS: [RotationState; 4] = [
    RotationState::from_rows(&["100", "111"]),
    RotationState::from_rows(&["11", "10", "10"]),
    RotationState::from_rows(&["111", "001"]),
    RotationState::from_rows(&["01", "01", "11"]),
];

const LINE_ROTATIONS: [RotationState; 2] = [
    RotationState::from_rows(&["1111"]),
    RotationState::from_rows(&["1", "1", "1", "1"]),
];

const BOX_ROTATIONS: [RotationState; 1] = [RotationState::from_rows(&["11", "11"])];

/// Shape table indexed by [`ShapeKind::index`]
pub static SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        kind: ShapeKind::T,
        color: Color::Red,
        rotations: &T_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::Crook1,
        color: Color::Green,
        rotations: &CROOK1_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::Crook2,
        color: Color::Navy,
        rotations: &CROOK2_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::L1,
        color: Color::Blue,
        rotations: &L1_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::L2,
        color: Color::Aqua,
        rotations: &L2_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::Line,
        color: Color::Purple,
        rotations: &LINE_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::Box,
        color: Color::Lime,
        rotations: &BOX_ROTATIONS,
    },
];

/// Look up the geometry for a kind
pub fn shape(kind: ShapeKind) -> &'static ShapeDef {
    &SHAPES[kind.index()]
}

/// Rotation states for a kind, in rotate-right order
pub fn rotations(kind: ShapeKind) -> &'static [RotationState] {
    shape(kind).rotations
}
