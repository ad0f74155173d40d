//! Block module - settled cells and the falling piece
//!
//! Both types are small `Copy` values. Every transform returns a new value;
//! nothing here validates a move; callers ask [`DropBlock::is_valid_in_matrix`].

use crate::pieces::{get_shape, place_shape, shape_columns, PieceShape};
use crate::types::{Coordinate, Matrix, PieceKind, Rotation};

/// A settled cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub location: Coordinate,
    /// Palette index (0..=7)
    pub color: u8,
}

impl Block {
    pub fn new(x: i32, y: i32, color: u8) -> Self {
        Self {
            location: Coordinate::new(x, y),
            color,
        }
    }

    pub fn move_by(self, dx: i32, dy: i32) -> Self {
        Self {
            location: self.location.offset(dx, dy),
            ..self
        }
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropBlock {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Absolute position of the pivot cell
    pub origin: Coordinate,
}

impl DropBlock {
    pub fn new(kind: PieceKind, origin: Coordinate) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            origin,
        }
    }

    /// Create a piece at the spawn position for `matrix`
    ///
    /// The pivot starts on the middle column, the piece is clamped inside the
    /// side walls and lifted so its lowest cell sits on the top visible row.
    pub fn spawn(kind: PieceKind, matrix: Matrix) -> Self {
        let shape = get_shape(kind, Rotation::North);
        let lowest = shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0);
        Self::new(kind, Coordinate::new(matrix.width / 2, -lowest)).adjust_offset(matrix)
    }

    pub fn color(&self) -> u8 {
        self.kind.color_index()
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cells occupied by the piece
    pub fn location(&self) -> [Coordinate; 4] {
        place_shape(&self.shape(), self.origin)
    }

    pub fn move_by(self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.offset(dx, dy),
            ..self
        }
    }

    /// Next orientation in the fixed clockwise cycle
    pub fn rotate(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    /// Shift horizontally so every cell lies within the matrix width
    pub fn adjust_offset(self, matrix: Matrix) -> Self {
        let (min_dx, max_dx) = shape_columns(&self.shape());
        let left = self.origin.x + min_dx;
        let right = self.origin.x + max_dx;
        let dx = if left < 0 {
            -left
        } else if right > matrix.width - 1 {
            matrix.width - 1 - right
        } else {
            0
        };
        self.move_by(dx, 0)
    }

    /// Shift on both axes so the piece is fully visible in `matrix`
    ///
    /// Used to draw a piece inside a small preview grid.
    pub fn fit_to(self, matrix: Matrix) -> Self {
        let shifted = self.adjust_offset(matrix);
        let cells = shifted.location();
        let top = cells.iter().map(|c| c.y).min().unwrap_or(0);
        let bottom = cells.iter().map(|c| c.y).max().unwrap_or(0);
        let dy = if top < 0 {
            -top
        } else if bottom > matrix.height - 1 {
            matrix.height - 1 - bottom
        } else {
            0
        };
        shifted.move_by(0, dy)
    }

    /// True iff every cell is inside the walls and above the floor and no
    /// cell overlaps a settled block. Cells above the visible top are fine.
    pub fn is_valid_in_matrix(&self, blocks: &[Block], matrix: Matrix) -> bool {
        self.location().iter().all(|&cell| {
            matrix.admits(cell) && !blocks.iter().any(|b| b.location == cell)
        })
    }

    /// Lowest valid resting position straight below the current one
    pub fn fallen(self, blocks: &[Block], matrix: Matrix) -> Self {
        let mut current = self;
        loop {
            let next = current.move_by(0, 1);
            if !next.is_valid_in_matrix(blocks, matrix) {
                return current;
            }
            current = next;
        }
    }

    /// Cells of the piece as settled blocks
    pub fn to_blocks(&self) -> [Block; 4] {
        let color = self.color();
        self.location().map(|location| Block { location, color })
    }
}

/// Validity of an optional drop block; no piece is always valid
pub fn is_valid_option(drop: Option<&DropBlock>, blocks: &[Block], matrix: Matrix) -> bool {
    drop.map_or(true, |d| d.is_valid_in_matrix(blocks, matrix))
}
