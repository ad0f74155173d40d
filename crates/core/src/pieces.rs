//! Pieces module - piece shapes and the classic rotation tables
//!
//! Every shape is four cell offsets relative to a pivot cell at `(0, 0)`.
//! Rotation never multiplies matrices: each orientation is a precomputed
//! table, which keeps the classic asymmetries intact. I, S and Z toggle
//! between two orientations, O and the naut have a single one, and T, J, L
//! turn through four orientations about their pivot.

use crate::types::{Coordinate, PieceKind, Rotation};

/// Offset of a single cell relative to the pivot
pub type CellOffset = (i32, i32);

/// Shape of a piece - 4 cell offsets from the pivot
pub type PieceShape = [CellOffset; 4];

const I_FLAT: PieceShape = [(-2, 0), (-1, 0), (0, 0), (1, 0)];
const I_UPRIGHT: PieceShape = [(0, -1), (0, 0), (0, 1), (0, 2)];

const O_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

// Spawns pointing down, as on the original hardware.
const T_SHAPES: [PieceShape; 4] = [
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    [(0, -1), (-1, 0), (0, 0), (0, 1)],
    [(0, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (0, 0), (1, 0), (0, 1)],
];

const S_FLAT: PieceShape = [(0, 0), (1, 0), (-1, 1), (0, 1)];
const S_UPRIGHT: PieceShape = [(0, -1), (0, 0), (1, 0), (1, 1)];

const Z_FLAT: PieceShape = [(-1, 0), (0, 0), (0, 1), (1, 1)];
const Z_UPRIGHT: PieceShape = [(1, -1), (0, 0), (1, 0), (0, 1)];

const J_SHAPES: [PieceShape; 4] = [
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
    [(0, -1), (0, 0), (-1, 1), (0, 1)],
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (1, -1), (0, 0), (0, 1)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
    [(1, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (0, 0), (0, 1), (1, 1)],
];

/// Hollow diamond around an empty pivot
const NAUT_SHAPE: PieceShape = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Get the cell offsets for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let upright = matches!(rotation, Rotation::East | Rotation::West);
    match kind {
        PieceKind::I if upright => I_UPRIGHT,
        PieceKind::I => I_FLAT,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPES[rotation.index()],
        PieceKind::S if upright => S_UPRIGHT,
        PieceKind::S => S_FLAT,
        PieceKind::Z if upright => Z_UPRIGHT,
        PieceKind::Z => Z_FLAT,
        PieceKind::J => J_SHAPES[rotation.index()],
        PieceKind::L => L_SHAPES[rotation.index()],
        PieceKind::Naut => NAUT_SHAPE,
    }
}

/// Number of distinct orientations a kind cycles through
pub fn orientation_count(kind: PieceKind) -> usize {
    match kind {
        PieceKind::O | PieceKind::Naut => 1,
        PieceKind::I | PieceKind::S | PieceKind::Z => 2,
        PieceKind::T | PieceKind::J | PieceKind::L => 4,
    }
}

/// Absolute cells of a shape placed with its pivot at `origin`
pub fn place_shape(shape: &PieceShape, origin: Coordinate) -> [Coordinate; 4] {
    shape.map(|(dx, dy)| origin.offset(dx, dy))
}

/// Horizontal span `(min_dx, max_dx)` of a shape
pub fn shape_columns(shape: &PieceShape) -> (i32, i32) {
    let min = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
    let max = shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
    (min, max)
}
