//! Board module - merging a landed piece and clearing full rows
//!
//! The board is a plain list of settled [`Block`]s rather than a dense grid,
//! since the matrix size is configurable and pieces may settle partly above
//! the visible top. A row is full when the number of distinct columns
//! occupying it equals the matrix width.

use std::collections::{BTreeMap, BTreeSet};

use crate::block::{Block, DropBlock};
use crate::types::Matrix;

/// The three board views produced by a merge
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Settled blocks plus the landed piece
    pub pre_clear: Vec<Block>,
    /// `pre_clear` with the full rows removed, nothing shifted (flash frame)
    pub clearing: Vec<Block>,
    /// Final board: full rows removed and everything above shifted down
    pub cleared: Vec<Block>,
    /// Indices of the full rows, top to bottom
    pub cleared_rows: Vec<i32>,
}

impl LineClear {
    pub fn lines(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Merge `dropped` into `blocks` and resolve full rows
pub fn update_blocks(blocks: &[Block], dropped: Option<&DropBlock>, matrix: Matrix) -> LineClear {
    let mut pre_clear = blocks.to_vec();
    if let Some(piece) = dropped {
        pre_clear.extend_from_slice(&piece.to_blocks());
    }

    let cleared_rows = full_rows(&pre_clear, matrix);
    if cleared_rows.is_empty() {
        return LineClear {
            clearing: pre_clear.clone(),
            cleared: pre_clear.clone(),
            pre_clear,
            cleared_rows,
        };
    }

    let clearing: Vec<Block> = pre_clear
        .iter()
        .filter(|b| !cleared_rows.contains(&b.location.y))
        .copied()
        .collect();

    // Rows are handled top to bottom; each one drops everything above it by
    // one, so a block above two cleared rows ends up two rows lower.
    let mut cleared = pre_clear.clone();
    for &row in &cleared_rows {
        cleared = clear_row(&cleared, row);
    }

    LineClear {
        pre_clear,
        clearing,
        cleared,
        cleared_rows,
    }
}

/// Remove row `y` and shift every block above it down by one
pub fn clear_row(blocks: &[Block], y: i32) -> Vec<Block> {
    blocks
        .iter()
        .filter(|b| b.location.y != y)
        .map(|b| if b.location.y < y { b.move_by(0, 1) } else { *b })
        .collect()
}

/// Full row indices in ascending order
pub fn full_rows(blocks: &[Block], matrix: Matrix) -> Vec<i32> {
    let mut rows: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
    for b in blocks {
        rows.entry(b.location.y).or_default().insert(b.location.x);
    }
    rows.into_iter()
        .filter(|(_, columns)| columns.len() as i32 == matrix.width)
        .map(|(y, _)| y)
        .collect()
}
