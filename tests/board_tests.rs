//! Board tests - merging landed pieces and clearing rows

use naut_tetris::core::board::{clear_row, full_rows};
use naut_tetris::core::{update_blocks, Block, DropBlock};
use naut_tetris::types::{Coordinate, Matrix, PieceKind};

fn row(y: i32, width: i32, skip: &[i32]) -> Vec<Block> {
    (0..width)
        .filter(|x| !skip.contains(x))
        .map(|x| Block::new(x, y, 2))
        .collect()
}

#[test]
fn test_merge_without_piece_keeps_board() {
    let matrix = Matrix::new(6, 8);
    let blocks = row(7, 6, &[0]);
    let result = update_blocks(&blocks, None, matrix);
    assert_eq!(result.lines(), 0);
    assert_eq!(result.cleared, blocks);
}

#[test]
fn test_single_row_clear_shifts_only_blocks_above() {
    let matrix = Matrix::new(6, 10);
    let mut blocks = row(8, 6, &[5]);
    blocks.push(Block::new(1, 9, 4)); // below the cleared row
    blocks.push(Block::new(2, 5, 4)); // above
    blocks.push(Block::new(3, 7, 4)); // directly above

    // Upright I in column 5 spanning rows 5..=8 completes row 8 only.
    let piece = DropBlock::new(PieceKind::I, Coordinate::new(5, 6)).rotate();
    assert!(piece.is_valid_in_matrix(&blocks, matrix));

    let result = update_blocks(&blocks, Some(&piece), matrix);
    assert_eq!(result.lines(), 1);
    assert_eq!(result.cleared_rows, vec![8]);

    let cleared = &result.cleared;
    assert!(cleared.contains(&Block::new(1, 9, 4)));
    assert!(cleared.contains(&Block::new(2, 6, 4)));
    assert!(cleared.contains(&Block::new(3, 8, 4)));
    // The three I cells above row 8 move down with everything else.
    for y in [6, 7, 8] {
        assert!(cleared.contains(&Block::new(5, y, PieceKind::I.color_index())));
    }
    assert_eq!(cleared.len(), 6);
}

#[test]
fn test_clearing_view_removes_rows_without_shifting() {
    let matrix = Matrix::new(4, 6);
    let mut blocks = row(5, 4, &[]);
    blocks.push(Block::new(0, 4, 1));
    let result = update_blocks(&blocks, None, matrix);

    assert_eq!(result.pre_clear.len(), 5);
    assert_eq!(result.clearing, vec![Block::new(0, 4, 1)]);
    assert_eq!(result.cleared, vec![Block::new(0, 5, 1)]);
}

#[test]
fn test_four_rows_clear_at_once() {
    let matrix = Matrix::new(5, 8);
    let mut blocks = Vec::new();
    for y in 4..8 {
        blocks.extend(row(y, 5, &[2]));
    }
    blocks.push(Block::new(0, 3, 6));

    let piece = DropBlock::new(PieceKind::I, Coordinate::new(2, 5)).rotate();
    let result = update_blocks(&blocks, Some(&piece), matrix);
    assert_eq!(result.lines(), 4);
    assert_eq!(result.cleared, vec![Block::new(0, 7, 6)]);
}

#[test]
fn test_rows_above_visible_top_count_too() {
    let matrix = Matrix::new(4, 4);
    let blocks = row(-1, 4, &[]);
    assert_eq!(full_rows(&blocks, matrix), vec![-1]);
}

#[test]
fn test_clear_row_leaves_other_rows() {
    let blocks = vec![Block::new(0, 0, 1), Block::new(0, 1, 1), Block::new(0, 2, 1)];
    assert_eq!(
        clear_row(&blocks, 1),
        vec![Block::new(0, 1, 1), Block::new(0, 2, 1)]
    );
}
