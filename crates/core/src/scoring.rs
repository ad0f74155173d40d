//! Scoring module - line clear rewards and level progression
//!
//! Both are pure functions of the cleared line count; level is never stored.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL, SCORE_EVERY_DROP_BLOCK};

/// Reward for clearing `lines` rows at once
///
/// Strictly increasing in `lines` with a disproportionate 4-line reward.
/// Counts above 4 cannot come from one piece and pay the 4-line score.
pub fn calculate_score(lines: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx]
}

/// Total awarded when a piece settles
pub fn settle_score(lines: u32, had_drop_block: bool) -> u32 {
    let bonus = if had_drop_block {
        SCORE_EVERY_DROP_BLOCK
    } else {
        0
    };
    calculate_score(lines) + bonus
}

/// Level derived from total cleared lines, starting at 1 and capped at 10
pub fn calculate_level(total_lines: u32) -> u32 {
    (1 + total_lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}
