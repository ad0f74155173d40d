//! ViewState - the immutable snapshot handed to renderers
//!
//! Every accepted command replaces the current `ViewState` wholesale.
//! Derived values (level, next piece, status flags) are computed accessors
//! and never stored.

use std::collections::VecDeque;

use crate::block::{Block, DropBlock};
use crate::scoring::calculate_level;
use crate::types::{GameStatus, Matrix, SettingChange, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub blocks: Vec<Block>,
    pub drop_block: Option<DropBlock>,
    pub ghost_block: Option<DropBlock>,
    /// Upcoming pieces, front first
    pub reserve: VecDeque<DropBlock>,
    pub matrix: Matrix,
    pub status: GameStatus,
    pub score: u32,
    pub lines: u32,
    pub settings: Settings,
    /// Silences sounds during the game-over wipe without touching `settings.mute`
    pub sound_suppressed: bool,
}

impl ViewState {
    /// Fresh onboarding state; the board takes its size from `settings`
    pub fn new(settings: Settings) -> Self {
        Self::fresh(settings, GameStatus::Onboard)
    }

    /// Empty board, zero score, nothing queued
    pub fn fresh(settings: Settings, status: GameStatus) -> Self {
        let settings = settings.clamped();
        Self {
            blocks: Vec::new(),
            drop_block: None,
            ghost_block: None,
            reserve: VecDeque::new(),
            matrix: settings.matrix(),
            status,
            score: 0,
            lines: 0,
            settings,
            sound_suppressed: false,
        }
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn next_block(&self) -> Option<&DropBlock> {
        self.reserve.front()
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_muted(&self) -> bool {
        self.settings.mute || self.sound_suppressed
    }

    /// Ghost to draw, honouring the ghost toggle
    pub fn visible_ghost(&self) -> Option<&DropBlock> {
        if self.settings.use_ghost_block {
            self.ghost_block.as_ref()
        } else {
            None
        }
    }

    /// Replace the drop block and recompute its ghost
    pub fn with_drop_block(mut self, drop_block: Option<DropBlock>) -> Self {
        self.ghost_block = drop_block.map(|d| d.fallen(&self.blocks, self.matrix));
        self.drop_block = drop_block;
        self
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = status;
        self
    }

    /// Copy with a settings change applied
    pub fn with_setting(mut self, change: SettingChange) -> Self {
        self.settings.apply(change);
        self
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
