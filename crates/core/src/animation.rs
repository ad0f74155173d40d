//! Animation module - timed multi-frame transitions as finite-state timers
//!
//! An [`Animation`] is a queue of precomputed [`Frame`]s. The owner publishes
//! the first frame immediately, then feeds elapsed time through
//! [`Animation::poll`]; each frame is released once the previous frame's hold
//! time has run out. The last frame is the settled state and has no hold.
//! Dropping an animation abandons the remaining frames; whatever was last
//! published stays a complete snapshot.

use std::collections::VecDeque;

use crate::block::Block;
use crate::board::LineClear;
use crate::types::{
    GameStatus, SettingChange, SoundEvent, LINE_CLEAR_FLASHES, LINE_CLEAR_FRAME_MS,
    SCREEN_CLEAR_FRAME_MS,
};
use crate::view_state::ViewState;

/// Palette index used for the wipe rows
pub const WIPE_COLOR: u8 = 0;

/// One published step of an animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub state: ViewState,
    /// How long this frame stays on screen before the next one
    pub hold_ms: u64,
    /// Sound to play when the frame is shown
    pub sound: Option<SoundEvent>,
}

impl Frame {
    pub fn new(state: ViewState, hold_ms: u64) -> Self {
        Self {
            state,
            hold_ms,
            sound: None,
        }
    }

    pub fn with_sound(mut self, sound: Option<SoundEvent>) -> Self {
        self.sound = sound;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    LineClear,
    ScreenClear,
}

/// Frames still waiting to be shown
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    frames: VecDeque<Frame>,
    remaining_ms: u64,
}

impl Animation {
    /// Split `frames` into the frame to show now and the pending animation.
    ///
    /// Returns `None` for the animation when only one frame was given.
    pub fn start(kind: AnimationKind, frames: Vec<Frame>) -> (Option<Frame>, Option<Animation>) {
        let mut frames: VecDeque<Frame> = frames.into();
        let Some(first) = frames.pop_front() else {
            return (None, None);
        };
        if frames.is_empty() {
            return (Some(first), None);
        }
        let animation = Animation {
            kind,
            remaining_ms: first.hold_ms,
            frames,
        };
        (Some(first), Some(animation))
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Time until the next frame is due
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pop the next due frame, spending time from `budget`
    pub fn poll(&mut self, budget: &mut u64) -> Option<Frame> {
        if self.frames.is_empty() {
            return None;
        }
        if self.remaining_ms > *budget {
            self.remaining_ms -= *budget;
            *budget = 0;
            return None;
        }
        *budget -= self.remaining_ms;
        let frame = self.frames.pop_front()?;
        self.remaining_ms = frame.hold_ms;
        Some(frame)
    }

    /// Apply a settings change to every pending frame
    pub fn apply_setting(&mut self, change: SettingChange) {
        for frame in self.frames.iter_mut() {
            frame.state.settings.apply(change);
        }
    }
}

/// Flash frames for a line clear followed by the settled state.
///
/// `before` is the snapshot that was current when the piece landed; its
/// score and lines stay on screen until `settled` is shown.
pub fn line_clear_frames(before: &ViewState, clear: &LineClear, settled: ViewState) -> Vec<Frame> {
    let base = ViewState {
        drop_block: None,
        ghost_block: None,
        status: GameStatus::LineClearing,
        ..before.clone()
    };
    let with_blocks = |blocks: &Vec<Block>| ViewState {
        blocks: blocks.clone(),
        ..base.clone()
    };

    let mut frames = Vec::with_capacity(LINE_CLEAR_FLASHES * 2 + 1);
    for i in 0..LINE_CLEAR_FLASHES {
        let sound = if i == 0 { Some(SoundEvent::Clean) } else { None };
        frames.push(Frame::new(with_blocks(&clear.clearing), LINE_CLEAR_FRAME_MS).with_sound(sound));
        frames.push(Frame::new(with_blocks(&clear.pre_clear), LINE_CLEAR_FRAME_MS));
    }
    frames.push(Frame::new(settled, 0));
    frames
}

/// Wipe frames over `base` followed by `terminal`.
///
/// Rows fill from the floor up, one per frame, starting with none filled;
/// then they drain from the top down until the board is empty.
pub fn screen_clear_frames(
    base: &ViewState,
    start_sound: Option<SoundEvent>,
    terminal: ViewState,
    terminal_sound: Option<SoundEvent>,
) -> Vec<Frame> {
    let height = base.matrix.height;
    let base = base.clone().with_status(GameStatus::ScreenClearing);

    let mut frames = Vec::with_capacity((height as usize + 1) * 2 + 1);
    for y in (0..=height).rev() {
        let mut blocks = base.blocks.clone();
        blocks.extend(filled_rows(base.matrix.width, y, height));
        frames.push(Frame::new(
            ViewState {
                blocks,
                ..base.clone()
            },
            SCREEN_CLEAR_FRAME_MS,
        ));
    }
    for y in 0..=height {
        frames.push(Frame::new(
            ViewState {
                blocks: filled_rows(base.matrix.width, y, height),
                drop_block: None,
                ghost_block: None,
                ..base.clone()
            },
            SCREEN_CLEAR_FRAME_MS,
        ));
    }
    if let Some(first) = frames.first_mut() {
        first.sound = start_sound;
    }
    frames.push(Frame::new(terminal, 0).with_sound(terminal_sound));
    frames
}

/// Solid rows `from..to`
fn filled_rows(width: i32, from: i32, to: i32) -> Vec<Block> {
    (from..to)
        .flat_map(|y| (0..width).map(move |x| Block::new(x, y, WIPE_COLOR)))
        .collect()
}
