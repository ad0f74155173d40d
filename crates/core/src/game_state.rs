//! Game state module - the command-driven state machine
//!
//! `GameState` owns the current [`ViewState`], the piece generator and the
//! animation in flight. It performs no I/O: every call returns the ordered
//! [`Effect`]s the caller must carry out (publish a snapshot, play a sound,
//! persist a setting). Time only moves through [`GameState::advance`], so the
//! whole machine runs deterministically in tests.
//!
//! Commands whose preconditions do not hold are ignored and produce no
//! effects. While an animation is in flight its status (`LineClearing` or
//! `ScreenClearing`) rejects every gameplay command, so the animation stays
//! the only writer of the board; settings changes are folded into the
//! pending frames.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::animation::{line_clear_frames, screen_clear_frames, Animation, AnimationKind, Frame};
use crate::block::{is_valid_option, DropBlock};
use crate::board::update_blocks;
use crate::rng::PieceGenerator;
use crate::scoring::settle_score;
use crate::types::{Command, Direction, GameStatus, SettingChange, Settings, SoundEvent};
use crate::view_state::ViewState;

/// Side effect requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new current snapshot
    Publish(ViewState),
    Sound { event: SoundEvent, muted: bool },
    /// A setting changed; `settings` holds the values after the change
    Persist {
        change: SettingChange,
        settings: Settings,
    },
}

enum Transition {
    Replace(ViewState, Option<SoundEvent>),
    Animate(AnimationKind, Vec<Frame>),
}

#[derive(Debug, Clone)]
pub struct GameState {
    view: ViewState,
    generator: PieceGenerator,
    animation: Option<Animation>,
}

impl GameState {
    /// Onboarding state with the given settings and RNG seed
    pub fn new(settings: Settings, seed: u32) -> Self {
        Self::from_view(ViewState::new(settings), seed)
    }

    /// Resume from an arbitrary snapshot
    pub fn from_view(view: ViewState, seed: u32) -> Self {
        Self {
            view,
            generator: PieceGenerator::new(seed),
            animation: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> GameStatus {
        self.view.status
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Time until the next animation frame, if one is pending
    pub fn next_frame_in_ms(&self) -> Option<u64> {
        self.animation.as_ref().map(Animation::remaining_ms)
    }

    /// Abandon the animation in flight, keeping the current snapshot
    pub fn cancel_animation(&mut self) {
        if let Some(anim) = self.animation.take() {
            debug!(
                "animation {:?} abandoned with {} frames pending",
                anim.kind(),
                anim.pending_frames()
            );
        }
    }

    /// Release every animation frame that is due after `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut budget = elapsed_ms;
        while let Some(frame) = self.animation.as_mut().and_then(|a| a.poll(&mut budget)) {
            trace!("frame: status={}", frame.state.status.as_str());
            self.show(frame, &mut effects);
        }
        if self.animation.as_ref().is_some_and(Animation::is_finished) {
            self.animation = None;
        }
        effects
    }

    /// Apply a command; an empty result means the command was ignored
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Command::Setting(change) = command {
            self.change_setting(change, &mut effects);
            return effects;
        }

        let Some(transition) = self.transition(command) else {
            trace!(
                "ignored {} in {}",
                command.as_str(),
                self.view.status.as_str()
            );
            return effects;
        };

        debug!("{} in {}", command.as_str(), self.view.status.as_str());
        match transition {
            Transition::Replace(state, sound) => {
                self.show(Frame::new(state, 0).with_sound(sound), &mut effects);
            }
            Transition::Animate(kind, frames) => {
                self.cancel_animation();
                let (first, rest) = Animation::start(kind, frames);
                self.animation = rest;
                if let Some(first) = first {
                    self.show(first, &mut effects);
                }
            }
        }
        effects
    }

    fn show(&mut self, frame: Frame, effects: &mut Vec<Effect>) {
        self.view = frame.state;
        effects.push(Effect::Publish(self.view.clone()));
        if let Some(event) = frame.sound {
            effects.push(Effect::Sound {
                event,
                muted: self.view.is_muted(),
            });
        }
    }

    fn change_setting(&mut self, change: SettingChange, effects: &mut Vec<Effect>) {
        self.view.settings.apply(change);
        if let Some(anim) = self.animation.as_mut() {
            anim.apply_setting(change);
        }
        debug!("setting {:?}", change);
        effects.push(Effect::Publish(self.view.clone()));
        effects.push(Effect::Persist {
            change,
            settings: self.view.settings,
        });
    }

    fn transition(&mut self, command: Command) -> Option<Transition> {
        let status = self.view.status;
        match command {
            Command::Reset => self.reset(),
            Command::Pause if status == GameStatus::Running => Some(Transition::Replace(
                self.view.clone().with_status(GameStatus::Paused),
                None,
            )),
            Command::Resume if status == GameStatus::Paused => Some(Transition::Replace(
                self.view.clone().with_status(GameStatus::Running),
                None,
            )),
            Command::Pause | Command::Resume => None,
            _ if status != GameStatus::Running => None,
            Command::Move(Direction::Up) | Command::Drop => self.hard_drop(),
            Command::Move(direction) => self.move_by(direction),
            Command::Rotate => self.rotate(),
            Command::GameTick => Some(self.tick()),
            Command::Setting(_) => None,
        }
    }

    fn reset(&mut self) -> Option<Transition> {
        let settings = self.view.settings;
        match self.view.status {
            GameStatus::Onboard | GameStatus::GameOver => Some(Transition::Replace(
                ViewState::fresh(settings, GameStatus::Running),
                Some(SoundEvent::Start),
            )),
            GameStatus::ScreenClearing => None,
            GameStatus::Running | GameStatus::Paused | GameStatus::LineClearing => {
                let terminal = ViewState::fresh(settings, GameStatus::Onboard);
                let frames =
                    screen_clear_frames(&self.view, Some(SoundEvent::Start), terminal, None);
                Some(Transition::Animate(AnimationKind::ScreenClear, frames))
            }
        }
    }

    fn move_by(&self, direction: Direction) -> Option<Transition> {
        let (dx, dy) = direction.offset();
        let candidate = self.view.drop_block?.move_by(dx, dy);
        candidate
            .is_valid_in_matrix(&self.view.blocks, self.view.matrix)
            .then(|| {
                Transition::Replace(
                    self.view.clone().with_drop_block(Some(candidate)),
                    Some(SoundEvent::Move),
                )
            })
    }

    fn rotate(&self) -> Option<Transition> {
        let candidate = self.view.drop_block?.rotate().adjust_offset(self.view.matrix);
        candidate
            .is_valid_in_matrix(&self.view.blocks, self.view.matrix)
            .then(|| {
                Transition::Replace(
                    self.view.clone().with_drop_block(Some(candidate)),
                    Some(SoundEvent::Rotate),
                )
            })
    }

    fn hard_drop(&self) -> Option<Transition> {
        let fallen = self
            .view
            .drop_block?
            .fallen(&self.view.blocks, self.view.matrix);
        let state = ViewState {
            drop_block: Some(fallen),
            ghost_block: None,
            ..self.view.clone()
        };
        Some(Transition::Replace(state, Some(SoundEvent::Drop)))
    }

    fn tick(&mut self) -> Transition {
        let view = &self.view;

        if let Some(drop) = view.drop_block {
            let down = drop.move_by(0, 1);
            if down.is_valid_in_matrix(&view.blocks, view.matrix) {
                return Transition::Replace(view.clone().with_drop_block(Some(down)), None);
            }
        }

        if !is_valid_option(view.drop_block.as_ref(), &view.blocks, view.matrix) {
            return self.game_over();
        }

        let clear = update_blocks(&view.blocks, view.drop_block.as_ref(), view.matrix);
        let lines = clear.lines();
        let gained = settle_score(lines, view.drop_block.is_some());
        let (next, reserve) = self.spawn_next();

        let view = &self.view;
        let settled = ViewState {
            blocks: clear.cleared.clone(),
            reserve,
            status: GameStatus::Running,
            score: view.score + gained,
            lines: view.lines + lines,
            ..view.clone()
        }
        .with_drop_block(Some(next));

        if lines == 0 {
            return Transition::Replace(settled, None);
        }
        debug!("cleared rows {:?}", clear.cleared_rows);
        let frames = line_clear_frames(view, &clear, settled);
        Transition::Animate(AnimationKind::LineClear, frames)
    }

    fn game_over(&self) -> Transition {
        debug!("game over at score {}", self.view.score);
        let base = ViewState {
            sound_suppressed: true,
            ..self.view.clone()
        };
        let terminal = ViewState {
            status: GameStatus::GameOver,
            sound_suppressed: false,
            ..self.view.clone()
        };
        let frames = screen_clear_frames(&base, None, terminal, Some(SoundEvent::GameOver));
        Transition::Animate(AnimationKind::ScreenClear, frames)
    }

    /// Take the next piece from the reserve, refilling it from the generator.
    ///
    /// The reserve is topped up again after the draw so a preview is always
    /// available.
    fn spawn_next(&mut self) -> (DropBlock, VecDeque<DropBlock>) {
        let mut reserve = self.view.reserve.clone();
        if reserve.is_empty() {
            reserve.extend(self.generate_batch());
        }
        let next = reserve
            .pop_front()
            .expect("piece generator returned an empty batch");
        if reserve.is_empty() {
            reserve.extend(self.generate_batch());
        }
        (next, reserve)
    }

    fn generate_batch(&mut self) -> Vec<DropBlock> {
        let settings = self.view.settings;
        self.generator.generate(
            self.view.matrix,
            settings.use_nauts,
            settings.naut_probability,
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default(), 1)
    }
}
