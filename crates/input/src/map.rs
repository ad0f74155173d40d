//! Key mapping from terminal events to engine commands.

use crate::types::{
    Command, Direction, GameStatus, SettingChange, Settings, MAX_GAME_SPEED, MAX_NAUT_PROBABILITY,
    MIN_GAME_SPEED,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command.
///
/// Pause/resume share a key, and the stepping keys (speed, naut odds, grid
/// size) produce absolute values, so the current status and settings are
/// needed. Piece controls are dropped while an animation owns the board.
pub fn handle_key_event(key: KeyEvent, status: GameStatus, settings: &Settings) -> Option<Command> {
    let setting = |change| Some(Command::Setting(change));
    let play = |command| (!status.is_animating()).then_some(command);

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            play(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            play(Command::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            play(Command::Move(Direction::Down))
        }
        // Moving up is a hard drop.
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            play(Command::Move(Direction::Up))
        }

        // Actions
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Char('X') => play(Command::Rotate),
        KeyCode::Enter => match status {
            GameStatus::Onboard | GameStatus::GameOver => Some(Command::Reset),
            _ => play(Command::Drop),
        },
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => match status {
            GameStatus::Running => Some(Command::Pause),
            GameStatus::Paused => Some(Command::Resume),
            _ => None,
        },
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        // Toggles
        KeyCode::Char('m') | KeyCode::Char('M') => setting(SettingChange::ToggleMute),
        KeyCode::Char('t') | KeyCode::Char('T') => setting(SettingChange::ToggleDarkMode),
        KeyCode::Char('n') | KeyCode::Char('N') => setting(SettingChange::ToggleUseNauts),
        KeyCode::Char('g') | KeyCode::Char('G') => setting(SettingChange::ToggleGhostBlock),
        KeyCode::Char('o') | KeyCode::Char('O') => setting(SettingChange::ToggleGridOutline),
        KeyCode::Char('b') | KeyCode::Char('B') => setting(SettingChange::ToggleBackgroundArt),

        // Steppers
        KeyCode::Char('+') | KeyCode::Char('=') => {
            setting(SettingChange::GameSpeed(step_u8(settings.game_speed, 1, MIN_GAME_SPEED, MAX_GAME_SPEED)))
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            setting(SettingChange::GameSpeed(step_u8(settings.game_speed, -1, MIN_GAME_SPEED, MAX_GAME_SPEED)))
        }
        KeyCode::Char(']') => setting(SettingChange::NautProbability(step_u8(
            settings.naut_probability,
            1,
            0,
            MAX_NAUT_PROBABILITY,
        ))),
        KeyCode::Char('[') => setting(SettingChange::NautProbability(step_u8(
            settings.naut_probability,
            -1,
            0,
            MAX_NAUT_PROBABILITY,
        ))),
        KeyCode::Char('}') => setting(SettingChange::GridWidth(settings.grid_width + 1)),
        KeyCode::Char('{') => setting(SettingChange::GridWidth(settings.grid_width - 1)),
        KeyCode::Char(')') => setting(SettingChange::GridHeight(settings.grid_height + 1)),
        KeyCode::Char('(') => setting(SettingChange::GridHeight(settings.grid_height - 1)),

        _ => None,
    }
}

fn step_u8(value: u8, delta: i16, min: u8, max: u8) -> u8 {
    (value as i16 + delta).clamp(min as i16, max as i16) as u8
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
