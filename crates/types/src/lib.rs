//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, actor runtime, terminal rendering).
//!
//! # Coordinates
//!
//! The playfield origin is the top-left cell. `x` grows to the right and `y`
//! grows downward. Pieces may hang above the visible top (`y < 0`), but never
//! past the side walls or the floor.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 1500 | Tick period at game speed 1 |
//! | `LINE_CLEAR_FRAME_MS` | 100 | Cadence of the line-clear flash |
//! | `SCREEN_CLEAR_FRAME_MS` | 50 | Cadence of the screen wipe |
//!
//! The external tick period is `BASE_TICK_MS / game_speed`, so the default
//! speed of 3 ticks every 500ms.
//!
//! # Examples
//!
//! ```
//! use naut_tetris_types::{Direction, PieceKind, Rotation, Settings};
//!
//! let kind = PieceKind::from_str("naut").unwrap();
//! assert_eq!(kind.color_index(), 7);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Direction::Left.offset(), (-1, 0));
//!
//! let settings = Settings::default();
//! assert_eq!(settings.tick_period_ms(), 500);
//! ```


/// Default board width in cells
pub const DEFAULT_GRID_WIDTH: i32 = 12;

/// Default board height in cells
pub const DEFAULT_GRID_HEIGHT: i32 = 24;

/// Smallest board edge that still fits every piece in every rotation
pub const MIN_GRID_SIZE: i32 = 4;

/// Largest accepted board edge
pub const MAX_GRID_SIZE: i32 = 40;

/// Tick period at game speed 1
pub const BASE_TICK_MS: u64 = 1500;

/// Default game speed (500ms per tick)
pub const DEFAULT_GAME_SPEED: u8 = 3;

pub const MIN_GAME_SPEED: u8 = 1;
pub const MAX_GAME_SPEED: u8 = 10;

/// Default naut probability, in tenths
pub const DEFAULT_NAUT_PROBABILITY: u8 = 6;

/// Naut probability is expressed in tenths (0..=10)
pub const MAX_NAUT_PROBABILITY: u8 = 10;

/// Delay between line-clear flash frames
pub const LINE_CLEAR_FRAME_MS: u64 = 100;

/// Number of (clearing, pre-clear) frame pairs in the flash
pub const LINE_CLEAR_FLASHES: usize = 5;

/// Delay between screen-clear wipe frames
pub const SCREEN_CLEAR_FRAME_MS: u64 = 50;

/// Line clear scoring table, indexed by simultaneous lines cleared
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 700 points
/// - 4 lines: 1500 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Flat bonus whenever an active piece settles onto the board
pub const SCORE_EVERY_DROP_BLOCK: u32 = 12;

/// Cleared lines needed per level step
pub const LINES_PER_LEVEL: u32 = 20;

pub const MAX_LEVEL: u32 = 10;


/// A grid position in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Board dimensions
///
/// Construct through [`Matrix::new`], which clamps both edges into
/// `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    pub width: i32,
    pub height: i32,
}

impl Matrix {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            height: height.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
        }
    }

    /// Check a coordinate against the side walls and the floor.
    ///
    /// Cells above the visible top are accepted.
    pub fn admits(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.x < self.width && c.y < self.height
    }

    /// Check a coordinate against the visible area
    pub fn contains(&self, c: Coordinate) -> bool {
        self.admits(c) && c.y >= 0
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

/// The eight piece kinds
///
/// The seven classic tetrominoes plus the naut, a hollow diamond that is
/// injected by probability when enabled. The discriminant order doubles as
/// the palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Naut,
}

impl PieceKind {
    /// The seven classic shapes, in palette order
    pub const CLASSIC: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Palette entry for this kind (0..=7)
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
            PieceKind::Naut => 7,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use naut_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("NAUT"), Some(PieceKind::Naut));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "naut" | "n" => Some(PieceKind::Naut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::Naut => "naut",
        }
    }
}

/// Rotation states
///
/// The cycle goes: North → East → South → West → North. Shapes with fewer
/// distinct orientations map several states onto the same cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use naut_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Movement directions accepted by [`Command::Move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    /// Never moves the piece; the engine treats it as a hard drop.
    Up,
}

impl Direction {
    /// Cell offset `(dx, dy)` for this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }
}

/// Game lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Waiting for the first reset
    Onboard,
    Running,
    /// Full rows are flashing before they vanish
    LineClearing,
    Paused,
    /// The board wipe played on reset and on game over
    ScreenClearing,
    GameOver,
}

impl GameStatus {
    /// True while a timed animation owns the board
    pub fn is_animating(&self) -> bool {
        matches!(self, GameStatus::LineClearing | GameStatus::ScreenClearing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Onboard => "onboard",
            GameStatus::Running => "running",
            GameStatus::LineClearing => "lineClearing",
            GameStatus::Paused => "paused",
            GameStatus::ScreenClearing => "screenClearing",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// A settings toggle or assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingChange {
    ToggleMute,
    ToggleDarkMode,
    ToggleUseNauts,
    ToggleGhostBlock,
    ToggleGridOutline,
    ToggleBackgroundArt,
    NautProbability(u8),
    /// Takes effect on the next reset
    GridWidth(i32),
    /// Takes effect on the next reset
    GridHeight(i32),
    GameSpeed(u8),
}

/// Commands accepted by the game state machine
///
/// The set is closed: every consumer matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Reset,
    Pause,
    Resume,
    Move(Direction),
    Rotate,
    /// Hard drop onto the ghost position
    Drop,
    GameTick,
    Setting(SettingChange),
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Reset => "reset",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Move(Direction::Left) => "moveLeft",
            Command::Move(Direction::Right) => "moveRight",
            Command::Move(Direction::Down) => "moveDown",
            Command::Move(Direction::Up) => "moveUp",
            Command::Rotate => "rotate",
            Command::Drop => "drop",
            Command::GameTick => "gameTick",
            Command::Setting(_) => "setting",
        }
    }
}

/// Events handed to the sound notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Move,
    Rotate,
    Drop,
    Clean,
    Start,
    GameOver,
}

/// User settings carried by every snapshot
///
/// `grid_width`/`grid_height` describe the board for the *next* game; the
/// active board keeps its own [`Matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    pub grid_width: i32,
    pub grid_height: i32,
    pub dark_mode: bool,
    pub mute: bool,
    pub use_nauts: bool,
    pub use_ghost_block: bool,
    pub show_grid_outline: bool,
    pub show_background_art: bool,
    pub game_speed: u8,
    pub naut_probability: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            dark_mode: false,
            mute: false,
            use_nauts: false,
            use_ghost_block: true,
            show_grid_outline: true,
            show_background_art: true,
            game_speed: DEFAULT_GAME_SPEED,
            naut_probability: DEFAULT_NAUT_PROBABILITY,
        }
    }
}

impl Settings {
    /// Force every numeric field into its accepted range
    pub fn clamped(mut self) -> Self {
        self.grid_width = self.grid_width.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.grid_height = self.grid_height.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.game_speed = self.game_speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
        self.naut_probability = self.naut_probability.min(MAX_NAUT_PROBABILITY);
        self
    }

    /// Apply a change in place, clamping assigned values
    pub fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::ToggleMute => self.mute = !self.mute,
            SettingChange::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            SettingChange::ToggleUseNauts => self.use_nauts = !self.use_nauts,
            SettingChange::ToggleGhostBlock => self.use_ghost_block = !self.use_ghost_block,
            SettingChange::ToggleGridOutline => self.show_grid_outline = !self.show_grid_outline,
            SettingChange::ToggleBackgroundArt => {
                self.show_background_art = !self.show_background_art
            }
            SettingChange::NautProbability(p) => self.naut_probability = p,
            SettingChange::GridWidth(w) => self.grid_width = w,
            SettingChange::GridHeight(h) => self.grid_height = h,
            SettingChange::GameSpeed(s) => self.game_speed = s,
        }
        *self = self.clamped();
    }

    /// Board dimensions a reset would create
    pub fn matrix(&self) -> Matrix {
        Matrix::new(self.grid_width, self.grid_height)
    }

    /// Period of the external tick driver
    pub fn tick_period_ms(&self) -> u64 {
        BASE_TICK_MS / self.game_speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED) as u64
    }
}
