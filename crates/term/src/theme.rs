//! Light and dark palettes.

use crate::fb::{CellStyle, Rgb};
use crate::types::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub board: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub label: Rgb,
    pub outline: Rgb,
    pub art: Rgb,
    /// Indexed by block color (`PieceKind::color_index`)
    pub pieces: [Rgb; 8],
}

pub const LIGHT: Palette = Palette {
    background: Rgb::new(235, 235, 240),
    board: Rgb::new(250, 250, 252),
    border: Rgb::new(60, 60, 70),
    text: Rgb::new(40, 40, 50),
    label: Rgb::new(10, 10, 20),
    outline: Rgb::new(200, 200, 210),
    art: Rgb::new(225, 228, 240),
    pieces: [
        Rgb::new(0, 170, 190),
        Rgb::new(210, 170, 0),
        Rgb::new(150, 60, 180),
        Rgb::new(40, 160, 70),
        Rgb::new(200, 50, 50),
        Rgb::new(40, 80, 200),
        Rgb::new(230, 120, 0),
        Rgb::new(220, 60, 150),
    ],
};

pub const DARK: Palette = Palette {
    background: Rgb::new(0, 0, 0),
    board: Rgb::new(30, 30, 40),
    border: Rgb::new(200, 200, 200),
    text: Rgb::new(200, 200, 200),
    label: Rgb::new(220, 220, 220),
    outline: Rgb::new(90, 90, 100),
    art: Rgb::new(45, 45, 62),
    pieces: [
        Rgb::new(80, 220, 220),
        Rgb::new(240, 220, 80),
        Rgb::new(200, 120, 220),
        Rgb::new(100, 220, 120),
        Rgb::new(220, 80, 80),
        Rgb::new(80, 120, 220),
        Rgb::new(255, 165, 0),
        Rgb::new(255, 110, 200),
    ],
};

impl Palette {
    pub fn for_settings(settings: &Settings) -> &'static Palette {
        if settings.dark_mode {
            &DARK
        } else {
            &LIGHT
        }
    }

    pub fn piece(&self, color: u8) -> Rgb {
        self.pieces[(color as usize) % self.pieces.len()]
    }

    pub fn text_style(&self) -> CellStyle {
        CellStyle::new(self.text, self.background)
    }

    pub fn label_style(&self) -> CellStyle {
        CellStyle::new(self.label, self.background).bold()
    }

    pub fn board_style(&self) -> CellStyle {
        CellStyle::new(self.outline, self.board)
    }
}
