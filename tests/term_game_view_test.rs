use naut_tetris::core::{Block, DropBlock, ViewState};
use naut_tetris::term::fb::FrameBuffer;
use naut_tetris::term::{GameView, Viewport};
use naut_tetris::types::{Coordinate, GameStatus, PieceKind, SettingChange, Settings};

/// Small board with the decorative layers switched off
fn plain(width: i32, height: i32, status: GameStatus) -> ViewState {
    let settings = Settings {
        grid_width: width,
        grid_height: height,
        show_grid_outline: false,
        show_background_art: false,
        ..Settings::default()
    };
    ViewState::fresh(settings, status)
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ch(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).unwrap().ch
}

#[test]
fn term_view_renders_border_corners() {
    let state = ViewState::default();
    let view = GameView::default();

    // 12x24 cells at 2x1 => 24x24, plus border => 26x26
    let fb = view.render(&state, Viewport::new(26, 26));

    assert_eq!(ch(&fb, 0, 0), '┌');
    assert_eq!(ch(&fb, 25, 0), '┐');
    assert_eq!(ch(&fb, 0, 25), '└');
    assert_eq!(ch(&fb, 25, 25), '┘');
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let fb = GameView::default().render(&ViewState::default(), Viewport::new(26, 40));
    // start_y = (40 - 26) / 2 = 7
    assert_eq!(ch(&fb, 0, 7), '┌');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut state = plain(4, 6, GameStatus::Running);
    state.blocks = vec![Block::new(0, 5, 2)];

    let fb = GameView::default().render(&state, Viewport::new(10, 8));
    assert_eq!(ch(&fb, 1, 6), '█');
    assert_eq!(ch(&fb, 2, 6), '█');
    assert_eq!(ch(&fb, 3, 6), ' ');
}

#[test]
fn term_view_skips_cells_above_the_board() {
    let mut state = plain(4, 6, GameStatus::Running);
    state.blocks = vec![Block::new(1, -1, 2)];

    let fb = GameView::default().render(&state, Viewport::new(10, 8));
    assert_eq!(fb.row_text(0), "┌────────┐");
    assert!(!screen_text(&fb).contains('█'));
}

#[test]
fn term_view_draws_naut_with_hollow_center() {
    let state = plain(4, 6, GameStatus::Running)
        .with_drop_block(Some(DropBlock::new(PieceKind::Naut, Coordinate::new(1, 1))));

    let fb = GameView::default().render(&state, Viewport::new(10, 8));
    // Board cell (x, y) starts at column 1 + 2x, row 1 + y.
    assert_eq!(ch(&fb, 3, 1), '█'); // (1, 0)
    assert_eq!(ch(&fb, 1, 2), '█'); // (0, 1)
    assert_eq!(ch(&fb, 3, 2), ' '); // (1, 1)
    assert_eq!(ch(&fb, 5, 2), '█'); // (2, 1)
    assert_eq!(ch(&fb, 3, 3), '█'); // (1, 2)
}

#[test]
fn term_view_ghost_follows_setting() {
    let state = plain(4, 6, GameStatus::Running)
        .with_drop_block(Some(DropBlock::new(PieceKind::O, Coordinate::new(1, 0))));
    let view = GameView::default();

    let fb = view.render(&state, Viewport::new(10, 8));
    // Ghost rests on the floor: rows 4 and 5 of the board.
    assert_eq!(ch(&fb, 3, 6), '░');
    assert_eq!(ch(&fb, 5, 5), '░');

    let hidden = state.with_setting(SettingChange::ToggleGhostBlock);
    let fb = view.render(&hidden, Viewport::new(10, 8));
    assert!(!screen_text(&fb).contains('░'));
}

#[test]
fn term_view_draws_background_art_and_outline() {
    let settings = Settings {
        grid_width: 4,
        grid_height: 4,
        ..Settings::default()
    };
    let state = ViewState::fresh(settings, GameStatus::Running);
    let fb = GameView::default().render(&state, Viewport::new(10, 6));

    // Cell (0, 0): outline dot over the art stripe.
    assert_eq!(ch(&fb, 1, 1), '·');
    assert_eq!(ch(&fb, 2, 1), '╱');
    // Cell (1, 0): outline only.
    assert_eq!(ch(&fb, 3, 1), '·');
    assert_eq!(ch(&fb, 4, 1), ' ');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut state = plain(4, 6, GameStatus::Running);
    state.score = 1234;
    state.lines = 10;
    state.reserve.push_back(DropBlock::new(PieceKind::T, Coordinate::new(0, 0)));

    let fb = GameView::default().render(&state, Viewport::new(60, 40));
    let text = screen_text(&fb);
    for label in ["SCORE", "1234", "LEVEL", "LINES", "NEXT", "SPEED", "SOUND"] {
        assert!(text.contains(label), "missing {}", label);
    }
    assert!(text.contains("NAUTS off"));
}

#[test]
fn term_view_omits_side_panel_on_narrow_viewports() {
    let mut state = plain(4, 6, GameStatus::Running);
    state.score = 1234;
    let fb = GameView::default().render(&state, Viewport::new(10, 8));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_pending_grid_size() {
    let state = plain(4, 6, GameStatus::Running).with_setting(SettingChange::GridWidth(16));
    let fb = GameView::default().render(&state, Viewport::new(60, 40));
    assert!(screen_text(&fb).contains("16x6"));
}

#[test]
fn term_view_overlays_follow_status() {
    let view = GameView::default();
    for (status, text) in [
        (GameStatus::Onboard, Some("PRESS ENTER")),
        (GameStatus::Paused, Some("PAUSED")),
        (GameStatus::GameOver, Some("GAME OVER")),
        (GameStatus::Running, None),
        (GameStatus::ScreenClearing, None),
    ] {
        let fb = view.render(&plain(12, 24, status), Viewport::new(26, 26));
        let screen = screen_text(&fb);
        match text {
            Some(text) => assert!(screen.contains(text), "{:?}", status),
            None => {
                assert!(!screen.contains("PRESS ENTER"));
                assert!(!screen.contains("PAUSED"));
                assert!(!screen.contains("GAME OVER"));
            }
        }
    }
}

#[test]
fn term_view_uses_dark_palette() {
    let light = plain(4, 6, GameStatus::Running);
    let dark = light.clone().with_setting(SettingChange::ToggleDarkMode);
    let view = GameView::default();

    let a = view.render(&light, Viewport::new(10, 8));
    let b = view.render(&dark, Viewport::new(10, 8));
    assert_eq!(screen_text(&a), screen_text(&b));
    assert_ne!(a.get(1, 1).unwrap().style, b.get(1, 1).unwrap().style);
}
