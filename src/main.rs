//! Terminal Naut Tetris runner (default binary).
//!
//! The engine actor, the tick timer and the renderer run on a tokio runtime;
//! the main thread blocks on crossterm input and forwards commands.

use std::fs::File;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};
use tokio::runtime::Runtime;

use naut_tetris::core::GameState;
use naut_tetris::engine::{spawn_renderer, Engine, EngineConfig, LogSound, Ticker};
use naut_tetris::input::{handle_key_event, should_quit};
use naut_tetris::settings::{load_settings, JsonFileStore, MemoryStore, SettingsStore};
use naut_tetris::term::{GameView, TerminalRenderer, TerminalSink};

const INPUT_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(&config)?;

    let rt = Runtime::new()?;
    let _guard = rt.enter();

    let store = open_store(&config);
    let settings = load_settings(&*store);
    info!("seed {} settings {:?}", config.seed, settings);

    let engine = Engine::spawn(
        GameState::new(settings, config.seed),
        store,
        Box::new(LogSound),
        config.frame_buffer,
    );
    let ticker = Ticker::spawn(engine.dispatcher(), engine.watch());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let frames = engine.subscribe();
    let mut sink = TerminalSink::new(term, GameView::default());
    let (render, result) = match sink.draw(&engine.current()) {
        Ok(()) => {
            let render = spawn_renderer(frames, sink);
            (Some(render), run(&engine, &ticker))
        }
        Err(e) => {
            let _ = sink.into_inner().exit();
            (None, Err(e))
        }
    };

    ticker.stop();
    let last = rt.block_on(engine.shutdown());
    info!("final score {} lines {}", last.score, last.lines);

    // The render task ends once the engine is gone; always restore the terminal.
    if let Some(render) = render {
        let mut term = match rt.block_on(render) {
            Ok(sink) => sink.into_inner(),
            Err(e) => {
                warn!("render task failed: {}", e);
                TerminalRenderer::new()
            }
        };
        let _ = term.exit();
    }

    result
}

fn run(engine: &Engine, ticker: &Ticker) -> Result<()> {
    let latest = engine.watch();

    loop {
        let snapshot = latest.borrow().clone();

        // Keep the timer quiet while the game is paused.
        match (snapshot.is_paused(), ticker.is_paused()) {
            (true, false) => ticker.pause(),
            (false, true) => ticker.resume(),
            _ => {}
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if should_quit(key) {
                return Ok(());
            }
            if let Some(command) = handle_key_event(key, snapshot.status, &snapshot.settings) {
                engine.dispatch(command)?;
            }
        }
    }
}

fn open_store(config: &EngineConfig) -> Box<dyn SettingsStore> {
    match JsonFileStore::open(&config.settings_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("{}; settings will not be saved", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Log to `NAUT_TETRIS_LOG` only; stderr would tear through the alternate screen.
fn init_logging(config: &EngineConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(File::create(path)?)))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_stays_off_without_a_log_file() {
        std::env::set_var("RUST_LOG", "debug");
        let config = EngineConfig::default();
        assert!(config.log_path.is_none());

        init_logging(&config).unwrap();
        assert_eq!(log::max_level(), log::LevelFilter::Off);
    }
}
