use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_test::assert_ok;

use naut_tetris::core::{Block, DropBlock, GameState, ViewState};
use naut_tetris::engine::{
    spawn_renderer, Engine, EngineError, NullSound, Renderer, Snapshot, SoundNotifier, Ticker,
};
use naut_tetris::settings::{load_settings, MemoryStore, SettingKey, SettingValue};
use naut_tetris::types::{
    Command, Coordinate, GameStatus, PieceKind, SettingChange, Settings, SoundEvent,
};

#[derive(Clone, Default)]
struct RecordingSound(Arc<Mutex<Vec<(SoundEvent, bool)>>>);

impl RecordingSound {
    fn events(&self) -> Vec<(SoundEvent, bool)> {
        self.0.lock().unwrap().clone()
    }
}

impl SoundNotifier for RecordingSound {
    fn play(&self, muted: bool, event: SoundEvent) {
        self.0.lock().unwrap().push((event, muted));
    }
}

#[derive(Default)]
struct RecordingRenderer {
    generations: Vec<u64>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.generations.push(snapshot.generation);
    }
}

async fn recv(frames: &mut broadcast::Receiver<Snapshot>) -> Snapshot {
    tokio::time::timeout(Duration::from_secs(30), frames.recv())
        .await
        .expect("timeout waiting for frame")
        .expect("frame channel closed")
}

fn small_settings(width: i32, height: i32) -> Settings {
    Settings {
        grid_width: width,
        grid_height: height,
        ..Settings::default()
    }
}

/// Running 4x6 board whose next tick clears the bottom row
fn about_to_clear() -> ViewState {
    let mut view = ViewState::fresh(small_settings(4, 6), GameStatus::Running);
    view.blocks = vec![Block::new(2, 5, 3), Block::new(3, 5, 3)];
    view.with_drop_block(Some(DropBlock::new(PieceKind::O, Coordinate::new(0, 4))))
}

/// Running 6x6 board where any spawned piece collides
fn about_to_lose() -> ViewState {
    ViewState {
        blocks: (1..6).map(|x| Block::new(x, 0, 4)).collect(),
        ..ViewState::fresh(small_settings(6, 6), GameStatus::Running)
    }
}

#[tokio::test(start_paused = true)]
async fn line_clear_frames_are_paced_by_the_actor() {
    let engine = Engine::spawn(
        GameState::from_view(about_to_clear(), 3),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let mut frames = engine.subscribe();
    let start = Instant::now();
    assert_ok!(engine.dispatch(Command::GameTick));

    let mut seen = Vec::new();
    for _ in 0..11 {
        seen.push(recv(&mut frames).await);
    }
    let elapsed = start.elapsed();

    let generations: Vec<u64> = seen.iter().map(|s| s.generation).collect();
    assert_eq!(generations, (1..=11).collect::<Vec<_>>());
    assert!(seen[..10].iter().all(|s| s.status == GameStatus::LineClearing));
    assert!(elapsed >= Duration::from_millis(1000), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1100), "{:?}", elapsed);

    let last = &seen[10];
    assert_eq!(last.status, GameStatus::Running);
    assert_eq!(last.lines, 1);
    assert_eq!(engine.current().generation, 11);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn commands_during_animation_are_ignored() {
    let engine = Engine::spawn(
        GameState::from_view(about_to_clear(), 3),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let mut frames = engine.subscribe();
    assert_ok!(engine.dispatch(Command::GameTick));
    assert_ok!(engine.dispatch(Command::Rotate));
    assert_ok!(engine.dispatch(Command::GameTick));

    for _ in 0..11 {
        recv(&mut frames).await;
    }
    // Nothing beyond the animation itself was published.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.current().generation, 11);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn game_over_plays_one_sound_after_the_wipe() {
    let sound = RecordingSound::default();
    let engine = Engine::spawn(
        GameState::from_view(about_to_lose(), 3),
        Box::new(MemoryStore::new()),
        Box::new(sound.clone()),
        64,
    );
    let mut frames = engine.subscribe();
    assert_ok!(engine.dispatch(Command::GameTick));
    assert_ok!(engine.dispatch(Command::GameTick));

    let start = Instant::now();
    let mut last = recv(&mut frames).await;
    while last.status != GameStatus::GameOver {
        last = recv(&mut frames).await;
    }
    // Spawn frame plus 2 * (height + 1) wipe frames plus the terminal frame.
    assert_eq!(last.generation, 1 + 2 * 7 + 1);
    assert!(start.elapsed() >= Duration::from_millis(50 * 2 * 7));
    assert_eq!(sound.events(), vec![(SoundEvent::GameOver, false)]);
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_animation_and_keeps_last_frame() {
    let engine = Engine::spawn(
        GameState::from_view(about_to_clear(), 3),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let mut frames = engine.subscribe();
    assert_ok!(engine.dispatch(Command::GameTick));
    let first = recv(&mut frames).await;

    let last = engine.shutdown().await;
    assert_eq!(last.generation, first.generation);
    assert_eq!(last.status, GameStatus::LineClearing);
}

#[tokio::test(start_paused = true)]
async fn renderer_sees_every_frame_in_order() {
    let engine = Engine::spawn(
        GameState::new(Settings::default(), 11),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let render = spawn_renderer(engine.subscribe(), RecordingRenderer::default());

    assert_ok!(engine.dispatch(Command::Reset));
    assert_ok!(engine.dispatch(Command::Rotate));
    assert_ok!(engine.dispatch(Command::GameTick));
    assert_ok!(engine.dispatch(Command::Setting(SettingChange::ToggleDarkMode)));
    let last = engine.shutdown().await;

    let renderer = render.await.unwrap();
    assert_eq!(renderer.generations, vec![1, 2, 3]);
    assert_eq!(last.generation, 3);
    assert!(last.settings.dark_mode);
}

#[tokio::test(start_paused = true)]
async fn settings_round_trip_through_the_store() {
    let store = MemoryStore::new();
    let engine = Engine::spawn(
        GameState::default(),
        Box::new(store.clone()),
        Box::new(NullSound),
        8,
    );
    assert_ok!(engine.dispatch(Command::Setting(SettingChange::NautProbability(2))));
    assert_ok!(engine.dispatch(Command::Setting(SettingChange::ToggleUseNauts)));
    assert_ok!(engine.dispatch(Command::Setting(SettingChange::GridHeight(99))));
    engine.shutdown().await;

    assert_eq!(
        store.raw(SettingKey::NautProbability),
        Some(SettingValue::Int(2))
    );
    assert_eq!(store.raw(SettingKey::UseNauts), Some(SettingValue::Bool(true)));

    let reloaded = load_settings(&store);
    assert_eq!(reloaded.naut_probability, 2);
    assert!(reloaded.use_nauts);
    assert_eq!(reloaded.grid_height, 40);
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_the_game_at_the_configured_speed() {
    let engine = Engine::spawn(
        GameState::new(Settings::default(), 5),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let mut frames = engine.subscribe();
    assert_ok!(engine.dispatch(Command::Reset));
    assert_eq!(recv(&mut frames).await.status, GameStatus::Running);

    // Default speed 3: one tick every 500ms.
    let start = Instant::now();
    let ticker = Ticker::spawn(engine.dispatcher(), engine.watch());
    let spawned = recv(&mut frames).await;
    assert!(spawned.drop_block.is_some());
    let first_tick = start.elapsed();
    assert!(first_tick >= Duration::from_millis(500), "{:?}", first_tick);
    assert!(first_tick < Duration::from_millis(600), "{:?}", first_tick);

    // Speed 10 shortens the period to 150ms from the last tick.
    let tick_at = Instant::now();
    assert_ok!(engine.dispatch(Command::Setting(SettingChange::GameSpeed(10))));
    let changed = recv(&mut frames).await;
    assert_eq!(changed.settings.game_speed, 10);
    recv(&mut frames).await;
    let gap = tick_at.elapsed();
    assert!(gap >= Duration::from_millis(150), "{:?}", gap);
    assert!(gap < Duration::from_millis(500), "{:?}", gap);

    ticker.stop();
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn paused_ticker_sends_nothing() {
    let engine = Engine::spawn(
        GameState::new(Settings::default(), 5),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        64,
    );
    let mut frames = engine.subscribe();
    assert_ok!(engine.dispatch(Command::Reset));
    recv(&mut frames).await;

    let ticker = Ticker::spawn(engine.dispatcher(), engine.watch());
    ticker.pause();
    assert!(ticker.is_paused());
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(engine.current().generation, 1);

    ticker.resume();
    let start = Instant::now();
    let ticked = recv(&mut frames).await;
    assert_eq!(ticked.generation, 2);
    assert!(start.elapsed() >= Duration::from_millis(500));

    ticker.stop();
    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn ticker_stops_when_engine_closes() {
    let engine = Engine::spawn(
        GameState::default(),
        Box::new(MemoryStore::new()),
        Box::new(NullSound),
        8,
    );
    let dispatcher = engine.dispatcher();
    let ticker = Ticker::spawn(engine.dispatcher(), engine.watch());
    engine.shutdown().await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(ticker.is_finished());
    assert_eq!(dispatcher.dispatch(Command::GameTick), Err(EngineError::Closed));
}
