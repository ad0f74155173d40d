//! The single-writer engine actor.
//!
//! One tokio task owns the [`GameState`]. Commands arrive over an unbounded
//! channel and are applied strictly in arrival order; animation frames are
//! released by the same task when their deadline passes. Every resulting
//! snapshot is published to a `watch` channel (latest state) and a
//! `broadcast` channel (every frame).

use log::{info, warn};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use crate::core::{Effect, GameState};
use crate::error::EngineError;
use crate::settings::{persist_change, SettingsStore};
use crate::snapshot::Snapshot;
use crate::sound::SoundNotifier;
use crate::types::Command;

#[derive(Debug)]
enum Message {
    Command(Command),
    Shutdown,
}

/// Cloneable, non-blocking handle for sending commands
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn dispatch(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .send(Message::Command(command))
            .map_err(|_| EngineError::Closed)
    }
}

/// Running engine
pub struct Engine {
    dispatcher: Dispatcher,
    latest: watch::Receiver<Snapshot>,
    frames: broadcast::Sender<Snapshot>,
    handle: JoinHandle<Snapshot>,
}

impl Engine {
    /// Spawn the actor on the current tokio runtime.
    ///
    /// `game` is published immediately as generation 0.
    pub fn spawn(
        game: GameState,
        store: Box<dyn SettingsStore>,
        sound: Box<dyn SoundNotifier>,
        frame_buffer: usize,
    ) -> Self {
        let initial = Snapshot::new(0, game.view().clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let (latest_tx, latest) = watch::channel(initial);
        let (frames, _) = broadcast::channel(frame_buffer.max(1));

        let actor = Actor {
            game,
            rx,
            store,
            sound,
            latest: latest_tx,
            frames: frames.clone(),
            generation: 0,
            last_advance: Instant::now(),
        };
        let handle = tokio::spawn(actor.run());
        info!("engine started");

        Self {
            dispatcher: Dispatcher { tx },
            latest,
            frames,
            handle,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub fn dispatch(&self, command: Command) -> Result<(), EngineError> {
        self.dispatcher.dispatch(command)
    }

    /// Every published frame from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.frames.subscribe()
    }

    /// The latest snapshot, skipping intermediate frames
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.latest.clone()
    }

    pub fn current(&self) -> Snapshot {
        self.latest.borrow().clone()
    }

    /// Stop the actor, abandoning any animation in flight.
    ///
    /// Returns the last published snapshot.
    pub async fn shutdown(self) -> Snapshot {
        let _ = self.dispatcher.tx.send(Message::Shutdown);
        let fallback = self.current();
        match self.handle.await {
            Ok(last) => last,
            Err(e) => {
                warn!("engine task failed: {}", e);
                fallback
            }
        }
    }
}

struct Actor {
    game: GameState,
    rx: mpsc::UnboundedReceiver<Message>,
    store: Box<dyn SettingsStore>,
    sound: Box<dyn SoundNotifier>,
    latest: watch::Sender<Snapshot>,
    frames: broadcast::Sender<Snapshot>,
    generation: u64,
    last_advance: Instant,
}

impl Actor {
    async fn run(mut self) -> Snapshot {
        loop {
            let deadline = self
                .game
                .next_frame_in_ms()
                .map(|ms| self.last_advance + Duration::from_millis(ms));

            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(Message::Command(command)) => {
                        self.catch_up();
                        let effects = self.game.dispatch(command);
                        self.apply(effects);
                    }
                    Some(Message::Shutdown) | None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.catch_up();
                }
            }
        }

        self.game.cancel_animation();
        info!("engine stopped at generation {}", self.generation);
        self.latest.borrow().clone()
    }

    /// Release animation frames that fell due since the last call
    fn catch_up(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_advance).as_millis() as u64;
        self.last_advance += Duration::from_millis(elapsed);
        let effects = self.game.advance(elapsed);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Publish(view) => {
                    self.generation += 1;
                    let snapshot = Snapshot::new(self.generation, view);
                    self.latest.send_replace(snapshot.clone());
                    // No subscribers is fine.
                    let _ = self.frames.send(snapshot);
                }
                Effect::Sound { event, muted } => self.sound.play(muted, event),
                Effect::Persist { change, settings } => {
                    if let Err(e) = persist_change(&mut *self.store, change, &settings) {
                        warn!("failed to persist {:?}: {}", change, e);
                    }
                }
            }
        }
    }
}
