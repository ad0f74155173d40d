//! Published snapshots and the downstream renderer seam.

use std::ops::Deref;
use std::sync::Arc;

use log::warn;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::core::ViewState;

/// A published `ViewState` stamped with its generation.
///
/// Generations start at 0 for the initial state and grow by one for every
/// publish, so a reader can tell whether it missed frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub generation: u64,
    pub view: Arc<ViewState>,
}

impl Snapshot {
    pub fn new(generation: u64, view: ViewState) -> Self {
        Self {
            generation,
            view: Arc::new(view),
        }
    }
}

impl Deref for Snapshot {
    type Target = ViewState;

    fn deref(&self) -> &ViewState {
        &self.view
    }
}

/// Draws snapshots; purely downstream of the engine
pub trait Renderer: Send {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Feed every frame from `frames` to `renderer` until the engine stops.
///
/// A renderer that falls behind skips to the newest frames. The renderer is
/// handed back when the task ends.
pub fn spawn_renderer<R>(mut frames: broadcast::Receiver<Snapshot>, mut renderer: R) -> JoinHandle<R>
where
    R: Renderer + 'static,
{
    tokio::spawn(async move {
        loop {
            match frames.recv().await {
                Ok(snapshot) => renderer.render(&snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("renderer lagged, skipped {} frames", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        renderer
    })
}
