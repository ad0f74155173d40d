//! Periodic `GameTick` source.
//!
//! The period follows the `game_speed` setting of the latest snapshot
//! (`BASE_TICK_MS / game_speed`). A speed change takes effect from the last
//! tick rather than restarting the wait.

use log::{debug, trace};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use crate::actor::Dispatcher;
use crate::snapshot::Snapshot;
use crate::types::Command;

pub struct Ticker {
    paused: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking immediately
    pub fn spawn(dispatcher: Dispatcher, snapshots: watch::Receiver<Snapshot>) -> Self {
        let (paused, paused_rx) = watch::channel(false);
        let handle = tokio::spawn(run(dispatcher, snapshots, paused_rx));
        Self { paused, handle }
    }

    /// Stop sending ticks until [`resume`](Self::resume)
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    /// Restart with a full period before the next tick
    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the timer task
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn period_of(snapshot: &Snapshot) -> Duration {
    Duration::from_millis(snapshot.settings.tick_period_ms())
}

async fn run(
    dispatcher: Dispatcher,
    mut snapshots: watch::Receiver<Snapshot>,
    mut paused: watch::Receiver<bool>,
) {
    let mut period = period_of(&snapshots.borrow_and_update());
    let mut last_tick = Instant::now();
    debug!("ticker started with period {:?}", period);

    loop {
        let is_paused = *paused.borrow_and_update();
        tokio::select! {
            _ = sleep_until(last_tick + period), if !is_paused => {
                trace!("tick");
                if dispatcher.dispatch(Command::GameTick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
            changed = paused.changed() => {
                if changed.is_err() {
                    break;
                }
                if !*paused.borrow() {
                    last_tick = Instant::now();
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = period_of(&snapshots.borrow_and_update());
                if next != period {
                    debug!("tick period {:?} -> {:?}", period, next);
                    period = next;
                }
            }
        }
    }
    debug!("ticker stopped");
}
