//! Sound notifier collaborators.

use log::debug;

use crate::types::SoundEvent;

/// Receives sound events from the engine.
///
/// Called on the actor task, so implementations must return quickly and
/// hand any real playback off elsewhere.
pub trait SoundNotifier: Send {
    fn play(&self, muted: bool, event: SoundEvent);
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundNotifier for NullSound {
    fn play(&self, _muted: bool, _event: SoundEvent) {}
}

/// Writes unmuted events to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSound;

impl SoundNotifier for LogSound {
    fn play(&self, muted: bool, event: SoundEvent) {
        if !muted {
            debug!("sound: {:?}", event);
        }
    }
}
