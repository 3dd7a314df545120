//! Host state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use gallery_core::commands::InputCommand;
use gallery_core::state::FrameSnapshot;
use gallery_core::types::Pose;

/// Messages sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queue an input command for the next frame.
    Input(InputCommand),
    /// The controller trigger started at this pose; resolved on receipt.
    TriggerStart(Pose),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`; the
/// latest snapshot is shared with the loop thread through an `Arc`.
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the loop thread after every frame.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }
}
