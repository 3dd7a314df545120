//! Host-facing operations over `AppState`.
//!
//! These bridge host requests to the game loop thread via its channel.

use gallery_core::commands::InputCommand;
use gallery_core::state::FrameSnapshot;
use gallery_core::types::Pose;
use gallery_sim::engine::EngineConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("game loop already running")]
    AlreadyRunning,

    #[error("game loop not started")]
    NotStarted,

    /// The loop thread has exited and dropped its receiver.
    #[error("game loop is gone")]
    LoopGone,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Start the game loop. Fails if it is already running.
pub fn start_loop(state: &AppState, config: EngineConfig) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let cmd_tx = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = Some(cmd_tx);
    *running = true;
    Ok(())
}

/// Forward an input command to the next frame.
pub fn send_input(state: &AppState, command: InputCommand) -> Result<(), AppError> {
    send(state, GameLoopCommand::Input(command))
}

/// Forward a controller trigger start.
pub fn trigger_start(state: &AppState, pose: Pose) -> Result<(), AppError> {
    send(state, GameLoopCommand::TriggerStart(pose))
}

/// The most recent snapshot, if a frame has run.
pub fn latest_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the loop to stop. Stopping a loop that never started is a no-op.
pub fn stop_loop(state: &AppState) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    if let Some(tx) = tx_lock.take() {
        // Already gone is as good as stopped.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    *running = false;
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| AppError::LoopGone),
        None => Err(AppError::NotStarted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(matches!(
            send_input(&state, InputCommand::StartSession),
            Err(AppError::NotStarted)
        ));
        assert!(latest_snapshot(&state).unwrap().is_none());
        stop_loop(&state).unwrap();
    }

    #[test]
    fn test_start_twice_fails() {
        let state = AppState::new();
        start_loop(&state, EngineConfig::default()).unwrap();
        assert!(matches!(
            start_loop(&state, EngineConfig::default()),
            Err(AppError::AlreadyRunning)
        ));
        stop_loop(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
    }
}
