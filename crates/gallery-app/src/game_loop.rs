//! Game loop thread: drives the gallery engine at display rate and
//! publishes snapshots.
//!
//! The engine is created inside the thread and never leaves it. Commands
//! arrive over an `mpsc` channel; the latest snapshot is stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use gallery_core::commands::InputCommand;
use gallery_core::constants::DISPLAY_REFRESH_HZ;
use gallery_core::state::FrameSnapshot;
use gallery_sim::engine::{EngineConfig, GalleryEngine};

use crate::state::GameLoopCommand;

/// Duration of one display frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / DISPLAY_REFRESH_HZ as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender the host uses to reach the engine.
pub fn spawn_game_loop(
    config: EngineConfig,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("gallery-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) {
    let mut engine = GalleryEngine::new(config);
    let clock = Instant::now();
    let mut next_frame_time = clock;
    log::info!("game loop started at {DISPLAY_REFRESH_HZ}Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::TriggerStart(pose)) => {
                    engine.controller_trigger_start(pose);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("game loop stopped after {} frames", engine.time().frame);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Run one frame on the monotonic clock
        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
        let snapshot = engine.frame(now_ms);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            log::debug!("game loop fell behind by {:?}", now - next_frame_time);
            next_frame_time = now;
        }
    }
}

/// Run a session on a simulated clock: `frames` frames, `frame_ms` apart,
/// starting at zero. Returns the last snapshot.
pub fn run_headless(config: EngineConfig, frames: u32, frame_ms: f64) -> FrameSnapshot {
    let mut engine = GalleryEngine::new(config);
    engine.queue_command(InputCommand::StartSession);

    let mut snapshot = FrameSnapshot::default();
    for frame in 0..frames {
        snapshot = engine.frame(f64::from(frame) * frame_ms);
    }
    let counters = engine.counters();
    log::info!(
        "headless run: {} frames, {} spawned, {} exited, {} live",
        frames,
        counters.spawned,
        counters.exited_bounds,
        counters.live()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::config::SceneConfig;
    use gallery_core::enums::SessionPhase;
    use gallery_core::types::Pose;

    fn frame_ms() -> f64 {
        1000.0 / f64::from(DISPLAY_REFRESH_HZ)
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Input(InputCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::TriggerStart(Pose::IDENTITY))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Input(InputCommand::StartSession)
        ));
        assert!(matches!(commands[1], GameLoopCommand::TriggerStart(_)));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_duration_constant() {
        // 90Hz = 11.111ms per frame
        let expected_nanos = 1_000_000_000u64 / 90;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_headless_run_spawns_on_schedule() {
        // 20 s at 90Hz: spawns near 0, 5, 10, 15 s.
        let snapshot = run_headless(EngineConfig::default(), 1800, frame_ms());
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.counters.spawned, 4);
        // A target needs 901 frames (~10 s) to cross the play area.
        assert_eq!(snapshot.counters.exited_bounds, 2);
        assert_eq!(snapshot.targets.len(), 2);
    }

    #[test]
    fn test_headless_zero_frames_is_idle() {
        let snapshot = run_headless(EngineConfig::default(), 0, frame_ms());
        assert_eq!(snapshot.phase, SessionPhase::Idle);
        assert!(snapshot.targets.is_empty());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let config = EngineConfig {
            scene: SceneConfig {
                spawn_interval_ms: 10.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let snapshot = run_headless(config, 100, frame_ms());
        assert!(snapshot.targets.len() > 10);

        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_live_loop_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(EngineConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::Input(InputCommand::StartSession))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));

        let snapshot = latest.lock().unwrap().clone().expect("loop has run");
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.counters.spawned, 1);

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_trigger_after_connect_in_same_drain_hits() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(EngineConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::Input(InputCommand::StartSession))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));

        let snapshot = latest.lock().unwrap().clone().expect("loop has run");
        let target = &snapshot.targets[0];
        // Lead the aim by a couple of frames of travel.
        let mut aim = target.position;
        aim.x += 0.2 * target.direction;
        let pose = Pose::looking_at(Pose::IDENTITY.position, aim);

        tx.send(GameLoopCommand::Input(InputCommand::ConnectController))
            .unwrap();
        tx.send(GameLoopCommand::TriggerStart(pose)).unwrap();
        std::thread::sleep(Duration::from_millis(100));

        let snapshot = latest.lock().unwrap().clone().expect("loop has run");
        assert!(snapshot.controller_connected);
        assert_eq!(snapshot.counters.hit_by_controller, 1);
        assert!(snapshot.targets.is_empty());

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }
}
