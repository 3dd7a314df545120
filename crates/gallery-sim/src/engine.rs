//! Gallery engine: drives one frame of the scene.
//!
//! `GalleryEngine` owns the scene graph, the target registry, the spawn
//! gate and the input state. Each `frame` applies queued input, then runs
//! spawn → advance/prune → gaze hit test, and returns a `FrameSnapshot`
//! for the renderer. Controller triggers are hit-tested synchronously when
//! they arrive. Completely headless, deterministic for a given seed.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gallery_core::commands::InputCommand;
use gallery_core::config::SceneConfig;
use gallery_core::enums::*;
use gallery_core::events::TargetEvent;
use gallery_core::state::{FrameSnapshot, LifecycleCounters};
use gallery_core::types::{FrameTime, Pose, Ray, TargetId};

use crate::assets::AssetLibrary;
use crate::registry::TargetRegistry;
use crate::scene::SceneGraph;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::spawner::Spawner;
use crate::world_setup;

/// Configuration for starting a new engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same spawn sides and colours.
    pub seed: u64,
    pub scene: SceneConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scene: SceneConfig::default(),
        }
    }
}

/// The engine. Owns every piece of mutable scene state.
pub struct GalleryEngine {
    scene: SceneGraph,
    registry: TargetRegistry,
    spawner: Spawner,
    assets: AssetLibrary,
    config: SceneConfig,
    rng: ChaCha8Rng,
    time: FrameTime,
    phase: SessionPhase,
    camera: Pose,
    controller_connected: bool,
    /// A controller trigger already removed a target since the last frame.
    controller_hit_pending: bool,
    gaze_enabled: bool,
    next_target_id: u32,
    command_queue: VecDeque<InputCommand>,
    target_events: Vec<TargetEvent>,
    counters: LifecycleCounters,
}

impl GalleryEngine {
    pub fn new(config: EngineConfig) -> Self {
        let scene_config = config.scene;
        Self {
            scene: SceneGraph::new(scene_config.pool_capacity),
            registry: TargetRegistry::new(),
            spawner: Spawner::new(scene_config.spawn_interval_ms),
            assets: AssetLibrary::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            time: FrameTime::default(),
            phase: SessionPhase::default(),
            camera: Pose::IDENTITY,
            controller_connected: false,
            controller_hit_pending: false,
            gaze_enabled: scene_config.gaze_enabled,
            next_target_id: 0,
            command_queue: VecDeque::new(),
            target_events: Vec::new(),
            counters: LifecycleCounters::default(),
            config: scene_config,
        }
    }

    /// Queue an input command for the start of the next frame.
    pub fn queue_command(&mut self, command: InputCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = InputCommand>) {
        self.command_queue.extend(commands);
    }

    /// Run one frame at host time `now_ms` and return the resulting snapshot.
    pub fn frame(&mut self, now_ms: f64) -> FrameSnapshot {
        let now_ms = self.monotonic(now_ms);
        self.time.advance(now_ms);
        self.process_commands();

        if self.phase == SessionPhase::Active {
            self.run_systems(now_ms);
        }
        log::trace!(
            "frame {} at {:.1}ms: {} live targets",
            self.time.frame,
            now_ms,
            self.registry.len()
        );

        self.controller_hit_pending = false;
        let target_events = std::mem::take(&mut self.target_events);
        let scene_events = self.scene.drain_events();
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.scene,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                counters: self.counters,
                gaze_enabled: self.gaze_enabled,
                controller_connected: self.controller_connected,
            },
            scene_events,
            target_events,
        )
    }

    /// The controller's trigger action started with the controller at
    /// `pose`. Casts the controller ray right away and removes the nearest
    /// struck target, if any.
    ///
    /// Input queued before the trigger is applied first. Only one trigger
    /// removal counts toward each frame; later ones are ignored until the
    /// next `frame` call.
    pub fn controller_trigger_start(&mut self, pose: Pose) -> Option<TargetId> {
        self.process_commands();
        if self.controller_hit_pending {
            log::debug!("trigger ignored: controller already hit this frame");
            return None;
        }
        if self.phase != SessionPhase::Active {
            log::debug!("trigger ignored: session is {:?}", self.phase);
            return None;
        }
        if !self.controller_connected {
            log::debug!("trigger ignored: no controller connected");
            return None;
        }
        let ray = Ray::from_pose(&pose);
        let hit = self.resolve_and_remove(&ray, RaySource::Controller);
        self.controller_hit_pending = hit.is_some();
        hit
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn counters(&self) -> LifecycleCounters {
        self.counters
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> Pose {
        self.camera
    }

    /// Read-only view of the live targets.
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Read-only view of the scene graph.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Spawn a target at a fixed point, bypassing the spawn gate (for tests).
    #[cfg(test)]
    pub fn spawn_test_target(
        &mut self,
        kind: TargetKind,
        point: crate::target::SpawnPoint,
    ) -> TargetId {
        let id = TargetId(self.next_target_id);
        let config = SceneConfig {
            target_kind: kind,
            ..self.config.clone()
        };
        let target = world_setup::spawn_target(
            &mut self.scene,
            &self.assets,
            &mut self.rng,
            &config,
            id,
            point,
        )
        .expect("test target should spawn");
        self.next_target_id += 1;
        self.counters.spawned += 1;
        self.registry.push(target);
        id
    }

    /// Timestamps must not go backwards; a regressing one is held.
    fn monotonic(&self, now_ms: f64) -> f64 {
        if self.time.frame > 0 && now_ms < self.time.now_ms {
            log::warn!(
                "frame timestamp went backwards ({:.3}ms < {:.3}ms); holding",
                now_ms,
                self.time.now_ms
            );
            return self.time.now_ms;
        }
        now_ms
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: InputCommand) {
        match command {
            InputCommand::StartSession => {
                self.registry.clear(&mut self.scene);
                self.spawner.reset();
                self.counters = LifecycleCounters::default();
                self.phase = SessionPhase::Active;
                log::info!("session started at {:.1}ms", self.time.now_ms);
            }
            InputCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                    log::info!("session paused");
                }
            }
            InputCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                    log::info!("session resumed");
                }
            }
            InputCommand::SetCameraPose { pose } => {
                self.camera = pose;
            }
            InputCommand::ConnectController => {
                self.controller_connected = true;
                log::info!("controller connected");
            }
            InputCommand::DisconnectController => {
                self.controller_connected = false;
                log::info!("controller disconnected");
            }
            InputCommand::SetGazeEnabled { enabled } => {
                self.gaze_enabled = enabled;
            }
            InputCommand::AssetLoaded { asset } => {
                self.assets.mark_loaded(asset);
            }
        }
    }

    /// Run the frame's systems in their fixed order.
    fn run_systems(&mut self, now_ms: f64) {
        // 1. Spawn gate
        self.spawn_if_due(now_ms);

        // 2. Advance + prune out-of-bounds targets
        let exited = self
            .registry
            .prune_and_advance(&mut self.scene, self.config.bounds_limit);
        for id in exited {
            self.record_removal(id, RemovalCause::OutOfBounds);
        }

        // 3. Gaze ray against what survived the prune
        if self.gaze_enabled {
            let ray = Ray::from_pose(&self.camera);
            self.resolve_and_remove(&ray, RaySource::Gaze);
        }
    }

    fn spawn_if_due(&mut self, now_ms: f64) {
        let id = TargetId(self.next_target_id);
        let scene = &mut self.scene;
        let assets = &self.assets;
        let rng = &mut self.rng;
        let config = &self.config;

        let result = self.spawner.maybe_spawn(now_ms, || {
            let point = systems::spawner::choose_spawn_point(rng, config);
            world_setup::spawn_target(scene, assets, rng, config, id, point)
        });

        match result {
            Ok(Some(target)) => {
                self.next_target_id += 1;
                self.counters.spawned += 1;
                log::debug!(
                    "spawned {:?} {:?} at x={:.1} heading {:+}",
                    target.kind(),
                    id,
                    target.position().x,
                    target.direction()
                );
                self.target_events.push(TargetEvent::Spawned {
                    id,
                    kind: target.kind(),
                    x: target.position().x,
                    direction: target.direction(),
                });
                self.registry.push(target);
            }
            Ok(None) => {}
            Err(err) => {
                self.counters.spawns_skipped += 1;
                log::debug!("spawn skipped at {now_ms:.1}ms: {err}");
                self.target_events.push(TargetEvent::SpawnSkipped {
                    reason: err.to_string(),
                });
            }
        }
    }

    fn resolve_and_remove(&mut self, ray: &Ray, source: RaySource) -> Option<TargetId> {
        let live = self.registry.live_handles();
        let hit = systems::hit_resolver::resolve(&self.scene, ray, &live)?;
        let id = self.registry.remove_by_handle(&mut self.scene, hit.object)?;
        log::debug!("{source:?} ray hit {id:?} at {:.2}", hit.distance);
        self.record_removal(id, RemovalCause::Hit(source));
        Some(id)
    }

    fn record_removal(&mut self, id: TargetId, cause: RemovalCause) {
        self.counters.record_removal(cause);
        self.target_events.push(TargetEvent::Removed { id, cause });
    }
}
