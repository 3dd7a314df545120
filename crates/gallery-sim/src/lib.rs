//! Target lifecycle and hit-testing engine for the gallery scene.
//!
//! Owns the scene graph, spawns targets on a timer, moves them each frame,
//! prunes the ones that leave the play area and removes the ones struck by
//! the gaze or controller ray. Produces a `FrameSnapshot` per frame.

pub mod assets;
pub mod engine;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod target;
pub mod world_setup;

pub use gallery_core as core;
pub use engine::{EngineConfig, GalleryEngine};
