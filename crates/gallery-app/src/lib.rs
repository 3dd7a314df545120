//! Headless host for the gallery engine.
//!
//! Runs the engine on its own thread at display rate and exposes a small
//! control surface for starting it, feeding it input and polling snapshots.

pub mod control;
pub mod game_loop;
pub mod state;

pub use gallery_core as core;
