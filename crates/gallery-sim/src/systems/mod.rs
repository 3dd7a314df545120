//! Per-frame systems.
//!
//! Systems do not own scene state: the registry and scene graph are passed
//! in by the engine, which also fixes the order they run in.

pub mod hit_resolver;
pub mod snapshot;
pub mod spawner;
