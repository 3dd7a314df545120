//! Input commands sent from the host to the engine.
//!
//! Commands are queued and applied at the start of the next frame. The
//! controller trigger is not a command: it is delivered synchronously to
//! `GalleryEngine::controller_trigger_start` when it happens.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Pose;

/// All host-side actions the engine understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputCommand {
    // --- Session ---
    /// Start (or restart) spawning. Clears any live targets.
    StartSession,
    /// Freeze spawning, motion and hit tests.
    Pause,
    /// Resume a paused session.
    Resume,

    // --- Viewer / devices ---
    /// Update the head pose the gaze ray is cast from.
    SetCameraPose { pose: Pose },
    /// A tracked controller became available.
    ConnectController,
    /// The controller was lost; trigger events are ignored until reconnect.
    DisconnectController,
    /// Toggle hands-free gaze hit testing.
    SetGazeEnabled { enabled: bool },

    // --- Assets ---
    /// The host finished loading an asset some target kinds need.
    AssetLoaded { asset: AssetKind },
}
