//! Core types and definitions for the gallery scene.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, snapshots, events, constants, configuration and
//! errors. It has no dependency on any runtime or renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
