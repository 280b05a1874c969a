//! Infrastructure adapters for digicalc.
//!
//! This crate implements the ports defined in
//! `digicalc-core::application::ports` and loads key-map files.

pub mod display;
pub mod keymap;

// Re-export commonly used adapters
pub use display::{MemoryDisplay, SurfaceCall, Transcript, TranscriptDisplay};
pub use keymap::{KeyMap, KeyMapError};
