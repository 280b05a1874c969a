//! Application layer for digicalc.
//!
//! This layer contains:
//! - **Services**: the `CalculatorSession` use case
//! - **Ports**: the `DisplaySurface` trait implemented by adapters
//! - **Errors**: display-surface failures
//!
//! Keypad rules live in `crate::domain` and arithmetic in
//! `crate::evaluator`; the session only sequences them.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CalculatorSession, DEFAULT_ERROR_MARKER, KeyOutcome, SessionOptions};

// Re-export port traits (for adapter implementation)
pub use ports::DisplaySurface;

pub use error::ApplicationError;
