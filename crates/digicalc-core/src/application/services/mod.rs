//! Application services - orchestrate use cases.
//!
//! The keypad has a single use case: feed key presses into a session bound
//! to a display surface.

pub mod session;

pub use session::{CalculatorSession, DEFAULT_ERROR_MARKER, KeyOutcome, SessionOptions};
