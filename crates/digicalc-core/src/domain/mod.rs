// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for digicalc.
//!
//! This module contains the keypad's pure logic: keys, the input buffer, the
//! input state and the transition function between states. Evaluation lives
//! in `crate::evaluator`; rendering is reached only through the
//! `DisplaySurface` port of the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No terminal, filesystem, or external calls
//! - **Value semantics**: `InputState` is Clone + PartialEq; transitions return
//!   a new state instead of mutating shared flags
//!
// Public API - what the world sees
pub mod buffer;
pub mod error;
pub mod format;
pub mod key;
pub mod machine;
pub mod state;

// Re-exports for convenience
pub use buffer::{FACTORIAL_SYMBOL, InputBuffer};
pub use error::{DomainError, ErrorCategory};
pub use format::ResultFormat;
pub use key::{Digit, Key, Operator};
pub use machine::{BufferEdit, Effect, EraseBehavior, EvalPath, Transition, transition};
pub use state::{InputState, Mode};
