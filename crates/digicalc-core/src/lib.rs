//! digicalc core - keypad calculator logic behind a display-surface port.
//!
//! This crate provides the domain, evaluator and application layers of the
//! digicalc keypad, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   digicalc-cli (terminal keypad, eval)  │
//! │        (Implements Driving Ports)       │
//! └──────────────────┬──────────────────────┘
//!                    │ presses keys
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Services             │
//! │         (CalculatorSession)             │
//! └───────┬──────────────────────┬──────────┘
//!         │ uses                 │ renders through
//!         ▼                      ▼
//! ┌────────────────────┐ ┌──────────────────┐
//! │ Domain + Evaluator │ │  DisplaySurface  │
//! │ (transition, Expr) │ │   (port trait)   │
//! └────────────────────┘ └────────┬─────────┘
//!                                 │ implemented by
//!                                 ▼
//!                   ┌──────────────────────────┐
//!                   │    digicalc-adapters     │
//!                   │ (MemoryDisplay, KeyMap)  │
//!                   └──────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use digicalc_core::prelude::*;
//!
//! # fn run(display: Box<dyn DisplaySurface>) -> CalcResult<()> {
//! let mut session = CalculatorSession::new(display);
//! for key in Key::parse_script("3 + 4 × 2 =")? {
//!     session.press(key)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod evaluator;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CalculatorSession, KeyOutcome, SessionOptions, ports::DisplaySurface,
    };
    pub use crate::domain::{
        Digit, EraseBehavior, InputState, Key, Mode, Operator, ResultFormat,
    };
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::evaluator::{EvaluationError, Evaluator, OperatorTable};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
