//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `digicalc-adapters` and the
//! terminal keypad in `digicalc-cli` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DisplaySurface`: shows the buffer and result text
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `CalculatorSession::press` / `load_buffer`

pub mod output;

pub use output::DisplaySurface;
