//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and render the
//! outcome. No calculator rules live here.

pub mod completions;
pub mod config;
pub mod eval;
pub mod init;
pub mod keys;
pub mod pad;
