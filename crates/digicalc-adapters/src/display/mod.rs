//! Display surface adapters.

mod memory;
mod transcript;

pub use memory::MemoryDisplay;
pub use transcript::{SurfaceCall, Transcript, TranscriptDisplay};
