pub mod config;
pub mod control; // Knobs, buttons, tab strips and the chain that layers them
pub mod engine; // Touch routing, voice allocation and startup
pub mod error;
pub mod param;
pub mod synth; // Voice bank, audio-side voices and effects
pub mod touch; // Contacts, batches, registry and the startup barrier

pub use config::SurfaceConfig;
pub use engine::{Surface, TouchEngine};
pub use error::{Error, Result};

/// Most contacts a single batch can carry.
pub const MAX_CONTACTS: usize = 16;
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
