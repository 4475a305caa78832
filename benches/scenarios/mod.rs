//! Real-world scenario benchmarks.
//!
//! These drive the engine the way a player does: several fingers landing,
//! sliding and lifting, with the reference synth on the other end.

mod bursts;
mod render;

pub use bursts::bench_bursts;
pub use render::bench_render;
