//! Low-level building blocks of dispatch.

mod registry;

pub use registry::bench_registry;
