//! Observability for gridtrace.
//! `tracing` crate with an `EnvFilter` read from `GRIDTRACE_LOG`.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_default};
