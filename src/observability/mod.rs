//! Observability infrastructure.
//!
//! Provides structured tracing; the per-run counters live in
//! [`crate::pipeline::RunSummary`].

pub mod tracing;
