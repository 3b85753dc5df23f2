//! Tracing hooks for buffered stages and element-selection misses.
//!
//! Compiled to no-ops without the `tracing` feature. With it, events are still
//! gated by `EngineConfig::trace_operators`.

use sequery_core::config::EngineConfig;

#[cfg(feature = "tracing")]
pub fn emit_materialized(config: &EngineConfig, op: &'static str, rows: usize) {
    if config.trace_operators {
        tracing::trace!(op, rows, "stage materialized");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_materialized(_config: &EngineConfig, _op: &'static str, _rows: usize) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn emit_miss(config: &EngineConfig, err: &crate::traits::OpError) {
    if config.trace_operators {
        tracing::debug!(op = err.op(), error = %err, "element selection failed");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_miss(_config: &EngineConfig, _err: &crate::traits::OpError) { /* no-op */
}
