use std::fmt::Debug;

/// Sink for per-step engine diagnostics.
///
/// Only called when the attached settings have `debug` enabled.
pub trait StepLog {
    fn log(&self, tag: &str, values: &[&dyn Debug]);
}

/// Emits diagnostics as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStepLog;

impl StepLog for TracingStepLog {
    fn log(&self, tag: &str, values: &[&dyn Debug]) {
        tracing::debug!(target: "kwexpand::engine", tag, ?values);
    }
}
