// src/progress.rs
/// Lightweight progress reporting for a normalization run.
/// Frontends implement this to surface per-column status.
pub trait Progress {
    /// Called at the start with the number of physical columns to process.
    /// Skipped when a caller pattern fails to build.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one physical column has been rewritten.
    fn column_done(&mut self, _column: &str, _resolved: usize, _rows: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
