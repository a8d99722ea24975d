// src/progress.rs
/// Lightweight progress reporting used by long-running operations (price scans).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one item has been priced.
    fn item_done(&mut self, _id: u32, _name: &str) {}

    /// Called when an item had to be skipped.
    fn item_failed(&mut self, _id: u32, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
