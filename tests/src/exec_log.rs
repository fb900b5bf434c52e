use crate::logging_driver::{DriverOp, Recorder};
use std::sync::{atomic::Ordering, Arc};
use transwarp_core::driver::Operation;

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    recorder: Arc<Recorder>,
}

impl ExecLog {
    pub(crate) fn new(recorder: Arc<Recorder>) -> Self {
        Self { recorder }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.recorder.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.recorder
            .ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    /// Physical `BEGIN`s issued.
    pub fn begins(&self) -> usize {
        self.count(Operation::is_transaction_start)
    }

    /// Physical commits attempted, including auto-commits.
    pub fn commits(&self) -> usize {
        self.count(Operation::is_transaction_commit)
    }

    pub fn rollbacks(&self) -> usize {
        self.count(Operation::is_transaction_rollback)
    }

    /// SQL text of every statement run, in order.
    pub fn statements(&self) -> Vec<String> {
        self.recorder
            .ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| op.operation.sql().map(str::to_string))
            .collect()
    }

    /// Physical connections opened.
    pub fn connects(&self) -> usize {
        self.recorder.connects.load(Ordering::SeqCst)
    }

    /// Physical connections closed.
    pub fn closes(&self) -> usize {
        self.recorder.closes.load(Ordering::SeqCst)
    }

    /// Makes the next physical commit fail without reaching the database.
    pub fn fail_next_commit(&self) {
        self.recorder.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Clear the log and the connection counters
    pub fn clear(&self) {
        self.recorder.ops.lock().unwrap().clear();
        self.recorder.connects.store(0, Ordering::SeqCst);
        self.recorder.closes.store(0, Ordering::SeqCst);
    }

    /// Get access to all operations for custom assertions
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[DriverOp]) -> R,
    {
        let ops = self.recorder.ops.lock().unwrap();
        f(&ops)
    }
}
