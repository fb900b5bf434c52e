use super::Operation;

/// Physical transaction control issued against a connection.
///
/// Nested transaction scopes never reach the driver: only the outermost
/// scope issues `Start`, and only the exit that brings the nesting depth back
/// to zero issues `Commit` or `Rollback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a transaction
    Start,

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}
