use super::Error;

/// Error when a physical commit or rollback fails.
///
/// Always used as context around the driver error that caused it, so the
/// original failure stays reachable through [`Error::chain`].
#[derive(Debug)]
pub(super) struct TransactionFailed {
    operation: &'static str,
}

impl std::error::Error for TransactionFailed {}

impl core::fmt::Display for TransactionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "transaction {} failed", self.operation)
    }
}

impl Error {
    /// Creates a transaction failure for `operation` (`"commit"`,
    /// `"rollback"`, `"begin"`).
    pub fn transaction_failed(operation: &'static str) -> Error {
        Error::from(super::ErrorKind::TransactionFailed(TransactionFailed {
            operation,
        }))
    }

    /// Returns `true` if this error is a transaction failure.
    pub fn is_transaction_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TransactionFailed(_))
    }
}
