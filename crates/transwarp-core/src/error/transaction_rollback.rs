use super::Error;

#[derive(Debug)]
pub(super) struct TransactionRollback;

impl std::error::Error for TransactionRollback {}

impl core::fmt::Display for TransactionRollback {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "transaction rolled back by a nested scope")
    }
}

impl Error {
    /// Returned by the outermost commit when a nested transaction scope
    /// already exited with a failure; the work was rolled back instead.
    pub fn transaction_rollback() -> Error {
        Error::from(super::ErrorKind::TransactionRollback(TransactionRollback))
    }

    /// Returns `true` if this error reports a rollback forced by a nested
    /// scope.
    pub fn is_transaction_rollback(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TransactionRollback(_))
    }
}
