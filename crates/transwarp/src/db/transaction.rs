use super::{context, ConnectionScope, Db};

use transwarp_core::{driver::operation, Error, Result};

/// A transaction scope on the current thread.
///
/// Scopes nest: only the outermost one issues `BEGIN`, and only the exit
/// that brings the depth back to zero commits or rolls back. A scope that is
/// dropped without [`commit`](Self::commit) or [`rollback`](Self::rollback)
/// exits as failed, so an early return or a panic rolls the work back.
///
/// If any nested scope fails, the outermost commit rolls back instead and
/// returns an error for which [`Error::is_transaction_rollback`] is true.
#[derive(Debug)]
#[must_use = "a transaction that is dropped is rolled back"]
pub struct Transaction {
    db: Db,

    /// Whether commit or rollback has been called.
    done: bool,

    /// Dropped after the transaction has ended, so the connection closes
    /// only once the final commit or rollback ran.
    _scope: ConnectionScope,
}

impl Db {
    /// Begins a transaction, or joins the one already active on this thread.
    pub fn begin(&self) -> Result<Transaction> {
        let scope = self.connection();
        let depth = context::enter_transaction(self.id())?;

        if depth == 1 {
            tracing::debug!("begin transaction");

            if let Err(err) = self.exec(operation::Transaction::Start.into()) {
                // Leave the context as it was before this call.
                if let Err(exit) = context::exit_transaction(self.id(), false) {
                    tracing::warn!(error = %exit, "failed to reset transaction depth");
                }
                return Err(err);
            }
        } else {
            tracing::debug!(depth, "join existing transaction");
        }

        Ok(Transaction {
            db: self.clone(),
            done: false,
            _scope: scope,
        })
    }

    /// Runs `f` in a transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back if it
    /// returns `Err`, in which case that error is returned unchanged.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Db) -> Result<T>,
    {
        let tx = self.begin()?;

        match f(self) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback() {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Commits the physical transaction. On failure, rolls back once and
    /// returns the commit error.
    pub(super) fn commit_or_rollback(&self) -> Result<()> {
        tracing::debug!("commit");

        let Err(err) = self.exec(operation::Transaction::Commit.into()) else {
            return Ok(());
        };

        tracing::warn!(error = %err, "commit failed; rolling back");

        if let Err(rollback) = self.exec(operation::Transaction::Rollback.into()) {
            tracing::warn!(error = %rollback, "rollback after failed commit failed");
        }

        Err(err.context(Error::transaction_failed("commit")))
    }

    fn rollback_physical(&self) -> Result<()> {
        tracing::debug!("rollback");

        self.exec(operation::Transaction::Rollback.into())
            .map(|_| ())
            .map_err(|err| err.context(Error::transaction_failed("rollback")))
    }
}

impl Transaction {
    /// Exits this scope normally. Commits if this is the outermost scope.
    pub fn commit(mut self) -> Result<()> {
        self.finish(true)
    }

    /// Exits this scope as failed. Rolls back if this is the outermost
    /// scope; otherwise the outermost scope will roll back.
    pub fn rollback(mut self) -> Result<()> {
        self.finish(false)
    }

    fn finish(&mut self, success: bool) -> Result<()> {
        self.done = true;

        let exit = context::exit_transaction(self.db.id(), !success)?;

        if exit.depth > 0 {
            tracing::debug!(depth = exit.depth, success, "leave nested transaction");
            return Ok(());
        }

        match (success, exit.rollback_only) {
            (true, false) => self.db.commit_or_rollback(),
            (true, true) => {
                tracing::debug!("nested transaction failed; rolling back instead of commit");
                self.db.rollback_physical()?;
                Err(Error::transaction_rollback())
            }
            (false, _) => self.db.rollback_physical(),
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        if let Err(err) = self.finish(false) {
            tracing::warn!(error = %err, "failed to roll back abandoned transaction");
        }
    }
}
