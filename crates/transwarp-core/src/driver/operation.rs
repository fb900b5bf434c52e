mod exec_sql;
pub use exec_sql::ExecSql;

mod query_sql;
pub use query_sql::QuerySql;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a statement that returns rows.
    QuerySql(QuerySql),

    /// Run a statement that returns an affected-row count.
    ExecSql(ExecSql),

    /// Transaction control.
    Transaction(Transaction),
}

impl Operation {
    /// The SQL text carried by the operation, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Operation::QuerySql(op) => Some(&op.sql),
            Operation::ExecSql(op) => Some(&op.sql),
            Operation::Transaction(_) => None,
        }
    }

    pub fn is_query_sql(&self) -> bool {
        matches!(self, Operation::QuerySql(_))
    }

    pub fn is_exec_sql(&self) -> bool {
        matches!(self, Operation::ExecSql(_))
    }

    pub fn is_transaction_start(&self) -> bool {
        matches!(self, Operation::Transaction(Transaction::Start))
    }

    pub fn is_transaction_commit(&self) -> bool {
        matches!(self, Operation::Transaction(Transaction::Commit))
    }

    pub fn is_transaction_rollback(&self) -> bool {
        matches!(self, Operation::Transaction(Transaction::Rollback))
    }
}
