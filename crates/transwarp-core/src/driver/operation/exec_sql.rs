use super::Operation;
use crate::Value;

#[derive(Debug, Clone)]
pub struct ExecSql {
    /// The SQL statement to execute
    pub sql: String,

    /// Positional parameters, in placeholder order
    pub params: Vec<Value>,
}

impl From<ExecSql> for Operation {
    fn from(value: ExecSql) -> Self {
        Self::ExecSql(value)
    }
}
