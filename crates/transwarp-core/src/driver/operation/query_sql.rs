use super::Operation;
use crate::Value;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL query to execute
    pub sql: String,

    /// Positional parameters, in placeholder order
    pub params: Vec<Value>,

    /// When set, the driver stops reading rows once this many are returned
    pub limit: Option<usize>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
