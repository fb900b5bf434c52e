use super::{context, Db};

use transwarp_core::{
    driver::operation::{ExecSql, QuerySql},
    Error, Result, Row, Value,
};
use transwarp_sql::{rewrite_placeholders, Serializer, Statement};

/// Query and execution functions.
///
/// SQL text uses `?` for every parameter; it is translated to the driver's
/// own syntax before it runs. Each function runs inside a connection scope,
/// entering a temporary one if the thread has none.
impl Db {
    /// Runs a query and returns every row.
    pub fn select_many(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.query(sql, params, None)
    }

    /// Runs a query and returns its first row, or `None` if there is none.
    ///
    /// Rows after the first are never read.
    pub fn select_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        Ok(self.query(sql, params, Some(1))?.into_iter().next())
    }

    /// Runs a query that returns a single column and returns the value of
    /// its first row. Returns [`Value::Null`] if there are no rows.
    pub fn select_scalar(&self, sql: &str, params: &[Value]) -> Result<Value> {
        let Some(row) = self.select_one(sql, params)? else {
            return Ok(Value::Null);
        };

        if row.len() != 1 {
            return Err(Error::multi_column(row.len()));
        }

        Ok(row.into_values().into_iter().next().unwrap_or_default())
    }

    /// [`select_scalar`](Self::select_scalar) read as an integer, e.g. for
    /// `select count(*) ...`.
    pub fn select_int(&self, sql: &str, params: &[Value]) -> Result<i64> {
        match self.select_scalar(sql, params)? {
            Value::I64(value) => Ok(value),
            value => Err(Error::type_conversion(value, "i64")),
        }
    }

    /// Runs an insert, update, delete or DDL statement and returns the number
    /// of affected rows.
    ///
    /// Outside of a transaction the statement is committed right away.
    /// Inside one, the commit is left to the outermost transaction scope.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let _scope = self.connection();
        let sql = self.prepare(sql, params)?;

        tracing::debug!(%sql, ?params, "execute");

        let count = self
            .exec(
                ExecSql {
                    sql,
                    params: params.to_vec(),
                }
                .into(),
            )?
            .into_count()?;

        if context::transaction_depth(self.id()) == 0 {
            self.commit_or_rollback()?;
        }

        Ok(count)
    }

    /// Inserts `row` into `table`, one column per key.
    pub fn insert_row(&self, table: &str, row: &Row) -> Result<u64> {
        let sql = Serializer::new().serialize(&Statement::insert(table, row.keys()));
        let params = row.values().cloned().collect::<Vec<_>>();
        self.execute(&sql, &params)
    }

    fn query(&self, sql: &str, params: &[Value], limit: Option<usize>) -> Result<Vec<Row>> {
        let _scope = self.connection();
        let sql = self.prepare(sql, params)?;

        tracing::debug!(%sql, ?params, ?limit, "select");

        self.exec(
            QuerySql {
                sql,
                params: params.to_vec(),
                limit,
            }
            .into(),
        )?
        .into_values()
    }

    fn prepare(&self, sql: &str, params: &[Value]) -> Result<String> {
        rewrite_placeholders(
            sql,
            self.driver().capability().placeholder,
            params.len(),
        )
    }
}
