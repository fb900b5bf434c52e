mod value;
pub(crate) use value::Value;

use rusqlite::{Connection as RusqliteConnection, ErrorCode};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use transwarp_core::{
    driver::{
        operation::{ExecSql, Operation, QuerySql, Transaction},
        Capability, Driver, Response,
    },
    Error, Result, Row,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        match url.path() {
            ":memory:" => Ok(Self::InMemory),
            "" => Err(Error::invalid_connection_url(format!(
                "connection URL does not name a database file; url={url_str}"
            ))),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }

    /// Create an in-memory SQLite database.
    ///
    /// Every connection opened through this driver sees its own, empty
    /// database.
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn connect(&self) -> Result<Box<dyn transwarp_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        tracing::debug!(url = %self.url(), "opened sqlite connection");
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::connection_failed)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::connection_failed)?;
        Ok(Self { connection })
    }

    fn query(&mut self, op: QuerySql) -> Result<Response> {
        let mut stmt = self.connection.prepare(&op.sql).map_err(map_err)?;
        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(map_err)?;

        let mut ret = vec![];

        while op.limit.map_or(true, |limit| ret.len() < limit) {
            let Some(row) = rows.next().map_err(map_err)? else {
                break;
            };

            let mut record = Row::new();

            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(map_err)?;
                record.set(column.as_str(), Value::from_sql(value)?.into_inner());
            }

            ret.push(record);
        }

        Ok(Response::values(ret))
    }

    fn execute(&mut self, op: ExecSql) -> Result<Response> {
        let mut stmt = self.connection.prepare(&op.sql).map_err(map_err)?;
        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(map_err)?;

        Ok(Response::count(count as u64))
    }

    fn transaction(&mut self, op: Transaction) -> Result<Response> {
        let sql = match op {
            Transaction::Start => "BEGIN",
            // Nothing was started on this connection; there is nothing to end.
            Transaction::Commit | Transaction::Rollback if self.connection.is_autocommit() => {
                return Ok(Response::count(0));
            }
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        };

        self.connection.execute_batch(sql).map_err(map_err)?;
        Ok(Response::count(0))
    }
}

impl transwarp_core::driver::Connection for Connection {
    fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query(op),
            Operation::ExecSql(op) => self.execute(op),
            Operation::Transaction(op) => self.transaction(op),
        }
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.connection
            .close()
            .map_err(|(_, err)| Error::driver_operation_failed(err))
    }
}

fn map_err(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => Error::integrity_violation(err),
        _ => Error::driver_operation_failed(err),
    }
}
