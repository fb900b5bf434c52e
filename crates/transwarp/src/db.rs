mod builder;
pub use builder::Builder;

mod connect;
pub use connect::ConnectOptions;

mod context;
pub use context::ConnectionScope;

mod query;

mod transaction;
pub use transaction::Transaction;

use crate::schema::Registry;

use transwarp_core::{
    driver::{Driver, Operation, Response},
    Result,
};

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    /// Identifies this database in each thread's connection contexts.
    id: usize,
    driver: Box<dyn Driver>,
    registry: Registry,
}

/// A database handle.
///
/// `Db` is cheap to clone and can be shared between threads. It never holds
/// a physical connection itself: each thread using it gets its own
/// connection context, opened lazily on first use and closed when the
/// outermost [`ConnectionScope`] on that thread ends. Clones share the same
/// context on a given thread.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

fn next_db_id() -> usize {
    static NEXT_DB_ID: AtomicUsize = AtomicUsize::new(0);

    NEXT_DB_ID.fetch_add(1, Ordering::Relaxed)
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(driver: Box<dyn Driver>, registry: Registry) -> Db {
        Db {
            shared: Arc::new(Shared {
                id: next_db_id(),
                driver,
                registry,
            }),
        }
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    pub(crate) fn id(&self) -> usize {
        self.shared.id
    }

    /// Current transaction nesting depth on this thread. `0` outside of any
    /// transaction.
    pub fn transaction_depth(&self) -> usize {
        context::transaction_depth(self.id())
    }

    /// Whether a connection scope is active on this thread.
    pub fn in_connection_scope(&self) -> bool {
        context::is_open(self.id())
    }

    /// Whether this thread currently holds a physical connection.
    pub fn is_connected(&self) -> bool {
        context::is_connected(self.id())
    }

    /// Creates the tables of registered models, skipping tables that already
    /// exist.
    ///
    /// `tables` selects models by table name; `None` creates every
    /// registered model in registration order.
    pub fn create_schema(&self, tables: Option<&[&str]>) -> Result<()> {
        self.create_schema_with(tables, true)
    }

    /// Like [`create_schema`](Self::create_schema), but `check_first`
    /// chooses between `create table if not exists` and a plain
    /// `create table`, which fails for existing tables.
    ///
    /// Every requested table is looked up before any statement runs.
    pub fn create_schema_with(&self, tables: Option<&[&str]>, check_first: bool) -> Result<()> {
        let schemas = match tables {
            Some(tables) => tables
                .iter()
                .map(|table| self.registry().get(table).cloned())
                .collect::<Result<Vec<_>>>()?,
            None => self.registry().iter().cloned().collect(),
        };

        self.with_connection(|db| {
            for schema in &schemas {
                tracing::debug!(table = schema.table(), "create table");
                let sql = if check_first {
                    schema.check_sql()
                } else {
                    schema.sql()
                };
                db.execute(sql, &[])?;
            }
            Ok(())
        })
    }

    /// Runs `op` on this thread's connection, opening it if needed.
    ///
    /// The caller must hold a [`ConnectionScope`].
    fn exec(&self, op: Operation) -> Result<Response> {
        context::exec(self.id(), self.driver(), op)
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("url", &self.driver().url())
            .field("models", &self.registry().len())
            .field("connected", &self.is_connected())
            .finish()
    }
}
