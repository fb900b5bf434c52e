use super::Db;

use transwarp_core::{
    driver::{Connection, Driver, Operation, Response},
    Error, Result,
};

use std::{cell::RefCell, collections::HashMap, marker::PhantomData};

thread_local! {
    /// Connection contexts of the current thread, keyed by database id.
    static CONTEXTS: RefCell<HashMap<usize, Context>> = RefCell::new(HashMap::new());
}

/// Per-thread state of one database.
///
/// `transaction_depth > 0` implies `connection` is set: the outermost
/// transaction opens the connection when it issues `BEGIN`.
#[derive(Debug, Default)]
struct Context {
    connection: Option<Box<dyn Connection>>,
    transaction_depth: usize,

    /// Set when a nested transaction scope exits with a failure. The
    /// outermost exit then rolls back instead of committing.
    rollback_only: bool,
}

/// Keeps this thread's connection context open.
///
/// The first scope entered on a thread owns the context. Scopes entered
/// while it is open only observe it. When the owning scope is dropped the
/// physical connection, if one was opened, is closed.
///
/// A scope is bound to the thread that entered it and cannot be sent to
/// another thread.
#[derive(Debug)]
#[must_use = "the connection context closes when the scope is dropped"]
pub struct ConnectionScope {
    id: usize,
    owner: bool,
    _not_send: PhantomData<*const ()>,
}

impl ConnectionScope {
    /// Whether this scope opened the context and will tear it down.
    pub fn is_owner(&self) -> bool {
        self.owner
    }
}

impl Drop for ConnectionScope {
    fn drop(&mut self) {
        if !self.owner {
            return;
        }

        // The thread-local may already be gone during thread teardown.
        let Some(cx) = CONTEXTS
            .try_with(|contexts| contexts.borrow_mut().remove(&self.id))
            .ok()
            .flatten()
        else {
            return;
        };

        if cx.transaction_depth > 0 {
            tracing::warn!(
                depth = cx.transaction_depth,
                "connection scope closed inside a transaction"
            );
        }

        if let Some(connection) = cx.connection {
            match connection.close() {
                Ok(()) => tracing::debug!(db = self.id, "closed connection"),
                Err(err) => tracing::warn!(db = self.id, error = %err, "failed to close connection"),
            }
        }
    }
}

impl Db {
    /// Enters a connection scope on the current thread.
    ///
    /// No physical connection is opened until a statement actually runs.
    pub fn connection(&self) -> ConnectionScope {
        let id = self.id();
        let owner = CONTEXTS.with(|contexts| {
            let mut contexts = contexts.borrow_mut();
            if contexts.contains_key(&id) {
                false
            } else {
                contexts.insert(id, Context::default());
                true
            }
        });

        if owner {
            tracing::trace!(db = id, "entered connection scope");
        }

        ConnectionScope {
            id,
            owner,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` inside a connection scope, so every statement it runs shares
    /// one physical connection.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Db) -> Result<T>,
    {
        let _scope = self.connection();
        f(self)
    }
}

fn with_context<R>(id: usize, f: impl FnOnce(&mut Context) -> Result<R>) -> Result<R> {
    CONTEXTS.with(|contexts| {
        let mut contexts = contexts.borrow_mut();
        match contexts.get_mut(&id) {
            Some(cx) => f(cx),
            None => Err(transwarp_core::err!("no connection scope is active on this thread")),
        }
    })
}

fn inspect<R>(id: usize, f: impl FnOnce(Option<&Context>) -> R) -> R {
    CONTEXTS.with(|contexts| f(contexts.borrow().get(&id)))
}

pub(super) fn exec(id: usize, driver: &dyn Driver, op: Operation) -> Result<Response> {
    with_context(id, |cx| {
        let connection = match cx.connection.take() {
            Some(connection) => connection,
            None => {
                let connection = driver.connect()?;
                tracing::debug!(db = id, url = %driver.url(), "opened connection");
                connection
            }
        };

        cx.connection.insert(connection).exec(op)
    })
}

/// Increments the nesting depth, returning the new depth.
pub(super) fn enter_transaction(id: usize) -> Result<usize> {
    with_context(id, |cx| {
        cx.transaction_depth += 1;
        Ok(cx.transaction_depth)
    })
}

/// Outcome of leaving one transaction scope.
pub(super) struct Exit {
    pub(super) depth: usize,
    pub(super) rollback_only: bool,
}

/// Decrements the nesting depth. A failed exit marks the transaction
/// rollback-only; the mark is consumed when the depth reaches zero.
pub(super) fn exit_transaction(id: usize, failed: bool) -> Result<Exit> {
    with_context(id, |cx| {
        if cx.transaction_depth == 0 {
            return Err(Error::transaction_failed("exit"));
        }

        cx.transaction_depth -= 1;
        cx.rollback_only |= failed;

        let rollback_only = if cx.transaction_depth == 0 {
            std::mem::take(&mut cx.rollback_only)
        } else {
            cx.rollback_only
        };

        Ok(Exit {
            depth: cx.transaction_depth,
            rollback_only,
        })
    })
}

pub(super) fn transaction_depth(id: usize) -> usize {
    inspect(id, |cx| cx.map_or(0, |cx| cx.transaction_depth))
}

pub(super) fn is_open(id: usize) -> bool {
    inspect(id, |cx| cx.is_some())
}

pub(super) fn is_connected(id: usize) -> bool {
    inspect(id, |cx| cx.is_some_and(|cx| cx.connection.is_some()))
}
