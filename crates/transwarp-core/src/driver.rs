mod capability;
pub use capability::{Capability, Placeholder};

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use std::{borrow::Cow, fmt::Debug};

/// Opens physical connections to one database.
///
/// A driver is shared by every thread using the database; each thread opens
/// its own [`Connection`] through it and never hands that connection to
/// another thread.
pub trait Driver: Debug + Send + Sync + 'static {
    /// The connection URL this driver was configured with.
    fn url(&self) -> Cow<'_, str>;

    /// Describes the driver's capability, e.g. its native parameter syntax.
    fn capability(&self) -> &'static Capability;

    /// Opens a new physical connection.
    fn connect(&self) -> crate::Result<Box<dyn Connection>>;
}

/// One open physical connection.
pub trait Connection: Debug {
    /// Execute a database operation.
    ///
    /// SQL carried by the operation already uses the driver's native
    /// placeholder syntax.
    fn exec(&mut self, op: Operation) -> crate::Result<Response>;

    /// Closes the connection. Dropping a connection also closes it, but
    /// without reporting failures.
    fn close(self: Box<Self>) -> crate::Result<()> {
        Ok(())
    }
}
