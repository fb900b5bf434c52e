#[macro_use]
mod macros;

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod schema;

pub mod stmt;
pub use stmt::{Row, Value};

/// A Result type alias that uses Transwarp's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
