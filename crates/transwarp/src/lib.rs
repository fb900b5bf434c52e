//! A small SQL mapper with thread-scoped connections and nested
//! transactions.
//!
//! ```no_run
//! use transwarp::{params, Db, Field, Model};
//!
//! transwarp::model! {
//!     pub struct Item {
//!         id: i64 = Field::integer().primary_key(),
//!         qty: i64 = Field::integer(),
//!     }
//! }
//!
//! # fn main() -> transwarp::Result<()> {
//! let db = Db::builder().register::<Item>().connect("sqlite:///tmp/items.db")?;
//! db.create_schema(None)?;
//!
//! db.transaction(|db| {
//!     Item::new().with_id(1).insert(db)?;
//!     db.execute("update item set qty=qty+1 where id=?", params![1])?;
//!     Ok(())
//! })?;
//!
//! let item = Item::get(&db, 1)?.expect("inserted above");
//! assert_eq!(item.qty()?, 1);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub use db::{Builder, ConnectOptions, ConnectionScope, Db, Transaction};

mod model;
pub use model::{Hooks, Model};

pub mod schema;
pub use schema::ModelSchema;

pub mod driver {
    pub use transwarp_core::driver::*;
}

#[cfg(feature = "sqlite")]
pub use transwarp_driver_sqlite as sqlite;

pub use transwarp_core::{
    bail, err,
    schema::{DefaultValue, Field, FieldKind},
    stmt::FromValue,
    Error, Result, Row, Value,
};

#[doc(hidden)]
pub use paste;

/// Builds a `&[Value]` parameter list from Rust values.
///
/// ```
/// use transwarp::{params, Value};
///
/// let p = params![1, "bob", None::<f64>];
/// assert_eq!(p, [Value::I64(1), Value::from("bob"), Value::Null]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[$crate::Value]
    };
    ($($value:expr),+ $(,)?) => {
        &[$($crate::Value::from($value)),+] as &[$crate::Value]
    };
}
