mod from_value;
pub use from_value::FromValue;

mod row;
pub use row::Row;

mod value;
pub use value::Value;
