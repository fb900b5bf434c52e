mod default;
pub use default::DefaultValue;

mod field;
pub use field::{Field, FieldKind};
