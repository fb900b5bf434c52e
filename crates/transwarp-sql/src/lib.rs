pub mod placeholder;
pub use placeholder::rewrite_placeholders;

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
