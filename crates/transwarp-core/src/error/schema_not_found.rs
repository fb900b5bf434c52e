use super::Error;

/// Error when schema creation is requested for a table no registered model
/// maps to.
#[derive(Debug)]
pub(super) struct SchemaNotFound {
    table: Box<str>,
}

impl std::error::Error for SchemaNotFound {}

impl core::fmt::Display for SchemaNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no model registered for table `{}`", self.table)
    }
}

impl Error {
    /// Creates an error for an unregistered table name.
    pub fn schema_not_found(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaNotFound(SchemaNotFound {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema-not-found error.
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaNotFound(_))
    }
}
