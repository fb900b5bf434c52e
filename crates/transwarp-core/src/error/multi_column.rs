use super::Error;

/// Error when a scalar query returns a row that does not have exactly one
/// column.
#[derive(Debug)]
pub(super) struct MultiColumn {
    columns: usize,
}

impl std::error::Error for MultiColumn {}

impl core::fmt::Display for MultiColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "expected exactly one column; query returned {}",
            self.columns
        )
    }
}

impl Error {
    /// Creates an error for a scalar query that returned `columns` columns.
    pub fn multi_column(columns: usize) -> Error {
        Error::from(super::ErrorKind::MultiColumn(MultiColumn { columns }))
    }

    /// Returns `true` if this error is a multi-column scalar error.
    pub fn is_multi_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MultiColumn(_))
    }
}
