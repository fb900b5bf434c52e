use super::Error;

#[derive(Debug)]
pub(super) struct UnknownColumn {
    name: Box<str>,
}

impl std::error::Error for UnknownColumn {}

impl core::fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown column `{}`", self.name)
    }
}

impl Error {
    /// Creates an error for a lookup of a key a row does not hold.
    pub fn unknown_column(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownColumn(UnknownColumn {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown column lookup.
    pub fn is_unknown_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownColumn(_))
    }
}
