use super::{Name, Statement};

/// `DELETE` of one row identified by its key.
#[derive(Debug, Clone)]
pub struct Delete {
    pub table: Name,
    pub key: Name,
}

impl Statement {
    pub fn delete(table: impl Into<Name>, key: impl Into<Name>) -> Self {
        Delete {
            table: table.into(),
            key: key.into(),
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
