use super::{Name, Statement};

#[derive(Debug, Clone)]
pub struct Insert {
    /// Table to insert into
    pub table: Name,

    /// Columns receiving one `?` parameter each, in parameter order
    pub columns: Vec<Name>,
}

impl Statement {
    pub fn insert<I, N>(table: impl Into<Name>, columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        Insert {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
