use super::{Name, Statement};

/// `UPDATE` of one row identified by its key.
///
/// Parameters are the assigned columns in order, followed by the key value.
#[derive(Debug, Clone)]
pub struct Update {
    pub table: Name,
    pub assignments: Vec<Name>,
    pub key: Name,
}

impl Statement {
    pub fn update<I, N>(table: impl Into<Name>, assignments: I, key: impl Into<Name>) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        Update {
            table: table.into(),
            assignments: assignments.into_iter().map(Into::into).collect(),
            key: key.into(),
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
