use super::{Name, Statement};

#[derive(Debug, Clone)]
pub struct Select {
    pub table: Name,
    pub projection: Projection,
    pub filter: Filter,
}

#[derive(Debug, Clone)]
pub enum Projection {
    /// `*`
    All,

    /// `count(<column>)`
    Count(Name),
}

#[derive(Debug, Clone)]
pub enum Filter {
    /// Every row
    None,

    /// `where <column>=?`
    Key(Name),

    /// Caller-supplied clause appended verbatim, e.g. `where email=?`.
    Raw(String),
}

impl Statement {
    /// `select * from <table> where <key>=?`
    pub fn select_by_key(table: impl Into<Name>, key: impl Into<Name>) -> Self {
        Select {
            table: table.into(),
            projection: Projection::All,
            filter: Filter::Key(key.into()),
        }
        .into()
    }

    /// `select * from <table> [<clause>]`
    pub fn select(table: impl Into<Name>, clause: Option<&str>) -> Self {
        Select {
            table: table.into(),
            projection: Projection::All,
            filter: raw_filter(clause),
        }
        .into()
    }

    /// `select count(<column>) from <table> [<clause>]`
    pub fn count(table: impl Into<Name>, column: impl Into<Name>, clause: Option<&str>) -> Self {
        Select {
            table: table.into(),
            projection: Projection::Count(column.into()),
            filter: raw_filter(clause),
        }
        .into()
    }
}

fn raw_filter(clause: Option<&str>) -> Filter {
    match clause.map(str::trim) {
        Some(clause) if !clause.is_empty() => Filter::Raw(clause.to_string()),
        _ => Filter::None,
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
