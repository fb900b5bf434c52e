use super::{ColumnDef, Name, Statement};

use indexmap::IndexMap;
use transwarp_core::{schema::Field, Error, Result};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Column definitions, in declaration order
    pub columns: Vec<ColumnDef>,

    /// Primary key column
    pub primary_key: Name,

    /// Emit `if not exists`
    pub if_not_exists: bool,
}

impl Statement {
    /// Builds the `CREATE TABLE` statement for a field mapping.
    ///
    /// Columns are listed in ascending field construction order, so the same
    /// mapping always produces the same statement. Fails if the mapping is
    /// empty, a field has no DDL fragment, or the mapping does not hold
    /// exactly one primary key.
    pub fn create_table(
        table: &str,
        fields: &IndexMap<String, Field>,
        if_not_exists: bool,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{table}` declares no fields"
            )));
        }

        let mut sorted: Vec<(&String, &Field)> = fields.iter().collect();
        sorted.sort_by_key(|(_, field)| field.order());

        let mut primary_key = None;

        for (attr, field) in &sorted {
            if field.ddl.trim().is_empty() {
                return Err(Error::invalid_schema(format!(
                    "no ddl in field `{attr}` of table `{table}`"
                )));
            }

            if field.primary_key {
                if primary_key.is_some() {
                    return Err(Error::invalid_schema(format!(
                        "duplicate primary key in table `{table}`"
                    )));
                }
                primary_key = Some(column_name(attr, field));
            }
        }

        let Some(primary_key) = primary_key else {
            return Err(Error::invalid_schema(format!(
                "no primary key in table `{table}`"
            )));
        };

        Ok(CreateTable {
            name: Name::from(table),
            columns: sorted
                .iter()
                .map(|(attr, field)| ColumnDef {
                    name: Name::from(column_name(attr, field)),
                    ..ColumnDef::from_field(field)
                })
                .collect(),
            primary_key: Name::from(primary_key),
            if_not_exists,
        }
        .into())
    }
}

/// Fields not yet named by a model fall back to their attribute name.
fn column_name<'a>(attr: &'a str, field: &'a Field) -> &'a str {
    match field.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => attr,
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
