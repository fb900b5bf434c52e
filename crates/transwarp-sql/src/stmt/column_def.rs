use super::Name;

use transwarp_core::schema::Field;

#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Name of the column
    pub name: Name,

    /// Raw SQL type fragment
    pub ddl: String,

    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl ColumnDef {
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: Name::from(field.column_name()),
            ddl: field.ddl.clone(),
            nullable: field.nullable,
        }
    }
}
