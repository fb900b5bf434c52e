mod registry;
pub(crate) use registry::Registry;

use indexmap::IndexMap;
use transwarp_core::{schema::Field, Error, Result};
use transwarp_sql::{Serializer, Statement};

/// Compiled mapping between a model type and its table.
///
/// Built once per model and shared by every instance; see
/// [`Model::schema`](crate::Model::schema).
#[derive(Debug)]
pub struct ModelSchema {
    name: &'static str,
    table: String,

    /// Field descriptors keyed by attribute name, in declaration order.
    fields: IndexMap<String, Field>,

    /// Attribute name of the primary key field.
    primary_key: String,

    sql: String,
    check_sql: String,
}

impl ModelSchema {
    /// Compiles the schema of the model `name` stored in `table`.
    ///
    /// Fields without an explicit column name take their attribute name.
    /// Fails unless exactly one field is a primary key and every field has a
    /// DDL fragment.
    pub fn compile<'a>(
        name: &'static str,
        table: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, Field)>,
    ) -> Result<ModelSchema> {
        let table = table.into();
        let mut mapping = IndexMap::new();

        for (attr, mut field) in fields {
            if field.name.is_none() {
                field.name = Some(attr.to_string());
            }

            if mapping.insert(attr.to_string(), field).is_some() {
                return Err(Error::invalid_schema(format!(
                    "duplicate field `{attr}` in model `{name}`"
                )));
            }
        }

        let mut primary_keys = mapping.iter().filter(|(_, field)| field.primary_key);
        let primary_key = match (primary_keys.next(), primary_keys.next()) {
            (Some((attr, _)), None) => attr.clone(),
            (None, _) => {
                return Err(Error::invalid_schema(format!(
                    "no primary key in model `{name}`"
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::invalid_schema(format!(
                    "duplicate primary key in model `{name}`"
                )))
            }
        };

        if let Some(field) = mapping.get_mut(&primary_key) {
            if field.updatable || field.nullable {
                tracing::warn!(
                    model = name,
                    field = %primary_key,
                    "primary key cannot be updatable or nullable; forcing both off"
                );
                field.updatable = false;
                field.nullable = false;
            }
        }

        let serializer = Serializer::new();
        let sql = serializer.serialize(&Statement::create_table(&table, &mapping, false)?);
        let check_sql = serializer.serialize(&Statement::create_table(&table, &mapping, true)?);

        tracing::info!(model = name, %table, fields = mapping.len(), "compiled model schema");

        Ok(ModelSchema {
            name,
            table,
            fields: mapping,
            primary_key,
            sql,
            check_sql,
        })
    }

    /// Name of the model type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, attr: &str) -> Option<&Field> {
        self.fields.get(attr)
    }

    /// Attribute name and descriptor of the primary key.
    pub fn primary_key(&self) -> (&str, &Field) {
        let field = &self.fields[&self.primary_key];
        (&self.primary_key, field)
    }

    /// `create table` statement for this model.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// `create table if not exists` statement for this model.
    pub fn check_sql(&self) -> &str {
        &self.check_sql
    }
}
