use super::ModelSchema;

use indexmap::IndexMap;
use transwarp_core::{Error, Result};

use std::sync::Arc;

/// Models registered with a [`Db`](crate::Db), keyed by table name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    tables: IndexMap<String, Arc<ModelSchema>>,
}

impl Registry {
    /// Registers `schema`. Registering the same model again is reported and
    /// ignored; two different models mapped to one table is an error.
    pub(crate) fn insert(&mut self, schema: Arc<ModelSchema>) -> Result<()> {
        if let Some(existing) = self.tables.get(schema.table()) {
            if Arc::ptr_eq(existing, &schema) {
                tracing::warn!(model = schema.name(), "model registered twice");
                return Ok(());
            }

            return Err(Error::invalid_schema(format!(
                "table `{}` is mapped by both `{}` and `{}`",
                schema.table(),
                existing.name(),
                schema.name()
            )));
        }

        self.tables.insert(schema.table().to_string(), schema);
        Ok(())
    }

    pub(crate) fn get(&self, table: &str) -> Result<&Arc<ModelSchema>> {
        self.tables
            .get(table)
            .ok_or_else(|| Error::schema_not_found(table))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<ModelSchema>> {
        self.tables.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.tables.len()
    }
}
