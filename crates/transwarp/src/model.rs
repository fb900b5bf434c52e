mod macros;

use crate::{Db, ModelSchema};

use transwarp_core::{Result, Row, Value};
use transwarp_sql::{Serializer, Statement};

use std::sync::Arc;

/// Callbacks run on an instance right before its SQL executes. Returning an
/// error aborts the operation.
///
/// [`model!`](crate::model!) implements this trait with no-op callbacks
/// unless the declaration says `hooks = custom`.
pub trait Hooks {
    fn pre_insert(&mut self) -> Result<()> {
        Ok(())
    }

    fn pre_update(&mut self) -> Result<()> {
        Ok(())
    }

    fn pre_delete(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A type mapped to one table.
///
/// Instances keep their values in a [`Row`] keyed by attribute name, where
/// a missing key means the field is unset. Implementations are normally
/// generated by [`model!`](crate::model!).
pub trait Model: Hooks + Sized {
    /// The compiled schema. Compiled on first use and cached for the life of
    /// the process.
    fn schema() -> Result<Arc<ModelSchema>>;

    fn from_record(record: Row) -> Self;

    fn record(&self) -> &Row;

    fn record_mut(&mut self) -> &mut Row;

    /// Inserts this instance. Unset insertable fields are first filled in
    /// with their defaults.
    fn insert(&mut self, db: &Db) -> Result<&mut Self> {
        self.pre_insert()?;
        let schema = Self::schema()?;

        let mut columns = vec![];
        let mut params = vec![];

        for (attr, field) in schema.fields() {
            if !field.insertable {
                continue;
            }

            columns.push(field.column_name());
            params.push(value_or_default(self.record_mut(), attr, field));
        }

        let sql = Serializer::new().serialize(&Statement::insert(schema.table(), columns));
        db.execute(&sql, &params)?;
        Ok(self)
    }

    /// Writes the updatable fields of this instance to its row. Unset fields
    /// are written, and set on the instance, with their defaults.
    fn update(&mut self, db: &Db) -> Result<&mut Self> {
        self.pre_update()?;
        let schema = Self::schema()?;

        // Fail before any default is written onto the instance.
        let (pk_attr, pk) = schema.primary_key();
        let key = self.record().get(pk_attr)?.clone();

        let mut columns = vec![];
        let mut params = vec![];

        for (attr, field) in schema.fields() {
            if !field.updatable {
                continue;
            }

            columns.push(field.column_name());
            params.push(value_or_default(self.record_mut(), attr, field));
        }

        if columns.is_empty() {
            return Ok(self);
        }

        params.push(key);

        let sql = Serializer::new().serialize(&Statement::update(
            schema.table(),
            columns,
            pk.column_name(),
        ));
        db.execute(&sql, &params)?;
        Ok(self)
    }

    /// Deletes the row backing this instance. The instance keeps its values.
    fn delete(&mut self, db: &Db) -> Result<&mut Self> {
        self.pre_delete()?;
        let schema = Self::schema()?;

        let (pk_attr, pk) = schema.primary_key();
        let key = self.record().get(pk_attr)?.clone();

        let sql = Serializer::new().serialize(&Statement::delete(schema.table(), pk.column_name()));
        db.execute(&sql, &[key])?;
        Ok(self)
    }

    /// Loads the instance with primary key `key`.
    fn get(db: &Db, key: impl Into<Value>) -> Result<Option<Self>> {
        let schema = Self::schema()?;
        let (_, pk) = schema.primary_key();

        let sql =
            Serializer::new().serialize(&Statement::select_by_key(schema.table(), pk.column_name()));
        let row = db.select_one(&sql, &[key.into()])?;
        Ok(row.map(|row| load(&schema, row)))
    }

    /// Loads the first instance matching `clause`, which is appended to
    /// `select * from <table>` verbatim, e.g. `where email=?`.
    fn find_first(db: &Db, clause: &str, params: &[Value]) -> Result<Option<Self>> {
        let schema = Self::schema()?;
        let sql = Serializer::new().serialize(&Statement::select(schema.table(), Some(clause)));
        let row = db.select_one(&sql, params)?;
        Ok(row.map(|row| load(&schema, row)))
    }

    /// Loads every instance matching `clause`. See
    /// [`find_first`](Self::find_first).
    fn find_by(db: &Db, clause: &str, params: &[Value]) -> Result<Vec<Self>> {
        let schema = Self::schema()?;
        let sql = Serializer::new().serialize(&Statement::select(schema.table(), Some(clause)));
        let rows = db.select_many(&sql, params)?;
        Ok(rows.into_iter().map(|row| load(&schema, row)).collect())
    }

    /// Loads every instance, in the order the database returns them.
    fn find_all(db: &Db) -> Result<Vec<Self>> {
        Self::find_by(db, "", &[])
    }

    fn count_all(db: &Db) -> Result<i64> {
        Self::count_by(db, "", &[])
    }

    /// Counts the rows matching `clause`. See
    /// [`find_first`](Self::find_first).
    fn count_by(db: &Db, clause: &str, params: &[Value]) -> Result<i64> {
        let schema = Self::schema()?;
        let (_, pk) = schema.primary_key();
        let sql = Serializer::new().serialize(&Statement::count(
            schema.table(),
            pk.column_name(),
            Some(clause),
        ));
        db.select_int(&sql, params)
    }

    /// Creates this model's table unless it already exists.
    fn create_table(db: &Db) -> Result<()> {
        let schema = Self::schema()?;
        db.execute(schema.check_sql(), &[])?;
        Ok(())
    }
}

/// Returns the value of `attr`, first storing the field default if unset.
fn value_or_default(record: &mut Row, attr: &str, field: &transwarp_core::schema::Field) -> Value {
    if let Some(value) = record.try_get(attr) {
        return value.clone();
    }

    let value = field.default_value();
    record.set(attr, value.clone());
    value
}

/// Maps a result row, keyed by column name, to a record keyed by attribute
/// name. Columns the schema does not know are kept as they are.
fn load<M: Model>(schema: &ModelSchema, mut row: Row) -> M {
    let mut record = Row::new();

    for (attr, field) in schema.fields() {
        if let Some(value) = row.remove(field.column_name()) {
            record.set(attr.as_str(), value);
        }
    }

    for (column, value) in row {
        record.set(column, value);
    }

    M::from_record(record)
}
