use super::{FromValue, Value};
use crate::{Error, Result};

use indexmap::IndexMap;

/// An ordered mapping from column name to value.
///
/// Rows returned by a query keep the `SELECT` column order. Model instances
/// store their field values in a `Row` keyed by field name, where a missing
/// key means "not set yet".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    /// Builds a row by zipping column names with values. Extra names or
    /// values on either side are ignored.
    pub fn from_pairs<N, V>(
        names: impl IntoIterator<Item = N>,
        values: impl IntoIterator<Item = V>,
    ) -> Row
    where
        N: Into<String>,
        V: Into<Value>,
    {
        names
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name.into(), value.into()))
            .collect()
    }

    /// Returns the value stored under `name`.
    ///
    /// Unlike [`try_get`](Self::try_get), a missing key is an error.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| Error::unknown_column(name))
    }

    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads the value stored under `name` as `T`.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        T::from_value(self.get(name)?.clone())
            .map_err(|err| err.context(err!("column `{name}`")))
    }

    /// Sets `name` to `value`, returning the previous value. New keys are
    /// appended; existing keys keep their position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Consumes the row, returning its values in column order.
    pub fn into_values(self) -> Vec<Value> {
        self.values.into_values().collect()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Row {
        Row {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl core::ops::Index<&str> for Row {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("unknown column `{name}`"),
        }
    }
}
