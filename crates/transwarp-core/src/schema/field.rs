use super::DefaultValue;
use crate::Value;

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// Describes one mapped column of a model.
///
/// Fields are built with one of the kind constructors and then refined:
///
/// ```
/// # use transwarp_core::schema::Field;
/// let email = Field::string().updatable(false);
/// let id = Field::integer().primary_key();
/// assert!(email.order() < id.order());
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    /// Column name. Filled from the declaring attribute name when unset.
    pub name: Option<String>,

    /// Which of the built-in field kinds this is.
    pub kind: FieldKind,

    /// Value used when an insert or update finds the field unset.
    pub default: DefaultValue,

    /// True if this field is the model's primary key.
    pub primary_key: bool,

    /// Whether the column accepts NULL. Never true for a primary key.
    pub nullable: bool,

    /// Whether `update()` writes this field. Never true for a primary key.
    pub updatable: bool,

    /// Whether `insert()` writes this field.
    pub insertable: bool,

    /// Raw SQL type fragment, e.g. `varchar(255)`.
    pub ddl: String,

    /// Process-wide construction order, used to order columns in DDL.
    order: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Text,
}

impl FieldKind {
    /// SQL type fragment used when the field does not override it.
    pub const fn default_ddl(self) -> &'static str {
        match self {
            FieldKind::String => "varchar(255)",
            FieldKind::Integer => "bigint",
            FieldKind::Float => "real",
            FieldKind::Boolean => "bool",
            FieldKind::Text => "text",
        }
    }

    /// Value used when the field does not override its default.
    pub fn default_value(self) -> Value {
        match self {
            FieldKind::String | FieldKind::Text => Value::String(String::new()),
            FieldKind::Integer => Value::I64(0),
            FieldKind::Float => Value::F64(0.0),
            FieldKind::Boolean => Value::Bool(false),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            FieldKind::String => "StringField",
            FieldKind::Integer => "IntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Boolean => "BooleanField",
            FieldKind::Text => "TextField",
        }
    }
}

/// Returns the next construction order. The counter spans every field ever
/// built in the process, so orders are unique across models.
fn next_order() -> u64 {
    static NEXT_FIELD_ORDER: AtomicU64 = AtomicU64::new(0);

    NEXT_FIELD_ORDER.fetch_add(1, Ordering::Relaxed)
}

impl Field {
    pub fn new(kind: FieldKind) -> Field {
        Field {
            name: None,
            kind,
            default: DefaultValue::Static(kind.default_value()),
            primary_key: false,
            nullable: false,
            updatable: true,
            insertable: true,
            ddl: kind.default_ddl().to_string(),
            order: next_order(),
        }
    }

    /// A `varchar(255)` field defaulting to the empty string.
    pub fn string() -> Field {
        Field::new(FieldKind::String)
    }

    /// A `bigint` field defaulting to `0`.
    pub fn integer() -> Field {
        Field::new(FieldKind::Integer)
    }

    /// A `real` field defaulting to `0.0`.
    pub fn float() -> Field {
        Field::new(FieldKind::Float)
    }

    /// A `bool` field defaulting to `false`.
    pub fn boolean() -> Field {
        Field::new(FieldKind::Boolean)
    }

    /// A `text` field defaulting to the empty string.
    pub fn text() -> Field {
        Field::new(FieldKind::Text)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Static(value.into());
        self
    }

    /// Computes the default on each use instead of storing a fixed value.
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = DefaultValue::Computed(Arc::new(f));
        self
    }

    /// Marks the field as the primary key, which also makes it non-nullable
    /// and non-updatable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self.updatable = false;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = insertable;
        self
    }

    pub fn ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl = ddl.into();
        self
    }

    pub fn order(&self) -> u64 {
        self.order
    }

    /// The column name, or `""` when it has not been filled in yet.
    pub fn column_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Resolves the field's default value.
    pub fn default_value(&self) -> Value {
        self.default.resolve()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}:{},{},default({}),",
            self.kind.label(),
            self.column_name(),
            self.ddl,
            self.default
        )?;
        if self.nullable {
            f.write_str("N")?;
        }
        if self.updatable {
            f.write_str("U")?;
        }
        if self.insertable {
            f.write_str("I")?;
        }
        f.write_str(">")
    }
}
