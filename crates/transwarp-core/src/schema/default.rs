use crate::Value;

use std::{fmt, sync::Arc};

/// The value a field takes when an insert or update finds it unset.
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value.
    Static(Value),

    /// A value produced on demand, e.g. a timestamp.
    Computed(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Resolves the default, calling the generator for computed defaults.
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Static(value) => value.clone(),
            DefaultValue::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(value) => fmt::Display::fmt(value, f),
            DefaultValue::Computed(_) => f.write_str("<computed>"),
        }
    }
}
