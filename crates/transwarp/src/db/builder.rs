use super::{ConnectOptions, Db};
use crate::{schema::Registry, Model, ModelSchema};

use transwarp_core::{driver::Driver, Result};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Compiled schemas, or the error that stopped compilation. Errors are
    /// reported by `build`.
    models: Vec<Result<Arc<ModelSchema>>>,
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.models.push(M::schema());
        self
    }

    /// Selects a driver from a connection URL, e.g. `sqlite:///tmp/blog.db`
    /// or `sqlite::memory:`.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        let options = ConnectOptions::parse(url)?;
        tracing::debug!(url = %options.redacted(), "connecting");
        self.build_boxed(options.driver()?)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_boxed(Box::new(driver))
    }

    fn build_boxed(&mut self, driver: Box<dyn Driver>) -> Result<Db> {
        let mut registry = Registry::default();

        for schema in &self.models {
            registry.insert(schema.clone()?)?;
        }

        Ok(Db::new(driver, registry))
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("models", &self.models.len())
            .finish()
    }
}
