use crate::{logging_driver::LoggingDriver, ExecLog};

use std::sync::Once;
use tempfile::TempDir;
use transwarp::{db::Builder, sqlite::Sqlite, Db};

/// A database on a fresh temporary SQLite file, with every driver
/// operation recorded.
///
/// The file is removed when the setup is dropped.
pub struct Setup {
    pub db: Db,
    pub log: ExecLog,
    _dir: TempDir,
}

impl Setup {
    /// Builds the database and creates the tables of every registered model.
    pub fn new(mut builder: Builder) -> Setup {
        init_tracing();

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let driver = LoggingDriver::new(Sqlite::open(dir.path().join("test.db")));
        let log = ExecLog::new(driver.recorder());

        let db = builder.build(driver).expect("failed to build db");
        db.create_schema(None).expect("failed to create schema");
        log.clear();

        Setup {
            db,
            log,
            _dir: dir,
        }
    }
}

/// Installs a test-friendly subscriber once per test binary. Set `RUST_LOG`
/// to see output.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
