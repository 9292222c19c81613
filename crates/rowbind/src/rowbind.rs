use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use libsqlite3_sys::{SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE};
use log::LevelFilter;

use crate::{
    Result,
    engine::Engine,
    error::Error,
    location::CallSite,
    logger::LogSettings,
    sqlite::{Database, Sqlite},
};

enum_mode! {
    /// How a database file is opened.
    pub OpenMode ("open mode") {
        /// Open for reading and writing, creating the file if it does not exist.
        OpenOrCreate = 1 => "open_or_create",
        /// Open an existing file for reading and writing.
        OpenOnly = 2 => "open_only",
    }
    default OpenOrCreate
}

impl OpenMode {
    /// Flags passed to the engine's open call.
    pub fn flags(&self) -> i32 {
        match self {
            OpenMode::OpenOrCreate => SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
            OpenMode::OpenOnly => SQLITE_OPEN_READWRITE,
        }
    }
}

/// Options for opening a database.
///
/// ```
/// # fn main() -> rowbind::Result<()> {
/// use rowbind::{OpenMode, Rowbind};
///
/// let db = Rowbind::new()
///     .filename(":memory:")
///     .mode(OpenMode::OpenOrCreate)
///     .log_statements(log::LevelFilter::Trace)
///     .open()?;
/// db.execute_expecting_no_rows("CREATE TABLE t (x INTEGER)", ())?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Rowbind {
    pub(crate) filename: PathBuf,
    pub(crate) mode: OpenMode,
    pub(crate) log_settings: LogSettings,
}

impl Default for Rowbind {
    fn default() -> Self {
        Self::new()
    }
}

impl Rowbind {
    /// Construct `Self` with default options: an in-memory database, created on open, with
    /// default statement logging.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filename: ":memory:".into(),
            mode: OpenMode::default(),
            log_settings: LogSettings::default(),
        }
    }

    /// Sets the name of the database file.
    #[must_use]
    pub fn filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filename = filename.as_ref().to_owned();
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Log level for executed statements. Defaults to `Debug`.
    #[must_use]
    pub fn log_statements(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_statements(level);
        self
    }

    /// Log level for statements that take longer than `duration`. Defaults to `Warn` after one
    /// second.
    #[must_use]
    pub fn log_slow_statements(mut self, level: LevelFilter, duration: Duration) -> Self {
        self.log_settings.log_slow_statements(level, duration);
        self
    }

    /// Open the database with the bundled SQLite.
    #[track_caller]
    pub fn open(&self) -> Result<Database> {
        self.open_with(Sqlite)
    }

    /// Open the database through another engine.
    #[track_caller]
    pub fn open_with<E: Engine>(&self, engine: E) -> Result<Database<E>> {
        let site = CallSite::caller("open");
        let Some(filename) = self.filename.to_str() else {
            return Err(Error::configuration(
                format!("database filename {:?} is not valid UTF-8", self.filename),
                site,
            ));
        };
        Database::open_at(engine, filename, self.mode, self.log_settings.clone(), site)
    }
}
