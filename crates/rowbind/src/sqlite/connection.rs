use std::fmt;

use libsqlite3_sys::{SQLITE_ERROR, SQLITE_OK};

use crate::{
    OpenMode, Result,
    encode::Params,
    engine::Engine,
    error::{Error, ErrorKind},
    location::CallSite,
    logger::LogSettings,
    row::RowShape,
    sqlite::{Sqlite, Statement},
};

/// An open database connection.
///
/// The connection is closed when the guard is dropped. A failure to close is logged and otherwise
/// ignored.
pub struct Database<E: Engine = Sqlite> {
    engine: E,
    handle: E::Db,
    filename: String,
    log_settings: LogSettings,
}

impl<E: Engine> Database<E> {
    pub(crate) fn open_at(
        engine: E,
        filename: &str,
        mode: OpenMode,
        log_settings: LogSettings,
        site: CallSite,
    ) -> Result<Self> {
        let (rc, handle) = engine.open(filename, mode.flags());

        if rc != SQLITE_OK {
            let err = Error::from_database(
                &engine,
                handle,
                ErrorKind::Connection,
                format!("failed to open database \"{filename}\""),
                rc,
                site,
            );
            // SQLite hands out a handle for most failures, and it must still be closed.
            if let Some(handle) = handle {
                engine.close(handle);
            }
            return Err(err);
        }

        let Some(handle) = handle else {
            return Err(Error::from_database(
                &engine,
                None,
                ErrorKind::Connection,
                format!("open returned no handle for database \"{filename}\""),
                SQLITE_ERROR,
                site,
            ));
        };

        // Extended codes only refine error reporting, so a failure here is not fatal.
        let _ = engine.extended_result_codes(handle, true);

        tracing::debug!(target: "rowbind", filename, %mode, "opened database");

        Ok(Self {
            engine,
            handle,
            filename: filename.to_owned(),
            log_settings,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn handle(&self) -> E::Db {
        self.handle
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn log_settings(&self) -> &LogSettings {
        &self.log_settings
    }

    /// Prepare `sql` and bind `params` to its placeholders, starting at index 1.
    ///
    /// ```
    /// # fn main() -> rowbind::Result<()> {
    /// let db = rowbind::open(":memory:")?;
    /// let mut stmt = db.prepare("SELECT ? + ?", (40, 2))?;
    /// assert!(stmt.step()?);
    /// let (sum,): (i64,) = stmt.row()?;
    /// assert_eq!(sum, 42);
    /// # Ok(())
    /// # }
    /// ```
    #[track_caller]
    pub fn prepare<P: Params>(&self, sql: &str, params: P) -> Result<Statement<'_, E>> {
        self.prepare_at(sql, &params, CallSite::caller("prepare_and_bind"))
    }

    /// Run a query that must produce exactly one row.
    #[track_caller]
    pub fn execute_returning_one_row<R: RowShape, P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<R> {
        let site = CallSite::caller("execute_returning_one_row");
        self.prepare_at(sql, &params, site)?.exactly_one_row_at(site)
    }

    /// Run a query and collect every row it produces.
    #[track_caller]
    pub fn execute_returning_rows<R: RowShape, P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<R>> {
        let site = CallSite::caller("execute_returning_rows");
        self.prepare_at(sql, &params, site)?.rows_limited_at(usize::MAX, site)
    }

    /// Run a statement that must not produce rows, such as DDL or an `INSERT`.
    #[track_caller]
    pub fn execute_expecting_no_rows<P: Params>(&self, sql: &str, params: P) -> Result<()> {
        let site = CallSite::caller("execute_expecting_no_rows");
        self.prepare_at(sql, &params, site)?.expect_no_rows_at(site)
    }

    pub(crate) fn prepare_at<P: Params + ?Sized>(
        &self,
        sql: &str,
        params: &P,
        site: CallSite,
    ) -> Result<Statement<'_, E>> {
        let stmt = Statement::prepare_at(self, sql, site)?;
        stmt.bind_at(params, site)?;
        Ok(stmt)
    }
}

impl<E: Engine> fmt::Debug for Database<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("filename", &self.filename)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<E: Engine> Drop for Database<E> {
    fn drop(&mut self) {
        // https://sqlite.org/c3ref/close.html
        let rc = self.engine.close(self.handle);
        if rc == SQLITE_OK {
            tracing::debug!(target: "rowbind", filename = %self.filename, "closed database");
        } else {
            tracing::error!(
                target: "rowbind",
                filename = %self.filename,
                code = rc,
                "failed to close database"
            );
        }
    }
}
