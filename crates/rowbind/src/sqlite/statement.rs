use std::fmt;

use libsqlite3_sys::{SQLITE_DONE, SQLITE_ERROR, SQLITE_OK, SQLITE_ROW};

use crate::{
    Result,
    decode::RowReader,
    encode::{Binder, ParamIndex, Params},
    engine::Engine,
    error::{Error, ErrorKind},
    location::{CallSite, Located},
    logger::QueryLogger,
    row::RowShape,
    sqlite::{Database, Sqlite},
};

/// A prepared statement.
///
/// The statement is finalized when the guard is dropped. A failure to finalize is logged and
/// otherwise ignored.
pub struct Statement<'db, E: Engine = Sqlite> {
    db: &'db Database<E>,
    handle: E::Stmt,
    logger: QueryLogger,
}

impl<'db, E: Engine> Statement<'db, E> {
    pub(crate) fn prepare_at(db: &'db Database<E>, sql: &str, site: CallSite) -> Result<Self> {
        let engine = db.engine();
        let (rc, handle) = engine.prepare(db.handle(), sql);
        let context = || format!("failed to create prepared statement \"{sql}\"");

        if rc != SQLITE_OK {
            if let Some(handle) = handle {
                engine.finalize(handle);
            }
            return Err(Error::from_database(
                engine,
                Some(db.handle()),
                ErrorKind::Prepare,
                context(),
                rc,
                site,
            ));
        }

        // SQL consisting only of whitespace or comments prepares to nothing.
        let Some(handle) = handle else {
            return Err(Error::from_database(
                engine,
                Some(db.handle()),
                ErrorKind::Prepare,
                context(),
                SQLITE_ERROR,
                site,
            ));
        };

        Ok(Self {
            db,
            handle,
            logger: QueryLogger::new(sql.to_owned(), db.log_settings().clone()),
        })
    }

    pub fn database(&self) -> &'db Database<E> {
        self.db
    }

    pub fn handle(&self) -> E::Stmt {
        self.handle
    }

    /// SQL text the statement was prepared from, as the engine reports it.
    pub fn sql(&self) -> Option<String> {
        self.engine().sql(self.handle)
    }

    /// Advance to the next row. Returns `true` if a row is available and `false` once the
    /// statement has completed.
    #[track_caller]
    pub fn step(&mut self) -> Result<bool> {
        self.step_at(CallSite::caller("step"))
    }

    /// Decode the current row.
    #[track_caller]
    pub fn row<R: RowShape>(&self) -> Result<R> {
        self.row_at(CallSite::caller("get_row"))
    }

    /// Step through the remaining rows, decoding each.
    #[track_caller]
    pub fn rows<R: RowShape>(&mut self) -> Result<Vec<R>> {
        self.rows_limited_at(usize::MAX, CallSite::caller("get_rows"))
    }

    /// Step and decode until the statement completes or `limit` rows have been collected.
    #[track_caller]
    pub fn rows_limited<R: RowShape>(&mut self, limit: usize) -> Result<Vec<R>> {
        self.rows_limited_at(limit, CallSite::caller("get_rows"))
    }

    /// Decode the only row the statement produces. Zero rows or more than one row is an error.
    #[track_caller]
    pub fn exactly_one_row<R: RowShape>(&mut self) -> Result<R> {
        self.exactly_one_row_at(CallSite::caller("get_exactly_one_row"))
    }

    /// Step once and fail if that produced a row.
    #[track_caller]
    pub fn expect_no_rows(&mut self) -> Result<()> {
        self.expect_no_rows_at(CallSite::caller("execute_expecting_no_rows"))
    }

    /// Reset the statement so it can be stepped again. Bindings are kept.
    #[track_caller]
    pub fn reset(&mut self) -> Result<()> {
        self.reset_at(CallSite::caller("reset"))
    }

    /// Reset the statement, clear all bindings and bind `params` from index 1.
    #[track_caller]
    pub fn reset_and_rebind<P: Params>(&mut self, params: P) -> Result<()> {
        let site = CallSite::caller("reset_and_rebind");
        self.reset_at(site)?;
        let rc = self.engine().clear_bindings(self.handle);
        if rc != SQLITE_OK {
            return Err(self.error(ErrorKind::Reset, "failed to clear bindings", rc, site));
        }
        self.bind_at(&params, site)?;
        Ok(())
    }

    pub(crate) fn bind_at<P: Params + ?Sized>(
        &self,
        params: &P,
        site: CallSite,
    ) -> Result<ParamIndex> {
        let binder = Binder::new(self.engine(), Located::new(self.handle, site));
        params.bind_all(&binder, ParamIndex::FIRST)
    }

    pub(crate) fn step_at(&mut self, site: CallSite) -> Result<bool> {
        match self.engine().step(self.handle) {
            SQLITE_ROW => {
                self.logger.increment_rows_returned();
                Ok(true)
            }
            SQLITE_DONE => Ok(false),
            rc => Err(self.error(ErrorKind::Step, "failed to step", rc, site)),
        }
    }

    pub(crate) fn row_at<R: RowShape>(&self, site: CallSite) -> Result<R> {
        R::decode_row(&RowReader::new(self.engine(), Located::new(self.handle, site)))
    }

    pub(crate) fn rows_limited_at<R: RowShape>(
        &mut self,
        limit: usize,
        site: CallSite,
    ) -> Result<Vec<R>> {
        let mut rows = Vec::new();
        while rows.len() < limit && self.step_at(site)? {
            rows.push(self.row_at(site)?);
        }
        Ok(rows)
    }

    pub(crate) fn exactly_one_row_at<R: RowShape>(&mut self, site: CallSite) -> Result<R> {
        // Two rows are enough to tell "one" from "more".
        let mut rows = self.rows_limited_at(2, site)?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(self.error(
                ErrorKind::Cardinality,
                format!(
                    "expected exactly one row but found {}",
                    if n == 0 { "none" } else { "more" }
                ),
                SQLITE_OK,
                site,
            )),
        }
    }

    pub(crate) fn expect_no_rows_at(&mut self, site: CallSite) -> Result<()> {
        if self.step_at(site)? {
            return Err(self.error(
                ErrorKind::Cardinality,
                "unexpected data row",
                SQLITE_OK,
                site,
            ));
        }
        Ok(())
    }

    fn reset_at(&mut self, site: CallSite) -> Result<()> {
        let rc = self.engine().reset(self.handle);
        if rc != SQLITE_OK {
            return Err(self.error(ErrorKind::Reset, "failed to reset statement", rc, site));
        }
        Ok(())
    }

    fn engine(&self) -> &'db E {
        self.db.engine()
    }

    fn error(
        &self,
        kind: ErrorKind,
        context: impl Into<String>,
        code: i32,
        site: CallSite,
    ) -> Error {
        Error::from_statement(self.engine(), self.handle, kind, context, code, site)
    }
}

impl<E: Engine> fmt::Debug for Statement<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("handle", &self.handle)
            .field("database", &self.db)
            .finish_non_exhaustive()
    }
}

impl<E: Engine> Drop for Statement<'_, E> {
    fn drop(&mut self) {
        // sqlite3_finalize also reports the error of the most recent failed step, which the
        // caller has already seen.
        let rc = self.engine().finalize(self.handle);
        if rc != SQLITE_OK {
            tracing::error!(target: "rowbind", code = rc, "failed to finalize statement");
        }
    }
}
