//! Free-function entry points over [`Database`] and [`Statement`].
//!
//! Each function records its own call site, so an error points at the line that called it.

use std::path::Path;

use crate::{
    OpenMode, Result, Rowbind,
    encode::Params,
    engine::Engine,
    location::CallSite,
    row::RowShape,
    sqlite::{Database, Statement},
};

/// Open, or create, the database at `path`.
#[track_caller]
pub fn open(path: impl AsRef<Path>) -> Result<Database> {
    Rowbind::new().filename(path).open()
}

#[track_caller]
pub fn open_with_mode(path: impl AsRef<Path>, mode: OpenMode) -> Result<Database> {
    Rowbind::new().filename(path).mode(mode).open()
}

/// Prepare `sql` and bind `params`, left to right, starting at placeholder 1.
#[track_caller]
pub fn prepare_and_bind<'db, E: Engine, P: Params>(
    db: &'db Database<E>,
    sql: &str,
    params: P,
) -> Result<Statement<'db, E>> {
    db.prepare_at(sql, &params, CallSite::caller("prepare_and_bind"))
}

/// Advance a statement; `true` means a row is available.
#[track_caller]
pub fn step<E: Engine>(stmt: &mut Statement<'_, E>) -> Result<bool> {
    stmt.step_at(CallSite::caller("step"))
}

/// Decode the row the statement is positioned on.
#[track_caller]
pub fn get_row<R: RowShape, E: Engine>(stmt: &Statement<'_, E>) -> Result<R> {
    stmt.row_at(CallSite::caller("get_row"))
}

/// Decode rows until the statement completes or, with `Some(limit)`, `limit` rows were read.
#[track_caller]
pub fn get_rows<R: RowShape, E: Engine>(
    stmt: &mut Statement<'_, E>,
    limit: Option<usize>,
) -> Result<Vec<R>> {
    stmt.rows_limited_at(limit.unwrap_or(usize::MAX), CallSite::caller("get_rows"))
}

/// Decode the only row the statement produces.
#[track_caller]
pub fn get_exactly_one_row<R: RowShape, E: Engine>(stmt: &mut Statement<'_, E>) -> Result<R> {
    stmt.exactly_one_row_at(CallSite::caller("get_exactly_one_row"))
}

#[track_caller]
pub fn execute_returning_one_row<R: RowShape, E: Engine, P: Params>(
    db: &Database<E>,
    sql: &str,
    params: P,
) -> Result<R> {
    let site = CallSite::caller("execute_returning_one_row");
    db.prepare_at(sql, &params, site)?.exactly_one_row_at(site)
}

#[track_caller]
pub fn execute_returning_rows<R: RowShape, E: Engine, P: Params>(
    db: &Database<E>,
    sql: &str,
    params: P,
) -> Result<Vec<R>> {
    let site = CallSite::caller("execute_returning_rows");
    db.prepare_at(sql, &params, site)?.rows_limited_at(usize::MAX, site)
}

#[track_caller]
pub fn execute_expecting_no_rows<E: Engine, P: Params>(
    db: &Database<E>,
    sql: &str,
    params: P,
) -> Result<()> {
    let site = CallSite::caller("execute_expecting_no_rows");
    db.prepare_at(sql, &params, site)?.expect_no_rows_at(site)
}

/// Reset a statement so it can be stepped again with its current bindings.
#[track_caller]
pub fn reset<E: Engine>(stmt: &mut Statement<'_, E>) -> Result<()> {
    stmt.reset()
}

/// Reset a statement, clear its bindings and bind `params` from placeholder 1.
#[track_caller]
pub fn reset_and_rebind<E: Engine, P: Params>(
    stmt: &mut Statement<'_, E>,
    params: P,
) -> Result<()> {
    stmt.reset_and_rebind(params)
}
