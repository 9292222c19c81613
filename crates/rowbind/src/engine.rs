//! The narrow capability surface rowbind needs from an SQL engine.
//!
//! [`Sqlite`](crate::Sqlite) implements it over the bundled SQLite library. Everything else in
//! the crate (binding, decoding, error reporting, the statement façade) talks to the engine only
//! through this trait, so alternative engines such as the recording mock in `rowbind-test` can
//! stand in for SQLite.
//!
//! Status codes use SQLite's numbering: `SQLITE_OK`, `SQLITE_ROW`, `SQLITE_DONE` and the error
//! codes, optionally extended.

use std::fmt::Debug;

/// Raw status code returned by an engine primitive.
pub type StatusCode = i32;

/// Primitive operations of an SQL engine.
///
/// Handles passed to a method must have been produced by the same engine and must not have been
/// released yet. The [`Database`](crate::Database) and [`Statement`](crate::Statement) guards
/// uphold this for every call they make.
pub trait Engine {
    /// Database connection handle.
    type Db: Copy + Debug;
    /// Prepared statement handle.
    type Stmt: Copy + Debug;

    /// Open a database. A handle may be returned even when the status is an error; the caller
    /// must close it.
    fn open(&self, filename: &str, flags: i32) -> (StatusCode, Option<Self::Db>);

    fn close(&self, db: Self::Db) -> StatusCode;

    /// Switch extended result codes on or off for a connection.
    fn extended_result_codes(&self, db: Self::Db, on: bool) -> StatusCode;

    fn prepare(&self, db: Self::Db, sql: &str) -> (StatusCode, Option<Self::Stmt>);

    fn finalize(&self, stmt: Self::Stmt) -> StatusCode;

    /// Advance a statement. Returns `SQLITE_ROW`, `SQLITE_DONE` or an error code.
    fn step(&self, stmt: Self::Stmt) -> StatusCode;

    fn reset(&self, stmt: Self::Stmt) -> StatusCode;

    fn clear_bindings(&self, stmt: Self::Stmt) -> StatusCode;

    // Parameter indices are 1-based.

    fn bind_null(&self, stmt: Self::Stmt, index: usize) -> StatusCode;

    fn bind_int64(&self, stmt: Self::Stmt, index: usize, value: i64) -> StatusCode;

    fn bind_double(&self, stmt: Self::Stmt, index: usize, value: f64) -> StatusCode;

    fn bind_text(&self, stmt: Self::Stmt, index: usize, value: &str) -> StatusCode;

    fn bind_blob(&self, stmt: Self::Stmt, index: usize, value: &[u8]) -> StatusCode;

    // Column indices are 0-based.

    /// Dynamic type code (`SQLITE_INTEGER`, `SQLITE_FLOAT`, ...) of a column in the current row.
    fn column_type(&self, stmt: Self::Stmt, index: usize) -> i32;

    fn column_int64(&self, stmt: Self::Stmt, index: usize) -> i64;

    fn column_double(&self, stmt: Self::Stmt, index: usize) -> f64;

    /// Bytes of a TEXT column. `None` means the engine produced no data for a value that
    /// should have had some, which SQLite does when it runs out of memory.
    fn column_text(&self, stmt: Self::Stmt, index: usize) -> Option<Vec<u8>>;

    /// Bytes of a BLOB column, with the same `None` convention as [`Engine::column_text`].
    fn column_blob(&self, stmt: Self::Stmt, index: usize) -> Option<Vec<u8>>;

    /// Most recent error message of a connection.
    fn errmsg(&self, db: Self::Db) -> Option<String>;

    /// English description of a status code.
    fn errstr(&self, code: StatusCode) -> Option<String>;

    /// Connection that owns a statement.
    fn db_handle(&self, stmt: Self::Stmt) -> Option<Self::Db>;

    /// SQL text a statement was prepared from.
    fn sql(&self, stmt: Self::Stmt) -> Option<String>;
}
