//! Typed parameter binding and row decoding for SQLite.
//!
//! Parameters are bound from ordinary Rust values, and rows are read back into tuples whose
//! element types declare the expected column types. Every failure is reported as one
//! [`Error`] that records the call site of the public operation, the engine's status and
//! message, and the SQL involved.
//!
//! ```
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.execute_expecting_no_rows(
//!     "CREATE TABLE t (id INTEGER, score REAL, name TEXT, data BLOB)",
//!     (),
//! )?;
//! db.execute_expecting_no_rows(
//!     "INSERT INTO t VALUES (?, ?, ?, ?)",
//!     (4711, None::<f64>, "hello world", vec![0x42_u8, 0x43]),
//! )?;
//!
//! let row: (i64, Option<f64>, String, Option<Vec<u8>>) =
//!     db.execute_returning_one_row("SELECT id, score, name, data FROM t", ())?;
//! assert_eq!(row, (4711, None, "hello world".into(), Some(vec![0x42, 0x43])));
//!
//! // Sequences spread over consecutive placeholders.
//! let ids: Vec<(i64,)> =
//!     db.execute_returning_rows("SELECT id FROM t WHERE id IN (?, ?, ?)", ([1, 2, 4711],))?;
//! assert_eq!(ids, vec![(4711,)]);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod enum_mode;

pub mod decode;
pub mod encode;
pub mod engine;
mod error;
mod location;
mod logger;
pub mod query;
mod row;
mod rowbind;
mod sqlite;
pub mod types;

pub use crate::{
    decode::{BasicColumn, Column, ColumnIndex, RowReader},
    encode::{Bind, BindKind, Binder, ParamIndex, Params, Scalar, SingleValued, ValueRef, classify},
    engine::{Engine, StatusCode},
    error::{Error, ErrorKind, Result},
    location::{CallSite, Located},
    logger::LogSettings,
    query::{
        execute_expecting_no_rows, execute_returning_one_row, execute_returning_rows,
        get_exactly_one_row, get_row, get_rows, open, open_with_mode, prepare_and_bind,
        reset, reset_and_rebind, step,
    },
    row::RowShape,
    rowbind::{OpenMode, Rowbind},
    sqlite::{
        Database, Sqlite, SqliteDataType, SqliteDb, SqliteStmt, Statement,
        error::PrimaryErrCode,
    },
    types::Null,
};
