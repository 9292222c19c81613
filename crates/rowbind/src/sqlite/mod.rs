pub use connection::Database;
pub use ffi::{Sqlite, SqliteDb, SqliteStmt};
pub use statement::Statement;
pub use type_info::SqliteDataType;

/// Database guard and its query façade.
mod connection;
/// SQLite error codes.
pub mod error;
/// Raw FFI bindings.
mod ffi;
/// Prepared statement guard.
mod statement;
/// SQLite type information utilities.
mod type_info;
