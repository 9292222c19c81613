use std::fmt::{self, Display, Formatter};

use libsqlite3_sys::{SQLITE_BLOB, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_NULL, SQLITE_TEXT};

/// Dynamic value types of SQLite.
///
/// <https://www.sqlite.org/datatype3.html>
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SqliteDataType {
    Null,
    Int,
    Float,
    Text,
    Blob,
}

impl Display for SqliteDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl SqliteDataType {
    pub fn is_null(&self) -> bool {
        matches!(self, SqliteDataType::Null)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SqliteDataType::Null => "NULL",
            SqliteDataType::Int => "INTEGER",
            SqliteDataType::Float => "REAL",
            SqliteDataType::Text => "TEXT",
            SqliteDataType::Blob => "BLOB",
        }
    }

    /// The fundamental datatype code SQLite uses for this type.
    pub fn code(&self) -> i32 {
        match self {
            SqliteDataType::Null => SQLITE_NULL,
            SqliteDataType::Int => SQLITE_INTEGER,
            SqliteDataType::Float => SQLITE_FLOAT,
            SqliteDataType::Text => SQLITE_TEXT,
            SqliteDataType::Blob => SQLITE_BLOB,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            SQLITE_INTEGER => Some(SqliteDataType::Int),
            SQLITE_FLOAT => Some(SqliteDataType::Float),
            SQLITE_BLOB => Some(SqliteDataType::Blob),
            SQLITE_NULL => Some(SqliteDataType::Null),
            SQLITE_TEXT => Some(SqliteDataType::Text),

            // https://sqlite.org/c3ref/c_blob.html
            _ => None,
        }
    }
}

#[test]
fn test_from_code_round_trips() {
    for ty in [
        SqliteDataType::Null,
        SqliteDataType::Int,
        SqliteDataType::Float,
        SqliteDataType::Text,
        SqliteDataType::Blob,
    ] {
        assert_eq!(SqliteDataType::from_code(ty.code()), Some(ty));
    }
}

#[test]
fn test_from_code_unknown() {
    assert!(SqliteDataType::from_code(9999).is_none());
}

#[test]
fn test_display_uses_sql_names() {
    assert_eq!(SqliteDataType::Int.to_string(), "INTEGER");
    assert_eq!(SqliteDataType::Float.to_string(), "REAL");
    assert_eq!(format!("{:>5}", SqliteDataType::Null), " NULL");
}
