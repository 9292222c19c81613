//! Reading typed columns out of the current result row.
//!
//! A declared column is either a [`BasicColumn`], for which NULL is an error, or an `Option` of
//! one, for which NULL decodes as `None`. In both cases a non-NULL value must have exactly the
//! declared dynamic type; SQLite's implicit conversions are never applied.

use std::fmt::{self, Display};

use bstr::BString;
use libsqlite3_sys::{SQLITE_MISMATCH, SQLITE_NOMEM};

use crate::{
    Result,
    engine::Engine,
    error::{Error, ErrorKind},
    location::Located,
    sqlite::SqliteDataType,
};

/// 0-based result column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    pub const FIRST: ColumnIndex = ColumnIndex(0);

    pub fn get(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A column type with one fixed dynamic type family.
pub trait BasicColumn: Sized {
    const FAMILY: SqliteDataType;

    /// Read the value, whose type has already been checked against [`BasicColumn::FAMILY`].
    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self>;
}

/// A type a result column can be decoded into.
pub trait Column: Sized {
    fn decode<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self>;
}

impl<T: BasicColumn> Column for Option<T> {
    fn decode<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        if reader.check(index, T::FAMILY, true)? {
            T::extract(reader, index).map(Some)
        } else {
            Ok(None)
        }
    }
}

macro_rules! impl_strict_column {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Column for $ty {
                fn decode<E: Engine>(
                    reader: &RowReader<'_, E>,
                    index: ColumnIndex,
                ) -> Result<Self> {
                    reader.check(index, <$ty as BasicColumn>::FAMILY, false)?;
                    <$ty as BasicColumn>::extract(reader, index)
                }
            }
        )+
    };
}

impl_strict_column!(i64, f64, String, Vec<u8>, BString);

/// Column access for a statement positioned on a row.
pub struct RowReader<'a, E: Engine> {
    engine: &'a E,
    stmt: Located<E::Stmt>,
}

impl<'a, E: Engine> RowReader<'a, E> {
    pub(crate) fn new(engine: &'a E, stmt: Located<E::Stmt>) -> Self {
        Self { engine, stmt }
    }

    /// Check a column against the expected family. Returns `false` for a NULL the caller
    /// accepts, `true` when a value of the expected family is present.
    pub fn check(
        &self,
        index: ColumnIndex,
        expected: SqliteDataType,
        nullable: bool,
    ) -> Result<bool> {
        let code = self.engine.column_type(self.stmt.value(), index.get());
        let actual = SqliteDataType::from_code(code);
        if actual.is_some_and(|ty| ty.is_null()) {
            if nullable {
                return Ok(false);
            }
            return Err(self.error(
                ErrorKind::NullConstraint,
                format!("column at index {index} must not be NULL"),
                SQLITE_MISMATCH,
            ));
        }
        if actual != Some(expected) {
            let actual = actual
                .map(|ty| ty.name().to_owned())
                .unwrap_or_else(|| format!("<unknown ({code})>"));
            return Err(self.error(
                ErrorKind::TypeMismatch,
                format!("column at index {index} has type {actual}, expected {expected}"),
                SQLITE_MISMATCH,
            ));
        }
        Ok(true)
    }

    pub fn int64(&self, index: ColumnIndex) -> i64 {
        self.engine.column_int64(self.stmt.value(), index.get())
    }

    pub fn double(&self, index: ColumnIndex) -> f64 {
        self.engine.column_double(self.stmt.value(), index.get())
    }

    pub fn text(&self, index: ColumnIndex) -> Result<String> {
        let Some(bytes) = self.engine.column_text(self.stmt.value(), index.get()) else {
            return Err(self.error(
                ErrorKind::Extraction,
                format!("text extraction returned no data for index {index}"),
                SQLITE_NOMEM,
            ));
        };
        String::from_utf8(bytes).map_err(|_| {
            self.error(
                ErrorKind::Extraction,
                format!("column at index {index} is not valid UTF-8"),
                SQLITE_MISMATCH,
            )
        })
    }

    pub fn blob(&self, index: ColumnIndex) -> Result<Vec<u8>> {
        self.engine
            .column_blob(self.stmt.value(), index.get())
            .ok_or_else(|| {
                self.error(
                    ErrorKind::Extraction,
                    format!("blob extraction returned no data for index {index}"),
                    SQLITE_NOMEM,
                )
            })
    }

    fn error(&self, kind: ErrorKind, context: String, code: i32) -> Error {
        Error::validation(
            self.engine,
            self.stmt.value(),
            kind,
            context,
            code,
            self.stmt.site(),
        )
    }
}
