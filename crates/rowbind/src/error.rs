//! Types for working with errors produced by rowbind.

use libsqlite3_sys::{SQLITE_ERROR, SQLITE_OK};

use crate::{
    engine::{Engine, StatusCode},
    location::CallSite,
    sqlite::{Sqlite, error::PrimaryErrCode},
};

/// A specialized `Result` type for rowbind.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Opening a database failed, or the engine handed back no handle.
    Connection,
    /// Preparing a statement failed, or produced no statement.
    Prepare,
    /// The engine rejected a bound parameter.
    Bind,
    /// Stepping reported neither a row nor completion.
    Step,
    /// Resetting a statement or clearing its bindings failed.
    Reset,
    /// A non-optional column was NULL.
    NullConstraint,
    /// A column's dynamic type differs from the declared one.
    TypeMismatch,
    /// The engine returned no data for a TEXT or BLOB value, or TEXT was not UTF-8.
    Extraction,
    /// A statement produced the wrong number of rows.
    Cardinality,
    /// An invalid option was supplied.
    Configuration,
}

/// The single error type of rowbind.
///
/// Every error carries the context of the failed operation, the engine status code and its text,
/// the engine's own message where a live handle was available, the SQL text of the statement
/// involved and the call site of the public operation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{context}{detail} in {site}")]
pub struct Error {
    kind: ErrorKind,
    context: String,
    code: StatusCode,
    code_text: String,
    engine_message: Option<String>,
    sql: Option<String>,
    site: CallSite,
    detail: String,
}

impl Error {
    /// An error tied to a database handle, or to no handle at all.
    pub(crate) fn from_database<E: Engine>(
        engine: &E,
        db: Option<E::Db>,
        kind: ErrorKind,
        context: impl Into<String>,
        code: StatusCode,
        site: CallSite,
    ) -> Self {
        let engine_message = db.and_then(|db| engine_message(engine, db, code));
        Self::build(
            kind,
            context.into(),
            code,
            status_text(engine, code),
            engine_message,
            None,
            site,
        )
    }

    /// An error tied to a prepared statement. The owning database and the SQL text are looked up
    /// through the engine.
    pub(crate) fn from_statement<E: Engine>(
        engine: &E,
        stmt: E::Stmt,
        kind: ErrorKind,
        context: impl Into<String>,
        code: StatusCode,
        site: CallSite,
    ) -> Self {
        let engine_message = engine
            .db_handle(stmt)
            .and_then(|db| engine_message(engine, db, code));
        Self::build(
            kind,
            context.into(),
            code,
            status_text(engine, code),
            engine_message,
            engine.sql(stmt),
            site,
        )
    }

    /// A row that the engine produced but the caller's row shape rejects. The connection's
    /// message describes the last engine call, not this failure, so it is left out.
    pub(crate) fn validation<E: Engine>(
        engine: &E,
        stmt: E::Stmt,
        kind: ErrorKind,
        context: impl Into<String>,
        code: StatusCode,
        site: CallSite,
    ) -> Self {
        Self::build(
            kind,
            context.into(),
            code,
            status_text(engine, code),
            None,
            engine.sql(stmt),
            site,
        )
    }

    /// An invalid option, detected before any engine is involved.
    pub(crate) fn configuration(context: impl Into<String>, site: CallSite) -> Self {
        Self::from_database(
            &Sqlite,
            None,
            ErrorKind::Configuration,
            context,
            SQLITE_ERROR,
            site,
        )
    }

    fn build(
        kind: ErrorKind,
        context: String,
        code: StatusCode,
        code_text: String,
        engine_message: Option<String>,
        sql: Option<String>,
        site: CallSite,
    ) -> Self {
        let failure = [engine_message.as_deref(), Some(code_text.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let mut detail = String::new();
        if !failure.is_empty() {
            detail.push_str(", failed with: ");
            detail.push_str(&failure);
        }
        if let Some(sql) = &sql {
            detail.push_str(&format!(" for SQL \"{sql}\""));
        }

        Self {
            kind,
            context,
            code,
            code_text,
            engine_message,
            sql,
            site,
            detail,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// What the failed operation was doing, e.g. `failed to bind int64 to index 3`.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Raw engine status code, possibly extended. `SQLITE_OK` for failures the engine did not
    /// report itself.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn primary_code(&self) -> PrimaryErrCode {
        PrimaryErrCode::from_code(self.code)
    }

    /// Engine description of [`Error::code`]. Empty when the code is `SQLITE_OK`.
    pub fn code_text(&self) -> &str {
        &self.code_text
    }

    pub fn engine_message(&self) -> Option<&str> {
        self.engine_message.as_deref()
    }

    /// SQL text of the statement the failure relates to.
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Call site of the public operation that failed.
    pub fn site(&self) -> CallSite {
        self.site
    }
}

/// The connection's last error message. Validation failures carry `SQLITE_OK`, and whatever the
/// connection reports then belongs to some earlier call.
fn engine_message<E: Engine>(engine: &E, db: E::Db, code: StatusCode) -> Option<String> {
    if code == SQLITE_OK {
        return None;
    }
    engine.errmsg(db)
}

fn status_text<E: Engine>(engine: &E, code: StatusCode) -> String {
    if code == SQLITE_OK {
        return String::new();
    }
    engine
        .errstr(code)
        .unwrap_or_else(|| format!("<unknown value: {code}>"))
}

#[cfg(test)]
mod tests {
    use libsqlite3_sys::{SQLITE_MISMATCH, SQLITE_NOMEM};

    use super::*;

    fn site() -> CallSite {
        CallSite::caller("test")
    }

    #[test]
    fn message_without_handle_uses_status_text() {
        let err = Error::from_database(
            &Sqlite,
            None,
            ErrorKind::Connection,
            "failed to open database \"x.db\"",
            SQLITE_NOMEM,
            site(),
        );
        let msg = err.to_string();
        assert!(
            msg.starts_with("failed to open database \"x.db\", failed with: out of memory in "),
            "{msg}"
        );
        assert!(msg.ends_with(" 'test'"));
        assert_eq!(err.engine_message(), None);
        assert_eq!(err.sql(), None);
        assert_eq!(err.primary_code(), PrimaryErrCode::NoMem);
    }

    #[test]
    fn message_joins_engine_message_status_and_sql() {
        let err = Error::build(
            ErrorKind::TypeMismatch,
            "column at index 1 has type REAL, expected INTEGER".into(),
            SQLITE_MISMATCH,
            "datatype mismatch".into(),
            Some("not an error".into()),
            Some("SELECT 1.5".into()),
            site(),
        );
        assert!(err.to_string().starts_with(
            "column at index 1 has type REAL, expected INTEGER, failed with: \
             not an error datatype mismatch for SQL \"SELECT 1.5\" in "
        ));
    }

    #[test]
    fn validation_errors_leave_out_the_engine_message() {
        let db = crate::open(":memory:").unwrap();
        let stmt = db.prepare("SELECT 1", ()).unwrap();
        let err = Error::validation(
            db.engine(),
            stmt.handle(),
            ErrorKind::NullConstraint,
            "column at index 0 must not be NULL",
            SQLITE_MISMATCH,
            site(),
        );
        assert_eq!(err.engine_message(), None);
        assert_eq!(err.sql(), Some("SELECT 1"));
        assert!(err.to_string().starts_with(
            "column at index 0 must not be NULL, failed with: datatype mismatch \
             for SQL \"SELECT 1\" in "
        ));
    }

    #[test]
    fn ok_status_renders_without_text() {
        let err = Error::build(
            ErrorKind::Cardinality,
            "unexpected data row".into(),
            SQLITE_OK,
            status_text(&Sqlite, SQLITE_OK),
            None,
            Some("SELECT 1".into()),
            site(),
        );
        assert_eq!(err.code_text(), "");
        assert!(
            err.to_string()
                .starts_with("unexpected data row for SQL \"SELECT 1\" in ")
        );
    }

    #[test]
    fn bare_context_without_status_or_sql() {
        let err = Error::build(
            ErrorKind::Cardinality,
            "expected exactly one row but found none".into(),
            SQLITE_OK,
            String::new(),
            None,
            None,
            site(),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("expected exactly one row but found none in "), "{msg}");
        assert!(!msg.contains("failed with"));
    }

    #[test]
    fn configuration_errors_are_logic_errors() {
        let err = Error::configuration("invalid open mode value \"<unknown (999)>\"", site());
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.code(), SQLITE_ERROR);
        assert_eq!(err.code_text(), "SQL logic error");
    }
}
