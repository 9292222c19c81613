//! Test support for rowbind: scratch databases, a column test macro and [`MockEngine`], a
//! scripted engine that records every primitive call made through it.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use libsqlite3_sys::{
    SQLITE_BLOB, SQLITE_DONE, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_NULL, SQLITE_OK, SQLITE_ROW,
    SQLITE_TEXT,
};
use rowbind::{Database, Engine, Rowbind, Sqlite, SqliteDataType, StatusCode};
use tempdir::TempDir;

const TEST_SCHEMA: &str = include_str!("setup.sql");

/// A database file in a fresh temporary directory. The directory goes away with the `TempDir`.
pub fn scratch_db() -> anyhow::Result<(TempDir, Database)> {
    let dir = TempDir::new("rowbind")?;
    let db = rowbind::open(dir.path().join("test.db"))?;
    Ok((dir, db))
}

/// Return a scratch database pre-configured with our test schema.
pub fn tdb() -> anyhow::Result<(TempDir, Database)> {
    let (dir, db) = scratch_db()?;
    db.execute_expecting_no_rows(TEST_SCHEMA, ())?;
    Ok((dir, db))
}

/// Open a database on `engine`. The engine is shared, so the caller keeps access to its
/// recorded calls.
#[track_caller]
pub fn open_mock(engine: &MockEngine) -> rowbind::Result<Database<MockEngine>> {
    Rowbind::new().filename("mock.db").open_with(engine.clone())
}

// Test decoding of a column type against the real engine, from a literal and from a bound
// parameter.
#[macro_export]
macro_rules! test_column {
    ($name:ident<$ty:ty>($($text:literal == $value:expr),+ $(,)?)) => {
        paste::item! {
            #[test]
            fn [< test_column_ $name >] () -> anyhow::Result<()> {
                let db = rowbind::open(":memory:")?;

                $(
                    let query = format!("SELECT {}", $text);

                    let (strict,): ($ty,) = db.execute_returning_one_row(&query, ())?;
                    assert_eq!(strict, $value, "strict decode of {}", $text);

                    let (optional,): (Option<$ty>,) = db.execute_returning_one_row(&query, ())?;
                    assert_eq!(optional, Some($value), "optional decode of {}", $text);
                )+

                let (null,): (Option<$ty>,) = db.execute_returning_one_row("SELECT NULL", ())?;
                assert_eq!(null, None);

                Ok(())
            }

            #[test]
            fn [< test_bound_column_ $name >] () -> anyhow::Result<()> {
                let db = rowbind::open(":memory:")?;

                $(
                    let (returned,): ($ty,) = db.execute_returning_one_row("SELECT ?", ($value,))?;
                    assert_eq!(returned, $value, "bound value for {}", $text);
                )+

                Ok(())
            }
        }
    };
}

/// Handle of a mock database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDb(u32);

/// Handle of a mock statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockStmt(u32);

/// A primitive call received by a [`MockEngine`]. Diagnostic lookups (error messages, status
/// text, owning handle, SQL text) are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open { filename: String, flags: i32 },
    Close,
    ExtendedResultCodes(bool),
    Prepare(String),
    Finalize,
    Step,
    Reset,
    ClearBindings,
    BindNull(usize),
    BindInt64(usize, i64),
    BindDouble(usize, f64),
    BindText(usize, String),
    BindBlob(usize, Vec<u8>),
    ColumnType(usize),
    ColumnInt64(usize),
    ColumnDouble(usize),
    ColumnText(usize),
    ColumnBlob(usize),
}

impl Call {
    pub fn is_bind(&self) -> bool {
        matches!(
            self,
            Call::BindNull(_)
                | Call::BindInt64(..)
                | Call::BindDouble(..)
                | Call::BindText(..)
                | Call::BindBlob(..)
        )
    }
}

/// A column value in a scripted row.
#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// TEXT whose bytes need not be UTF-8.
    RawText(Vec<u8>),
    Blob(Vec<u8>),
    /// Reports the given type but yields no data, as SQLite does when it runs out of memory.
    Missing(SqliteDataType),
}

impl MockValue {
    fn type_code(&self) -> i32 {
        match self {
            MockValue::Null => SQLITE_NULL,
            MockValue::Integer(_) => SQLITE_INTEGER,
            MockValue::Real(_) => SQLITE_FLOAT,
            MockValue::Text(_) | MockValue::RawText(_) => SQLITE_TEXT,
            MockValue::Blob(_) => SQLITE_BLOB,
            MockValue::Missing(ty) => ty.code(),
        }
    }
}

struct State {
    calls: Vec<Call>,
    open_status: StatusCode,
    open_returns_handle: bool,
    prepare_status: StatusCode,
    prepare_returns_handle: bool,
    close_status: StatusCode,
    finalize_status: StatusCode,
    reset_status: StatusCode,
    clear_bindings_status: StatusCode,
    extended_result_codes_status: StatusCode,
    bind_failure: Option<(usize, StatusCode)>,
    steps: VecDeque<StatusCode>,
    rows: VecDeque<Vec<MockValue>>,
    current: Vec<MockValue>,
    errmsg: Option<String>,
    sql: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            open_status: SQLITE_OK,
            open_returns_handle: true,
            prepare_status: SQLITE_OK,
            prepare_returns_handle: true,
            close_status: SQLITE_OK,
            finalize_status: SQLITE_OK,
            reset_status: SQLITE_OK,
            clear_bindings_status: SQLITE_OK,
            extended_result_codes_status: SQLITE_OK,
            bind_failure: None,
            steps: VecDeque::new(),
            rows: VecDeque::new(),
            current: Vec::new(),
            errmsg: None,
            sql: None,
        }
    }
}

/// An in-process [`Engine`] driven by a script.
///
/// By default every primitive succeeds, stepping yields the scripted rows and then
/// `SQLITE_DONE`, and status text comes from the real SQLite library. Clones share their state.
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Rc<RefCell<State>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.borrow_mut());
        self
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    /// Fail the open call, optionally still handing out a handle.
    pub fn fail_open(self, status: StatusCode, with_handle: bool) -> Self {
        self.update(|s| {
            s.open_status = status;
            s.open_returns_handle = with_handle;
        })
    }

    /// Report success from open but produce no handle.
    pub fn open_without_handle(self) -> Self {
        self.update(|s| s.open_returns_handle = false)
    }

    pub fn fail_extended_result_codes(self, status: StatusCode) -> Self {
        self.update(|s| s.extended_result_codes_status = status)
    }

    pub fn fail_prepare(self, status: StatusCode) -> Self {
        self.update(|s| {
            s.prepare_status = status;
            s.prepare_returns_handle = false;
        })
    }

    /// Report success from prepare but produce no statement.
    pub fn prepare_without_handle(self) -> Self {
        self.update(|s| s.prepare_returns_handle = false)
    }

    /// Fail any bind call for placeholder `index`.
    pub fn fail_bind_at(self, index: usize, status: StatusCode) -> Self {
        self.update(|s| s.bind_failure = Some((index, status)))
    }

    pub fn fail_close(self, status: StatusCode) -> Self {
        self.update(|s| s.close_status = status)
    }

    pub fn fail_finalize(self, status: StatusCode) -> Self {
        self.update(|s| s.finalize_status = status)
    }

    pub fn fail_reset(self, status: StatusCode) -> Self {
        self.update(|s| s.reset_status = status)
    }

    pub fn fail_clear_bindings(self, status: StatusCode) -> Self {
        self.update(|s| s.clear_bindings_status = status)
    }

    /// Rows produced, in order, by successive steps.
    pub fn with_rows(self, rows: impl IntoIterator<Item = Vec<MockValue>>) -> Self {
        self.update(|s| s.rows.extend(rows))
    }

    /// Status codes returned by the next steps, ahead of the scripted rows. A scripted
    /// `SQLITE_ROW` moves on to the next scripted row.
    pub fn script_steps(self, steps: impl IntoIterator<Item = StatusCode>) -> Self {
        self.update(|s| s.steps.extend(steps))
    }

    /// Message reported by `errmsg` for the database.
    pub fn with_errmsg(self, message: &str) -> Self {
        self.update(|s| s.errmsg = Some(message.to_owned()))
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// The recorded bind calls, oldest first.
    pub fn binds(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_bind).collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn bind(&self, index: usize, call: Call) -> StatusCode {
        self.record(call);
        match self.state.borrow().bind_failure {
            Some((failing, status)) if failing == index => status,
            _ => SQLITE_OK,
        }
    }

    fn column(&self, index: usize) -> MockValue {
        self.state
            .borrow()
            .current
            .get(index)
            .cloned()
            .unwrap_or(MockValue::Null)
    }
}

impl Engine for MockEngine {
    type Db = MockDb;
    type Stmt = MockStmt;

    fn open(&self, filename: &str, flags: i32) -> (StatusCode, Option<MockDb>) {
        self.record(Call::Open {
            filename: filename.to_owned(),
            flags,
        });
        let s = self.state.borrow();
        (s.open_status, s.open_returns_handle.then_some(MockDb(1)))
    }

    fn close(&self, _db: MockDb) -> StatusCode {
        self.record(Call::Close);
        self.state.borrow().close_status
    }

    fn extended_result_codes(&self, _db: MockDb, on: bool) -> StatusCode {
        self.record(Call::ExtendedResultCodes(on));
        self.state.borrow().extended_result_codes_status
    }

    fn prepare(&self, _db: MockDb, sql: &str) -> (StatusCode, Option<MockStmt>) {
        self.record(Call::Prepare(sql.to_owned()));
        let mut s = self.state.borrow_mut();
        s.sql = Some(sql.to_owned());
        (s.prepare_status, s.prepare_returns_handle.then_some(MockStmt(1)))
    }

    fn finalize(&self, _stmt: MockStmt) -> StatusCode {
        self.record(Call::Finalize);
        self.state.borrow().finalize_status
    }

    fn step(&self, _stmt: MockStmt) -> StatusCode {
        self.record(Call::Step);
        let mut s = self.state.borrow_mut();
        let status = match s.steps.pop_front() {
            Some(status) => status,
            None if s.rows.is_empty() => SQLITE_DONE,
            None => SQLITE_ROW,
        };
        if status == SQLITE_ROW {
            let row = s.rows.pop_front().unwrap_or_default();
            s.current = row;
        }
        status
    }

    fn reset(&self, _stmt: MockStmt) -> StatusCode {
        self.record(Call::Reset);
        self.state.borrow().reset_status
    }

    fn clear_bindings(&self, _stmt: MockStmt) -> StatusCode {
        self.record(Call::ClearBindings);
        self.state.borrow().clear_bindings_status
    }

    fn bind_null(&self, _stmt: MockStmt, index: usize) -> StatusCode {
        self.bind(index, Call::BindNull(index))
    }

    fn bind_int64(&self, _stmt: MockStmt, index: usize, value: i64) -> StatusCode {
        self.bind(index, Call::BindInt64(index, value))
    }

    fn bind_double(&self, _stmt: MockStmt, index: usize, value: f64) -> StatusCode {
        self.bind(index, Call::BindDouble(index, value))
    }

    fn bind_text(&self, _stmt: MockStmt, index: usize, value: &str) -> StatusCode {
        self.bind(index, Call::BindText(index, value.to_owned()))
    }

    fn bind_blob(&self, _stmt: MockStmt, index: usize, value: &[u8]) -> StatusCode {
        self.bind(index, Call::BindBlob(index, value.to_vec()))
    }

    fn column_type(&self, _stmt: MockStmt, index: usize) -> i32 {
        self.record(Call::ColumnType(index));
        self.column(index).type_code()
    }

    fn column_int64(&self, _stmt: MockStmt, index: usize) -> i64 {
        self.record(Call::ColumnInt64(index));
        match self.column(index) {
            MockValue::Integer(v) => v,
            MockValue::Real(v) => v as i64,
            _ => 0,
        }
    }

    fn column_double(&self, _stmt: MockStmt, index: usize) -> f64 {
        self.record(Call::ColumnDouble(index));
        match self.column(index) {
            MockValue::Real(v) => v,
            MockValue::Integer(v) => v as f64,
            _ => 0.0,
        }
    }

    fn column_text(&self, _stmt: MockStmt, index: usize) -> Option<Vec<u8>> {
        self.record(Call::ColumnText(index));
        match self.column(index) {
            MockValue::Text(v) => Some(v.into_bytes()),
            MockValue::RawText(v) | MockValue::Blob(v) => Some(v),
            MockValue::Missing(_) => None,
            _ => Some(Vec::new()),
        }
    }

    fn column_blob(&self, _stmt: MockStmt, index: usize) -> Option<Vec<u8>> {
        self.record(Call::ColumnBlob(index));
        match self.column(index) {
            MockValue::Blob(v) | MockValue::RawText(v) => Some(v),
            MockValue::Text(v) => Some(v.into_bytes()),
            MockValue::Missing(_) => None,
            _ => Some(Vec::new()),
        }
    }

    fn errmsg(&self, _db: MockDb) -> Option<String> {
        self.state.borrow().errmsg.clone()
    }

    fn errstr(&self, code: StatusCode) -> Option<String> {
        Sqlite.errstr(code)
    }

    fn db_handle(&self, _stmt: MockStmt) -> Option<MockDb> {
        Some(MockDb(1))
    }

    fn sql(&self, _stmt: MockStmt) -> Option<String> {
        self.state.borrow().sql.clone()
    }
}
