// The SQLite engine. Every `unsafe` call into libsqlite3_sys lives in this file so that the
// rest of the crate only ever sees the safe `Engine` surface.

use std::ffi::{CStr, CString, c_void};
use std::os::raw::{c_char, c_int};
use std::ptr::{self, NonNull};

use libsqlite3_sys::{
    self as ffi_sys, SQLITE_CANTOPEN, SQLITE_NOMEM, SQLITE_TOOBIG, sqlite3, sqlite3_stmt,
};

use crate::engine::{Engine, StatusCode};

#[allow(dead_code)]
const fn assert_c_int_is_32bit() {
    assert!(std::mem::size_of::<c_int>() == 4);
}

// A compile-time assertion to ensure that `c_int` is 32 bits.
const _ASSERT_C_INT_32BIT: () = assert_c_int_is_32bit();

/// The bundled SQLite library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

/// Raw `sqlite3` connection handle. Only [`Sqlite`] can create one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqliteDb(NonNull<sqlite3>);

/// Raw `sqlite3_stmt` handle. Only [`Sqlite`] can create one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqliteStmt(NonNull<sqlite3_stmt>);

// SAFETY: A SQLite3 handle is safe to send between threads, provided not more than one is
// accessing it at the same time. The bundled library is compiled with SQLITE_THREADSAFE and we
// never ask for SQLITE_OPEN_NOMUTEX, so connections run in serialized mode.
// <https://www.sqlite.org/threadsafe.html>
unsafe impl Send for SqliteDb {}
// SAFETY: see `SqliteDb`; statements share their connection's mutex.
unsafe impl Send for SqliteStmt {}

/// Copy `len` bytes starting at `data`. A null `data` is only legitimate for an empty value.
fn copy_column_data(data: *const u8, len: c_int, out_of_memory: bool) -> Option<Vec<u8>> {
    if data.is_null() {
        return (len <= 0 && !out_of_memory).then(Vec::new);
    }
    let len = usize::try_from(len).unwrap_or(0);
    // SAFETY: SQLite guarantees `len` readable bytes at `data` until the next call on the
    // statement, and we copy them out immediately.
    Some(unsafe { std::slice::from_raw_parts(data, len) }.to_vec())
}

fn string_from_ptr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: SQLite returns NUL-terminated strings that stay valid until the next call on the
    // same handle.
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

impl Sqlite {
    fn is_out_of_memory(&self, stmt: SqliteStmt) -> bool {
        // SAFETY: `stmt` is a live statement handle.
        let db = unsafe { ffi_sys::sqlite3_db_handle(stmt.0.as_ptr()) };
        // SAFETY: the connection owning a live statement is live as well.
        let code = unsafe { ffi_sys::sqlite3_errcode(db) };
        code & 0xff == SQLITE_NOMEM
    }
}

impl Engine for Sqlite {
    type Db = SqliteDb;
    type Stmt = SqliteStmt;

    fn open(&self, filename: &str, flags: i32) -> (StatusCode, Option<SqliteDb>) {
        let Ok(filename) = CString::new(filename) else {
            return (SQLITE_CANTOPEN, None);
        };
        let mut handle = ptr::null_mut();
        // SAFETY: `filename` is NUL-terminated and `handle` is a valid out pointer.
        let rc = unsafe {
            ffi_sys::sqlite3_open_v2(filename.as_ptr(), &mut handle, flags as c_int, ptr::null())
        };
        (rc, NonNull::new(handle).map(SqliteDb))
    }

    fn close(&self, db: SqliteDb) -> StatusCode {
        // SAFETY: `db` is live and every statement on it has been finalized by its guard.
        unsafe { ffi_sys::sqlite3_close(db.0.as_ptr()) }
    }

    fn extended_result_codes(&self, db: SqliteDb, on: bool) -> StatusCode {
        // SAFETY: `db` is a live connection handle.
        unsafe { ffi_sys::sqlite3_extended_result_codes(db.0.as_ptr(), c_int::from(on)) }
    }

    fn prepare(&self, db: SqliteDb, sql: &str) -> (StatusCode, Option<SqliteStmt>) {
        let Ok(n_byte) = c_int::try_from(sql.len()) else {
            return (SQLITE_TOOBIG, None);
        };
        let mut stmt = ptr::null_mut();
        // SAFETY: `sql` points at `n_byte` bytes, `stmt` is a valid out pointer and the tail
        // pointer may be null.
        let rc = unsafe {
            ffi_sys::sqlite3_prepare_v2(
                db.0.as_ptr(),
                sql.as_ptr() as *const c_char,
                n_byte,
                &mut stmt,
                ptr::null_mut(),
            )
        };
        (rc, NonNull::new(stmt).map(SqliteStmt))
    }

    fn finalize(&self, stmt: SqliteStmt) -> StatusCode {
        // SAFETY: `stmt` is live and its guard never uses it again.
        unsafe { ffi_sys::sqlite3_finalize(stmt.0.as_ptr()) }
    }

    fn step(&self, stmt: SqliteStmt) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_step(stmt.0.as_ptr()) }
    }

    fn reset(&self, stmt: SqliteStmt) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_reset(stmt.0.as_ptr()) }
    }

    fn clear_bindings(&self, stmt: SqliteStmt) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_clear_bindings(stmt.0.as_ptr()) }
    }

    // Binding Values To Prepared Statements
    // https://www.sqlite.org/c3ref/bind_blob.html

    fn bind_null(&self, stmt: SqliteStmt, index: usize) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_bind_null(stmt.0.as_ptr(), index as c_int) }
    }

    fn bind_int64(&self, stmt: SqliteStmt, index: usize, value: i64) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_bind_int64(stmt.0.as_ptr(), index as c_int, value) }
    }

    fn bind_double(&self, stmt: SqliteStmt, index: usize, value: f64) -> StatusCode {
        // SAFETY: `stmt` is a live statement handle.
        unsafe { ffi_sys::sqlite3_bind_double(stmt.0.as_ptr(), index as c_int, value) }
    }

    fn bind_text(&self, stmt: SqliteStmt, index: usize, value: &str) -> StatusCode {
        // SAFETY: SQLITE_TRANSIENT makes SQLite copy the text before returning.
        unsafe {
            ffi_sys::sqlite3_bind_text64(
                stmt.0.as_ptr(),
                index as c_int,
                value.as_ptr() as *const c_char,
                value.len() as u64,
                ffi_sys::SQLITE_TRANSIENT(),
                ffi_sys::SQLITE_UTF8 as u8,
            )
        }
    }

    fn bind_blob(&self, stmt: SqliteStmt, index: usize, value: &[u8]) -> StatusCode {
        // SAFETY: SQLITE_TRANSIENT makes SQLite copy the bytes before returning.
        unsafe {
            ffi_sys::sqlite3_bind_blob64(
                stmt.0.as_ptr(),
                index as c_int,
                value.as_ptr() as *const c_void,
                value.len() as u64,
                ffi_sys::SQLITE_TRANSIENT(),
            )
        }
    }

    // Result values from the query
    // https://www.sqlite.org/c3ref/column_blob.html

    fn column_type(&self, stmt: SqliteStmt, index: usize) -> i32 {
        // SAFETY: `stmt` is a live statement handle positioned on a row.
        unsafe { ffi_sys::sqlite3_column_type(stmt.0.as_ptr(), index as c_int) }
    }

    fn column_int64(&self, stmt: SqliteStmt, index: usize) -> i64 {
        // SAFETY: `stmt` is a live statement handle positioned on a row.
        unsafe { ffi_sys::sqlite3_column_int64(stmt.0.as_ptr(), index as c_int) }
    }

    fn column_double(&self, stmt: SqliteStmt, index: usize) -> f64 {
        // SAFETY: `stmt` is a live statement handle positioned on a row.
        unsafe { ffi_sys::sqlite3_column_double(stmt.0.as_ptr(), index as c_int) }
    }

    fn column_text(&self, stmt: SqliteStmt, index: usize) -> Option<Vec<u8>> {
        // The pointer must be fetched before the length, see the SQLite docs on type conversion.
        // SAFETY: `stmt` is a live statement handle positioned on a row.
        let (data, len) = unsafe {
            let data = ffi_sys::sqlite3_column_text(stmt.0.as_ptr(), index as c_int);
            (data, ffi_sys::sqlite3_column_bytes(stmt.0.as_ptr(), index as c_int))
        };
        copy_column_data(data, len, data.is_null() && self.is_out_of_memory(stmt))
    }

    fn column_blob(&self, stmt: SqliteStmt, index: usize) -> Option<Vec<u8>> {
        // SAFETY: `stmt` is a live statement handle positioned on a row.
        let (data, len) = unsafe {
            let data = ffi_sys::sqlite3_column_blob(stmt.0.as_ptr(), index as c_int);
            (data, ffi_sys::sqlite3_column_bytes(stmt.0.as_ptr(), index as c_int))
        };
        // A zero-length BLOB comes back as a null pointer.
        copy_column_data(data as *const u8, len, data.is_null() && self.is_out_of_memory(stmt))
    }

    fn errmsg(&self, db: SqliteDb) -> Option<String> {
        // SAFETY: `db` is a live connection handle.
        string_from_ptr(unsafe { ffi_sys::sqlite3_errmsg(db.0.as_ptr()) })
    }

    fn errstr(&self, code: StatusCode) -> Option<String> {
        // SAFETY: sqlite3_errstr accepts any value and returns a static string.
        string_from_ptr(unsafe { ffi_sys::sqlite3_errstr(code) })
    }

    fn db_handle(&self, stmt: SqliteStmt) -> Option<SqliteDb> {
        // O(1) access to the connection handle for this statement handle
        // https://sqlite.org/c3ref/db_handle.html
        // SAFETY: `stmt` is a live statement handle.
        NonNull::new(unsafe { ffi_sys::sqlite3_db_handle(stmt.0.as_ptr()) }).map(SqliteDb)
    }

    fn sql(&self, stmt: SqliteStmt) -> Option<String> {
        // SAFETY: `stmt` is a live statement handle.
        string_from_ptr(unsafe { ffi_sys::sqlite3_sql(stmt.0.as_ptr()) })
    }
}
