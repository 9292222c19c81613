use libsqlite3_sys as ffi_sys;

// Error Codes And Messages
// https://www.sqlite.org/c3ref/errcode.html

/// Primary SQLite result code classes.
///
/// Extended result codes carry their primary class in the low byte, so every status reported by
/// the engine maps onto one of these.
///
/// **Note:** This enum is marked `#[non_exhaustive]`; avoid exhaustive
/// matches as new variants may be introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PrimaryErrCode {
    Ok,
    Error,
    Internal,
    Perm,
    Abort,
    Busy,
    Locked,
    NoMem,
    ReadOnly,
    Interrupt,
    IoErr,
    Corrupt,
    NotFound,
    Full,
    CantOpen,
    Protocol,
    Empty,
    Schema,
    TooBig,
    Constraint,
    Mismatch,
    Misuse,
    NoLfs,
    Auth,
    Format,
    Range,
    NotADB,
    Notice,
    Warning,
    Row,
    Done,
    Unknown(i32),
}

impl PrimaryErrCode {
    pub fn from_code(code: i32) -> PrimaryErrCode {
        match code & 255 {
            ffi_sys::SQLITE_OK => PrimaryErrCode::Ok,
            ffi_sys::SQLITE_ERROR => PrimaryErrCode::Error,
            ffi_sys::SQLITE_INTERNAL => PrimaryErrCode::Internal,
            ffi_sys::SQLITE_PERM => PrimaryErrCode::Perm,
            ffi_sys::SQLITE_ABORT => PrimaryErrCode::Abort,
            ffi_sys::SQLITE_BUSY => PrimaryErrCode::Busy,
            ffi_sys::SQLITE_LOCKED => PrimaryErrCode::Locked,
            ffi_sys::SQLITE_NOMEM => PrimaryErrCode::NoMem,
            ffi_sys::SQLITE_READONLY => PrimaryErrCode::ReadOnly,
            ffi_sys::SQLITE_INTERRUPT => PrimaryErrCode::Interrupt,
            ffi_sys::SQLITE_IOERR => PrimaryErrCode::IoErr,
            ffi_sys::SQLITE_CORRUPT => PrimaryErrCode::Corrupt,
            ffi_sys::SQLITE_NOTFOUND => PrimaryErrCode::NotFound,
            ffi_sys::SQLITE_FULL => PrimaryErrCode::Full,
            ffi_sys::SQLITE_CANTOPEN => PrimaryErrCode::CantOpen,
            ffi_sys::SQLITE_PROTOCOL => PrimaryErrCode::Protocol,
            ffi_sys::SQLITE_EMPTY => PrimaryErrCode::Empty,
            ffi_sys::SQLITE_SCHEMA => PrimaryErrCode::Schema,
            ffi_sys::SQLITE_TOOBIG => PrimaryErrCode::TooBig,
            ffi_sys::SQLITE_CONSTRAINT => PrimaryErrCode::Constraint,
            ffi_sys::SQLITE_MISMATCH => PrimaryErrCode::Mismatch,
            ffi_sys::SQLITE_MISUSE => PrimaryErrCode::Misuse,
            ffi_sys::SQLITE_NOLFS => PrimaryErrCode::NoLfs,
            ffi_sys::SQLITE_AUTH => PrimaryErrCode::Auth,
            ffi_sys::SQLITE_FORMAT => PrimaryErrCode::Format,
            ffi_sys::SQLITE_RANGE => PrimaryErrCode::Range,
            ffi_sys::SQLITE_NOTADB => PrimaryErrCode::NotADB,
            ffi_sys::SQLITE_NOTICE => PrimaryErrCode::Notice,
            ffi_sys::SQLITE_WARNING => PrimaryErrCode::Warning,
            ffi_sys::SQLITE_ROW => PrimaryErrCode::Row,
            ffi_sys::SQLITE_DONE => PrimaryErrCode::Done,
            _ => PrimaryErrCode::Unknown(code),
        }
    }
}
