//! Call-site provenance attached to every error.

use std::{fmt, panic::Location};

/// Where a public operation was invoked from.
///
/// Captured with `#[track_caller]` at the entry point of every public operation, so an error points
/// at the caller's line rather than at the helper that detected the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    location: &'static Location<'static>,
    operation: &'static str,
}

impl CallSite {
    /// Capture the location of the caller of the current `#[track_caller]` chain.
    #[track_caller]
    pub fn caller(operation: &'static str) -> Self {
        Self::new(Location::caller(), operation)
    }

    pub fn new(location: &'static Location<'static>, operation: &'static str) -> Self {
        Self {
            location,
            operation,
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn column(&self) -> u32 {
        self.location.column()
    }

    /// Name of the public operation that was called.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.location, self.operation)
    }
}

/// A value paired with the call site of the operation working on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<T> {
    value: T,
    site: CallSite,
}

impl<T: Copy> Located<T> {
    pub fn new(value: T, site: CallSite) -> Self {
        Self { value, site }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn site(&self) -> CallSite {
        self.site
    }
}
