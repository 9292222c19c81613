//! Conversions between Rust and **SQLite** types.
//!
//! # Parameters
//!
//! | Rust type                                         | Bound as            |
//! |---------------------------------------------------|---------------------|
//! | `i8`, `i16`, `i32`, `i64`, `isize`                | INTEGER             |
//! | `u16`, `u32`                                      | INTEGER             |
//! | `f32`, `f64`                                      | REAL                |
//! | `str`, [`String`], `Cow<str>`                     | TEXT                |
//! | `[u8]`, `Vec<u8>`, `[u8; N]`, `Cow<[u8]>`         | BLOB                |
//! | `bstr::BStr`, `bstr::BString`                     | BLOB                |
//! | [`Null`](crate::Null)                             | NULL                |
//! | `Option<T>` of any of the above scalars           | the scalar, or NULL |
//! | `[T]`, `Vec<T>`, `[T; N]`, `VecDeque<T>`,         | one placeholder per |
//! | `LinkedList<T>`, `BTreeSet<T>`                    | element             |
//!
//! The elements of a sequence may be scalars, optional scalars or the null marker, but not
//! sequences themselves.
//!
//! Unlike most SQLite bindings, a lone `u8` is not bound as an INTEGER; see the note on integers
//! below. Widen it with `i64::from` first.
//!
//! # Columns
//!
//! | Rust type             | SQLite type |
//! |-----------------------|-------------|
//! | `i64`                 | INTEGER     |
//! | `f64`                 | REAL        |
//! | [`String`]            | TEXT        |
//! | `Vec<u8>`             | BLOB        |
//! | `bstr::BString`       | BLOB        |
//!
//! `Option<T>` of a column type accepts NULL as `None`. The plain types reject NULL.
//!
//! #### Note: Integers
//!
//! `u16` and `u32` are zero-extended into SQLite's 64-bit signed integers. There is no lossless
//! mapping for `u64` and `usize`, so they are not supported. `u8` is the element type of byte
//! sequences and is not an integer parameter, which is what keeps `Vec<u8>` a BLOB
//! rather than a sequence of integers. `bool` is not bound implicitly either; convert it to an
//! integer explicitly.
//!
//! # Rejected types
//!
//! Anything outside the tables above is refused at compile time, as parameters:
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?", (true,))?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?", (7_u64,))?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?", (7_u8,))?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?", (Some(Some(1_i64)),))?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?", (vec![vec![1_i64]],))?;
//! # Ok(())
//! # }
//! ```
//!
//! and as row fields:
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! let (_,): (bool,) = db.execute_returning_one_row("SELECT 1", ())?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! let (_,): (Option<Option<i64>>,) = db.execute_returning_one_row("SELECT 1", ())?;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! let (_,): (i32,) = db.execute_returning_one_row("SELECT 1", ())?;
//! # Ok(())
//! # }
//! ```
//!
//! The same calls with supported types compile:
//!
//! ```
//! # fn main() -> rowbind::Result<()> {
//! let db = rowbind::open(":memory:")?;
//! db.prepare("SELECT ?, ?, ?", (1_i64, Some(vec![1_u8]), vec![Some(1_i32), None]))?;
//! let (_,): (Option<i64>,) = db.execute_returning_one_row("SELECT 1", ())?;
//! # Ok(())
//! # }
//! ```

macro_rules! impl_scalar {
    ([$($generics:tt)*] $ty:ty, $v:ident => $value:expr) => {
        impl<$($generics)*> $crate::encode::SingleValued for $ty {
            const KIND: $crate::encode::BindKind = $crate::encode::BindKind::Scalar;

            fn value_ref(&self) -> $crate::encode::ValueRef<'_> {
                let $v = self;
                $value
            }
        }

        impl<$($generics)*> $crate::encode::Scalar for $ty {}

        impl<$($generics)*> $crate::encode::Bind for $ty {
            const KIND: $crate::encode::BindKind = $crate::encode::BindKind::Scalar;

            fn bind<E: $crate::engine::Engine>(
                &self,
                binder: &$crate::encode::Binder<'_, E>,
                index: $crate::encode::ParamIndex,
            ) -> $crate::Result<$crate::encode::ParamIndex> {
                binder.bind_single(self, index)
            }
        }
    };
}

pub mod bstr;

mod bytes;
mod float;
mod int;
mod null;
mod seq;
mod str;

pub use null::Null;
