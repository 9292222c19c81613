//! Binding Rust values to statement parameters.
//!
//! Which strategy binds a value is decided entirely by its type, in this order:
//!
//! 1. the [`Null`](crate::Null) marker binds `NULL`;
//! 2. `Option<T>` of a [`Scalar`] binds the scalar, or `NULL` when absent;
//! 3. a [`Scalar`] (integer, real, text or blob) binds itself;
//! 4. a sequence of [`SingleValued`] elements binds each element to its own placeholder.
//!
//! Byte sequences such as `Vec<u8>` are blobs, not sequences: `u8` is not a scalar on its own, so
//! the sequence impls never apply to them. Types outside these rules do not implement [`Bind`] and
//! are rejected at compile time.

use std::fmt::{self, Display};

use libsqlite3_sys::SQLITE_OK;

use crate::{
    Result,
    engine::Engine,
    error::{Error, ErrorKind},
    location::Located,
};

/// 1-based placeholder position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamIndex(usize);

impl ParamIndex {
    pub const FIRST: ParamIndex = ParamIndex(1);

    /// `None` for 0, which is not a placeholder position.
    pub fn new(index: usize) -> Option<Self> {
        (index > 0).then_some(Self(index))
    }

    pub fn get(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A borrowed value in one of the engine's primitive bind shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Null,
    Integer(i64),
    Real(f64),
    Text(&'a str),
    Blob(&'a [u8]),
}

impl ValueRef<'_> {
    /// Name used in bind failure messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueRef::Null => "null",
            ValueRef::Integer(_) => "int64",
            ValueRef::Real(_) => "double",
            ValueRef::Text(_) => "string",
            ValueRef::Blob(_) => "BLOB",
        }
    }
}

/// Binding strategy selected for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindKind {
    Null,
    Optional,
    Scalar,
    Range,
}

/// A value that occupies exactly one placeholder: the null marker, a scalar or an optional
/// scalar.
pub trait SingleValued {
    const KIND: BindKind;

    fn value_ref(&self) -> ValueRef<'_>;
}

/// Basic scalars: integers, reals, text and blobs.
pub trait Scalar: SingleValued {}

/// A bindable value.
pub trait Bind {
    const KIND: BindKind;

    /// Bind `self` starting at `index` and return the index following the last placeholder used.
    fn bind<E: Engine>(&self, binder: &Binder<'_, E>, index: ParamIndex) -> Result<ParamIndex>;
}

impl<T: SingleValued + ?Sized> SingleValued for &T {
    const KIND: BindKind = T::KIND;

    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }
}

impl<T: Scalar + ?Sized> Scalar for &T {}

impl<T: Bind + ?Sized> Bind for &T {
    const KIND: BindKind = T::KIND;

    fn bind<E: Engine>(&self, binder: &Binder<'_, E>, index: ParamIndex) -> Result<ParamIndex> {
        (**self).bind(binder, index)
    }
}

/// The strategy a value would be bound with.
pub fn classify<T: Bind + ?Sized>(_value: &T) -> BindKind {
    T::KIND
}

/// Writes values into one prepared statement through the engine's primitive bind calls.
pub struct Binder<'a, E: Engine> {
    engine: &'a E,
    stmt: Located<E::Stmt>,
}

impl<'a, E: Engine> Binder<'a, E> {
    pub(crate) fn new(engine: &'a E, stmt: Located<E::Stmt>) -> Self {
        Self { engine, stmt }
    }

    /// Bind one primitive value.
    pub fn bind_value(&self, index: ParamIndex, value: ValueRef<'_>) -> Result<ParamIndex> {
        let stmt = self.stmt.value();
        let i = index.get();
        let rc = match value {
            ValueRef::Null => self.engine.bind_null(stmt, i),
            ValueRef::Integer(v) => self.engine.bind_int64(stmt, i, v),
            ValueRef::Real(v) => self.engine.bind_double(stmt, i, v),
            ValueRef::Text(v) => self.engine.bind_text(stmt, i, v),
            ValueRef::Blob(v) => self.engine.bind_blob(stmt, i, v),
        };
        if rc != SQLITE_OK {
            return Err(Error::from_statement(
                self.engine,
                stmt,
                ErrorKind::Bind,
                format!("failed to bind {} to index {index}", value.type_name()),
                rc,
                self.stmt.site(),
            ));
        }
        Ok(index.next())
    }

    pub fn bind_single<T: SingleValued + ?Sized>(
        &self,
        value: &T,
        index: ParamIndex,
    ) -> Result<ParamIndex> {
        self.bind_value(index, value.value_ref())
    }

    /// Bind each element to its own placeholder, in iteration order.
    pub fn bind_range<'v, T, I>(&self, values: I, index: ParamIndex) -> Result<ParamIndex>
    where
        T: SingleValued + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        values
            .into_iter()
            .try_fold(index, |index, value| self.bind_single(value, index))
    }
}

/// A heterogeneous parameter list, bound left to right.
pub trait Params {
    fn bind_all<E: Engine>(
        &self,
        binder: &Binder<'_, E>,
        index: ParamIndex,
    ) -> Result<ParamIndex>;
}

impl Params for () {
    fn bind_all<E: Engine>(
        &self,
        _binder: &Binder<'_, E>,
        index: ParamIndex,
    ) -> Result<ParamIndex> {
        Ok(index)
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn bind_all<E: Engine>(
        &self,
        binder: &Binder<'_, E>,
        index: ParamIndex,
    ) -> Result<ParamIndex> {
        (**self).bind_all(binder, index)
    }
}

macro_rules! impl_params_for_tuple {
    ($($T:ident),+) => {
        impl<$($T: Bind),+> Params for ($($T,)+) {
            #[allow(non_snake_case)]
            fn bind_all<E: Engine>(
                &self,
                binder: &Binder<'_, E>,
                index: ParamIndex,
            ) -> Result<ParamIndex> {
                let ($($T,)+) = self;
                $(let index = $T.bind(binder, index)?;)+
                Ok(index)
            }
        }
    };
}

impl_params_for_tuple!(T1);
impl_params_for_tuple!(T1, T2);
impl_params_for_tuple!(T1, T2, T3);
impl_params_for_tuple!(T1, T2, T3, T4);
impl_params_for_tuple!(T1, T2, T3, T4, T5);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15);
impl_params_for_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use bstr::BString;

    use super::*;
    use crate::Null;

    #[test]
    fn classification_follows_priority() {
        assert_eq!(classify(&Null), BindKind::Null);
        assert_eq!(classify(&Some(3_i64)), BindKind::Optional);
        assert_eq!(classify(&None::<String>), BindKind::Optional);
        assert_eq!(classify(&42_i32), BindKind::Scalar);
        assert_eq!(classify(&1.5_f32), BindKind::Scalar);
        assert_eq!(classify("text"), BindKind::Scalar);
        assert_eq!(classify(&[1_i64, 2, 3]), BindKind::Range);
        assert_eq!(classify(&vec![Some(1_i64), None]), BindKind::Range);
        assert_eq!(classify(&VecDeque::from(["a", "b"])), BindKind::Range);
        assert_eq!(classify(&BTreeSet::from([3_u32])), BindKind::Range);
    }

    #[test]
    fn byte_sequences_are_scalars() {
        assert_eq!(classify(&vec![0x42_u8, 0x43]), BindKind::Scalar);
        assert_eq!(classify(&[0x42_u8, 0x43]), BindKind::Scalar);
        assert_eq!(classify(&b"bytes"[..]), BindKind::Scalar);
        assert_eq!(classify(&BString::from("bytes")), BindKind::Scalar);
        assert_eq!(classify(&vec![vec![1_u8]]), BindKind::Range);
    }

    #[test]
    fn classification_sees_through_references() {
        let value = 7_i16;
        assert_eq!(classify(&&value), BindKind::Scalar);
        assert_eq!(classify(&&[Null, Null]), BindKind::Range);
    }

    #[test]
    fn value_refs_widen_scalars() {
        assert_eq!(7_u32.value_ref(), ValueRef::Integer(7));
        assert_eq!((-3_i8).value_ref(), ValueRef::Integer(-3));
        assert_eq!(0.5_f32.value_ref(), ValueRef::Real(0.5));
        assert_eq!(String::from("x").value_ref(), ValueRef::Text("x"));
        assert_eq!(Some(4_i64).value_ref(), ValueRef::Integer(4));
        assert_eq!(None::<f64>.value_ref(), ValueRef::Null);
    }

    #[test]
    fn type_names_match_bind_messages() {
        assert_eq!(ValueRef::Null.type_name(), "null");
        assert_eq!(ValueRef::Integer(0).type_name(), "int64");
        assert_eq!(ValueRef::Real(0.0).type_name(), "double");
        assert_eq!(ValueRef::Text("").type_name(), "string");
        assert_eq!(ValueRef::Blob(&[]).type_name(), "BLOB");
    }

    #[test]
    fn param_index_starts_at_one() {
        assert_eq!(ParamIndex::new(0), None);
        assert_eq!(ParamIndex::new(1), Some(ParamIndex::FIRST));
        assert_eq!(ParamIndex::FIRST.next().get(), 2);
        assert_eq!(ParamIndex::FIRST.to_string(), "1");
    }
}
