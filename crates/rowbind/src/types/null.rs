use crate::{
    Result,
    encode::{Bind, BindKind, Binder, ParamIndex, Scalar, SingleValued, ValueRef},
    engine::Engine,
};

/// An explicit SQL `NULL` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

impl SingleValued for Null {
    const KIND: BindKind = BindKind::Null;

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Null
    }
}

impl Bind for Null {
    const KIND: BindKind = BindKind::Null;

    fn bind<E: Engine>(&self, binder: &Binder<'_, E>, index: ParamIndex) -> Result<ParamIndex> {
        binder.bind_single(self, index)
    }
}

impl<T: Scalar> SingleValued for Option<T> {
    const KIND: BindKind = BindKind::Optional;

    fn value_ref(&self) -> ValueRef<'_> {
        match self {
            Some(value) => value.value_ref(),
            None => ValueRef::Null,
        }
    }
}

impl<T: Scalar> Bind for Option<T> {
    const KIND: BindKind = BindKind::Optional;

    fn bind<E: Engine>(&self, binder: &Binder<'_, E>, index: ParamIndex) -> Result<ParamIndex> {
        binder.bind_single(self, index)
    }
}
