// Sequences spread over consecutive placeholders.

use std::collections::{BTreeSet, LinkedList, VecDeque};

use crate::{
    Result,
    encode::{Bind, BindKind, Binder, ParamIndex, SingleValued},
    engine::Engine,
};

macro_rules! impl_range {
    ([$($generics:tt)*] $ty:ty) => {
        impl<T: SingleValued, $($generics)*> Bind for $ty {
            const KIND: BindKind = BindKind::Range;

            fn bind<E: Engine>(
                &self,
                binder: &Binder<'_, E>,
                index: ParamIndex,
            ) -> Result<ParamIndex> {
                binder.bind_range(self, index)
            }
        }
    };
}

impl_range!([] [T]);
impl_range!([] Vec<T>);
impl_range!([const N: usize] [T; N]);
impl_range!([] VecDeque<T>);
impl_range!([] LinkedList<T>);
impl_range!([] BTreeSet<T>);
