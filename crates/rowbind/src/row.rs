use crate::{
    Result,
    decode::{Column, ColumnIndex, RowReader},
    engine::Engine,
};

/// The declared shape of a result row: a tuple of [`Column`] types, decoded left to right from
/// column 0.
///
/// The number of columns in the result is not checked against the tuple's arity.
pub trait RowShape: Sized {
    const ARITY: usize;

    fn decode_row<E: Engine>(reader: &RowReader<'_, E>) -> Result<Self>;
}

macro_rules! impl_row_shape_for_tuple {
    ($arity:literal; $($T:ident),+) => {
        impl<$($T: Column),+> RowShape for ($($T,)+) {
            const ARITY: usize = $arity;

            #[allow(non_snake_case, unused_assignments)]
            fn decode_row<E: Engine>(reader: &RowReader<'_, E>) -> Result<Self> {
                let mut index = ColumnIndex::FIRST;
                $(
                    let $T = $T::decode(reader, index)?;
                    index = index.next();
                )+
                Ok(($($T,)+))
            }
        }
    };
}

impl_row_shape_for_tuple!(1; T1);
impl_row_shape_for_tuple!(2; T1, T2);
impl_row_shape_for_tuple!(3; T1, T2, T3);
impl_row_shape_for_tuple!(4; T1, T2, T3, T4);
impl_row_shape_for_tuple!(5; T1, T2, T3, T4, T5);
impl_row_shape_for_tuple!(6; T1, T2, T3, T4, T5, T6);
impl_row_shape_for_tuple!(7; T1, T2, T3, T4, T5, T6, T7);
impl_row_shape_for_tuple!(8; T1, T2, T3, T4, T5, T6, T7, T8);
impl_row_shape_for_tuple!(9; T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_row_shape_for_tuple!(10; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_row_shape_for_tuple!(11; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_row_shape_for_tuple!(12; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
impl_row_shape_for_tuple!(13; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13);
impl_row_shape_for_tuple!(14; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14);
impl_row_shape_for_tuple!(15; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15);
impl_row_shape_for_tuple!(
    16; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_tuple_length() {
        assert_eq!(<(i64,)>::ARITY, 1);
        assert_eq!(<(i64, Option<f64>, String, Option<Vec<u8>>)>::ARITY, 4);
    }
}
