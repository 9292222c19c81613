use std::borrow::Cow;

use crate::{
    Result,
    decode::{BasicColumn, ColumnIndex, RowReader},
    encode::ValueRef,
    engine::Engine,
    sqlite::SqliteDataType,
};

impl_scalar!([] [u8], v => ValueRef::Blob(v));
impl_scalar!([] Vec<u8>, v => ValueRef::Blob(v));
impl_scalar!([const N: usize] [u8; N], v => ValueRef::Blob(v));
impl_scalar!(['a] Cow<'a, [u8]>, v => ValueRef::Blob(v));

impl BasicColumn for Vec<u8> {
    const FAMILY: SqliteDataType = SqliteDataType::Blob;

    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        reader.blob(index)
    }
}
