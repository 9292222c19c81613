use std::borrow::Cow;

use crate::{
    Result,
    decode::{BasicColumn, ColumnIndex, RowReader},
    encode::ValueRef,
    engine::Engine,
    sqlite::SqliteDataType,
};

impl_scalar!([] str, v => ValueRef::Text(v));
impl_scalar!([] String, v => ValueRef::Text(v));
impl_scalar!(['a] Cow<'a, str>, v => ValueRef::Text(v));

impl BasicColumn for String {
    const FAMILY: SqliteDataType = SqliteDataType::Text;

    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        reader.text(index)
    }
}
