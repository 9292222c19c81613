use crate::{
    Result,
    decode::{BasicColumn, ColumnIndex, RowReader},
    encode::ValueRef,
    engine::Engine,
    sqlite::SqliteDataType,
};

impl_scalar!([] i8, v => ValueRef::Integer(i64::from(*v)));
impl_scalar!([] i16, v => ValueRef::Integer(i64::from(*v)));
impl_scalar!([] i32, v => ValueRef::Integer(i64::from(*v)));
impl_scalar!([] i64, v => ValueRef::Integer(*v));
// isize is at most 64 bits on every supported target.
impl_scalar!([] isize, v => ValueRef::Integer(*v as i64));
impl_scalar!([] u16, v => ValueRef::Integer(i64::from(*v)));
impl_scalar!([] u32, v => ValueRef::Integer(i64::from(*v)));

impl BasicColumn for i64 {
    const FAMILY: SqliteDataType = SqliteDataType::Int;

    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        Ok(reader.int64(index))
    }
}
