use crate::{
    Result,
    decode::{BasicColumn, ColumnIndex, RowReader},
    encode::ValueRef,
    engine::Engine,
    sqlite::SqliteDataType,
};

impl_scalar!([] f32, v => ValueRef::Real(f64::from(*v)));
impl_scalar!([] f64, v => ValueRef::Real(*v));

impl BasicColumn for f64 {
    const FAMILY: SqliteDataType = SqliteDataType::Float;

    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        Ok(reader.double(index))
    }
}
