//! Conversions between `bstr` types and SQL types.
use crate::{
    Result,
    decode::{BasicColumn, ColumnIndex, RowReader},
    encode::ValueRef,
    engine::Engine,
    sqlite::SqliteDataType,
};

#[doc(no_inline)]
pub use bstr::{BStr, BString, ByteSlice};

impl_scalar!([] BStr, v => ValueRef::Blob(v));
impl_scalar!([] BString, v => ValueRef::Blob(v));

impl BasicColumn for BString {
    const FAMILY: SqliteDataType = SqliteDataType::Blob;

    fn extract<E: Engine>(reader: &RowReader<'_, E>, index: ColumnIndex) -> Result<Self> {
        reader.blob(index).map(BString::from)
    }
}
