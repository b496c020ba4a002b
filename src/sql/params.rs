//! Values bound to PostgreSQL statements.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A bind parameter. Sent as text; the statement casts each placeholder to the
/// column type (`$1::integer`), so one Rust type covers every column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PgBindValue {
    Null,
    Int(i32),
    Text(String),
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null => <Option<&str> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            PgBindValue::Int(n) => {
                let s = n.to_string();
                <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf)?
            }
            PgBindValue::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf)?,
        })
    }
}

impl sqlx::Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}
