//! Binding [`Value`] through tokio-postgres.

use super::Value;
use bytes::BytesMut;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

type BindResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

fn bind<T: ToSql>(value: &T, ty: &Type, out: &mut BytesMut, checked: bool) -> BindResult {
    if checked {
        value.to_sql_checked(ty, out)
    } else {
        value.to_sql(ty, out)
    }
}

impl Value {
    fn encode(&self, ty: &Type, out: &mut BytesMut, checked: bool) -> BindResult {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(v) => bind(v, ty, out, checked),
            // Integer columns narrower than int8 reject an i64 outright.
            Self::Int(v) => match *ty {
                Type::INT2 => bind(&i16::try_from(*v)?, ty, out, checked),
                Type::INT4 => bind(&i32::try_from(*v)?, ty, out, checked),
                _ => bind(v, ty, out, checked),
            },
            Self::Float(v) => match *ty {
                Type::FLOAT4 => bind(&(*v as f32), ty, out, checked),
                _ => bind(v, ty, out, checked),
            },
            Self::Float4(v) => match *ty {
                Type::FLOAT8 => bind(&f64::from(*v), ty, out, checked),
                _ => bind(v, ty, out, checked),
            },
            Self::Text(v) => bind(v, ty, out, checked),
            Self::Timestamp(v) => bind(v, ty, out, checked),
            Self::TimestampTz(v) => bind(v, ty, out, checked),
            Self::Uuid(v) => bind(v, ty, out, checked),
            Self::Json(v) => bind(v, ty, out, checked),
            Self::Nullable(n) if n.valid => n.value.encode(ty, out, checked),
            Self::Nullable(_) => Ok(IsNull::Yes),
            Self::Raw(raw) => Err(format!("raw SQL `{raw}` cannot be bound as a parameter").into()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> BindResult {
        self.encode(ty, out, false)
    }

    // Type checking is delegated to the wrapped value in `to_sql_checked`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn to_sql_checked(&self, ty: &Type, out: &mut BytesMut) -> BindResult {
        self.encode(ty, out, true)
    }
}
