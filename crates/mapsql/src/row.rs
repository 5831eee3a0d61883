//! Row mapping traits and utilities

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust value.
///
/// This is the destination of the `*_returning` and `fetch_*` operations on
/// [`MapClient`](crate::MapClient). Tuples of up to four columns implement it
/// positionally, so `returning id` can be read as `(i64,)`.
///
/// # Example
///
/// ```ignore
/// use mapsql::{FromRow, RowExt, SqlResult};
///
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &tokio_postgres::Row) -> SqlResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             username: row.try_get_column("username")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqlResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning SqlError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| SqlError::decode(column, e.to_string()))
    }
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt => $t:ident),+) => {
        impl<$($t),+> FromRow for ($($t,)+)
        where
            $($t: for<'a> FromSql<'a>,)+
        {
            fn from_row(row: &Row) -> SqlResult<Self> {
                Ok(($(
                    row.try_get::<_, $t>($idx)
                        .map_err(|e| SqlError::decode(stringify!($idx), e.to_string()))?,
                )+))
            }
        }
    };
}

impl_from_row_tuple!(0 => A);
impl_from_row_tuple!(0 => A, 1 => B);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
