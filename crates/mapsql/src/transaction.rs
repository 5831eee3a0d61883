//! Transaction helpers.
//!
//! [`transaction!`] begins a transaction, hands the block a
//! [`MapClient`](crate::MapClient) over it, commits when the block returns
//! `Ok` and rolls back when it returns `Err`. Every statement inside is logged
//! like any other `MapClient` statement.
//!
//! # Example
//!
//! ```ignore
//! use mapsql::{FieldMap, MapConfig, SqlResult};
//! use tokio_postgres::NoTls;
//!
//! # async fn demo() -> SqlResult<()> {
//! let (mut client, connection) = tokio_postgres::connect("postgres://...", NoTls).await?;
//! tokio::spawn(async move { let _ = connection.await; });
//!
//! let id: i64 = mapsql::transaction!(&mut client, MapConfig::default(), db, {
//!     let (id,): (i64,) = db
//!         .insert_map_returning("id", "accounts", &FieldMap::new().with("balance", 100))
//!         .await?;
//!     db.update_map("accounts", &FieldMap::new().with("balance", 0), "id=$1", &[7.into()])
//!         .await?;
//!     Ok(id)
//! })?;
//! # Ok(()) }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

static SAVEPOINT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via `$client.transaction().await`.
/// - Binds `$db` to a `MapClient` over the transaction (default config unless
///   one is given).
/// - Commits on `Ok(_)`, rolls back on `Err(_)`.
///
/// The block must evaluate to `mapsql::SqlResult<T>`.
#[macro_export]
macro_rules! transaction {
    ($client:expr, $db:ident, $body:block) => {
        $crate::transaction!($client, $crate::MapConfig::default(), $db, $body)
    };
    ($client:expr, $config:expr, $db:ident, $body:block) => {{
        let __mapsql_tx = ($client)
            .transaction()
            .await
            .map_err($crate::SqlError::from_db_error)?;

        let __mapsql_body_result = {
            let $db = $crate::MapClient::with_config(&__mapsql_tx, $config);
            async { $body }.await
        };
        match __mapsql_body_result {
            Ok(value) => {
                __mapsql_tx
                    .commit()
                    .await
                    .map_err($crate::SqlError::from_db_error)?;
                Ok(value)
            }
            Err(error) => match __mapsql_tx.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::SqlError::Other(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
}

/// Runs the given block inside a savepoint of an open transaction.
///
/// `$tx` must be a mutable `tokio_postgres::Transaction`. The savepoint is
/// released on `Ok(_)` and rolled back on `Err(_)`, leaving the outer
/// transaction usable either way.
///
/// ```ignore
/// let mut tx = client.transaction().await?;
/// let audit = mapsql::savepoint!(tx, "audit", db, {
///     db.insert_map("audit_log", &FieldMap::new().with("event", "login")).await?;
///     Ok(())
/// });
/// if let Err(e) = audit {
///     tracing::warn!("audit insert failed: {e}");
/// }
/// tx.commit().await?;
/// ```
#[macro_export]
macro_rules! savepoint {
    ($tx:expr, $name:expr, $db:ident, $body:block) => {{
        let __mapsql_sp = ($tx)
            .savepoint($name)
            .await
            .map_err($crate::SqlError::from_db_error)?;

        let __mapsql_body_result = {
            let $db = $crate::MapClient::new(&__mapsql_sp);
            async { $body }.await
        };
        match __mapsql_body_result {
            Ok(value) => {
                __mapsql_sp
                    .commit()
                    .await
                    .map_err($crate::SqlError::from_db_error)?;
                Ok(value)
            }
            Err(error) => match __mapsql_sp.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::SqlError::Other(format!(
                    "{error} (savepoint rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
    ($tx:expr, $db:ident, $body:block) => {{
        let __mapsql_sp_name = $crate::transaction::next_savepoint_name();
        $crate::savepoint!($tx, __mapsql_sp_name, $db, $body)
    }};
}

/// A fresh name for an anonymous savepoint (`mapsql_sp_<n>`).
#[doc(hidden)]
pub fn next_savepoint_name() -> String {
    let n = SAVEPOINT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("mapsql_sp_{n}")
}

#[cfg(test)]
mod tests {
    use super::next_savepoint_name;

    #[test]
    fn savepoint_names_are_unique() {
        let a = next_savepoint_name();
        let b = next_savepoint_name();
        assert_ne!(a, b);
        assert!(a.starts_with("mapsql_sp_"));
    }
}
