//! # mapsql
//!
//! Dialect-aware INSERT/UPDATE generation from field maps, with the bound
//! arguments inlined into readable SQL for logs.
//!
//! ## Features
//!
//! - **Field maps in, SQL out**: a [`FieldMap`] of column → [`Value`] compiles
//!   to an INSERT or UPDATE statement plus its positional arguments
//! - **Three placeholder dialects**: `$n`, `?` and `@pn` ([`Dialect`])
//! - **Raw fragments**: [`raw`] values (`now()`, `count+1`) are spliced into
//!   the SQL and never bound
//! - **Incremental WHERE**: [`Where`] numbers `%s` markers after the arguments
//!   already bound, with list expansion for `IN (...)`
//! - **Logged execution**: [`MapClient`] writes every statement to `tracing`
//!   as literal SQL before running it
//!
//! ## Compiling statements
//!
//! ```ignore
//! use mapsql::{Dialect, FieldMap, raw};
//!
//! let fields = FieldMap::new()
//!     .with("name", "alice")
//!     .with("updated_at", raw("now()"));
//!
//! let st = mapsql::update(Dialect::Dollar, "users", &fields, "id=$1", &[42.into()]);
//! assert_eq!(st.sql(), "UPDATE users SET name=$2, updated_at=now() WHERE id=$1");
//! assert_eq!(
//!     st.to_literal_sql(Dialect::Dollar),
//!     "UPDATE users SET name='alice', updated_at=now() WHERE id=42"
//! );
//! ```
//!
//! ## Executing
//!
//! ```ignore
//! use mapsql::{FieldMap, MapClient};
//!
//! let db = MapClient::new(&client);
//! let (id,): (i64,) = db
//!     .insert_map_returning("id", "users", &FieldMap::new().with("name", "bob"))
//!     .await?;
//! ```

pub mod client;
pub mod db;
pub mod dialect;
pub mod error;
pub mod literal;
pub mod naming;
pub mod row;
pub mod statement;
pub mod transaction;
pub mod value;
pub mod where_clause;

pub use client::GenericClient;
pub use db::{MapClient, MapConfig};
pub use dialect::Dialect;
pub use error::{SqlError, SqlResult};
pub use literal::{interpolate, literal};
pub use naming::camel_to_snake;
pub use row::{FromRow, RowExt};
pub use statement::{Statement, insert, update};
pub use value::{FieldMap, Nullable, Raw, Value, raw};
pub use where_clause::Where;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use client::PoolClient;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
