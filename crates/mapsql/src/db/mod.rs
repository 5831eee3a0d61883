//! Execution wrapper: compile, log, execute.
//!
//! [`MapClient`] pairs any [`GenericClient`] (connection, pooled connection or
//! transaction) with a [`MapConfig`]. Every statement it runs is first logged
//! as literal SQL through `tracing`, then handed to the client with its
//! arguments bound positionally.
//!
//! ```ignore
//! use mapsql::{Dialect, FieldMap, MapClient, raw};
//!
//! let db = MapClient::new(&client);
//! let fields = FieldMap::new()
//!     .with("username", "alice")
//!     .with("created_at", raw("now()"));
//! let (id,): (i64,) = db.insert_map_returning("id", "users", &fields).await?;
//!
//! let mut w = db.new_where();
//! w.and("id=%s", [id]);
//! db.update_map_where("users", &FieldMap::new().with("active", true), &w).await?;
//! ```

mod config;
mod log;

#[cfg(test)]
mod tests;

pub use config::MapConfig;
pub use log::{SQL_TARGET, render_for_log};

use crate::client::GenericClient;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::row::FromRow;
use crate::statement::{self, Statement};
use crate::value::{FieldMap, Value};
use crate::where_clause::Where;
use tokio_postgres::types::ToSql;

fn params_ref(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

/// A database handle that compiles field maps and logs what it executes.
pub struct MapClient<C> {
    client: C,
    config: MapConfig,
}

impl<C: GenericClient> MapClient<C> {
    /// Wrap a client with the default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, MapConfig::default())
    }

    pub fn with_config(client: C, config: MapConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// An empty WHERE builder in this client's dialect.
    pub fn new_where(&self) -> Where {
        Where::new(self.config.dialect)
    }

    /// Log `sql` with `args` inlined, as done before every execution.
    pub fn log_sql(&self, sql: &str, args: &[Value]) {
        log::emit(&self.config, sql, args);
    }

    // ==================== Raw SQL ====================

    /// Execute a statement and return the number of affected rows.
    pub async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.log_sql(sql, args);
        self.client.execute(sql, &params_ref(args)).await
    }

    /// Execute a query and map every row to `T`.
    pub async fn fetch_all<T: FromRow>(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<T>> {
        self.log_sql(sql, args);
        let rows = self.client.query(sql, &params_ref(args)).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute a query and map its **first** row to `T`.
    ///
    /// Returns [`SqlError::NotFound`] when the query yields no row.
    pub async fn fetch_one<T: FromRow>(&self, sql: &str, args: &[Value]) -> SqlResult<T> {
        self.log_sql(sql, args);
        let row = self.client.query_one(sql, &params_ref(args)).await?;
        T::from_row(&row)
    }

    /// Execute a query and map its first row, if any, to `T`.
    pub async fn fetch_opt<T: FromRow>(&self, sql: &str, args: &[Value]) -> SqlResult<Option<T>> {
        self.log_sql(sql, args);
        let row = self.client.query_opt(sql, &params_ref(args)).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute a compiled statement.
    pub async fn execute_statement(&self, statement: &Statement) -> SqlResult<u64> {
        self.execute(statement.sql(), statement.args()).await
    }

    /// Execute a compiled statement and map its first row to `T`.
    pub async fn fetch_statement<T: FromRow>(&self, statement: &Statement) -> SqlResult<T> {
        self.fetch_one(statement.sql(), statement.args()).await
    }

    // ==================== Field maps ====================

    /// `INSERT INTO <table> ...` from `fields`.
    pub async fn insert_map(&self, table: &str, fields: &FieldMap) -> SqlResult<u64> {
        let st = statement::insert(self.config.dialect, table, fields);
        self.execute_statement(&st).await
    }

    /// Insert `fields` and read back the `returning` column(s).
    pub async fn insert_map_returning<T: FromRow>(
        &self,
        returning: &str,
        table: &str,
        fields: &FieldMap,
    ) -> SqlResult<T> {
        let st = statement::insert(self.config.dialect, table, fields).returning(returning);
        self.fetch_statement(&st).await
    }

    /// `UPDATE <table> SET ... WHERE <where_sql>` from `fields`.
    ///
    /// `where_sql` uses placeholders `1..=where_args.len()` in this client's
    /// dialect.
    pub async fn update_map(
        &self,
        table: &str,
        fields: &FieldMap,
        where_sql: &str,
        where_args: &[Value],
    ) -> SqlResult<u64> {
        let st = statement::update(self.config.dialect, table, fields, where_sql, where_args);
        self.execute_statement(&st).await
    }

    /// Update from `fields` and read back the `returning` column(s).
    pub async fn update_map_returning<T: FromRow>(
        &self,
        returning: &str,
        table: &str,
        fields: &FieldMap,
        where_sql: &str,
        where_args: &[Value],
    ) -> SqlResult<T> {
        let st = statement::update(self.config.dialect, table, fields, where_sql, where_args)
            .returning(returning);
        self.fetch_statement(&st).await
    }

    /// Update from `fields`, restricted by a [`Where`] builder.
    ///
    /// Refuses an empty builder (which would update every row) and a builder
    /// written in another dialect.
    pub async fn update_map_where(
        &self,
        table: &str,
        fields: &FieldMap,
        where_clause: &Where,
    ) -> SqlResult<u64> {
        let st = self.update_where_statement(table, fields, where_clause)?;
        self.execute_statement(&st).await
    }

    fn update_where_statement(
        &self,
        table: &str,
        fields: &FieldMap,
        where_clause: &Where,
    ) -> SqlResult<Statement> {
        if where_clause.is_empty() {
            return Err(SqlError::validation(format!(
                "UPDATE {table} without a WHERE condition"
            )));
        }
        if where_clause.dialect() != self.config.dialect {
            return Err(SqlError::validation(format!(
                "WHERE built for dialect {} but client uses {}",
                where_clause.dialect(),
                self.config.dialect
            )));
        }
        Ok(statement::update(
            self.config.dialect,
            table,
            fields,
            &where_clause.conditions(),
            where_clause.args(),
        ))
    }
}
