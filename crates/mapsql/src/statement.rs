//! INSERT / UPDATE statements compiled from a [`FieldMap`].
//!
//! Columns are emitted in field-name order. [`Raw`](crate::Raw) values are
//! spliced into the text and consume no placeholder; every other value takes
//! the next placeholder and is appended to the argument list.
//!
//! Argument `i` always belongs to ordinal `i + 1` (`$n`, `@pn`) or to the
//! i-th `?` in the text, so any driver can bind the arguments positionally.

use crate::dialect::Dialect;
use crate::literal::interpolate;
use crate::value::{FieldMap, Value};
use tokio_postgres::types::ToSql;

/// A compiled statement: SQL text plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Statement {
    sql: String,
    args: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    /// Append ` returning <columns>`.
    pub fn returning(mut self, columns: &str) -> Self {
        self.sql.push_str(" returning ");
        self.sql.push_str(columns);
        self
    }

    /// The statement with its arguments inlined as literals (for logs only).
    pub fn to_literal_sql(&self, dialect: Dialect) -> String {
        interpolate(dialect, &self.sql, &self.args)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

/// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`.
pub fn insert(dialect: Dialect, table: &str, fields: &FieldMap) -> Statement {
    let mut columns = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    let mut args = Vec::with_capacity(fields.bound_len());

    for (name, value) in fields.iter() {
        columns.push(name);
        match value.as_raw() {
            Some(raw) => values.push(raw.as_str().to_string()),
            None => {
                args.push(value.clone());
                values.push(dialect.placeholder(args.len()));
            }
        }
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        values.join(", ")
    );
    Statement::new(sql, args)
}

/// `UPDATE <table> SET <assignments> WHERE <where_sql>`.
///
/// `where_sql` carries its own placeholders for `where_args`. With an ordinal
/// dialect those are expected to be `1..=where_args.len()` and the SET
/// placeholders are numbered after them; the returned arguments are the WHERE
/// arguments followed by the SET arguments. With [`Dialect::QuestionMark`] the
/// SET marks come first in the text, so the SET arguments come first too.
pub fn update(
    dialect: Dialect,
    table: &str,
    fields: &FieldMap,
    where_sql: &str,
    where_args: &[Value],
) -> Statement {
    let mut sets = Vec::with_capacity(fields.len());
    let mut set_args = Vec::with_capacity(fields.bound_len());
    let mut ordinal = where_args.len();

    for (name, value) in fields.iter() {
        let mut assignment = format!("{name}=");
        match value.as_raw() {
            Some(raw) => assignment.push_str(raw.as_str()),
            None => {
                ordinal += 1;
                dialect.write_placeholder(ordinal, &mut assignment);
                set_args.push(value.clone());
            }
        }
        sets.push(assignment);
    }

    let sql = format!("UPDATE {table} SET {} WHERE {where_sql}", sets.join(", "));

    let mut args = Vec::with_capacity(where_args.len() + set_args.len());
    if dialect.is_ordinal() {
        args.extend_from_slice(where_args);
        args.append(&mut set_args);
    } else {
        args.append(&mut set_args);
        args.extend_from_slice(where_args);
    }
    Statement::new(sql, args)
}
