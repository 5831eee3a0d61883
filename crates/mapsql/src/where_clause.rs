//! Incremental WHERE clause builder.
//!
//! Conditions are written with `%s` where an argument goes. Each `%s` is
//! replaced by a fresh placeholder in the builder's [`Dialect`], numbered after
//! the arguments already bound.
//!
//! ```ignore
//! let mut w = Where::new(Dialect::Dollar);
//! w.and("status=%s", ["active"]);
//! w.and_list("role in (%s)", ["admin", "owner"]);
//! assert_eq!(w.to_sql(), " where status=$1 and role in ($2,$3)");
//! ```

use crate::dialect::Dialect;
use crate::value::Value;
use std::fmt;

/// Conjunction of conditions with their bound arguments.
///
/// Cloning yields an independent builder, which makes it easy to branch a
/// common base into several queries.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Where {
    dialect: Dialect,
    conditions: Vec<String>,
    args: Vec<Value>,
}

impl Where {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            conditions: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Add a condition, binding one argument per `%s` in `condition`.
    ///
    /// An empty `condition` adds nothing to the clause but still binds
    /// `args`, for placeholders written by hand in an earlier condition.
    pub fn and<I>(&mut self, condition: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        if !condition.is_empty() {
            let first = self.args.len() + 1;
            let mut ordinals = first..first + args.len();
            let dialect = self.dialect;
            let filled = fill(condition, || {
                ordinals.next().map(|n| dialect.placeholder(n))
            });
            self.conditions.push(filled);
        }
        self.args.extend(args);
        self
    }

    /// Add a condition with no arguments (e.g. `"deleted_at is null"`).
    pub fn and_sql(&mut self, condition: &str) -> &mut Self {
        self.and(condition, std::iter::empty::<Value>())
    }

    /// Add a condition whose single `%s` expands to one placeholder per value,
    /// joined by `,`.
    ///
    /// With no values the `%s` becomes `NULL`, keeping `in (%s)` valid SQL that
    /// matches nothing.
    pub fn and_list<I>(&mut self, condition: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut list = String::new();
        for value in values {
            if !list.is_empty() {
                list.push(',');
            }
            self.args.push(value.into());
            self.dialect.write_placeholder(self.args.len(), &mut list);
        }
        if list.is_empty() {
            list.push_str("NULL");
        }

        let mut list = Some(list);
        self.conditions.push(fill(condition, || list.take()));
        self
    }

    /// ` where <conditions>`, or an empty string when there is no condition.
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        format!(" where {}", self.conditions())
    }

    /// Conditions joined by ` and `, without the ` where ` prefix.
    pub fn conditions(&self) -> String {
        self.conditions.join(" and ")
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_args(self) -> Vec<Value> {
        self.args
    }

    /// Whether no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of bound arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Replace each `%s` with the next value from `next` and `%%` with `%`.
///
/// A `%s` left without a value is kept as written.
fn fill(template: &str, mut next: impl FnMut() -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                match next() {
                    Some(placeholder) => out.push_str(&placeholder),
                    None => out.push_str("%s"),
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}
