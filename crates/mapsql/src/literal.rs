//! Literal SQL rendering for logs.
//!
//! [`interpolate`] turns a parameterized statement plus its arguments back into
//! a single SQL string with every placeholder replaced by the literal form of
//! its argument. The output is meant to be read by humans; it is never sent to
//! the database.

use crate::dialect::Dialect;
use crate::value::Value;
use regex::Captures;
use std::fmt::Write;

/// `chrono` format used for temporal literals.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one value as SQL literal text.
pub fn literal(dialect: Dialect, value: &Value) -> String {
    let mut out = String::new();
    write_literal(dialect, value, &mut out);
    out
}

/// Append the literal form of `value` to `out`.
pub fn write_literal(dialect: Dialect, value: &Value, out: &mut String) {
    match value {
        Value::Raw(raw) => out.push_str(raw.as_str()),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(dialect.bool_literal(*b)),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        // `Display` for f64 is the shortest round-trip form and never uses an exponent.
        Value::Float(f) => {
            let _ = write!(out, "{f}");
        }
        Value::Float4(f) => {
            let _ = write!(out, "{f}");
        }
        Value::Text(s) => write_quoted(s, out),
        Value::Timestamp(t) => {
            let _ = write!(out, "'{}'", t.format(TIMESTAMP_FORMAT));
        }
        Value::TimestampTz(t) => {
            let _ = write!(out, "'{}'", t.format(TIMESTAMP_FORMAT));
        }
        Value::Nullable(n) if n.valid => write_literal(dialect, &n.value, out),
        Value::Nullable(_) => out.push_str("null"),
        // No dedicated literal form: plain `Display`, unquoted.
        Value::Uuid(u) => {
            let _ = write!(out, "{u}");
        }
        Value::Json(j) => {
            let _ = write!(out, "{j}");
        }
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
}

/// Replace every placeholder in `sql` by the literal form of its argument.
///
/// - `?`: the i-th mark takes the i-th argument.
/// - `$n` / `@pn`: each occurrence takes argument `n - 1`, so an ordinal may be
///   repeated or appear out of order.
///
/// With no arguments `sql` is returned unchanged. A placeholder that does not
/// resolve to an argument is left as written.
pub fn interpolate(dialect: Dialect, sql: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return sql.to_string();
    }

    let re = dialect.placeholder_regex();
    if dialect.is_ordinal() {
        re.replace_all(sql, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| args.get(i))
                .map_or_else(|| caps[0].to_string(), |v| literal(dialect, v))
        })
        .into_owned()
    } else {
        let mut remaining = args.iter();
        re.replace_all(sql, |caps: &Captures<'_>| match remaining.next() {
            Some(v) => literal(dialect, v),
            None => caps[0].to_string(),
        })
        .into_owned()
    }
}
