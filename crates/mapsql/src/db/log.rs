use super::MapConfig;
use crate::literal::interpolate;
use crate::value::Value;
use tracing::Level;

/// Tracing target for statement logs.
pub const SQL_TARGET: &str = "mapsql.sql";

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// The literal SQL line written to the log for `sql` bound with `args`.
pub fn render_for_log(config: &MapConfig, sql: &str, args: &[Value]) -> String {
    let literal = interpolate(config.dialect, sql, args);
    match config.max_sql_length {
        Some(max) if literal.len() > max => format!("{}...", truncate_sql_bytes(&literal, max)),
        _ => literal,
    }
}

fn level_enabled(level: Level) -> bool {
    match level {
        Level::ERROR => tracing::enabled!(target: SQL_TARGET, Level::ERROR),
        Level::WARN => tracing::enabled!(target: SQL_TARGET, Level::WARN),
        Level::INFO => tracing::enabled!(target: SQL_TARGET, Level::INFO),
        Level::DEBUG => tracing::enabled!(target: SQL_TARGET, Level::DEBUG),
        Level::TRACE => tracing::enabled!(target: SQL_TARGET, Level::TRACE),
    }
}

pub(crate) fn emit(config: &MapConfig, sql: &str, args: &[Value]) {
    /// Dispatch a tracing event at a runtime-determined level.
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    if !config.logging_enabled || !level_enabled(config.log_level) {
        return;
    }

    let rendered = render_for_log(config, sql, args);
    emit_at_level!(
        config.log_level,
        target: SQL_TARGET,
        dialect = %config.dialect,
        param_count = args.len(),
        sql = %rendered,
    );
}
