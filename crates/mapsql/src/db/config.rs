use crate::dialect::Dialect;
use tracing::Level;

/// Configuration for [`MapClient`](super::MapClient).
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Placeholder dialect for generated statements and SQL logs.
    pub dialect: Dialect,
    /// Whether to log statements before executing them.
    pub logging_enabled: bool,
    /// Tracing event level to emit at.
    pub log_level: Level,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Dollar,
            logging_enabled: true,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl MapConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable statement logging.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Override the tracing event level.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
