/// Configuration for a [`QueryBuilder`](crate::QueryBuilder).
///
/// Only affects diagnostics; the rendered SQL never depends on it. Events are
/// emitted only when the crate is built with the `tracing` feature.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Include the rendered SQL in build events.
    pub log_sql: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Tracing event level for successful builds.
    #[cfg(feature = "tracing")]
    pub level: tracing::Level,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            log_sql: true,
            max_sql_length: Some(200),
            #[cfg(feature = "tracing")]
            level: tracing::Level::DEBUG,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Keep rendered SQL (and thus argument values) out of the logs.
    pub fn without_sql_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }

    /// Override the tracing event level.
    #[cfg(feature = "tracing")]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_override_defaults() {
        let config = BuilderConfig::new();
        assert!(config.log_sql);
        assert_eq!(config.max_sql_length, Some(200));

        let config = config.with_max_sql_length(16).without_sql_logging();
        assert!(!config.log_sql);
        assert_eq!(config.max_sql_length, Some(16));
        assert_eq!(config.no_truncate().max_sql_length, None);
    }
}
