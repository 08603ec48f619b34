use crate::cli::DEFAULT_CONFIG;
use anyhow::Context;
use serde::Deserialize;
use sqltpl::Dialect;
use std::path::{Path, PathBuf};

pub const DEFAULT_SKIP_TOKEN: &str = "__SKIP__";

/// Contents of `sqltpl.toml`.
///
/// ```toml
/// dialect = "ansi"
/// skip_token = "__SKIP__"
///
/// [log]
/// level = "debug"
/// max_sql_length = 500
/// log_sql = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub dialect: Dialect,
    pub skip_token: Option<String>,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive used when `SQLTPL_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    pub max_sql_length: Option<usize>,
    #[serde(default = "default_true")]
    pub log_sql: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            max_sql_length: None,
            log_sql: true,
        }
    }
}

impl ConfigFile {
    /// Load the config file.
    ///
    /// An explicit path must exist; without one, `sqltpl.toml` in the current
    /// directory is used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let file = Self::parse(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(file)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(token) = &self.skip_token {
            if token.is_empty() {
                anyhow::bail!("skip_token must not be empty");
            }
        }
        if self.log.level.trim().is_empty() {
            anyhow::bail!("log.level must not be empty");
        }
        Ok(())
    }

    pub fn skip_token(&self) -> &str {
        self.skip_token.as_deref().unwrap_or(DEFAULT_SKIP_TOKEN)
    }

    pub fn builder_config(&self) -> sqltpl::BuilderConfig {
        let mut config = sqltpl::BuilderConfig::new();
        if let Some(max) = self.log.max_sql_length {
            config = config.with_max_sql_length(max);
        }
        if !self.log.log_sql {
            config = config.without_sql_logging();
        }
        config
    }
}
