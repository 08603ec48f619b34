//! `tracing` events for template builds.
//!
//! Enable via the crate feature: `sqltpl = { features = ["tracing"] }`.

use crate::config::BuilderConfig;
use crate::error::TemplateError;
use tracing::Level;

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
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

fn shown_sql(config: &BuilderConfig, sql: &str) -> String {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

pub(crate) fn emit_built(config: &BuilderConfig, template: &str, args: usize, sql: &str) {
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

    let template_len = template.len();
    if config.log_sql {
        let sql = shown_sql(config, sql);
        emit_at_level!(
            config.level,
            target: "sqltpl.build",
            template_len,
            args,
            sql = %sql,
            "template built"
        );
    } else {
        emit_at_level!(
            config.level,
            target: "sqltpl.build",
            template_len,
            args,
            sql_len = sql.len(),
            "template built"
        );
    }
}

pub(crate) fn emit_failed(template: &str, args: usize, err: &TemplateError) {
    tracing::warn!(
        target: "sqltpl.build",
        template_len = template.len(),
        args,
        kind = %err.kind(),
        position = ?err.position(),
        error = %err,
        "template build failed"
    );
}
