use crate::config::BuilderConfig;
use crate::error::TemplateResult;
use crate::escape::{Escaper, MySqlEscaper};
use crate::template::compile;
use crate::value::{Skip, Value};

/// Compiles templates against argument lists using one escaping dialect.
///
/// A builder holds no per-call state: `build` takes `&self`, so one instance
/// can be shared across threads whenever its escaper is `Sync`.
///
/// # Example
/// ```ignore
/// use sqltpl::{QueryBuilder, args};
///
/// let qb = QueryBuilder::mysql();
/// let sql = qb.build(
///     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
///     &args!["user_id", vec![1, 2, 3], qb.skip()],
/// )?;
/// assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder<E = MySqlEscaper> {
    escaper: E,
    config: BuilderConfig,
}

impl QueryBuilder<MySqlEscaper> {
    /// Builder using MySQL escaping and back-tick identifiers.
    pub fn mysql() -> Self {
        Self::new(MySqlEscaper)
    }
}

impl<E: Escaper> QueryBuilder<E> {
    pub fn new(escaper: E) -> Self {
        Self {
            escaper,
            config: BuilderConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }

    /// The marker that suppresses the `{ ... }` block its placeholder sits in.
    pub fn skip(&self) -> Value {
        Value::Skip(Skip::TOKEN)
    }

    /// Render `template` with `args` bound to its placeholders in order.
    ///
    /// Fails without partial output on any template/argument mismatch; see
    /// [`TemplateError`](crate::TemplateError).
    pub fn build(&self, template: &str, args: &[Value]) -> TemplateResult<String> {
        let result = compile(&self.escaper, template, args);
        #[cfg(feature = "tracing")]
        self.trace(template, args.len(), &result);
        result
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, template: &str, args: usize, result: &TemplateResult<String>) {
        match result {
            Ok(sql) => crate::trace::emit_built(&self.config, template, args, sql),
            Err(err) => crate::trace::emit_failed(template, args, err),
        }
    }
}
