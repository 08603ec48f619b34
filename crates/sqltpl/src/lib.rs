//! # sqltpl
//!
//! Typed SQL query templates rendered to plain, escaped SQL strings.
//!
//! ## Features
//!
//! - **Typed placeholders**: `?`, `?d`, `?f`, `?a`, `?#` pick how each argument is rendered
//! - **Conditional blocks**: `{ AND block = ?d }` disappears when bound to [`skip()`]
//! - **Strict arity**: every placeholder consumes exactly one argument, no more, no less
//! - **Pluggable escaping**: MySQL and ANSI dialects built in, or bring your own [`Escaper`]
//! - **Stateless**: each build is independent; builders are freely shareable across threads
//!
//! ## Example
//!
//! ```ignore
//! use sqltpl::{args, build, skip};
//!
//! let sql = build(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", vec![1, 2, 3], skip()],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
//!
//! let sql = build("UPDATE users SET ?a WHERE user_id = ?d", &args![
//!     sqltpl::Value::map([("name", sqltpl::Value::from("Jack")), ("email", sqltpl::Value::Null)]),
//!     -1,
//! ])?;
//! assert_eq!(sql, "UPDATE users SET `name` = 'Jack', `email` = NULL WHERE user_id = -1");
//! # Ok::<(), sqltpl::TemplateError>(())
//! ```

mod builder;
mod coerce;
pub mod config;
pub mod error;
pub mod escape;
pub mod template;
pub mod value;

#[cfg(feature = "tracing")]
mod trace;

pub use builder::QueryBuilder;
pub use config::BuilderConfig;
pub use error::{ErrorKind, TemplateError, TemplateResult};
pub use escape::{AnsiEscaper, Dialect, Escaper, FnEscaper, MySqlEscaper};
pub use template::{Placeholder, PlaceholderInfo, TemplateInfo, inspect};
pub use value::{OpaqueValue, Skip, Value};

/// Render `template` with `args` using MySQL escaping.
///
/// Shorthand for `QueryBuilder::mysql().build(template, args)`.
pub fn build(template: &str, args: &[Value]) -> TemplateResult<String> {
    QueryBuilder::mysql().build(template, args)
}

/// The marker that suppresses the `{ ... }` block its placeholder sits in.
///
/// Only valid as a top-level argument for a placeholder inside a block.
pub fn skip() -> Value {
    Value::Skip(Skip::TOKEN)
}
