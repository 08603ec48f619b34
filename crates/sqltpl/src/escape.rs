//! String-literal escaping and identifier quoting.
//!
//! The compiler never decides on its own how a string is made safe for the
//! target database; it asks an [`Escaper`]. Two dialects ship with the crate:
//!
//! - [`MySqlEscaper`]: backslash escaping as done by `mysql_real_escape_string`,
//!   back-tick identifiers.
//! - [`AnsiEscaper`]: standard SQL quote doubling, double-quoted identifiers.
//!
//! Any closure `Fn(&str) -> String` can be used through [`FnEscaper`].

use serde::Deserialize;
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

/// Dialect-specific escaping used by the compiler.
pub trait Escaper {
    /// Make `raw` safe to place between single quotes. Must not add the quotes.
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str>;

    /// Append `name` wrapped in identifier quotes.
    ///
    /// The default wraps the name verbatim in back-ticks.
    fn write_identifier(&self, name: &str, out: &mut String) {
        out.push('`');
        out.push_str(name);
        out.push('`');
    }

    /// Wrap `name` in identifier quotes.
    fn quote_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_identifier(name, &mut out);
        out
    }
}

impl<E: Escaper + ?Sized> Escaper for &E {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        (**self).escape(raw)
    }

    fn write_identifier(&self, name: &str, out: &mut String) {
        (**self).write_identifier(name, out)
    }
}

impl<E: Escaper + ?Sized> Escaper for Box<E> {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        (**self).escape(raw)
    }

    fn write_identifier(&self, name: &str, out: &mut String) {
        (**self).write_identifier(name, out)
    }
}

impl<E: Escaper + ?Sized> Escaper for Arc<E> {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        (**self).escape(raw)
    }

    fn write_identifier(&self, name: &str, out: &mut String) {
        (**self).write_identifier(name, out)
    }
}

/// Escape through a closure, quoting identifiers with back-ticks.
///
/// Typically wraps a driver's own escaping routine:
///
/// ```ignore
/// let builder = QueryBuilder::new(FnEscaper(|s: &str| conn.escape_string(s)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnEscaper<F>(pub F);

impl<F> Escaper for FnEscaper<F>
where
    F: Fn(&str) -> String,
{
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Owned((self.0)(raw))
    }
}

/// MySQL string escaping.
///
/// Escapes NUL, `\n`, `\r`, `\`, `'`, `"` and Ctrl-Z with a backslash, the same
/// set `mysql_real_escape_string` handles for single-byte safe charsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlEscaper;

impl MySqlEscaper {
    fn needs_escape(c: char) -> bool {
        matches!(c, '\0' | '\n' | '\r' | '\\' | '\'' | '"' | '\x1a')
    }
}

impl Escaper for MySqlEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if !raw.chars().any(Self::needs_escape) {
            return Cow::Borrowed(raw);
        }
        let mut out = String::with_capacity(raw.len() + 8);
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

/// Standard SQL escaping: `'` is doubled, identifiers use `"` with `""` for an
/// embedded quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiEscaper;

impl Escaper for AnsiEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if !raw.contains('\'') {
            return Cow::Borrowed(raw);
        }
        Cow::Owned(raw.replace('\'', "''"))
    }

    fn write_identifier(&self, name: &str, out: &mut String) {
        out.push('"');
        for ch in name.chars() {
            if ch == '"' {
                out.push('"');
                out.push('"');
            } else {
                out.push(ch);
            }
        }
        out.push('"');
    }
}

/// Built-in dialects, selectable by name (`"mysql"`, `"ansi"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Dialect {
    #[default]
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "ansi")]
    Ansi,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Ansi => "ansi",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "ansi" | "standard" | "postgres" | "sqlite" => Ok(Self::Ansi),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

impl Escaper for Dialect {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Self::MySql => MySqlEscaper.escape(raw),
            Self::Ansi => AnsiEscaper.escape(raw),
        }
    }

    fn write_identifier(&self, name: &str, out: &mut String) {
        match self {
            Self::MySql => MySqlEscaper.write_identifier(name, out),
            Self::Ansi => AnsiEscaper.write_identifier(name, out),
        }
    }
}
