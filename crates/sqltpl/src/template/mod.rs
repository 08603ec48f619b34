//! The template mini-language.
//!
//! A template is SQL text with placeholders and optional conditional blocks:
//!
//! | token | argument |
//! |-------|----------|
//! | `?`   | any scalar, formatted by type (strings quoted and escaped) |
//! | `?d`  | anything, loosely coerced to an integer |
//! | `?f`  | anything, loosely coerced to a float |
//! | `?a`  | list (`1, 2, 3`) or map (`` `a` = 1, `b` = NULL ``) |
//! | `?#`  | identifier or list of identifiers |
//!
//! A `{ ... }` block is dropped from the output when any placeholder inside it
//! is bound to the skip marker. Blocks do not nest.
//!
//! Compilation is a single pass: the scanner yields tokens, placeholders are
//! bound to arguments in order, and output goes either to the result or to the
//! open block's buffer.

mod compiler;
mod inspect;
mod scanner;


pub(crate) use compiler::compile;
pub use inspect::{PlaceholderInfo, TemplateInfo, inspect};
pub use scanner::Placeholder;
