use super::scanner::{Placeholder, Scanner, Token};
use crate::coerce;
use crate::error::{TemplateError, TemplateResult};
use crate::escape::Escaper;
use crate::value::Value;

/// Block state of the single compile pass.
enum State {
    Top,
    InBlock {
        /// Offset of the `{`, reported if the block is never closed.
        open_at: usize,
        buf: String,
        /// Cleared once a placeholder in the block binds to the skip marker.
        render: bool,
    },
}

/// Compile `template` against `args` in one left-to-right pass.
pub(crate) fn compile<E>(escaper: &E, template: &str, args: &[Value]) -> TemplateResult<String>
where
    E: Escaper + ?Sized,
{
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut state = State::Top;
    let mut next_arg = 0usize;

    for (position, token) in Scanner::new(template) {
        match token {
            Token::Literal(text) => match &mut state {
                State::Top => out.push_str(text),
                State::InBlock { buf, .. } => buf.push_str(text),
            },
            Token::OpenBlock => {
                if let State::InBlock { .. } = state {
                    return Err(TemplateError::Nesting { position });
                }
                state = State::InBlock {
                    open_at: position,
                    buf: String::new(),
                    render: true,
                };
            }
            Token::CloseBlock => match std::mem::replace(&mut state, State::Top) {
                State::Top => {
                    return Err(TemplateError::UnmatchedBrace {
                        brace: '}',
                        position,
                    });
                }
                State::InBlock { buf, render, .. } => {
                    if render {
                        out.push_str(&buf);
                    }
                }
            },
            Token::Placeholder(placeholder) => {
                let index = next_arg;
                let Some(arg) = args.get(index) else {
                    return Err(TemplateError::MissingArgument {
                        placeholder,
                        position,
                    });
                };
                next_arg += 1;

                let binder = Binder {
                    escaper,
                    placeholder,
                    position,
                };
                match &mut state {
                    State::Top => {
                        if arg.is_skip() {
                            return Err(TemplateError::InvalidSkip { index, position });
                        }
                        binder.bind(arg, &mut out)?;
                    }
                    State::InBlock { buf, render, .. } => {
                        if arg.is_skip() {
                            *render = false;
                            continue;
                        }
                        // Still validated when the block is already suppressed.
                        binder.bind(arg, buf)?;
                    }
                }
            }
        }
    }

    if let State::InBlock { open_at, .. } = state {
        return Err(TemplateError::UnmatchedBrace {
            brace: '{',
            position: open_at,
        });
    }

    if next_arg < args.len() {
        return Err(TemplateError::TooManyArguments {
            consumed: next_arg,
            given: args.len(),
        });
    }

    Ok(out)
}

/// Renders one argument for one placeholder.
struct Binder<'e, E: ?Sized> {
    escaper: &'e E,
    placeholder: Placeholder,
    position: usize,
}

impl<E: Escaper + ?Sized> Binder<'_, E> {
    /// `arg` is never the skip marker here.
    fn bind(&self, arg: &Value, out: &mut String) -> TemplateResult<()> {
        if arg.is_null() {
            return match self.placeholder {
                Placeholder::Array | Placeholder::Field => Err(TemplateError::NullNotAllowed {
                    placeholder: self.placeholder,
                    position: self.position,
                }),
                Placeholder::Generic | Placeholder::Int | Placeholder::Float => {
                    out.push_str("NULL");
                    Ok(())
                }
            };
        }

        match self.placeholder {
            Placeholder::Generic => {
                if arg.is_composite() {
                    return Err(TemplateError::UnexpectedArray {
                        position: self.position,
                    });
                }
                self.format(arg, out)
            }
            Placeholder::Int => {
                self.reject_nested_skip(arg)?;
                coerce::write_int(out, coerce::to_int(arg));
                Ok(())
            }
            Placeholder::Float => {
                self.reject_nested_skip(arg)?;
                self.write_float(coerce::to_float(arg), out)
            }
            Placeholder::Array => match arg {
                Value::List(_) | Value::Map(_) => self.format(arg, out),
                other => Err(TemplateError::NotArray {
                    found: other.type_name(),
                    position: self.position,
                }),
            },
            Placeholder::Field => self.fields(arg, out),
        }
    }

    /// Generic rendering shared by `?` and the elements of `?a`.
    fn format(&self, value: &Value, out: &mut String) -> TemplateResult<()> {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Bool(b) => out.push(if *b { '1' } else { '0' }),
            Value::Int(i) => coerce::write_int(out, *i),
            Value::Float(f) => self.write_float(*f, out)?,
            Value::Str(s) => {
                out.push('\'');
                out.push_str(&self.escaper.escape(s));
                out.push('\'');
            }
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.format(item, out)?;
                }
            }
            Value::Map(entries) => {
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.escaper.write_identifier(key, out);
                    out.push_str(" = ");
                    self.format(item, out)?;
                }
            }
            Value::Skip(_) => {
                return Err(TemplateError::SkipInComposite {
                    position: self.position,
                });
            }
            Value::Opaque(o) => {
                return Err(TemplateError::unsupported(o.type_name(), self.position));
            }
        }
        Ok(())
    }

    fn fields(&self, arg: &Value, out: &mut String) -> TemplateResult<()> {
        match arg {
            Value::Str(name) => {
                self.escaper.write_identifier(name, out);
                Ok(())
            }
            Value::List(names) => {
                for (i, name) in names.iter().enumerate() {
                    let name = match name {
                        Value::Str(name) => name,
                        Value::Skip(_) => {
                            return Err(TemplateError::SkipInComposite {
                                position: self.position,
                            });
                        }
                        other => {
                            return Err(TemplateError::FieldName {
                                found: other.type_name(),
                                position: self.position,
                            });
                        }
                    };
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.escaper.write_identifier(name, out);
                }
                Ok(())
            }
            other => Err(TemplateError::FieldName {
                found: other.type_name(),
                position: self.position,
            }),
        }
    }

    fn write_float(&self, value: f64, out: &mut String) -> TemplateResult<()> {
        if !value.is_finite() {
            return Err(TemplateError::NonFiniteFloat {
                value,
                position: self.position,
            });
        }
        coerce::write_float(out, value);
        Ok(())
    }

    /// Composites coerce to zero for `?d`/`?f`, but must not smuggle a skip marker.
    fn reject_nested_skip(&self, arg: &Value) -> TemplateResult<()> {
        if contains_skip(arg) {
            return Err(TemplateError::SkipInComposite {
                position: self.position,
            });
        }
        Ok(())
    }
}

fn contains_skip(value: &Value) -> bool {
    match value {
        Value::Skip(_) => true,
        Value::List(items) => items.iter().any(contains_skip),
        Value::Map(entries) => entries.iter().any(|(_, v)| contains_skip(v)),
        _ => false,
    }
}
