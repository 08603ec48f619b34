use super::scanner::{Placeholder, Scanner, Token};
use crate::error::{TemplateError, TemplateResult};

/// A placeholder found by [`inspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderInfo {
    pub kind: Placeholder,
    /// Byte offset of the `?`.
    pub position: usize,
    /// Whether the placeholder sits inside a `{ ... }` block, i.e. whether it
    /// may be bound to the skip marker.
    pub in_block: bool,
}

/// Structure of a template, independent of any arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Placeholders in argument order.
    pub placeholders: Vec<PlaceholderInfo>,
    /// Number of conditional blocks.
    pub blocks: usize,
}

impl TemplateInfo {
    /// Number of arguments the template expects.
    pub fn arity(&self) -> usize {
        self.placeholders.len()
    }

    /// Number of placeholders of the given kind.
    pub fn count(&self, kind: Placeholder) -> usize {
        self.placeholders.iter().filter(|p| p.kind == kind).count()
    }
}

/// Validate a template's brace structure and list its placeholders.
///
/// Fails with the same structural errors [`crate::build`] would report,
/// without needing arguments.
pub fn inspect(template: &str) -> TemplateResult<TemplateInfo> {
    let mut info = TemplateInfo::default();
    let mut open_at: Option<usize> = None;

    for (position, token) in Scanner::new(template) {
        match token {
            Token::Literal(_) => {}
            Token::OpenBlock => {
                if open_at.is_some() {
                    return Err(TemplateError::Nesting { position });
                }
                open_at = Some(position);
            }
            Token::CloseBlock => {
                if open_at.take().is_none() {
                    return Err(TemplateError::UnmatchedBrace {
                        brace: '}',
                        position,
                    });
                }
                info.blocks += 1;
            }
            Token::Placeholder(kind) => info.placeholders.push(PlaceholderInfo {
                kind,
                position,
                in_block: open_at.is_some(),
            }),
        }
    }

    if let Some(position) = open_at {
        return Err(TemplateError::UnmatchedBrace {
            brace: '{',
            position,
        });
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn lists_placeholders_in_order() {
        let info = inspect("SELECT ?# FROM t WHERE id IN (?a){ AND block = ?d}").unwrap();
        assert_eq!(info.arity(), 3);
        assert_eq!(info.blocks, 1);
        assert_eq!(info.count(Placeholder::Int), 1);
        assert_eq!(
            info.placeholders
                .iter()
                .map(|p| (p.kind, p.in_block))
                .collect::<Vec<_>>(),
            vec![
                (Placeholder::Field, false),
                (Placeholder::Array, false),
                (Placeholder::Int, true),
            ]
        );
    }

    #[test]
    fn reports_structural_errors() {
        assert_eq!(inspect("{ {").unwrap_err().kind(), ErrorKind::Nesting);
        assert_eq!(inspect("a }").unwrap_err().kind(), ErrorKind::UnmatchedBrace);
        assert_eq!(
            inspect("x { y").unwrap_err(),
            TemplateError::UnmatchedBrace {
                brace: '{',
                position: 2
            }
        );
    }

    #[test]
    fn plain_sql_has_no_placeholders() {
        let info = inspect("SELECT 1").unwrap();
        assert_eq!(info, TemplateInfo::default());
    }
}
