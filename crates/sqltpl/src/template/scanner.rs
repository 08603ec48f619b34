use memchr::memchr3;
use std::fmt;

/// Placeholder kind, selected by the character after `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `?`: generic value formatting.
    Generic,
    /// `?d`: loose integer.
    Int,
    /// `?f`: loose float.
    Float,
    /// `?a`: list or map.
    Array,
    /// `?#`: identifier or list of identifiers.
    Field,
}

impl Placeholder {
    fn from_suffix(byte: u8) -> Option<Self> {
        match byte {
            b'd' => Some(Self::Int),
            b'f' => Some(Self::Float),
            b'a' => Some(Self::Array),
            b'#' => Some(Self::Field),
            _ => None,
        }
    }

    /// The placeholder as written in a template.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "?",
            Self::Int => "?d",
            Self::Float => "?f",
            Self::Array => "?a",
            Self::Field => "?#",
        }
    }

    /// Length of the token in the template, in bytes.
    pub(crate) fn token_len(self) -> usize {
        self.as_str().len()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Run of text copied verbatim.
    Literal(&'a str),
    OpenBlock,
    CloseBlock,
    Placeholder(Placeholder),
}

/// Splits a template into tokens, yielding each with its byte offset.
///
/// Literal runs are borrowed from the template. The structural characters
/// `?`, `{` and `}` are ASCII, so every split point is a char boundary.
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let special = memchr3(b'?', b'{', b'}', &bytes[start..]);

        match special {
            None => {
                self.pos = bytes.len();
                Some((start, Token::Literal(&self.src[start..])))
            }
            Some(0) => {
                let token = match bytes[start] {
                    b'{' => Token::OpenBlock,
                    b'}' => Token::CloseBlock,
                    _ => Token::Placeholder(
                        bytes
                            .get(start + 1)
                            .copied()
                            .and_then(Placeholder::from_suffix)
                            .unwrap_or(Placeholder::Generic),
                    ),
                };
                self.pos += match token {
                    Token::Placeholder(p) => p.token_len(),
                    _ => 1,
                };
                Some((start, token))
            }
            Some(n) => {
                self.pos = start + n;
                Some((start, Token::Literal(&self.src[start..start + n])))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<(usize, Token<'_>)> {
        Scanner::new(src).collect()
    }

    #[test]
    fn splits_literals_and_placeholders() {
        assert_eq!(
            tokens("id = ?d AND name = ?"),
            vec![
                (0, Token::Literal("id = ")),
                (5, Token::Placeholder(Placeholder::Int)),
                (7, Token::Literal(" AND name = ")),
                (19, Token::Placeholder(Placeholder::Generic)),
            ]
        );
    }

    #[test]
    fn unknown_suffix_starts_next_literal() {
        assert_eq!(
            tokens("?x?#"),
            vec![
                (0, Token::Placeholder(Placeholder::Generic)),
                (1, Token::Literal("x")),
                (2, Token::Placeholder(Placeholder::Field)),
            ]
        );
    }

    #[test]
    fn braces_are_tokens() {
        assert_eq!(
            tokens("{?a}"),
            vec![
                (0, Token::OpenBlock),
                (1, Token::Placeholder(Placeholder::Array)),
                (3, Token::CloseBlock),
            ]
        );
    }

    #[test]
    fn brace_after_question_mark_is_not_a_suffix() {
        assert_eq!(
            tokens("?{"),
            vec![
                (0, Token::Placeholder(Placeholder::Generic)),
                (1, Token::OpenBlock),
            ]
        );
    }

    #[test]
    fn multibyte_literals_stay_intact() {
        assert_eq!(
            tokens("имя = ?f"),
            vec![
                (0, Token::Literal("имя = ")),
                (9, Token::Placeholder(Placeholder::Float)),
            ]
        );
    }

    #[test]
    fn finds_each_structural_byte_in_long_text() {
        let filler = "x".repeat(100);
        let src = format!("{filler}}}{filler}{{{filler}?");
        assert_eq!(
            tokens(&src),
            vec![
                (0, Token::Literal(&src[..100])),
                (100, Token::CloseBlock),
                (101, Token::Literal(&src[101..201])),
                (201, Token::OpenBlock),
                (202, Token::Literal(&src[202..302])),
                (302, Token::Placeholder(Placeholder::Generic)),
            ]
        );
    }

    #[test]
    fn empty_template_has_no_tokens() {
        assert!(tokens("").is_empty());
    }
}
