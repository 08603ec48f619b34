//! Error types for sqltpl

use crate::template::Placeholder;
use thiserror::Error;

/// Result type alias for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors raised while compiling a template against its arguments.
///
/// Every error aborts the whole build; no partial SQL is ever returned.
/// Positions are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// `{` seen while a conditional block is already open
    #[error("Nested conditional blocks are not supported (position {position})")]
    Nesting { position: usize },

    /// `}` without an open block, or `{` never closed
    #[error("Unmatched '{brace}' at position {position}")]
    UnmatchedBrace { brace: char, position: usize },

    /// Placeholder with no argument left to consume
    #[error("No argument for {placeholder} at position {position}")]
    MissingArgument {
        placeholder: Placeholder,
        position: usize,
    },

    /// Arguments left over after the last placeholder
    #[error("Too many arguments: template consumed {consumed}, got {given}")]
    TooManyArguments { consumed: usize, given: usize },

    /// Skip value bound to a placeholder outside a conditional block
    #[error("Cannot skip argument #{index} outside of a conditional block (position {position})")]
    InvalidSkip { index: usize, position: usize },

    /// NULL passed to `?a` or `?#`
    #[error("Argument for {placeholder} at position {position} cannot be NULL")]
    NullNotAllowed {
        placeholder: Placeholder,
        position: usize,
    },

    /// Non-composite passed to `?a`
    #[error("Argument for ?a at position {position} is not an array (got {found})")]
    NotArray { found: &'static str, position: usize },

    /// `?#` argument that is not a string or a list of strings
    #[error(
        "Argument for ?# at position {position} must be a string or a list of strings (got {found})"
    )]
    FieldName { found: &'static str, position: usize },

    /// Skip value nested inside a list or map argument
    #[error("Skip value inside a composite argument at position {position}")]
    SkipInComposite { position: usize },

    /// Value with no SQL representation
    #[error("Unsupported argument type '{type_name}' at position {position}")]
    UnsupportedType { type_name: String, position: usize },

    /// List or map bound to an untyped `?`
    #[error("Array argument for untyped ? at position {position}; use ?a")]
    UnexpectedArray { position: usize },

    /// NaN or infinity reaching the output
    #[error("Non-finite float {value} at position {position} has no SQL literal")]
    NonFiniteFloat { value: f64, position: usize },
}

/// Fieldless discriminant of [`TemplateError`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Nesting,
    UnmatchedBrace,
    MissingArgument,
    TooManyArguments,
    InvalidSkip,
    NullNotAllowed,
    NotArray,
    FieldName,
    SkipInComposite,
    UnsupportedType,
    UnexpectedArray,
    NonFiniteFloat,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nesting => "nesting",
            Self::UnmatchedBrace => "unmatched_brace",
            Self::MissingArgument => "missing_argument",
            Self::TooManyArguments => "too_many_arguments",
            Self::InvalidSkip => "invalid_skip",
            Self::NullNotAllowed => "null_not_allowed",
            Self::NotArray => "not_array",
            Self::FieldName => "field_name",
            Self::SkipInComposite => "skip_in_composite",
            Self::UnsupportedType => "unsupported_type",
            Self::UnexpectedArray => "unexpected_array",
            Self::NonFiniteFloat => "non_finite_float",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TemplateError {
    /// The kind of this error, without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Nesting { .. } => ErrorKind::Nesting,
            Self::UnmatchedBrace { .. } => ErrorKind::UnmatchedBrace,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::TooManyArguments { .. } => ErrorKind::TooManyArguments,
            Self::InvalidSkip { .. } => ErrorKind::InvalidSkip,
            Self::NullNotAllowed { .. } => ErrorKind::NullNotAllowed,
            Self::NotArray { .. } => ErrorKind::NotArray,
            Self::FieldName { .. } => ErrorKind::FieldName,
            Self::SkipInComposite { .. } => ErrorKind::SkipInComposite,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::UnexpectedArray { .. } => ErrorKind::UnexpectedArray,
            Self::NonFiniteFloat { .. } => ErrorKind::NonFiniteFloat,
        }
    }

    /// Byte offset in the template where the error was detected.
    ///
    /// `None` for errors only detectable at end of input (argument surplus).
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::TooManyArguments { .. } => None,
            Self::Nesting { position }
            | Self::UnmatchedBrace { position, .. }
            | Self::MissingArgument { position, .. }
            | Self::InvalidSkip { position, .. }
            | Self::NullNotAllowed { position, .. }
            | Self::NotArray { position, .. }
            | Self::FieldName { position, .. }
            | Self::SkipInComposite { position }
            | Self::UnsupportedType { position, .. }
            | Self::UnexpectedArray { position }
            | Self::NonFiniteFloat { position, .. } => Some(*position),
        }
    }

    /// Check if this error comes from the template's brace structure
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Nesting { .. } | Self::UnmatchedBrace { .. })
    }

    /// Check if this error is an argument count mismatch
    pub fn is_arity(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::TooManyArguments { .. }
        )
    }

    pub(crate) fn unsupported(type_name: impl Into<String>, position: usize) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_position_follow_variant() {
        let err = TemplateError::NotArray {
            found: "int",
            position: 7,
        };
        assert_eq!(err.kind(), ErrorKind::NotArray);
        assert_eq!(err.position(), Some(7));
        assert!(!err.is_structural());

        let err = TemplateError::TooManyArguments {
            consumed: 1,
            given: 3,
        };
        assert_eq!(err.position(), None);
        assert!(err.is_arity());
    }

    #[test]
    fn messages_mention_placeholder() {
        let err = TemplateError::MissingArgument {
            placeholder: Placeholder::Int,
            position: 12,
        };
        assert_eq!(err.to_string(), "No argument for ?d at position 12");

        let err = TemplateError::UnmatchedBrace {
            brace: '}',
            position: 3,
        };
        assert_eq!(err.to_string(), "Unmatched '}' at position 3");
    }
}
