//! Error types for expression parsing and compilation
//!
//! Every failure here happens while building an [`Engine`](crate::Engine),
//! before any file is looked at. Applying a compiled engine never fails.

use thiserror::Error;

/// Result type for expression construction
pub type ExpressionResult<T> = Result<T, ExpressionError>;

/// Any failure while turning an expression string into an engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The expression text is malformed
    #[error("Invalid sed-replace expression: {0}")]
    Format(#[from] FormatError),

    /// The match text or the replacement template cannot be compiled
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}

impl ExpressionError {
    pub fn is_format(&self) -> bool {
        matches!(self, ExpressionError::Format(_))
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, ExpressionError::Pattern(_))
    }
}

/// Malformed `s<D>match<D>replace<D>flags` syntax
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expression must start with 's' followed by a delimiter, e.g. s/old/new/")]
    MissingCommand,

    #[error("missing delimiter after 's'")]
    MissingDelimiter,

    #[error("'{}' cannot be used as a delimiter", .0.escape_default())]
    InvalidDelimiter(char),

    #[error("expected 3 delimiters but found {found}; syntax is s/<match>/<replace>/[i][g]")]
    TooFewDelimiters { found: usize },

    #[error("found {found} unescaped delimiters, expected 3; escape literal delimiters with a backslash")]
    TooManyDelimiters { found: usize },

    #[error("expression ends with an unterminated escape '\\'")]
    UnterminatedEscape,

    #[error("unknown flag '{}', only 'i' and 'g' are supported", .0.escape_default())]
    UnknownFlag(char),
}

/// The match pattern or the replacement template is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("cannot compile '{pattern}': {message}{}", suggestion_suffix(.suggestion))]
    Compile {
        pattern: String,
        message: String,
        suggestion: Option<String>,
    },

    #[error("replacement refers to group ${group}, but the pattern only has {available} capture group(s)")]
    GroupOutOfRange { group: usize, available: usize },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(hint) => format!("\n  Suggestion: {}", hint),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let format: ExpressionError = FormatError::UnknownFlag('x').into();
        let pattern: ExpressionError = PatternError::GroupOutOfRange { group: 3, available: 1 }.into();

        assert!(format.is_format());
        assert!(!format.is_pattern());
        assert!(pattern.is_pattern());
        assert!(!pattern.is_format());
    }

    #[test]
    fn test_messages() {
        let err: ExpressionError = FormatError::UnknownFlag('x').into();
        assert!(err.to_string().contains("unknown flag 'x'"));

        let err = PatternError::Compile {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
            suggestion: Some("Add a closing ')'.".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot compile '('"));
        assert!(msg.contains("Suggestion: Add a closing ')'."));
    }

    #[test]
    fn test_invalid_delimiter_is_printable() {
        let err = FormatError::InvalidDelimiter('\n');
        assert_eq!(err.to_string(), "'\\n' cannot be used as a delimiter");
    }
}
