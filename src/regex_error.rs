//! Regex Error Handling
//!
//! Turns `regex::Error` into a [`PatternError`] with a short message and, when
//! the failure is recognizable, a suggestion for fixing the pattern.

use regex::Error as RegexError;

use crate::error::PatternError;

/// Kinds of compile failure worth a dedicated hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexErrorType {
    UnclosedGroup,
    UnclosedClass,
    UnopenedGroup,
    InvalidQuantifier,
    InvalidEscape,
    Lookaround,
    Backreference,
    TooBig,
    Other,
}

/// Build a [`PatternError`] for a pattern that failed to compile
pub fn describe(err: &RegexError, pattern: &str) -> PatternError {
    let message = summarize(err);
    let error_type = classify(err, &message);

    PatternError::Compile {
        pattern: pattern.to_string(),
        message,
        suggestion: suggestion(error_type, pattern),
    }
}

/// The regex crate reports syntax errors as a multi-line block ending with
/// `error: <reason>`; keep only the reason.
fn summarize(err: &RegexError) -> String {
    let full = err.to_string();
    full.lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("error:"))
        .map(|reason| reason.trim().to_string())
        .unwrap_or(full)
}

pub fn classify(err: &RegexError, message: &str) -> RegexErrorType {
    if matches!(err, RegexError::CompiledTooBig(_)) {
        return RegexErrorType::TooBig;
    }

    let lower = message.to_lowercase();
    if lower.contains("unclosed group") {
        RegexErrorType::UnclosedGroup
    } else if lower.contains("unclosed character class") {
        RegexErrorType::UnclosedClass
    } else if lower.contains("unopened group") {
        RegexErrorType::UnopenedGroup
    } else if lower.contains("look-around") || lower.contains("lookaround") {
        RegexErrorType::Lookaround
    } else if lower.contains("backreference") {
        RegexErrorType::Backreference
    } else if lower.contains("repetition") || lower.contains("quantifier") {
        RegexErrorType::InvalidQuantifier
    } else if lower.contains("escape") {
        RegexErrorType::InvalidEscape
    } else {
        RegexErrorType::Other
    }
}

fn suggestion(error_type: RegexErrorType, pattern: &str) -> Option<String> {
    match error_type {
        RegexErrorType::UnclosedGroup => Some(
            "Add a closing ')', or write '\\(' to match a literal parenthesis.".to_string(),
        ),
        RegexErrorType::UnclosedClass => Some(
            "Add a closing ']', or write '\\[' to match a literal bracket.".to_string(),
        ),
        RegexErrorType::UnopenedGroup => {
            Some("Write '\\)' to match a literal closing parenthesis.".to_string())
        }
        RegexErrorType::InvalidQuantifier => {
            if pattern.starts_with(['*', '+', '?']) {
                Some(format!(
                    "'{}' at the start of a pattern has nothing to repeat. \
                     To match names ending in something, try '.*{}'.",
                    &pattern[..1],
                    &pattern[1..]
                ))
            } else {
                Some(
                    "A quantifier (*, +, ?, {n,m}) must follow a character or group; \
                     escape it with '\\' to match it literally."
                        .to_string(),
                )
            }
        }
        RegexErrorType::InvalidEscape => Some(
            "Unknown escape sequence. Common escapes are \\. \\d \\w \\s; \
             a literal backslash is '\\\\'."
                .to_string(),
        ),
        RegexErrorType::Lookaround => Some(
            "Look-ahead and look-behind are not supported. \
             Capture the surrounding text with a group and put it back with $1."
                .to_string(),
        ),
        RegexErrorType::Backreference => Some(
            "Backreferences like \\1 are not supported in the match pattern; \
             use $1 in the replacement instead."
                .to_string(),
        ),
        RegexErrorType::TooBig => {
            Some("The pattern is too large; simplify repetitions like {1000}.".to_string())
        }
        RegexErrorType::Other => None,
    }
}
