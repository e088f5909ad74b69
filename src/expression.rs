//! Sed-replace expression parser
//!
//! Parses the single-substitution syntax `s<D><match><D><replace><D>[i][g]`,
//! where `<D>` is whatever character follows the leading `s`.
//!
//! The delimiter scan walks the expression one character at a time and tracks
//! escape state, so `\<D>` stays literal text instead of splitting a segment.
//! Only `\<D>` is unescaped; every other backslash sequence is handed to the
//! regex compiler untouched.

use crate::error::FormatError;

const ESCAPE: char = '\\';

/// The pieces of a sed-replace expression before compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression {
    delimiter: char,
    match_text: String,
    replace_text: String,
    case_insensitive: bool,
    global: bool,
}

impl ParsedExpression {
    /// The separator character chosen after the leading `s`
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Pattern text with escaped delimiters resolved
    pub fn match_text(&self) -> &str {
        &self.match_text
    }

    /// Replacement template with escaped delimiters resolved
    pub fn replace_text(&self) -> &str {
        &self.replace_text
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn global(&self) -> bool {
        self.global
    }

    /// Serialize back into `s<D>match<D>replace<D>flags` form.
    ///
    /// Delimiters inside the texts are re-escaped and flags are written in
    /// canonical order (`i` then `g`), so parsing the output yields an equal
    /// `ParsedExpression`.
    pub fn to_expression(&self) -> String {
        let mut out = String::with_capacity(self.match_text.len() + self.replace_text.len() + 6);
        out.push('s');
        out.push(self.delimiter);
        push_escaped(&mut out, &self.match_text, self.delimiter);
        out.push(self.delimiter);
        push_escaped(&mut out, &self.replace_text, self.delimiter);
        out.push(self.delimiter);
        if self.case_insensitive {
            out.push('i');
        }
        if self.global {
            out.push('g');
        }
        out
    }
}

/// Parse a sed-replace expression
///
/// # Examples
///
/// ```
/// use rename::parse_expression;
///
/// let parsed = parse_expression(r"s/a\/b/c/g").unwrap();
/// assert_eq!(parsed.match_text(), "a/b");
/// assert_eq!(parsed.replace_text(), "c");
/// assert!(parsed.global());
/// ```
pub fn parse_expression(expr: &str) -> Result<ParsedExpression, FormatError> {
    let mut chars = expr.chars();

    if chars.next() != Some('s') {
        return Err(FormatError::MissingCommand);
    }

    let delimiter = chars.next().ok_or(FormatError::MissingDelimiter)?;
    if delimiter == ESCAPE || delimiter == '\n' {
        return Err(FormatError::InvalidDelimiter(delimiter));
    }

    // The delimiter after 's' opens the first segment; every later unescaped
    // delimiter closes one.
    let mut segments: Vec<String> = Vec::with_capacity(3);
    let mut current = String::new();
    let mut escaped = false;

    for c in chars {
        if escaped {
            if c != delimiter {
                current.push(ESCAPE);
            }
            current.push(c);
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == delimiter {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    if escaped {
        return Err(FormatError::UnterminatedEscape);
    }
    segments.push(current);

    let [match_text, replace_text, flags] =
        <[String; 3]>::try_from(segments).map_err(|segments| {
            let found = segments.len();
            if found < 3 {
                FormatError::TooFewDelimiters { found }
            } else {
                FormatError::TooManyDelimiters { found }
            }
        })?;

    let mut case_insensitive = false;
    let mut global = false;
    for flag in flags.chars() {
        match flag {
            'i' => case_insensitive = true,
            'g' => global = true,
            other => return Err(FormatError::UnknownFlag(other)),
        }
    }

    Ok(ParsedExpression {
        delimiter,
        match_text,
        replace_text,
        case_insensitive,
        global,
    })
}

/// Write `text` with every literal delimiter escaped.
///
/// Backslash pairs are copied as they are, mirroring how the parser consumes
/// them, so a delimiter that follows an escaped backslash is still escaped.
fn push_escaped(out: &mut String, text: &str, delimiter: char) {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            out.push(c);
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else if c == delimiter {
            out.push(ESCAPE);
            out.push(c);
        } else {
            out.push(c);
        }
    }
}
