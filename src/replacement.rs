//! Replacement template resolution
//!
//! The template is literal text except for group references:
//! - `$0` is the whole match, `$1`, `$2`, ... are capture groups.
//!   All digits following `$` belong to the reference.
//! - `${N}` braces a reference so a digit may follow it (`${1}0`).
//! - `$$` is a literal `$`.
//!
//! Any other `$` is literal. This resolver is used instead of the regex
//! crate's own expansion, which would also accept named references like
//! `$name` and treat `$1a` as a group called `1a`.

use regex::Captures;

use crate::error::PatternError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Group(usize),
}

/// A replacement template, kept as written and scanned on every expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Highest group number the template refers to
    pub fn max_group(&self) -> Option<usize> {
        self.tokens()
            .filter_map(|token| match token {
                Token::Group(n) => Some(n),
                Token::Literal(_) => None,
            })
            .max()
    }

    /// Check every reference against the pattern's group count.
    ///
    /// `captures_len` counts the implicit whole-match group, as returned by
    /// `Regex::captures_len`.
    pub fn validate(&self, captures_len: usize) -> Result<(), PatternError> {
        let available = captures_len.saturating_sub(1);
        match self.max_group() {
            Some(group) if group > available => {
                Err(PatternError::GroupOutOfRange { group, available })
            }
            _ => Ok(()),
        }
    }

    /// Append the expansion of this template for one match to `dst`.
    ///
    /// Groups that did not take part in the match expand to nothing.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for token in self.tokens() {
            match token {
                Token::Literal(text) => dst.push_str(text),
                Token::Group(n) => {
                    if let Some(m) = caps.get(n) {
                        dst.push_str(m.as_str());
                    }
                }
            }
        }
    }

    fn tokens(&self) -> Tokens<'_> {
        Tokens { rest: &self.raw }
    }
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(pos) = self.rest.find('$') else {
            let literal = self.rest;
            self.rest = "";
            return Some(Token::Literal(literal));
        };

        if pos > 0 {
            let (literal, rest) = self.rest.split_at(pos);
            self.rest = rest;
            return Some(Token::Literal(literal));
        }

        let after = &self.rest[1..];
        if let Some(rest) = after.strip_prefix('$') {
            self.rest = rest;
            return Some(Token::Literal("$"));
        }

        match group_reference(after) {
            Some((group, consumed)) => {
                self.rest = &after[consumed..];
                Some(Token::Group(group))
            }
            None => {
                self.rest = after;
                Some(Token::Literal("$"))
            }
        }
    }
}

/// Parse the group number right after a `$`, returning it with the number of
/// bytes it occupies.
fn group_reference(s: &str) -> Option<(usize, usize)> {
    if let Some(inner) = s.strip_prefix('{') {
        let end = inner.find('}')?;
        let digits = &inner[..end];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return Some((parse_group_number(digits), end + 2));
    }

    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    Some((parse_group_number(&s[..len]), len))
}

// Numbers too large for usize can never name a real group.
fn parse_group_number(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}
