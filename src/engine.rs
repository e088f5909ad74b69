//! Substitution engine
//!
//! An [`Engine`] is built once per run from the expression string and then
//! applied to every file name. It is immutable after construction, so a
//! single engine can be shared by reference (or across threads) freely.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::ExpressionResult;
use crate::expression::{ParsedExpression, parse_expression};
use crate::highlight::HighlightFormatter;
use crate::regex_error;
use crate::replacement::Template;

/// One substituted span of a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range of the match in the original name
    pub span: Range<usize>,
    /// Expanded replacement text for that match
    pub replacement: String,
}

#[derive(Debug, Clone)]
struct CompiledExpression {
    regex: Regex,
    template: Template,
    global: bool,
}

/// A compiled sed-replace expression
#[derive(Debug, Clone)]
pub struct Engine {
    parsed: ParsedExpression,
    compiled: CompiledExpression,
}

impl Engine {
    /// Parse and compile `expr`.
    ///
    /// Malformed syntax fails with [`ExpressionError::Format`]; an invalid
    /// regex or a replacement referring to a missing group fails with
    /// [`ExpressionError::Pattern`].
    ///
    /// [`ExpressionError::Format`]: crate::ExpressionError::Format
    /// [`ExpressionError::Pattern`]: crate::ExpressionError::Pattern
    pub fn new(expr: &str) -> ExpressionResult<Self> {
        let parsed = parse_expression(expr)?;
        Self::from_parsed(parsed)
    }

    pub fn from_parsed(parsed: ParsedExpression) -> ExpressionResult<Self> {
        let regex = RegexBuilder::new(parsed.match_text())
            .case_insensitive(parsed.case_insensitive())
            .build()
            .map_err(|err| regex_error::describe(&err, parsed.match_text()))?;

        let template = Template::new(parsed.replace_text());
        template.validate(regex.captures_len())?;

        let compiled = CompiledExpression {
            regex,
            template,
            global: parsed.global(),
        };

        Ok(Self { parsed, compiled })
    }

    pub fn parsed(&self) -> &ParsedExpression {
        &self.parsed
    }

    /// The substitutions this expression makes in `name`, left to right.
    ///
    /// Without the `g` flag there is at most one edit.
    pub fn edits(&self, name: &str) -> Vec<Edit> {
        let limit = if self.compiled.global { usize::MAX } else { 1 };

        self.compiled
            .regex
            .captures_iter(name)
            .take(limit)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let mut replacement = String::new();
                self.compiled.template.expand(&caps, &mut replacement);
                Some(Edit {
                    span: whole.range(),
                    replacement,
                })
            })
            .collect()
    }

    /// Destination name for `name`; `name` itself when nothing matches
    pub fn run(&self, name: &str) -> String {
        apply_edits(name, &self.edits(name))
    }

    /// Highlighted `(from, to)` pair for previews.
    ///
    /// When the substitution leaves `name` unchanged both strings are equal
    /// and carry no emphasis, so `from == to` means there is nothing to rename.
    pub fn highlight(&self, name: &str, formatter: &HighlightFormatter) -> (String, String) {
        let edits = self.edits(name);
        if apply_edits(name, &edits) == name {
            return formatter.render(name, &[]);
        }
        formatter.render(name, &edits)
    }
}

/// Splice `edits` into `name`
pub fn apply_edits(name: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last = 0;
    for edit in edits {
        out.push_str(&name[last..edit.span.start]);
        out.push_str(&edit.replacement);
        last = edit.span.end;
    }
    out.push_str(&name[last..]);
    out
}

// Compile-time check that engines can be shared between threads.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
};
