//! Before/after rendering of a substitution for previews
//!
//! Two styles are available:
//! - `Color`: matched text red, replacement text green (ANSI, via `colored`)
//! - `Markers`: plain text in wdiff style, `[-matched-]` and `{+replacement+}`
//!
//! In `Markers` style a backslash escapes any literal character that would
//! otherwise read as part of a marker, so `strip` recovers the text exactly.

use std::io::IsTerminal;

use colored::*;

use crate::config::ColorMode;
use crate::engine::Edit;

const REMOVED_OPEN: &str = "[-";
const REMOVED_CLOSE: &str = "-]";
const INSERTED_OPEN: &str = "{+";
const INSERTED_CLOSE: &str = "+}";
const MARKERS: [&str; 4] = [REMOVED_OPEN, REMOVED_CLOSE, INSERTED_OPEN, INSERTED_CLOSE];
const ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStyle {
    Color,
    Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightFormatter {
    style: HighlightStyle,
}

/// One piece of a rendered name
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Plain(&'a str),
    Removed(&'a str),
    Inserted(&'a str),
}

impl Default for HighlightFormatter {
    fn default() -> Self {
        Self::new(HighlightStyle::Markers)
    }
}

impl HighlightFormatter {
    pub fn new(style: HighlightStyle) -> Self {
        Self { style }
    }

    /// Pick a style for stdout according to the configured color mode
    pub fn detect(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Always => {
                colored::control::set_override(true);
                Self::new(HighlightStyle::Color)
            }
            ColorMode::Never => Self::new(HighlightStyle::Markers),
            ColorMode::Auto => {
                // https://no-color.org/
                if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
                    Self::new(HighlightStyle::Markers)
                } else {
                    Self::new(HighlightStyle::Color)
                }
            }
        }
    }

    pub fn style(&self) -> HighlightStyle {
        self.style
    }

    /// Render `name` with each edit's matched span emphasized, and the
    /// substituted name with each edit's replacement emphasized.
    ///
    /// `edits` must be sorted, non-overlapping, and lie on char boundaries of
    /// `name`, which is what the engine produces. With no edits both strings
    /// are equal.
    pub fn render(&self, name: &str, edits: &[Edit]) -> (String, String) {
        let mut from = Vec::with_capacity(edits.len() * 2 + 1);
        let mut to = Vec::with_capacity(edits.len() * 2 + 1);
        let mut last = 0;

        for edit in edits {
            let unchanged = &name[last..edit.span.start];
            from.push(Segment::Plain(unchanged));
            to.push(Segment::Plain(unchanged));

            from.push(Segment::Removed(&name[edit.span.clone()]));
            to.push(Segment::Inserted(&edit.replacement));

            last = edit.span.end;
        }

        from.push(Segment::Plain(&name[last..]));
        to.push(Segment::Plain(&name[last..]));
        (self.join(&from), self.join(&to))
    }

    /// Remove this style's emphasis from a rendered string
    pub fn strip(&self, rendered: &str) -> String {
        match self.style {
            HighlightStyle::Color => strip_ansi(rendered),
            HighlightStyle::Markers => strip_markers(rendered),
        }
    }

    fn join(&self, segments: &[Segment<'_>]) -> String {
        match self.style {
            HighlightStyle::Color => join_colored(segments),
            HighlightStyle::Markers => join_markers(segments),
        }
    }
}

fn join_colored(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        // Empty spans have nothing to show
        match *segment {
            Segment::Plain(text) => out.push_str(text),
            Segment::Removed(text) if !text.is_empty() => {
                out.push_str(&text.red().bold().to_string())
            }
            Segment::Inserted(text) if !text.is_empty() => {
                out.push_str(&text.green().bold().to_string())
            }
            _ => {}
        }
    }
    out
}

fn join_markers(segments: &[Segment<'_>]) -> String {
    // (char, is literal text)
    let mut tokens: Vec<(char, bool)> = Vec::new();
    for segment in segments {
        let (text, open, close) = match *segment {
            Segment::Plain(text) => (text, "", ""),
            Segment::Removed(text) => (text, REMOVED_OPEN, REMOVED_CLOSE),
            Segment::Inserted(text) => (text, INSERTED_OPEN, INSERTED_CLOSE),
        };
        if text.is_empty() {
            continue;
        }
        tokens.extend(open.chars().map(|c| (c, false)));
        tokens.extend(text.chars().map(|c| (c, true)));
        tokens.extend(close.chars().map(|c| (c, false)));
    }

    let mut out = String::with_capacity(tokens.len());
    for (i, &(c, literal)) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(|&(n, _)| n);
        if literal && (c == ESCAPE || next.is_some_and(|n| is_marker(c, n))) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

fn is_marker(first: char, second: char) -> bool {
    MARKERS.iter().any(|marker| {
        let mut chars = marker.chars();
        chars.next() == Some(first) && chars.next() == Some(second)
    })
}

/// Drop markers and undo escapes in one left-to-right pass
fn strip_markers(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            out.push(chars.next().unwrap_or(ESCAPE));
            continue;
        }
        if let Some(&next) = chars.peek() {
            if is_marker(c, next) {
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Drop ANSI SGR sequences (`ESC [ ... m`)
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, replacement: &str) -> Edit {
        Edit {
            span: start..end,
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_markers_single_edit() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);
        let (from, to) = formatter.render("foo1.txt", &[edit(0, 3, "bar")]);
        assert_eq!(from, "[-foo-]1.txt");
        assert_eq!(to, "{+bar+}1.txt");
    }

    #[test]
    fn test_markers_multiple_edits() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);
        let (from, to) = formatter.render("a-a", &[edit(0, 1, "b"), edit(2, 3, "b")]);
        assert_eq!(from, "[-a-]-[-a-]");
        assert_eq!(to, "{+b+}-{+b+}");
    }

    #[test]
    fn test_markers_skip_empty_spans() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);

        // Deletion: nothing inserted
        let (from, to) = formatter.render("foo.txt", &[edit(3, 7, "")]);
        assert_eq!(from, "foo[-.txt-]");
        assert_eq!(to, "foo");

        // Insertion at an empty match: nothing removed
        let (from, to) = formatter.render("foo", &[edit(0, 0, "x")]);
        assert_eq!(from, "foo");
        assert_eq!(to, "{+x+}foo");
    }

    #[test]
    fn test_no_edits_is_identity() {
        let formatter = HighlightFormatter::default();
        let (from, to) = formatter.render("plain.txt", &[]);
        assert_eq!(from, "plain.txt");
        assert_eq!(to, "plain.txt");
    }

    #[test]
    fn test_strip_markers() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);
        assert_eq!(formatter.strip("{+bar+}1.txt"), "bar1.txt");
        assert_eq!(formatter.strip("[-foo-]1.txt"), "foo1.txt");
    }

    #[test]
    fn test_color_render_and_strip() {
        colored::control::set_override(true);
        let formatter = HighlightFormatter::new(HighlightStyle::Color);
        let (from, to) = formatter.render("foo1.txt", &[edit(0, 3, "bar")]);

        assert!(from.contains('\x1b'));
        assert!(to.contains('\x1b'));
        assert_eq!(formatter.strip(&from), "foo1.txt");
        assert_eq!(formatter.strip(&to), "bar1.txt");
    }

    #[test]
    fn test_strip_ansi_keeps_plain_text() {
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[0m!"), "red!");
    }

    #[test]
    fn test_markers_escape_marker_text() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);

        let (from, to) = formatter.render("a-].txt", &[edit(0, 1, "b")]);
        assert_eq!(from, "[-a-]\\-].txt");
        assert_eq!(to, "{+b+}\\-].txt");
        assert_eq!(formatter.strip(&from), "a-].txt");
        assert_eq!(formatter.strip(&to), "b-].txt");

        let (_, to) = formatter.render("x [-draft-].txt", &[edit(0, 1, "y")]);
        assert_eq!(formatter.strip(&to), "y [-draft-].txt");

        // Replacement text that looks like a marker
        let (_, to) = formatter.render("abc", &[edit(0, 1, "{+")]);
        assert_eq!(formatter.strip(&to), "{+bc");
    }

    #[test]
    fn test_markers_escape_next_to_markers() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);

        // A literal '[' right before a closing "-]"
        let (from, _) = formatter.render("a[b", &[edit(0, 2, "x")]);
        assert_eq!(from, "[-a\\[-]b");
        assert_eq!(formatter.strip(&from), "a[b");

        // Text joined across a skipped empty span
        let (from, to) = formatter.render("x[-y", &[edit(2, 2, "")]);
        assert_eq!(from, to);
        assert_eq!(formatter.strip(&from), "x[-y");
    }

    #[test]
    fn test_markers_escape_backslash() {
        let formatter = HighlightFormatter::new(HighlightStyle::Markers);
        let (from, to) = formatter.render("a\\b", &[edit(2, 3, "c")]);
        assert_eq!(from, "a\\\\[-b-]");
        assert_eq!(formatter.strip(&from), "a\\b");
        assert_eq!(formatter.strip(&to), "a\\c");
    }

    #[test]
    fn test_detect_never_uses_markers() {
        let formatter = HighlightFormatter::detect(ColorMode::Never);
        assert_eq!(formatter.style(), HighlightStyle::Markers);
    }
}
