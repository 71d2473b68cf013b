// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escaping for free-form test output embedded in reports.

use std::borrow::Cow;

/// The HTML entity for a non-breaking space.
pub const NBSP: &str = "&nbsp;";

/// Escapes text for inclusion in a Markdown document.
///
/// * `_ * # [ ] \` and backticks are backslash-escaped.
/// * A space becomes `&nbsp;` and a tab becomes four of them, so indentation survives.
/// * A newline becomes a hard line break (two trailing spaces).
/// * `<` and `>` become `&lt;` and `&gt;`, so output cannot open HTML tags.
pub fn escape_markdown(input: &str) -> Cow<'_, str> {
    escape_with(input, markdown_replacement)
}

/// Escapes text for inclusion in an HTML document.
///
/// This escapes the same five characters as Go's `html.EscapeString`.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    escape_with(input, html_replacement)
}

fn markdown_replacement(c: char) -> Option<&'static str> {
    let replacement = match c {
        '_' => "\\_",
        '*' => "\\*",
        '#' => "\\#",
        '[' => "\\[",
        ']' => "\\]",
        '\\' => "\\\\",
        '`' => "\\`",
        ' ' => NBSP,
        '\t' => "&nbsp;&nbsp;&nbsp;&nbsp;",
        '\n' => "  \n",
        '<' => "&lt;",
        '>' => "&gt;",
        _ => return None,
    };
    Some(replacement)
}

fn html_replacement(c: char) -> Option<&'static str> {
    let replacement = match c {
        '<' => "&lt;",
        '>' => "&gt;",
        '&' => "&amp;",
        '\'' => "&#39;",
        '"' => "&#34;",
        _ => return None,
    };
    Some(replacement)
}

fn escape_with(input: &str, replacement: fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    // Borrow if there's nothing to escape, which is the common case for short lines.
    let Some(first) = input.find(|c| replacement(c).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + input.len() / 2);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match replacement(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
