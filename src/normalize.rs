// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Line-level cleanup of free text taken from a board.
//!
//! Card descriptions and comments are Markdown written by board users, with
//! whatever heading depth they happened to pick. Before that text is nested
//! under a card heading, each line is normalized:
//!
//! - A line that starts and ends with `#` is rewritten as a `##...##` heading.
//! - Otherwise the first bare URL on the line is turned into a Markdown link.
//!
//! Single-line contexts (titles, list names, attachment names) only need
//! their embedded newlines collapsed, see [`flatten_inline`].

use regex::Regex;
use std::sync::OnceLock;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// A 3-4 letter scheme (optionally with a trailing `s`), `://`, then
/// everything up to the next whitespace.
fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"\b[A-Za-z]{3,4}s?://\S+").expect("valid URL regex"))
}

/// Collapses embedded newlines into spaces for single-line rendering.
///
/// ```
/// use trello2md::normalize::flatten_inline;
///
/// assert_eq!(flatten_inline("two\nlines"), "two lines");
/// ```
#[must_use]
pub fn flatten_inline(text: &str) -> String {
    text.replace('\n', " ")
}

/// Normalizes a block of free text line by line.
///
/// Every output line is terminated by `\n`, so empty input yields an empty
/// string and already-normalized text comes back unchanged.
///
/// ```
/// use trello2md::normalize::normalize_block;
///
/// let text = "### Notes ###\nsee http://example.com/x for info";
/// assert_eq!(
///     normalize_block(text),
///     "## Notes ##\nsee [http://example.com/x](http://example.com/x) for info\n"
/// );
/// ```
#[must_use]
pub fn normalize_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(&normalize_line(line));
        out.push('\n');
    }
    out
}

/// Normalizes a single line: headings are escalated, anything else is
/// autolinked.
#[must_use]
pub fn normalize_line(line: &str) -> String {
    if is_heading(line) {
        escalate_heading(line)
    } else {
        autolink_line(line)
    }
}

/// Returns `true` if the line both starts and ends with a `#` marker.
fn is_heading(line: &str) -> bool {
    line.starts_with('#') && line.ends_with('#')
}

/// Rewrites a `#`-delimited heading of any depth as `##<body>##`.
///
/// A line of nothing but `#` becomes `####`.
#[must_use]
pub fn escalate_heading(line: &str) -> String {
    format!("##{}##", flatten_inline(line.trim_matches('#')))
}

/// Turns the first bare URL on a line into a `[URL](URL)` link.
///
/// URLs that are already part of a Markdown or angle-bracket link are
/// skipped. At most one URL per line is linked.
#[must_use]
pub fn autolink_line(line: &str) -> String {
    let Some(found) = url_regex()
        .find_iter(line)
        .find(|m| !is_link_context(&line[..m.start()]))
    else {
        return line.to_owned();
    };

    let prefix = &line[..found.start()];
    let url = found.as_str();
    let suffix = &line[found.end()..];
    format!("{prefix}[{url}]({url}){suffix}")
}

/// Returns `true` if text ending in `prefix` means the URL that follows is
/// already a link label or target.
fn is_link_context(prefix: &str) -> bool {
    prefix.ends_with('[') || prefix.ends_with('<') || prefix.ends_with("](")
}
